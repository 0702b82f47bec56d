pub mod analytic_view;
pub mod auth;
pub mod issue;
pub mod label;
pub mod workflow;
pub mod workspace;
pub mod workspace_member;

pub use analytic_view::*;
pub use auth::*;
pub use issue::*;
pub use label::*;
pub use workflow::*;
pub use workspace::*;
pub use workspace_member::*;
