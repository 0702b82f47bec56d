//! Export jobs: the queue the API pushes to, the mailer and the worker loop
//! run by the `analytics-worker` binary.

pub mod mailer;
pub mod queue;
pub mod worker;

pub use mailer::{ExportMail, Mailer};
pub use queue::{ExportJob, ExportQueue, RedisExportQueue};
pub use worker::ExportWorker;
