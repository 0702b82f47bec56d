pub mod analytic_views;
pub mod issues;
pub mod labels;
pub mod workflows;
pub mod workspace_members;
pub mod workspaces;
