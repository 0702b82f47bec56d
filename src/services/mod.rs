pub mod analytic_views_service;
pub mod analytics_service;
pub mod context;
pub mod export_service;
pub mod workspaces_service;

pub use analytic_views_service::AnalyticViewsService;
pub use analytics_service::AnalyticsService;
pub use export_service::ExportService;
pub use workspaces_service::WorkspacesService;
