pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod jobs;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod validation;

use crate::config::{Config, LoggingConfig};
use crate::db::DbPool;
use crate::jobs::ExportQueue;
use crate::middleware::auth::AuthService;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub export_queue: Arc<dyn ExportQueue>,
}

impl AppState {
    pub fn new(db: DbPool, config: Config, export_queue: Arc<dyn ExportQueue>) -> Self {
        let auth_service = AuthService::new(config.jwt_secret.clone());
        Self {
            db,
            config: Arc::new(config),
            auth_service,
            export_queue,
        }
    }
}

/// Level used when `RUST_LOG` is not set. Unknown values fall back to info.
pub fn log_level(config: &LoggingConfig) -> &'static str {
    match config.level.as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    }
}

pub fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(config)));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
}
