pub mod analytic_views;
pub mod analytics;

use crate::AppState;
use crate::middleware::auth::auth_middleware;
use axum::{
    Json, Router,
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;

pub fn create_router(state: Arc<AppState>) -> Router {
    let protected_routes = Router::new()
        .route("/workspaces/:slug/analytics", get(analytics::get_analytics))
        .route(
            "/workspaces/:slug/analytic-view",
            get(analytic_views::list_views).post(analytic_views::create_view),
        )
        .route(
            "/workspaces/:slug/analytic-view/:view_id",
            get(analytic_views::get_view)
                .put(analytic_views::update_view)
                .patch(analytic_views::update_view)
                .delete(analytic_views::delete_view),
        )
        .route(
            "/workspaces/:slug/saved-analytic-view/:analytic_id",
            get(analytics::get_saved_analytics),
        )
        .route(
            "/workspaces/:slug/export-analytics",
            post(analytics::export_analytics),
        )
        .route(
            "/workspaces/:slug/default-analytics",
            get(analytics::get_default_analytics),
        )
        .layer(from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/health", get(health))
        .with_state(state);

    public_routes.merge(protected_routes)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let database = if state.db.get().is_ok() { "ok" } else { "unavailable" };
    Json(json!({ "status": "ok", "database": database }))
}
