use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::analytics::parse_id;
use crate::AppState;
use crate::db::models::{AnalyticView, AuthUser};
use crate::error::AppResult;
use crate::services::{AnalyticViewsService, WorkspacesService};
use crate::validation::{
    ValidatedJson,
    analytic_view::{CreateAnalyticViewRequest, UpdateAnalyticViewRequest},
};

pub async fn list_views(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<Vec<AnalyticView>>> {
    let mut conn = state.db.get()?;
    let ctx = WorkspacesService::admin_context(&mut conn, &user, &slug)?;
    Ok(Json(AnalyticViewsService::list(&mut conn, &ctx)?))
}

pub async fn create_view(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(slug): Path<String>,
    ValidatedJson(req): ValidatedJson<CreateAnalyticViewRequest>,
) -> AppResult<(StatusCode, Json<AnalyticView>)> {
    let mut conn = state.db.get()?;
    let ctx = WorkspacesService::admin_context(&mut conn, &user, &slug)?;
    let view = AnalyticViewsService::create(&mut conn, &ctx, &req)?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_view(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((slug, view_id)): Path<(String, String)>,
) -> AppResult<Json<AnalyticView>> {
    let view_id = parse_id(&view_id, "Analytic View")?;
    let mut conn = state.db.get()?;
    let ctx = WorkspacesService::admin_context(&mut conn, &user, &slug)?;
    Ok(Json(AnalyticViewsService::get(&mut conn, &ctx, view_id)?))
}

pub async fn update_view(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((slug, view_id)): Path<(String, String)>,
    ValidatedJson(req): ValidatedJson<UpdateAnalyticViewRequest>,
) -> AppResult<Json<AnalyticView>> {
    let view_id = parse_id(&view_id, "Analytic View")?;
    let mut conn = state.db.get()?;
    let ctx = WorkspacesService::admin_context(&mut conn, &user, &slug)?;
    Ok(Json(AnalyticViewsService::update(
        &mut conn, &ctx, view_id, &req,
    )?))
}

pub async fn delete_view(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((slug, view_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let view_id = parse_id(&view_id, "Analytic View")?;
    let mut conn = state.db.get()?;
    let ctx = WorkspacesService::admin_context(&mut conn, &user, &slug)?;
    AnalyticViewsService::delete(&mut conn, &ctx, view_id)?;
    Ok(StatusCode::NO_CONTENT)
}
