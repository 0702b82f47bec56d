use axum::{
    Json, async_trait,
    extract::{FromRequestParts, Path, State, rejection::JsonRejection},
    http::request::Parts,
};
use axum_extra::extract::Query;
use serde::Deserialize;
use std::sync::Arc;

use crate::AppState;
use crate::analytics::{AnalyticsParams, DefaultAnalytics};
use crate::db::models::AuthUser;
use crate::error::{AppError, AppResult};
use crate::services::{
    AnalyticsService, ExportService, WorkspacesService,
    analytics_service::{AnalyticsResponse, SavedAnalyticsResponse},
    export_service::ExportAck,
};

/// Query string parameters, with repeated keys collected into lists.
pub struct AnalyticsQuery(pub AnalyticsParams);

#[async_trait]
impl<S> FromRequestParts<S> for AnalyticsQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<AnalyticsParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(format!("Invalid query parameters: {}", e)))?;
        Ok(AnalyticsQuery(params))
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct SegmentQuery {
    pub segment: Option<String>,
}

pub fn parse_id(raw: &str, resource: &str) -> AppResult<uuid::Uuid> {
    uuid::Uuid::parse_str(raw).map_err(|_| AppError::not_found(resource))
}

pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(slug): Path<String>,
    AnalyticsQuery(params): AnalyticsQuery,
) -> AppResult<Json<AnalyticsResponse>> {
    let mut conn = state.db.get()?;
    let ctx = WorkspacesService::admin_context(&mut conn, &user, &slug)?;
    let response = AnalyticsService::query(&mut conn, &ctx, &params)?;
    Ok(Json(response))
}

pub async fn get_saved_analytics(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((slug, analytic_id)): Path<(String, String)>,
    Query(query): Query<SegmentQuery>,
) -> AppResult<Json<SavedAnalyticsResponse>> {
    let view_id = parse_id(&analytic_id, "Analytic View")?;
    let mut conn = state.db.get()?;
    let ctx = WorkspacesService::admin_context(&mut conn, &user, &slug)?;
    let response =
        AnalyticsService::replay(&mut conn, &ctx, view_id, query.segment.as_deref())?;
    Ok(Json(response))
}

pub async fn export_analytics(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(slug): Path<String>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Json<ExportAck>> {
    let Json(payload) = payload
        .map_err(|e| AppError::validation(format!("Invalid JSON body: {}", e.body_text())))?;

    let ctx = {
        let mut conn = state.db.get()?;
        WorkspacesService::admin_context(&mut conn, &user, &slug)?
    };

    let ack = ExportService::dispatch(state.export_queue.as_ref(), &ctx, payload).await?;
    Ok(Json(ack))
}

pub async fn get_default_analytics(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(slug): Path<String>,
    AnalyticsQuery(params): AnalyticsQuery,
) -> AppResult<Json<DefaultAnalytics>> {
    let mut conn = state.db.get()?;
    let ctx = WorkspacesService::member_context(&mut conn, &user, &slug)?;
    let summary = AnalyticsService::summary(&mut conn, &ctx, &params.filter())?;
    Ok(Json(summary))
}
