use diesel::prelude::*;

use crate::{
    analytics::AnalyticsParams,
    db::models::{AnalyticView, AnalyticViewChanges, NewAnalyticView},
    db::repositories::analytic_views::AnalyticViewRepo,
    error::{AppError, AppResult},
    services::context::RequestContext,
    validation::analytic_view::{CreateAnalyticViewRequest, UpdateAnalyticViewRequest},
};

pub struct AnalyticViewsService;

/// Validates the axes in `query_dict` and derives the normalized filter
/// stored in `query`.
pub fn derive_query(query_dict: &serde_json::Value) -> AppResult<serde_json::Value> {
    if !query_dict.is_object() {
        return Err(AppError::validation("query_dict must be an object"));
    }
    let params = AnalyticsParams::from_payload(query_dict)?;
    params.axes()?;
    Ok(serde_json::to_value(params.filter())?)
}

impl AnalyticViewsService {
    pub fn list(conn: &mut PgConnection, ctx: &RequestContext) -> AppResult<Vec<AnalyticView>> {
        Ok(AnalyticViewRepo::list_by_workspace(conn, ctx.workspace_id)?)
    }

    pub fn get(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        view_id: uuid::Uuid,
    ) -> AppResult<AnalyticView> {
        AnalyticViewRepo::find_by_id_in_workspace(conn, ctx.workspace_id, view_id)?
            .ok_or_else(|| AppError::not_found("Analytic View"))
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateAnalyticViewRequest,
    ) -> AppResult<AnalyticView> {
        let query = derive_query(&req.query_dict)?;

        let new_view = NewAnalyticView {
            workspace_id: ctx.workspace_id,
            name: req.name.trim().to_string(),
            description: req.description.clone(),
            query,
            query_dict: req.query_dict.clone(),
            created_by: Some(ctx.user_id),
        };

        let view = AnalyticViewRepo::insert(conn, &new_view)?;
        tracing::info!(
            view_id = %view.id,
            workspace = %ctx.workspace_slug,
            user_id = %ctx.user_id,
            "Analytic view created"
        );
        Ok(view)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        view_id: uuid::Uuid,
        req: &UpdateAnalyticViewRequest,
    ) -> AppResult<AnalyticView> {
        let mut changes = AnalyticViewChanges {
            name: req.name.as_ref().map(|n| n.trim().to_string()),
            description: req.description.clone(),
            updated_at: Some(chrono::Utc::now()),
            ..Default::default()
        };

        if let Some(query_dict) = &req.query_dict {
            changes.query = Some(derive_query(query_dict)?);
            changes.query_dict = Some(query_dict.clone());
        }

        AnalyticViewRepo::update(conn, ctx.workspace_id, view_id, &changes)?
            .ok_or_else(|| AppError::not_found("Analytic View"))
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        view_id: uuid::Uuid,
    ) -> AppResult<()> {
        let deleted = AnalyticViewRepo::delete(conn, ctx.workspace_id, view_id)?;
        if deleted == 0 {
            return Err(AppError::not_found("Analytic View"));
        }
        tracing::info!(view_id = %view_id, workspace = %ctx.workspace_slug, "Analytic view deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_is_derived_from_query_dict() {
        let project = uuid::Uuid::new_v4();
        let query = derive_query(&json!({
            "x_axis": "priority",
            "y_axis": "issue_count",
            "segment": "state__group",
            "project": [project]
        }))
        .unwrap();
        assert_eq!(query, json!({"project": [project]}));
    }

    #[test]
    fn test_query_dict_axes_are_validated() {
        assert!(derive_query(&json!({"project": []})).is_err());
        assert!(derive_query(&json!({"x_axis": "bogus", "y_axis": "issue_count"})).is_err());
        assert!(derive_query(&json!("priority")).is_err());
    }
}
