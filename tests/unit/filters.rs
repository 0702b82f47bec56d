// Query parameter and stored filter parsing

use analytics_backend::analytics::{AnalyticsParams, Dimension, IssueFilter, Measure};
use analytics_backend::db::enums::{IssuePriority, WorkflowStateCategory};
use analytics_backend::error::AppError;
use analytics_backend::routes::analytics::AnalyticsQuery;
use axum::extract::FromRequestParts;
use axum::http::Request;
use serde_json::json;

async fn extract(query: &str) -> Result<AnalyticsParams, AppError> {
    let (mut parts, _) = Request::builder()
        .uri(format!("/workspaces/acme/analytics?{}", query))
        .body(())
        .unwrap()
        .into_parts();
    AnalyticsQuery::from_request_parts(&mut parts, &())
        .await
        .map(|AnalyticsQuery(params)| params)
}

#[tokio::test]
async fn repeated_query_keys_become_lists() {
    let a = uuid::Uuid::new_v4();
    let b = uuid::Uuid::new_v4();
    let query = format!(
        "x_axis=state__group&y_axis=issue_count&project={}&project={}&priority=high&state_group=started",
        a, b
    );
    let params = extract(&query).await.unwrap();
    let axes = params.axes().unwrap();
    assert_eq!(axes.x_axis, Dimension::StateGroup);
    assert_eq!(axes.y_axis, Measure::IssueCount);

    let filter = params.filter();
    assert_eq!(filter.project, vec![a, b]);
    assert_eq!(filter.priority, vec![IssuePriority::High]);
    assert_eq!(filter.state_group, vec![WorkflowStateCategory::Started]);
    assert!(filter.cycle.is_empty());
}

#[tokio::test]
async fn malformed_ids_are_validation_errors() {
    let err = extract("x_axis=priority&y_axis=issue_count&cycle=nope")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
}

#[tokio::test]
async fn missing_axes_yield_validation_error() {
    let params = extract("segment=priority").await.unwrap();
    match params.axes() {
        Err(AppError::Validation { message }) => {
            assert_eq!(message, "x-axis and y-axis dimensions are required")
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn stored_filter_is_strict() {
    assert!(IssueFilter::from_stored(&json!({"project": ["not-a-uuid"]})).is_err());
    assert!(IssueFilter::from_stored(&json!({"project__in": []})).is_err());
    assert!(IssueFilter::from_stored(&json!({})).unwrap().is_empty());
}
