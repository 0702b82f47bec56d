// Export dispatch against an in-memory queue, and CSV rendering

use analytics_backend::analytics::{
    AnalyticsParams, AxisSelection, Dimension, IssueFacts, Measure, build_distribution,
    csv::render_csv,
};
use analytics_backend::db::enums::IssuePriority;
use analytics_backend::error::{AppError, AppResult};
use analytics_backend::jobs::worker::export_csv;
use analytics_backend::jobs::{ExportJob, ExportQueue};
use analytics_backend::services::ExportService;
use analytics_backend::services::context::RequestContext;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;

#[derive(Default)]
struct MemoryQueue {
    jobs: Mutex<Vec<ExportJob>>,
}

#[async_trait]
impl ExportQueue for MemoryQueue {
    async fn enqueue(&self, job: &ExportJob) -> AppResult<()> {
        self.jobs.lock().unwrap().push(job.clone());
        Ok(())
    }
}

fn context() -> RequestContext {
    RequestContext {
        user_id: uuid::Uuid::new_v4(),
        user_email: "admin@example.com".to_string(),
        workspace_id: uuid::Uuid::new_v4(),
        workspace_slug: "acme".to_string(),
    }
}

#[tokio::test]
async fn dispatch_enqueues_and_acknowledges() {
    let queue = MemoryQueue::default();
    let ctx = context();
    let payload = json!({"x_axis": "priority", "y_axis": "issue_count", "segment": "state__name"});

    let ack = ExportService::dispatch(&queue, &ctx, payload.clone())
        .await
        .unwrap();
    assert_eq!(
        ack.message,
        "Once the export is ready it will be emailed to you at admin@example.com"
    );

    let jobs = queue.jobs.lock().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].email, "admin@example.com");
    assert_eq!(jobs[0].workspace_id, ctx.workspace_id);
    assert_eq!(jobs[0].workspace_slug, "acme");
    assert_eq!(jobs[0].payload, payload);
}

#[tokio::test]
async fn dispatch_without_axes_enqueues_nothing() {
    let queue = MemoryQueue::default();
    let err = ExportService::dispatch(&queue, &context(), json!({"x_axis": "priority"}))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
    assert!(queue.jobs.lock().unwrap().is_empty());
}

#[test]
fn export_csv_matches_distribution() {
    let issues: Vec<IssueFacts> = [IssuePriority::Low, IssuePriority::Low, IssuePriority::Urgent]
        .into_iter()
        .map(|priority| IssueFacts {
            priority,
            estimate_point: Some(2),
            ..Default::default()
        })
        .collect();

    let params = AnalyticsParams::from_payload(&json!({
        "x_axis": "priority",
        "y_axis": "estimate"
    }))
    .unwrap();
    let csv = export_csv(&issues, &params).unwrap();

    let axes = AxisSelection {
        x_axis: Dimension::Priority,
        y_axis: Measure::Estimate,
        segment: None,
    };
    assert_eq!(csv, render_csv(&build_distribution(&issues, &axes), &axes));
    assert_eq!(csv, "Priority,Estimate\r\nlow,4\r\nurgent,2\r\n");
}
