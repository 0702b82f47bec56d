use serde::Serialize;

use crate::{
    analytics::AnalyticsParams,
    error::AppResult,
    jobs::{ExportJob, ExportQueue},
    services::context::RequestContext,
};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ExportAck {
    pub message: String,
}

pub struct ExportService;

impl ExportService {
    /// Validates the axes and queues the export. No issue data is read here.
    pub async fn dispatch(
        queue: &dyn ExportQueue,
        ctx: &RequestContext,
        payload: serde_json::Value,
    ) -> AppResult<ExportAck> {
        AnalyticsParams::from_payload(&payload)?.axes()?;

        let job = ExportJob::new(
            &ctx.user_email,
            ctx.workspace_id,
            &ctx.workspace_slug,
            payload,
        );
        queue.enqueue(&job).await?;

        tracing::info!(
            job_id = %job.id,
            workspace = %ctx.workspace_slug,
            user_id = %ctx.user_id,
            "Export job queued"
        );

        Ok(ExportAck {
            message: format!(
                "Once the export is ready it will be emailed to you at {}",
                ctx.user_email
            ),
        })
    }
}
