use diesel::PgConnection;
use std::time::Duration;
use tracing::{error, info, warn};

use super::{ExportJob, ExportMail, Mailer, RedisExportQueue};
use crate::analytics::{AnalyticsParams, IssueFacts, build_distribution, csv::render_csv};
use crate::db::DbPool;
use crate::db::repositories::{issues::IssueRepo, workspaces::WorkspacesRepo};
use crate::error::{AppError, AppResult};

/// Renders the CSV for an export payload over already loaded issues.
pub fn export_csv(issues: &[IssueFacts], params: &AnalyticsParams) -> AppResult<String> {
    let axes = params.axes()?;
    let distribution = build_distribution(issues, &axes);
    Ok(render_csv(&distribution, &axes))
}

/// Builds the mail for a job: resolves the workspace, loads the filtered
/// issues and renders the attachment.
pub fn build_export(conn: &mut PgConnection, job: &ExportJob) -> AppResult<ExportMail> {
    let workspace = WorkspacesRepo::find_by_id(conn, job.workspace_id)?
        .ok_or_else(|| AppError::not_found("Workspace"))?;
    let params = AnalyticsParams::from_payload(&job.payload)?;
    let issues = IssueRepo::load_facts(conn, workspace.id, &params.filter())?;
    let csv = export_csv(&issues, &params)?;

    Ok(ExportMail {
        to: job.email.clone(),
        subject: format!("Issue analytics export for {}", workspace.name),
        body: format!(
            "Your analytics export for workspace {} is attached.",
            workspace.name
        ),
        filename: format!(
            "analytics-{}-{}.csv",
            workspace.url_key,
            job.requested_at.format("%Y%m%d%H%M%S")
        ),
        csv,
    })
}

pub struct ExportWorker {
    pool: DbPool,
    queue: RedisExportQueue,
    mailer: Mailer,
}

impl ExportWorker {
    pub fn new(pool: DbPool, queue: RedisExportQueue, mailer: Mailer) -> Self {
        Self {
            pool,
            queue,
            mailer,
        }
    }

    /// Runs one job. Failures are returned to the caller, never retried.
    pub async fn process(&self, job: &ExportJob) -> AppResult<()> {
        let mail = {
            let mut conn = self.pool.get()?;
            build_export(&mut conn, job)?
        };
        self.mailer.send(&mail).await
    }

    /// Pops and runs a single job. Returns `false` when the queue was empty.
    pub async fn tick(&self) -> AppResult<bool> {
        let Some(raw) = self.queue.pop().await? else {
            return Ok(false);
        };

        match ExportJob::decode(&raw) {
            Ok(job) => match self.process(&job).await {
                Ok(()) => info!(
                    job_id = %job.id,
                    workspace = %job.workspace_slug,
                    "Export job completed"
                ),
                Err(e) => error!(
                    job_id = %job.id,
                    workspace = %job.workspace_slug,
                    error = %e,
                    "Export job failed"
                ),
            },
            Err(e) => warn!(error = %e, "Dropping malformed export job"),
        }

        Ok(true)
    }

    /// Processes jobs until the queue is empty. Returns how many were taken.
    pub async fn drain(&self) -> AppResult<usize> {
        let mut taken = 0;
        while self.tick().await? {
            taken += 1;
        }
        Ok(taken)
    }

    pub async fn run(&self, poll_interval: Duration) {
        info!(queue = %self.queue.key(), "Export worker started");
        loop {
            match self.tick().await {
                Ok(true) => continue,
                Ok(false) => {}
                Err(e) => error!(error = %e, "Failed to poll export queue"),
            }
            tokio::time::sleep(poll_interval).await;
        }
    }
}
