use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;

/// A pending analytics export.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExportJob {
    pub id: Uuid,
    /// Recipient of the CSV.
    pub email: String,
    pub workspace_id: Uuid,
    pub workspace_slug: String,
    /// Request body as received.
    pub payload: serde_json::Value,
    pub requested_at: DateTime<Utc>,
}

impl ExportJob {
    pub fn new(
        email: &str,
        workspace_id: Uuid,
        workspace_slug: &str,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            workspace_id,
            workspace_slug: workspace_slug.to_string(),
            payload,
            requested_at: Utc::now(),
        }
    }

    pub fn decode(raw: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[async_trait]
pub trait ExportQueue: Send + Sync {
    async fn enqueue(&self, job: &ExportJob) -> AppResult<()>;
}

/// Redis list queue. Producers LPUSH, the worker RPOPs, so jobs run in
/// submission order.
#[derive(Clone)]
pub struct RedisExportQueue {
    client: redis::Client,
    key: String,
}

impl RedisExportQueue {
    pub fn new(client: redis::Client, key: impl Into<String>) -> Self {
        Self {
            client,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Next raw job, if any.
    pub async fn pop(&self) -> AppResult<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.rpop(&self.key, None).await?;
        Ok(raw)
    }
}

#[async_trait]
impl ExportQueue for RedisExportQueue {
    async fn enqueue(&self, job: &ExportJob) -> AppResult<()> {
        let json = serde_json::to_string(job)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.lpush(&self.key, json).await?;
        Ok(())
    }
}
