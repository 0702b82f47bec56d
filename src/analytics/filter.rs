use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AxisSelection;
use crate::db::enums::{IssuePriority, WorkflowStateCategory};
use crate::error::{AppError, AppResult};

/// Restriction applied to a workspace's issues. Every non-empty list must
/// match; within a list any value matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IssueFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub project: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cycle: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub module: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub state: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub state_group: Vec<WorkflowStateCategory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priority: Vec<IssuePriority>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub created_by: Vec<Uuid>,
}

impl IssueFilter {
    pub fn is_empty(&self) -> bool {
        self == &IssueFilter::default()
    }

    /// Reads a filter persisted on a saved view. Unknown keys or malformed
    /// values are rejected so a stale filter never widens the query.
    pub fn from_stored(value: &serde_json::Value) -> AppResult<Self> {
        if value.is_null() {
            return Ok(IssueFilter::default());
        }
        serde_json::from_value(value.clone()).map_err(|e| {
            AppError::validation(format!("Saved analytic view has an invalid filter: {}", e))
        })
    }
}

/// Parameters of an analytics request, read from the query string, an export
/// payload, or a saved view's `query_dict`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub project: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cycle: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub module: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub state: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub state_group: Vec<WorkflowStateCategory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priority: Vec<IssuePriority>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub created_by: Vec<Uuid>,
}

impl AnalyticsParams {
    pub fn axes(&self) -> AppResult<AxisSelection> {
        AxisSelection::parse(
            self.x_axis.as_deref(),
            self.y_axis.as_deref(),
            self.segment.as_deref(),
        )
    }

    pub fn filter(&self) -> IssueFilter {
        IssueFilter {
            project: self.project.clone(),
            cycle: self.cycle.clone(),
            module: self.module.clone(),
            state: self.state.clone(),
            state_group: self.state_group.clone(),
            labels: self.labels.clone(),
            assignees: self.assignees.clone(),
            priority: self.priority.clone(),
            created_by: self.created_by.clone(),
        }
    }

    /// Reads an export payload. Keys other than the known parameters are
    /// ignored.
    pub fn from_payload(payload: &serde_json::Value) -> AppResult<Self> {
        serde_json::from_value(payload.clone())
            .map_err(|e| AppError::validation(format!("Invalid analytics parameters: {}", e)))
    }
}
