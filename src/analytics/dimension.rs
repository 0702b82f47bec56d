use serde::{Deserialize, Serialize};

use super::IssueFacts;
use super::distribution::NONE_KEY;
use crate::error::{AppError, AppResult};

pub const MISSING_AXES_MESSAGE: &str = "x-axis and y-axis dimensions are required";

/// Attribute issues can be grouped by, on the x-axis or as a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "state__name")]
    StateName,
    #[serde(rename = "state__group")]
    StateGroup,
    #[serde(rename = "labels__name")]
    Labels,
    #[serde(rename = "assignees__email")]
    Assignee,
    #[serde(rename = "priority")]
    Priority,
    #[serde(rename = "project__name")]
    Project,
    #[serde(rename = "cycle__name")]
    Cycle,
    #[serde(rename = "module__name")]
    Module,
    #[serde(rename = "created_at")]
    CreatedAt,
    #[serde(rename = "completed_at")]
    CompletedAt,
    #[serde(rename = "target_date")]
    TargetDate,
}

impl Dimension {
    pub const ALL: [Dimension; 11] = [
        Dimension::StateName,
        Dimension::StateGroup,
        Dimension::Labels,
        Dimension::Assignee,
        Dimension::Priority,
        Dimension::Project,
        Dimension::Cycle,
        Dimension::Module,
        Dimension::CreatedAt,
        Dimension::CompletedAt,
        Dimension::TargetDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::StateName => "state__name",
            Dimension::StateGroup => "state__group",
            Dimension::Labels => "labels__name",
            Dimension::Assignee => "assignees__email",
            Dimension::Priority => "priority",
            Dimension::Project => "project__name",
            Dimension::Cycle => "cycle__name",
            Dimension::Module => "module__name",
            Dimension::CreatedAt => "created_at",
            Dimension::CompletedAt => "completed_at",
            Dimension::TargetDate => "target_date",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == value)
    }

    /// Column heading used in exports.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::StateName => "State Name",
            Dimension::StateGroup => "State Group",
            Dimension::Labels => "Label",
            Dimension::Assignee => "Assignee",
            Dimension::Priority => "Priority",
            Dimension::Project => "Project",
            Dimension::Cycle => "Cycle",
            Dimension::Module => "Module",
            Dimension::CreatedAt => "Created At",
            Dimension::CompletedAt => "Completed At",
            Dimension::TargetDate => "Due Date",
        }
    }

    /// Only labels can hold several values for one issue.
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Dimension::Labels)
    }

    /// Group keys an issue falls into. Never empty: a missing value yields
    /// [`NONE_KEY`].
    pub fn keys(&self, issue: &IssueFacts) -> Vec<String> {
        let single = match self {
            Dimension::StateName => issue.state_name.clone(),
            Dimension::StateGroup => issue.state_group.map(|g| g.as_str().to_string()),
            Dimension::Labels => {
                let mut labels = issue.labels.clone();
                labels.sort();
                labels.dedup();
                if labels.is_empty() {
                    return vec![NONE_KEY.to_string()];
                }
                return labels;
            }
            Dimension::Assignee => issue.assignee_email.clone(),
            Dimension::Priority => Some(issue.priority.as_str().to_string()),
            Dimension::Project => issue.project_name.clone(),
            Dimension::Cycle => issue.cycle_name.clone(),
            Dimension::Module => issue.module_name.clone(),
            Dimension::CreatedAt => Some(issue.created_at.date_naive().to_string()),
            Dimension::CompletedAt => issue.completed_at.map(|d| d.date_naive().to_string()),
            Dimension::TargetDate => issue.target_date.map(|d| d.to_string()),
        };
        vec![single.unwrap_or_else(|| NONE_KEY.to_string())]
    }
}

/// What is counted in each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    IssueCount,
    Estimate,
}

impl Measure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Measure::IssueCount => "issue_count",
            Measure::Estimate => "estimate",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "issue_count" => Some(Measure::IssueCount),
            "estimate" => Some(Measure::Estimate),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Measure::IssueCount => "Issue Count",
            Measure::Estimate => "Estimate",
        }
    }
}

/// Validated x-axis, y-axis and optional segment of an analytics request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSelection {
    pub x_axis: Dimension,
    pub y_axis: Measure,
    pub segment: Option<Dimension>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl AxisSelection {
    pub fn parse(
        x_axis: Option<&str>,
        y_axis: Option<&str>,
        segment: Option<&str>,
    ) -> AppResult<Self> {
        let (Some(x_raw), Some(y_raw)) = (present(x_axis), present(y_axis)) else {
            return Err(AppError::validation(MISSING_AXES_MESSAGE));
        };

        let x_axis = Dimension::parse(x_raw)
            .ok_or_else(|| AppError::validation(format!("Invalid x-axis dimension: {}", x_raw)))?;
        let y_axis = Measure::parse(y_raw)
            .ok_or_else(|| AppError::validation(format!("Invalid y-axis measure: {}", y_raw)))?;

        let segment = match present(segment) {
            Some(raw) => {
                let segment = Dimension::parse(raw).ok_or_else(|| {
                    AppError::validation(format!("Invalid segment dimension: {}", raw))
                })?;
                if segment == x_axis {
                    return Err(AppError::validation(
                        "Segment must be different from the x-axis",
                    ));
                }
                Some(segment)
            }
            None => None,
        };

        Ok(Self {
            x_axis,
            y_axis,
            segment,
        })
    }
}
