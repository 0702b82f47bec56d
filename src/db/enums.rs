use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum IssuePriority {
    #[default]
    None,
    Low,
    Medium,
    High,
    Urgent,
}

impl IssuePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssuePriority::None => "none",
            IssuePriority::Low => "low",
            IssuePriority::Medium => "medium",
            IssuePriority::High => "high",
            IssuePriority::Urgent => "urgent",
        }
    }
}

impl FromSql<Text, Pg> for IssuePriority {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "none" => Ok(IssuePriority::None),
            "low" => Ok(IssuePriority::Low),
            "medium" => Ok(IssuePriority::Medium),
            "high" => Ok(IssuePriority::High),
            "urgent" => Ok(IssuePriority::Urgent),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<Text, Pg> for IssuePriority {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

/// Group a workflow state belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStateCategory {
    Backlog,
    Unstarted,
    Started,
    Completed,
    Canceled,
    Triage,
}

impl WorkflowStateCategory {
    /// Groups counted as open on the default dashboard.
    pub const OPEN: [WorkflowStateCategory; 3] = [
        WorkflowStateCategory::Backlog,
        WorkflowStateCategory::Unstarted,
        WorkflowStateCategory::Started,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStateCategory::Backlog => "backlog",
            WorkflowStateCategory::Unstarted => "unstarted",
            WorkflowStateCategory::Started => "started",
            WorkflowStateCategory::Completed => "completed",
            WorkflowStateCategory::Canceled => "canceled",
            WorkflowStateCategory::Triage => "triage",
        }
    }

    pub fn is_open(&self) -> bool {
        Self::OPEN.contains(self)
    }
}

impl std::fmt::Display for WorkflowStateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromSql<Text, Pg> for WorkflowStateCategory {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "backlog" => Ok(WorkflowStateCategory::Backlog),
            "unstarted" => Ok(WorkflowStateCategory::Unstarted),
            "started" => Ok(WorkflowStateCategory::Started),
            "completed" => Ok(WorkflowStateCategory::Completed),
            "canceled" => Ok(WorkflowStateCategory::Canceled),
            "triage" => Ok(WorkflowStateCategory::Triage),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<Text, Pg> for WorkflowStateCategory {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}
