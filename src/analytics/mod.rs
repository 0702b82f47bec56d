//! Issue analytics: axis selection, filters, distributions, the default
//! dashboard summary and CSV rendering for exports.
//!
//! Everything here works on [`IssueFacts`] rows and never touches the
//! database; loading is done by `IssueRepo::load_facts`.

pub mod csv;
pub mod dimension;
pub mod distribution;
pub mod filter;
pub mod summary;

pub use dimension::{AxisSelection, Dimension, Measure};
pub use distribution::{Distribution, DistributionEntry, NONE_KEY, build_distribution};
pub use filter::{AnalyticsParams, IssueFilter};
pub use summary::{CreatorCount, DefaultAnalytics, MonthCount, summarize};

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::db::enums::{IssuePriority, WorkflowStateCategory};

/// One issue with every value a dimension can group by already resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueFacts {
    pub id: Uuid,
    pub project_name: Option<String>,
    pub cycle_name: Option<String>,
    pub module_name: Option<String>,
    pub state_name: Option<String>,
    pub state_group: Option<WorkflowStateCategory>,
    pub labels: Vec<String>,
    pub assignee_email: Option<String>,
    pub creator_email: Option<String>,
    pub priority: IssuePriority,
    pub estimate_point: Option<i32>,
    pub target_date: Option<NaiveDate>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
