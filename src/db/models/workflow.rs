use diesel::prelude::*;

use crate::db::enums::WorkflowStateCategory;

/// Workflow state display data used to annotate chart legends.
#[derive(Queryable, Clone, Debug, PartialEq)]
pub struct StateColor {
    pub name: String,
    pub category: WorkflowStateCategory,
    pub color: Option<String>,
}
