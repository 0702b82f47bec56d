use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::analytic_views)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AnalyticView {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Normalized issue filter derived from `query_dict`.
    pub query: serde_json::Value,
    /// Parameters as submitted, axes included.
    pub query_dict: serde_json::Value,
    pub created_by: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::analytic_views)]
pub struct NewAnalyticView {
    pub workspace_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub query: serde_json::Value,
    pub query_dict: serde_json::Value,
    pub created_by: Option<Uuid>,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::analytic_views)]
pub struct AnalyticViewChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub query: Option<serde_json::Value>,
    pub query_dict: Option<serde_json::Value>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}
