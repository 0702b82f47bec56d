use uuid::Uuid;

use crate::db::models::AuthUser;

/// Caller and workspace a request runs against, resolved from the path slug.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub user_email: String,
    pub workspace_id: Uuid,
    pub workspace_slug: String,
}

impl RequestContext {
    pub fn new(user: &AuthUser, workspace_id: Uuid, workspace_slug: &str) -> Self {
        Self {
            user_id: user.id,
            user_email: user.email.clone(),
            workspace_id,
            workspace_slug: workspace_slug.to_string(),
        }
    }
}
