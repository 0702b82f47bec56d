use diesel::prelude::*;

use crate::{
    db::models::{AuthUser, Workspace, workspace_member::WorkspaceMemberRole},
    db::repositories::{workspace_members::WorkspaceMembersRepo, workspaces::WorkspacesRepo},
    error::{AppError, AppResult},
    services::context::RequestContext,
};

const PERMISSION_DENIED: &str = "You do not have permission to perform this action";

/// Access level a workspace route requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Member,
    Admin,
}

impl Access {
    pub fn allows(self, role: Option<WorkspaceMemberRole>) -> bool {
        match (self, role) {
            (_, None) => false,
            (Access::Member, Some(_)) => true,
            (Access::Admin, Some(role)) => role.is_admin(),
        }
    }
}

pub struct WorkspacesService;

impl WorkspacesService {
    pub fn find_by_slug(conn: &mut PgConnection, slug: &str) -> AppResult<Workspace> {
        WorkspacesRepo::find_by_slug(conn, slug)?.ok_or_else(|| AppError::not_found("Workspace"))
    }

    /// Resolves the workspace and requires the caller to belong to it.
    pub fn member_context(
        conn: &mut PgConnection,
        user: &AuthUser,
        slug: &str,
    ) -> AppResult<RequestContext> {
        Self::authorized_context(conn, user, slug, Access::Member)
    }

    /// Resolves the workspace and requires the caller to be one of its
    /// owners or admins.
    pub fn admin_context(
        conn: &mut PgConnection,
        user: &AuthUser,
        slug: &str,
    ) -> AppResult<RequestContext> {
        Self::authorized_context(conn, user, slug, Access::Admin)
    }

    fn authorized_context(
        conn: &mut PgConnection,
        user: &AuthUser,
        slug: &str,
        access: Access,
    ) -> AppResult<RequestContext> {
        let workspace = Self::find_by_slug(conn, slug)?;
        let role = WorkspaceMembersRepo::role_of(conn, workspace.id, user.id)?;

        if !access.allows(role) {
            tracing::warn!(
                user_id = %user.id,
                workspace = %slug,
                role = ?role,
                access = ?access,
                "Workspace permission denied"
            );
            return Err(AppError::forbidden(PERMISSION_DENIED));
        }

        Ok(RequestContext::new(user, workspace.id, &workspace.url_key))
    }
}
