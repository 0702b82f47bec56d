use diesel::prelude::*;

use crate::db::models::workspace_member::{WorkspaceMember, WorkspaceMemberRole};

pub struct WorkspaceMembersRepo;

impl WorkspaceMembersRepo {
    pub fn find(
        conn: &mut PgConnection,
        ws_id: uuid::Uuid,
        user: uuid::Uuid,
    ) -> Result<Option<WorkspaceMember>, diesel::result::Error> {
        use crate::schema::workspace_members::dsl::*;
        workspace_members
            .filter(workspace_id.eq(ws_id))
            .filter(user_id.eq(user))
            .select(WorkspaceMember::as_select())
            .first(conn)
            .optional()
    }

    pub fn role_of(
        conn: &mut PgConnection,
        ws_id: uuid::Uuid,
        user: uuid::Uuid,
    ) -> Result<Option<WorkspaceMemberRole>, diesel::result::Error> {
        Ok(Self::find(conn, ws_id, user)?.map(|member| member.role))
    }
}
