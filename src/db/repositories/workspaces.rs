use diesel::prelude::*;

use crate::db::models::workspace::Workspace;

pub struct WorkspacesRepo;

impl WorkspacesRepo {
    pub fn find_by_slug(
        conn: &mut PgConnection,
        slug: &str,
    ) -> Result<Option<Workspace>, diesel::result::Error> {
        use crate::schema::workspaces::dsl::*;
        workspaces
            .filter(url_key.eq(slug))
            .select(Workspace::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        workspace_id: uuid::Uuid,
    ) -> Result<Option<Workspace>, diesel::result::Error> {
        use crate::schema::workspaces::dsl::*;
        workspaces
            .filter(id.eq(workspace_id))
            .select(Workspace::as_select())
            .first(conn)
            .optional()
    }
}
