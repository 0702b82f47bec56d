use diesel::prelude::*;

use crate::db::models::label::LabelColor;

pub struct LabelRepo;

impl LabelRepo {
    /// Workspace labels ordered by name. With `project_ids`, only labels
    /// attached to issues of those projects.
    pub fn colors(
        conn: &mut PgConnection,
        ws_id: uuid::Uuid,
        project_ids: &[uuid::Uuid],
    ) -> Result<Vec<LabelColor>, diesel::result::Error> {
        use crate::schema::{issue_labels, issues, labels};

        let mut query = labels::table
            .filter(labels::workspace_id.eq(ws_id))
            .into_boxed();

        if !project_ids.is_empty() {
            let project_issues = issues::table
                .filter(issues::project_id.eq_any(project_ids.to_vec()))
                .select(issues::id);
            query = query.filter(
                labels::id.eq_any(
                    issue_labels::table
                        .filter(issue_labels::issue_id.eq_any(project_issues))
                        .select(issue_labels::label_id),
                ),
            );
        }

        query
            .select((labels::name, labels::color))
            .order(labels::name.asc())
            .load::<LabelColor>(conn)
    }
}
