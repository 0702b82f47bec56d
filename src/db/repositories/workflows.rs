use diesel::prelude::*;

use crate::db::models::workflow::StateColor;

pub struct WorkflowsRepo;

impl WorkflowsRepo {
    /// States of every workflow owned by the workspace's teams, ordered by
    /// name. With `project_ids`, only teams holding issues of those projects.
    pub fn state_colors(
        conn: &mut PgConnection,
        ws_id: uuid::Uuid,
        project_ids: &[uuid::Uuid],
    ) -> Result<Vec<StateColor>, diesel::result::Error> {
        use crate::schema::{issues, teams, workflow_states, workflows};

        let mut query = workflow_states::table
            .inner_join(workflows::table.inner_join(teams::table))
            .filter(teams::workspace_id.eq(ws_id))
            .into_boxed();

        if !project_ids.is_empty() {
            query = query.filter(
                workflows::team_id.eq_any(
                    issues::table
                        .filter(issues::project_id.eq_any(project_ids.to_vec()))
                        .select(issues::team_id),
                ),
            );
        }

        query
            .select((
                workflow_states::name,
                workflow_states::category,
                workflow_states::color,
            ))
            .order((workflow_states::name.asc(), workflow_states::position.asc()))
            .load::<StateColor>(conn)
    }
}
