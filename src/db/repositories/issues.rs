use diesel::pg::Pg;
use diesel::prelude::*;
use std::collections::HashMap;
use uuid::Uuid;

use crate::analytics::{IssueFacts, IssueFilter};
use crate::db::enums::WorkflowStateCategory;
use crate::db::models::issue::Issue;
use crate::schema::{
    cycles, issue_labels, issue_modules, issues, labels, modules, projects, teams, users,
    workflow_states,
};

pub struct IssueRepo;

impl IssueRepo {
    /// Issues of the workspace's teams narrowed by `filter`. Each non-empty
    /// filter list adds one conjunct.
    pub fn filtered_query(
        ws_id: Uuid,
        filter: &IssueFilter,
    ) -> issues::BoxedQuery<'static, Pg> {
        let mut query = issues::table
            .filter(
                issues::team_id.eq_any(
                    teams::table
                        .filter(teams::workspace_id.eq(ws_id))
                        .select(teams::id),
                ),
            )
            .into_boxed();

        if !filter.project.is_empty() {
            query = query.filter(issues::project_id.eq_any(filter.project.clone()));
        }
        if !filter.cycle.is_empty() {
            query = query.filter(issues::cycle_id.eq_any(filter.cycle.clone()));
        }
        if !filter.module.is_empty() {
            query = query.filter(
                issues::id.eq_any(
                    issue_modules::table
                        .filter(issue_modules::module_id.eq_any(filter.module.clone()))
                        .select(issue_modules::issue_id),
                ),
            );
        }
        if !filter.state.is_empty() {
            query = query.filter(issues::workflow_state_id.eq_any(filter.state.clone()));
        }
        if !filter.state_group.is_empty() {
            query = query.filter(
                issues::workflow_state_id.eq_any(
                    workflow_states::table
                        .filter(workflow_states::category.eq_any(filter.state_group.clone()))
                        .select(workflow_states::id.nullable()),
                ),
            );
        }
        if !filter.labels.is_empty() {
            query = query.filter(
                issues::id.eq_any(
                    issue_labels::table
                        .filter(issue_labels::label_id.eq_any(filter.labels.clone()))
                        .select(issue_labels::issue_id),
                ),
            );
        }
        if !filter.assignees.is_empty() {
            query = query.filter(issues::assignee_id.eq_any(filter.assignees.clone()));
        }
        if !filter.priority.is_empty() {
            query = query.filter(issues::priority.eq_any(filter.priority.clone()));
        }
        if !filter.created_by.is_empty() {
            query = query.filter(issues::creator_id.eq_any(filter.created_by.clone()));
        }

        query
    }

    pub fn list_filtered(
        conn: &mut PgConnection,
        ws_id: Uuid,
        filter: &IssueFilter,
    ) -> Result<Vec<Issue>, diesel::result::Error> {
        Self::filtered_query(ws_id, filter)
            .order(issues::created_at.asc())
            .select(Issue::as_select())
            .load(conn)
    }

    /// Loads the filtered issues and resolves every related name used as a
    /// grouping key.
    pub fn load_facts(
        conn: &mut PgConnection,
        ws_id: Uuid,
        filter: &IssueFilter,
    ) -> Result<Vec<IssueFacts>, diesel::result::Error> {
        let rows = Self::list_filtered(conn, ws_id, filter)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let issue_ids: Vec<Uuid> = rows.iter().map(|i| i.id).collect();
        let project_ids = distinct(rows.iter().filter_map(|i| i.project_id));
        let cycle_ids = distinct(rows.iter().filter_map(|i| i.cycle_id));
        let state_ids = distinct(rows.iter().filter_map(|i| i.workflow_state_id));
        let user_ids = distinct(
            rows.iter()
                .flat_map(|i| std::iter::once(i.creator_id).chain(i.assignee_id)),
        );

        let project_names: HashMap<Uuid, String> = projects::table
            .filter(projects::id.eq_any(project_ids))
            .select((projects::id, projects::name))
            .load::<(Uuid, String)>(conn)?
            .into_iter()
            .collect();

        let cycle_names: HashMap<Uuid, String> = cycles::table
            .filter(cycles::id.eq_any(cycle_ids))
            .select((cycles::id, cycles::name))
            .load::<(Uuid, String)>(conn)?
            .into_iter()
            .collect();

        let module_names: HashMap<Uuid, String> = issue_modules::table
            .inner_join(modules::table)
            .filter(issue_modules::issue_id.eq_any(issue_ids.clone()))
            .select((issue_modules::issue_id, modules::name))
            .load::<(Uuid, String)>(conn)?
            .into_iter()
            .collect();

        let states: HashMap<Uuid, (String, WorkflowStateCategory)> = workflow_states::table
            .filter(workflow_states::id.eq_any(state_ids))
            .select((
                workflow_states::id,
                workflow_states::name,
                workflow_states::category,
            ))
            .load::<(Uuid, String, WorkflowStateCategory)>(conn)?
            .into_iter()
            .map(|(id, name, category)| (id, (name, category)))
            .collect();

        let mut issue_labels_by_issue: HashMap<Uuid, Vec<String>> = HashMap::new();
        for (issue_id, label_name) in issue_labels::table
            .inner_join(labels::table)
            .filter(issue_labels::issue_id.eq_any(issue_ids))
            .select((issue_labels::issue_id, labels::name))
            .load::<(Uuid, String)>(conn)?
        {
            issue_labels_by_issue
                .entry(issue_id)
                .or_default()
                .push(label_name);
        }

        let emails: HashMap<Uuid, String> = users::table
            .filter(users::id.eq_any(user_ids))
            .select((users::id, users::email))
            .load::<(Uuid, String)>(conn)?
            .into_iter()
            .collect();

        Ok(rows
            .into_iter()
            .map(|issue| {
                let state = issue.workflow_state_id.and_then(|id| states.get(&id));
                IssueFacts {
                    id: issue.id,
                    project_name: issue
                        .project_id
                        .and_then(|id| project_names.get(&id).cloned()),
                    cycle_name: issue.cycle_id.and_then(|id| cycle_names.get(&id).cloned()),
                    module_name: module_names.get(&issue.id).cloned(),
                    state_name: state.map(|(name, _)| name.clone()),
                    state_group: state.map(|(_, category)| *category),
                    labels: issue_labels_by_issue.remove(&issue.id).unwrap_or_default(),
                    assignee_email: issue.assignee_id.and_then(|id| emails.get(&id).cloned()),
                    creator_email: emails.get(&issue.creator_id).cloned(),
                    priority: issue.priority,
                    estimate_point: issue.estimate_point,
                    target_date: issue.target_date,
                    completed_at: issue.completed_at,
                    created_at: issue.created_at,
                }
            })
            .collect())
    }
}

fn distinct(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = ids.collect();
    ids.sort();
    ids.dedup();
    ids
}
