use diesel::dsl::{Eq, Filter};
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::analytic_view::{AnalyticView, AnalyticViewChanges, NewAnalyticView};
use crate::schema::analytic_views;

type ScopedView = Filter<
    Filter<analytic_views::table, Eq<analytic_views::id, Uuid>>,
    Eq<analytic_views::workspace_id, Uuid>,
>;

/// A single view, only visible from its own workspace.
fn scoped(ws_id: Uuid, view_id: Uuid) -> ScopedView {
    analytic_views::table
        .filter(analytic_views::id.eq(view_id))
        .filter(analytic_views::workspace_id.eq(ws_id))
}

pub struct AnalyticViewRepo;

impl AnalyticViewRepo {
    pub fn list_by_workspace(
        conn: &mut PgConnection,
        ws_id: Uuid,
    ) -> Result<Vec<AnalyticView>, diesel::result::Error> {
        use crate::schema::analytic_views::dsl::*;
        analytic_views
            .filter(workspace_id.eq(ws_id))
            .order(created_at.desc())
            .select(AnalyticView::as_select())
            .load(conn)
    }

    pub fn find_by_id_in_workspace(
        conn: &mut PgConnection,
        ws_id: Uuid,
        view_id: Uuid,
    ) -> Result<Option<AnalyticView>, diesel::result::Error> {
        scoped(ws_id, view_id)
            .select(AnalyticView::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_view: &NewAnalyticView,
    ) -> Result<AnalyticView, diesel::result::Error> {
        diesel::insert_into(analytic_views::table)
            .values(new_view)
            .returning(AnalyticView::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        ws_id: Uuid,
        view_id: Uuid,
        changes: &AnalyticViewChanges,
    ) -> Result<Option<AnalyticView>, diesel::result::Error> {
        diesel::update(scoped(ws_id, view_id))
            .set(changes)
            .returning(AnalyticView::as_returning())
            .get_result(conn)
            .optional()
    }

    pub fn delete(
        conn: &mut PgConnection,
        ws_id: Uuid,
        view_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(scoped(ws_id, view_id)).execute(conn)
    }
}
