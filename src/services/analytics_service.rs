use diesel::prelude::*;
use serde::Serialize;
use std::collections::HashSet;

use crate::{
    analytics::{
        AnalyticsParams, AxisSelection, DefaultAnalytics, Dimension, Distribution, IssueFilter,
        build_distribution, summarize,
    },
    db::models::{LabelColor, StateColor},
    db::repositories::{
        analytic_views::AnalyticViewRepo, issues::IssueRepo, labels::LabelRepo,
        workflows::WorkflowsRepo,
    },
    error::{AppError, AppResult},
    services::context::RequestContext,
};

/// One legend entry. State and label names use `name`, state groups use
/// `group`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LegendColor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub color: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct AnalyticsExtras {
    pub colors: Vec<LegendColor>,
}

#[derive(Serialize, Debug, Clone)]
pub struct AnalyticsResponse {
    pub total: i64,
    pub distribution: Distribution,
    pub extras: AnalyticsExtras,
}

#[derive(Serialize, Debug, Clone)]
pub struct SavedAnalyticsResponse {
    pub total: i64,
    pub distribution: Distribution,
}

pub struct AnalyticsService;

impl AnalyticsService {
    pub fn query(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        params: &AnalyticsParams,
    ) -> AppResult<AnalyticsResponse> {
        let axes = params.axes()?;
        let filter = params.filter();
        let issues = IssueRepo::load_facts(conn, ctx.workspace_id, &filter)?;
        let distribution = build_distribution(&issues, &axes);
        let colors = Self::colors(conn, ctx, axes.x_axis, &filter.project)?;

        tracing::debug!(
            workspace = %ctx.workspace_slug,
            x_axis = axes.x_axis.as_str(),
            y_axis = axes.y_axis.as_str(),
            total = issues.len(),
            "Computed analytics"
        );

        Ok(AnalyticsResponse {
            total: issues.len() as i64,
            distribution,
            extras: AnalyticsExtras { colors },
        })
    }

    fn colors(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        x_axis: Dimension,
        project_ids: &[uuid::Uuid],
    ) -> AppResult<Vec<LegendColor>> {
        let colors = match x_axis {
            Dimension::StateName | Dimension::StateGroup => {
                let states = WorkflowsRepo::state_colors(conn, ctx.workspace_id, project_ids)?;
                state_legend(x_axis, &states)
            }
            Dimension::Labels => {
                label_legend(&LabelRepo::colors(conn, ctx.workspace_id, project_ids)?)
            }
            _ => Vec::new(),
        };
        Ok(colors)
    }

    /// Replays a saved view inside the caller's workspace.
    pub fn replay(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        view_id: uuid::Uuid,
        segment: Option<&str>,
    ) -> AppResult<SavedAnalyticsResponse> {
        let view = AnalyticViewRepo::find_by_id_in_workspace(conn, ctx.workspace_id, view_id)?
            .ok_or_else(|| AppError::not_found("Analytic View"))?;

        let filter = IssueFilter::from_stored(&view.query)?;
        let axes = replay_axes(&view.query_dict, segment)?;
        let issues = IssueRepo::load_facts(conn, ctx.workspace_id, &filter)?;

        Ok(SavedAnalyticsResponse {
            total: issues.len() as i64,
            distribution: build_distribution(&issues, &axes),
        })
    }

    pub fn summary(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        filter: &IssueFilter,
    ) -> AppResult<DefaultAnalytics> {
        let issues = IssueRepo::load_facts(conn, ctx.workspace_id, filter)?;
        Ok(summarize(&issues))
    }
}

/// Axes stored in a view's `query_dict`, with the request segment taking
/// precedence over the stored one.
pub fn replay_axes(
    query_dict: &serde_json::Value,
    segment: Option<&str>,
) -> AppResult<AxisSelection> {
    let segment = segment
        .filter(|s| !s.trim().is_empty())
        .or_else(|| stored_str(query_dict, "segment"));
    AxisSelection::parse(
        stored_str(query_dict, "x_axis"),
        stored_str(query_dict, "y_axis"),
        segment,
    )
}

fn stored_str<'a>(query_dict: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    query_dict.get(key).and_then(|v| v.as_str())
}

pub fn state_legend(x_axis: Dimension, states: &[StateColor]) -> Vec<LegendColor> {
    if x_axis == Dimension::StateGroup {
        let mut seen = HashSet::new();
        return states
            .iter()
            .filter(|state| seen.insert(state.category))
            .map(|state| LegendColor {
                name: None,
                group: Some(state.category.as_str().to_string()),
                color: state.color.clone(),
            })
            .collect();
    }

    states
        .iter()
        .map(|state| LegendColor {
            name: Some(state.name.clone()),
            group: None,
            color: state.color.clone(),
        })
        .collect()
}

pub fn label_legend(labels: &[LabelColor]) -> Vec<LegendColor> {
    labels
        .iter()
        .map(|label| LegendColor {
            name: Some(label.name.clone()),
            group: None,
            color: Some(label.color.clone()),
        })
        .collect()
}
