use serde::Serialize;
use std::collections::BTreeMap;

use super::{AxisSelection, IssueFacts, Measure};

/// Group key used when an issue has no value for a dimension.
pub const NONE_KEY: &str = "None";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DistributionEntry {
    pub dimension: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
    /// Number of issues in this cell.
    pub count: i64,
    /// Sum of estimate points, only for the `estimate` measure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<i64>,
}

impl DistributionEntry {
    /// The value charted for the requested measure.
    pub fn value(&self, measure: Measure) -> i64 {
        match measure {
            Measure::IssueCount => self.count,
            Measure::Estimate => self.estimate.unwrap_or(0),
        }
    }
}

/// x-axis value -> entries ordered by segment.
pub type Distribution = BTreeMap<String, Vec<DistributionEntry>>;

#[derive(Default)]
struct Cell {
    count: i64,
    estimate: i64,
}

pub fn build_distribution(issues: &[IssueFacts], axes: &AxisSelection) -> Distribution {
    let mut cells: BTreeMap<(String, Option<String>), Cell> = BTreeMap::new();

    for issue in issues {
        let segments: Vec<Option<String>> = match axes.segment {
            Some(segment) => segment.keys(issue).into_iter().map(Some).collect(),
            None => vec![None],
        };

        for x in axes.x_axis.keys(issue) {
            for segment in &segments {
                let cell = cells.entry((x.clone(), segment.clone())).or_default();
                cell.count += 1;
                cell.estimate += i64::from(issue.estimate_point.unwrap_or(0));
            }
        }
    }

    let mut distribution = Distribution::new();
    for ((dimension, segment), cell) in cells {
        distribution
            .entry(dimension.clone())
            .or_default()
            .push(DistributionEntry {
                dimension,
                segment,
                count: cell.count,
                estimate: (axes.y_axis == Measure::Estimate).then_some(cell.estimate),
            });
    }

    distribution
}

/// Sum of `count` over every cell.
pub fn total_count(distribution: &Distribution) -> i64 {
    distribution.values().flatten().map(|entry| entry.count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::Dimension;
    use crate::db::enums::{IssuePriority, WorkflowStateCategory};

    fn issue(state: Option<&str>, priority: IssuePriority, estimate: Option<i32>) -> IssueFacts {
        IssueFacts {
            id: uuid::Uuid::new_v4(),
            state_name: state.map(str::to_string),
            state_group: state.map(|_| WorkflowStateCategory::Started),
            priority,
            estimate_point: estimate,
            ..Default::default()
        }
    }

    fn axes(x: Dimension, y: Measure, segment: Option<Dimension>) -> AxisSelection {
        AxisSelection {
            x_axis: x,
            y_axis: y,
            segment,
        }
    }

    #[test]
    fn test_counts_per_group() {
        let issues = vec![
            issue(Some("Todo"), IssuePriority::High, None),
            issue(Some("Todo"), IssuePriority::Low, None),
            issue(Some("Done"), IssuePriority::High, None),
            issue(None, IssuePriority::High, None),
        ];
        let dist = build_distribution(
            &issues,
            &axes(Dimension::StateName, Measure::IssueCount, None),
        );

        assert_eq!(dist.len(), 3);
        assert_eq!(dist["Todo"][0].count, 2);
        assert_eq!(dist["Done"][0].count, 1);
        assert_eq!(dist[NONE_KEY][0].count, 1);
        assert_eq!(dist["Todo"][0].segment, None);
        assert_eq!(dist["Todo"][0].estimate, None);
        assert_eq!(total_count(&dist), issues.len() as i64);
    }

    #[test]
    fn test_segments_split_groups_and_preserve_total() {
        let issues = vec![
            issue(Some("Todo"), IssuePriority::High, None),
            issue(Some("Todo"), IssuePriority::Low, None),
            issue(Some("Todo"), IssuePriority::High, None),
            issue(Some("Done"), IssuePriority::Urgent, None),
        ];
        let dist = build_distribution(
            &issues,
            &axes(
                Dimension::StateName,
                Measure::IssueCount,
                Some(Dimension::Priority),
            ),
        );

        let todo = &dist["Todo"];
        assert_eq!(todo.len(), 2);
        assert_eq!(todo[0].segment.as_deref(), Some("high"));
        assert_eq!(todo[0].count, 2);
        assert_eq!(todo[1].segment.as_deref(), Some("low"));
        assert_eq!(todo[1].count, 1);
        assert_eq!(total_count(&dist), 4);
    }

    #[test]
    fn test_estimate_measure_sums_points() {
        let issues = vec![
            issue(Some("Todo"), IssuePriority::High, Some(3)),
            issue(Some("Todo"), IssuePriority::High, Some(5)),
            issue(Some("Todo"), IssuePriority::High, None),
        ];
        let dist = build_distribution(
            &issues,
            &axes(Dimension::StateName, Measure::Estimate, None),
        );
        let entry = &dist["Todo"][0];
        assert_eq!(entry.count, 3);
        assert_eq!(entry.estimate, Some(8));
        assert_eq!(entry.value(Measure::Estimate), 8);
        assert_eq!(entry.value(Measure::IssueCount), 3);
    }

    #[test]
    fn test_single_valued_dimensions_sum_to_total() {
        let issues: Vec<IssueFacts> = (0..7)
            .map(|i| {
                let mut facts = issue(
                    if i % 3 == 0 { None } else { Some("Todo") },
                    if i % 2 == 0 {
                        IssuePriority::High
                    } else {
                        IssuePriority::Low
                    },
                    Some(i),
                );
                facts.project_name = (i % 2 == 0).then(|| "Core".to_string());
                facts.labels = vec!["a".to_string(), "b".to_string()];
                facts
            })
            .collect();

        for x in Dimension::ALL.into_iter().filter(|d| !d.is_multi_valued()) {
            let dist = build_distribution(&issues, &axes(x, Measure::IssueCount, None));
            assert_eq!(total_count(&dist), 7, "dimension {}", x.as_str());
        }
    }

    #[test]
    fn test_labels_count_each_attached_label() {
        let mut tagged = issue(None, IssuePriority::None, None);
        tagged.labels = vec!["bug".to_string(), "ui".to_string()];
        let untagged = issue(None, IssuePriority::None, None);

        let dist = build_distribution(
            &[tagged, untagged],
            &axes(Dimension::Labels, Measure::IssueCount, None),
        );
        assert_eq!(dist["bug"][0].count, 1);
        assert_eq!(dist["ui"][0].count, 1);
        assert_eq!(dist[NONE_KEY][0].count, 1);
    }

    #[test]
    fn test_empty_input_yields_empty_distribution() {
        let dist = build_distribution(&[], &axes(Dimension::Priority, Measure::IssueCount, None));
        assert!(dist.is_empty());
        assert_eq!(total_count(&dist), 0);
    }
}
