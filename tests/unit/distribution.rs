// Distribution properties over in-memory issue facts

use analytics_backend::analytics::{
    AxisSelection, Dimension, IssueFacts, Measure, NONE_KEY, build_distribution,
    distribution::total_count,
};
use analytics_backend::db::enums::{IssuePriority, WorkflowStateCategory};
use chrono::{NaiveDate, TimeZone, Utc};

fn sample_issues() -> Vec<IssueFacts> {
    let mut issues = Vec::new();
    let states = [
        ("Backlog", WorkflowStateCategory::Backlog),
        ("Todo", WorkflowStateCategory::Unstarted),
        ("In Progress", WorkflowStateCategory::Started),
        ("Done", WorkflowStateCategory::Completed),
    ];
    let priorities = [
        IssuePriority::None,
        IssuePriority::Low,
        IssuePriority::High,
        IssuePriority::Urgent,
    ];

    for i in 0..13u32 {
        let (state, group) = states[(i % 4) as usize];
        issues.push(IssueFacts {
            id: uuid::Uuid::new_v4(),
            project_name: (i % 3 != 0).then(|| format!("Project {}", i % 2)),
            cycle_name: (i % 5 == 0).then(|| "Sprint 1".to_string()),
            module_name: None,
            state_name: Some(state.to_string()),
            state_group: Some(group),
            labels: if i % 2 == 0 {
                vec!["bug".to_string(), "ui".to_string()]
            } else {
                Vec::new()
            },
            assignee_email: (i % 4 == 1).then(|| "dev@example.com".to_string()),
            creator_email: Some("pm@example.com".to_string()),
            priority: priorities[(i % 4) as usize],
            estimate_point: Some((i % 3) as i32),
            target_date: NaiveDate::from_ymd_opt(2024, 5, 1 + i % 3),
            completed_at: (group == WorkflowStateCategory::Completed)
                .then(|| Utc.with_ymd_and_hms(2024, 6, 1 + i, 9, 0, 0).unwrap()),
            created_at: Utc.with_ymd_and_hms(2024, 4, 1 + i, 12, 0, 0).unwrap(),
        });
    }
    issues
}

#[test]
fn counts_sum_to_total_for_single_valued_axes() {
    let issues = sample_issues();
    for x_axis in Dimension::ALL.into_iter().filter(|d| !d.is_multi_valued()) {
        let axes = AxisSelection {
            x_axis,
            y_axis: Measure::IssueCount,
            segment: None,
        };
        let distribution = build_distribution(&issues, &axes);
        assert_eq!(
            total_count(&distribution),
            issues.len() as i64,
            "x_axis {}",
            x_axis.as_str()
        );
    }
}

#[test]
fn segment_does_not_change_totals() {
    let issues = sample_issues();
    let axes = AxisSelection {
        x_axis: Dimension::StateGroup,
        y_axis: Measure::IssueCount,
        segment: Some(Dimension::Priority),
    };
    let distribution = build_distribution(&issues, &axes);
    assert_eq!(total_count(&distribution), issues.len() as i64);
    for entries in distribution.values() {
        assert!(entries.iter().all(|e| e.segment.is_some()));
    }
}

#[test]
fn label_segment_counts_once_per_attached_label() {
    let issue = IssueFacts {
        priority: IssuePriority::High,
        labels: vec!["bug".to_string(), "ui".to_string()],
        ..Default::default()
    };
    let axes = AxisSelection {
        x_axis: Dimension::Priority,
        y_axis: Measure::IssueCount,
        segment: Some(Dimension::Labels),
    };
    let distribution = build_distribution(std::slice::from_ref(&issue), &axes);

    let entries = &distribution["high"];
    let segments: Vec<Option<&str>> = entries.iter().map(|e| e.segment.as_deref()).collect();
    assert_eq!(segments, vec![Some("bug"), Some("ui")]);
    assert!(entries.iter().all(|e| e.count == 1));
    // one issue, two labelled cells
    assert_eq!(total_count(&distribution), 2);
}

#[test]
fn missing_values_group_under_none() {
    let issues = sample_issues();
    let axes = AxisSelection {
        x_axis: Dimension::Cycle,
        y_axis: Measure::IssueCount,
        segment: None,
    };
    let distribution = build_distribution(&issues, &axes);
    assert_eq!(distribution["Sprint 1"][0].count, 3);
    assert_eq!(distribution[NONE_KEY][0].count, 10);
}

#[test]
fn labels_count_every_attached_label() {
    let issues = sample_issues();
    let axes = AxisSelection {
        x_axis: Dimension::Labels,
        y_axis: Measure::IssueCount,
        segment: None,
    };
    let distribution = build_distribution(&issues, &axes);
    assert_eq!(distribution["bug"][0].count, 7);
    assert_eq!(distribution["ui"][0].count, 7);
    assert_eq!(distribution[NONE_KEY][0].count, 6);
}

#[test]
fn estimate_measure_sums_points() {
    let issues = sample_issues();
    let axes = AxisSelection {
        x_axis: Dimension::Priority,
        y_axis: Measure::Estimate,
        segment: None,
    };
    let distribution = build_distribution(&issues, &axes);
    let total_estimate: i64 = distribution
        .values()
        .flatten()
        .map(|e| e.estimate.unwrap_or_default())
        .sum();
    let expected: i64 = issues
        .iter()
        .map(|i| i64::from(i.estimate_point.unwrap_or(0)))
        .sum();
    assert_eq!(total_estimate, expected);
}

#[test]
fn date_axes_group_by_day() {
    let issues = sample_issues();
    let axes = AxisSelection {
        x_axis: Dimension::TargetDate,
        y_axis: Measure::IssueCount,
        segment: None,
    };
    let distribution = build_distribution(&issues, &axes);
    let keys: Vec<&String> = distribution.keys().collect();
    assert_eq!(keys, vec!["2024-05-01", "2024-05-02", "2024-05-03"]);
}
