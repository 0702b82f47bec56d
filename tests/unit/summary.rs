// Default dashboard summary

use analytics_backend::analytics::{IssueFacts, summarize};
use analytics_backend::db::enums::WorkflowStateCategory;
use chrono::{TimeZone, Utc};

#[test]
fn open_issues_never_exceed_total() {
    let groups = [
        None,
        Some(WorkflowStateCategory::Backlog),
        Some(WorkflowStateCategory::Started),
        Some(WorkflowStateCategory::Completed),
        Some(WorkflowStateCategory::Triage),
    ];
    let issues: Vec<IssueFacts> = groups
        .iter()
        .cycle()
        .take(23)
        .map(|group| IssueFacts {
            state_group: *group,
            ..Default::default()
        })
        .collect();

    let summary = summarize(&issues);
    assert_eq!(summary.total_issues, 23);
    assert!(summary.open_issues <= summary.total_issues);
    assert_eq!(summary.open_issues, 10);
}

#[test]
fn summary_json_shape() {
    let issues = vec![IssueFacts {
        creator_email: Some("pm@example.com".to_string()),
        state_group: Some(WorkflowStateCategory::Completed),
        completed_at: Some(Utc.with_ymd_and_hms(2024, 2, 14, 8, 30, 0).unwrap()),
        ..Default::default()
    }];

    let json = serde_json::to_value(summarize(&issues)).unwrap();
    assert_eq!(json["total_issues"], 1);
    assert_eq!(json["open_issues"], 0);
    assert_eq!(json["issue_completed_month_wise"][0]["month"], "2024-02-01");
    assert_eq!(json["issue_completed_month_wise"][0]["count"], 1);
    assert_eq!(
        json["most_issue_created_user"][0]["created_by__email"],
        "pm@example.com"
    );
    assert_eq!(json["most_issue_created_user"][0]["record_count"], 1);
}
