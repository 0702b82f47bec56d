use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::IssueFacts;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MonthCount {
    /// First day of the month.
    pub month: NaiveDate,
    pub count: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreatorCount {
    #[serde(rename = "created_by__email")]
    pub email: String,
    pub record_count: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DefaultAnalytics {
    pub total_issues: i64,
    pub open_issues: i64,
    pub issue_completed_month_wise: Vec<MonthCount>,
    pub most_issue_created_user: Vec<CreatorCount>,
}

pub fn summarize(issues: &[IssueFacts]) -> DefaultAnalytics {
    let total_issues = issues.len() as i64;
    let open_issues = issues
        .iter()
        .filter(|issue| issue.state_group.is_some_and(|group| group.is_open()))
        .count() as i64;

    let mut months: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for completed in issues.iter().filter_map(|issue| issue.completed_at) {
        if let Some(month) = completed.date_naive().with_day(1) {
            *months.entry(month).or_default() += 1;
        }
    }

    let mut creators: HashMap<&str, i64> = HashMap::new();
    for email in issues.iter().filter_map(|issue| issue.creator_email.as_deref()) {
        *creators.entry(email).or_default() += 1;
    }
    let mut most_issue_created_user: Vec<CreatorCount> = creators
        .into_iter()
        .map(|(email, record_count)| CreatorCount {
            email: email.to_string(),
            record_count,
        })
        .collect();
    most_issue_created_user.sort_by(|a, b| {
        b.record_count
            .cmp(&a.record_count)
            .then_with(|| a.email.cmp(&b.email))
    });

    DefaultAnalytics {
        total_issues,
        open_issues,
        issue_completed_month_wise: months
            .into_iter()
            .map(|(month, count)| MonthCount { month, count })
            .collect(),
        most_issue_created_user,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::WorkflowStateCategory;
    use chrono::{TimeZone, Utc};

    fn issue(group: Option<WorkflowStateCategory>, creator: Option<&str>) -> IssueFacts {
        IssueFacts {
            state_group: group,
            creator_email: creator.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_open_issues_use_non_terminal_groups() {
        let issues = vec![
            issue(Some(WorkflowStateCategory::Backlog), None),
            issue(Some(WorkflowStateCategory::Unstarted), None),
            issue(Some(WorkflowStateCategory::Started), None),
            issue(Some(WorkflowStateCategory::Completed), None),
            issue(Some(WorkflowStateCategory::Canceled), None),
            issue(None, None),
        ];
        let summary = summarize(&issues);
        assert_eq!(summary.total_issues, 6);
        assert_eq!(summary.open_issues, 3);
        assert!(summary.open_issues <= summary.total_issues);
    }

    #[test]
    fn test_completion_is_bucketed_by_month_in_order() {
        let mut a = issue(None, None);
        a.completed_at = Some(Utc.with_ymd_and_hms(2024, 3, 30, 10, 0, 0).unwrap());
        let mut b = issue(None, None);
        b.completed_at = Some(Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap());
        let mut c = issue(None, None);
        c.completed_at = Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        let open = issue(None, None);

        let summary = summarize(&[a, b, c, open]);
        assert_eq!(
            summary.issue_completed_month_wise,
            vec![
                MonthCount {
                    month: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    count: 1
                },
                MonthCount {
                    month: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_creators_sorted_by_count_descending() {
        let issues = vec![
            issue(None, Some("b@example.com")),
            issue(None, Some("a@example.com")),
            issue(None, Some("c@example.com")),
            issue(None, Some("c@example.com")),
            issue(None, None),
        ];
        let summary = summarize(&issues);
        let emails: Vec<&str> = summary
            .most_issue_created_user
            .iter()
            .map(|c| c.email.as_str())
            .collect();
        assert_eq!(emails, vec!["c@example.com", "a@example.com", "b@example.com"]);
        assert_eq!(summary.most_issue_created_user[0].record_count, 2);

        let json = serde_json::to_value(&summary.most_issue_created_user[0]).unwrap();
        assert_eq!(json["created_by__email"], "c@example.com");
    }

    #[test]
    fn test_empty_workspace() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_issues, 0);
        assert_eq!(summary.open_issues, 0);
        assert!(summary.issue_completed_month_wise.is_empty());
        assert!(summary.most_issue_created_user.is_empty());
    }
}
