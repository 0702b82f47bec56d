use std::collections::BTreeSet;

use super::{AxisSelection, Distribution, NONE_KEY};

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row(out: &mut String, fields: &[String]) {
    let row: Vec<String> = fields.iter().map(|f| escape(f)).collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

/// Renders a distribution as CSV. Without a segment there is one row per
/// x-axis value; with a segment each segment value gets its own column and
/// missing cells are zero.
pub fn render_csv(distribution: &Distribution, axes: &AxisSelection) -> String {
    let mut out = String::new();

    match axes.segment {
        None => {
            push_row(
                &mut out,
                &[
                    axes.x_axis.label().to_string(),
                    axes.y_axis.label().to_string(),
                ],
            );
            for (dimension, entries) in distribution {
                let value: i64 = entries.iter().map(|e| e.value(axes.y_axis)).sum();
                push_row(&mut out, &[dimension.clone(), value.to_string()]);
            }
        }
        Some(segment) => {
            let columns: BTreeSet<String> = distribution
                .values()
                .flatten()
                .map(|e| e.segment.clone().unwrap_or_else(|| NONE_KEY.to_string()))
                .collect();

            let mut header = vec![format!(
                "{} / {}",
                axes.x_axis.label(),
                segment.label()
            )];
            header.extend(columns.iter().cloned());
            push_row(&mut out, &header);

            for (dimension, entries) in distribution {
                let mut row = vec![dimension.clone()];
                for column in &columns {
                    let value: i64 = entries
                        .iter()
                        .filter(|e| e.segment.as_deref().unwrap_or(NONE_KEY) == column)
                        .map(|e| e.value(axes.y_axis))
                        .sum();
                    row.push(value.to_string());
                }
                push_row(&mut out, &row);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{Dimension, IssueFacts, Measure, build_distribution};
    use crate::db::enums::IssuePriority;

    fn issue(state: &str, priority: IssuePriority, estimate: i32) -> IssueFacts {
        IssueFacts {
            state_name: Some(state.to_string()),
            priority,
            estimate_point: Some(estimate),
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_export() {
        let issues = vec![
            issue("Todo", IssuePriority::High, 3),
            issue("Todo", IssuePriority::Low, 2),
            issue("Done", IssuePriority::High, 1),
        ];
        let axes = AxisSelection {
            x_axis: Dimension::StateName,
            y_axis: Measure::Estimate,
            segment: None,
        };
        let csv = render_csv(&build_distribution(&issues, &axes), &axes);
        assert_eq!(csv, "State Name,Estimate\r\nDone,1\r\nTodo,5\r\n");
    }

    #[test]
    fn test_segmented_export_pivots_columns() {
        let issues = vec![
            issue("Todo", IssuePriority::High, 0),
            issue("Todo", IssuePriority::Low, 0),
            issue("Done", IssuePriority::High, 0),
        ];
        let axes = AxisSelection {
            x_axis: Dimension::StateName,
            y_axis: Measure::IssueCount,
            segment: Some(Dimension::Priority),
        };
        let csv = render_csv(&build_distribution(&issues, &axes), &axes);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "State Name / Priority,high,low");
        assert_eq!(lines[1], "Done,1,0");
        assert_eq!(lines[2], "Todo,1,1");
    }

    #[test]
    fn test_fields_are_escaped() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
