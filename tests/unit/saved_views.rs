// Saved view query derivation and replay axes

use analytics_backend::analytics::{Dimension, IssueFilter};
use analytics_backend::services::analytic_views_service::derive_query;
use analytics_backend::services::analytics_service::replay_axes;
use serde_json::json;

#[test]
fn derived_query_replays_as_filter() {
    let module = uuid::Uuid::new_v4();
    let query_dict = json!({
        "x_axis": "module__name",
        "y_axis": "estimate",
        "module": [module],
        "labels": []
    });
    let query = derive_query(&query_dict).unwrap();
    let filter = IssueFilter::from_stored(&query).unwrap();
    assert_eq!(filter.module, vec![module]);
    assert!(filter.labels.is_empty());

    let axes = replay_axes(&query_dict, None).unwrap();
    assert_eq!(axes.x_axis, Dimension::Module);
    assert_eq!(axes.segment, None);
}

#[test]
fn blank_request_segment_falls_back_to_stored() {
    let query_dict = json!({
        "x_axis": "priority",
        "y_axis": "issue_count",
        "segment": "state__name"
    });
    let axes = replay_axes(&query_dict, Some("  ")).unwrap();
    assert_eq!(axes.segment, Some(Dimension::StateName));
}

#[test]
fn segment_equal_to_x_axis_is_rejected() {
    let query_dict = json!({"x_axis": "priority", "y_axis": "issue_count"});
    assert!(replay_axes(&query_dict, Some("priority")).is_err());
}
