//! Contract tests for the record-building and rendering surface.
//!
//! These pin the rows a consumer of the reports can rely on; if one fails,
//! the displayed tables have changed shape.

use repo_health::github::{Contributor, Repository};
use repo_health::render;
use repo_health::report;
use repo_health::types::{MetricValue, RepoId};
use serde_json::json;

fn demo_id() -> RepoId {
    RepoId {
        owner: "octo".to_string(),
        repo: "demo".to_string(),
    }
}

#[test]
fn test_basic_info_record_contract() {
    let repo: Repository = serde_json::from_value(json!({
        "name": "demo",
        "description": "A demo repository",
        "html_url": "https://github.com/octo/demo",
        "owner": {"login": "octo"},
        "created_at": "2020-01-02T03:04:05Z",
        "updated_at": "2024-05-06T07:08:09Z",
        "pushed_at": "2024-05-06T07:08:09Z",
        "language": "Rust",
        "size": 2048,
        "private": true,
        "archived": true,
        "is_template": false,
        "license": {"name": "MIT License"}
    }))
    .unwrap();

    let record = report::basic_info_record(&demo_id(), &repo);

    assert_eq!(record.title(), "Basic information for octo/demo");
    assert_eq!(
        record.get("Visibility"),
        Some(&MetricValue::Text("Private".to_string()))
    );
    assert_eq!(
        record.get("Archived"),
        Some(&MetricValue::Text("Yes".to_string()))
    );
    assert_eq!(
        record.get("Template"),
        Some(&MetricValue::Text("No".to_string()))
    );
    assert_eq!(
        record.get("Size"),
        Some(&MetricValue::Text("2048 KB".to_string()))
    );
    assert_eq!(
        record.get("License"),
        Some(&MetricValue::Text("MIT License".to_string()))
    );
    // Timestamps stay raw strings; display needs no normalization.
    assert_eq!(
        record.get("Created"),
        Some(&MetricValue::Text("2020-01-02T03:04:05Z".to_string()))
    );
}

#[test]
fn test_basic_info_defaults_missing_fields() {
    let repo: Repository = serde_json::from_value(json!({"name": "bare"})).unwrap();
    let record = report::basic_info_record(&demo_id(), &repo);

    assert_eq!(
        record.get("License"),
        Some(&MetricValue::Text("N/A".to_string()))
    );
    assert_eq!(
        record.get("Description"),
        Some(&MetricValue::Text("N/A".to_string()))
    );
    assert_eq!(
        record.get("Visibility"),
        Some(&MetricValue::Text("Public".to_string()))
    );
    assert_eq!(
        record.get("Size"),
        Some(&MetricValue::Text("0 KB".to_string()))
    );
}

#[test]
fn test_social_report_rendering_contract() {
    let repo: Repository = serde_json::from_value(json!({
        "stargazers_count": 42,
        "forks_count": 7,
        "subscribers_count": 3
    }))
    .unwrap();
    let contributors: Vec<Contributor> = serde_json::from_value(json!([
        {"login": "alice", "contributions": 120},
        {"login": "bob", "contributions": 4}
    ]))
    .unwrap();

    let social = report::social_report(&demo_id(), &repo, contributors);
    let rendered = render::render_social(&social);

    assert_eq!(social.record.get("Stars"), Some(&MetricValue::Int(42)));
    assert!(rendered.contains("Leading contributors"));
    assert!(rendered.contains("alice"));
    assert!(rendered.contains("120"));

    let empty = report::social_report(&demo_id(), &repo, Vec::new());
    let rendered = render::render_social(&empty);
    assert!(rendered.contains("No contributors visible"));
}

#[test]
fn test_turnaround_record_contract() {
    let repo: Repository = serde_json::from_value(json!({"has_issues": true})).unwrap();
    let closed_issues = vec![
        serde_json::from_value(json!({
            "created_at": "2023-02-01T00:00:00Z",
            "closed_at": "2023-02-04T00:00:00Z"
        }))
        .unwrap(),
        serde_json::from_value(json!({
            "created_at": "2023-03-01T00:00:00Z",
            "closed_at": "2023-03-06T00:00:00Z"
        }))
        .unwrap(),
    ];

    let record = report::turnaround_record(&demo_id(), &repo, &[], &closed_issues, &[], &[]);

    assert_eq!(
        record.get("Issues enabled"),
        Some(&MetricValue::Text("Yes".to_string()))
    );
    assert_eq!(record.get("Closed issues"), Some(&MetricValue::Int(2)));
    assert_eq!(
        record.get("Average issue resolution (days)"),
        Some(&MetricValue::Float(4.0))
    );
    assert_eq!(
        record.get("Average PR resolution (days)"),
        Some(&MetricValue::Float(0.0))
    );

    let rendered = render::render_record(&record);
    assert!(rendered.contains("Average issue resolution (days)"));
    assert!(rendered.contains("4.0"));
}
