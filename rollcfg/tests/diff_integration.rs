//! Integration tests for diffing configuration files.

mod common;

use common::fixture_path;
use rollcfg::diff::{Category, CategoryStrategy, ChangeKind, ChangeRecord, Differ};
use rollcfg::{diff_sources, ConfigLoader};
use serde_yaml::Value;

#[test]
fn test_port_change_between_files() {
    let report = Differ::new()
        .diff_files(
            &fixture_path("single_service.yaml"),
            &fixture_path("single_service_port_changed.yaml"),
        )
        .unwrap();

    assert_eq!(report.categorized.len(), 1);
    assert_eq!(
        report.categorized.records(ChangeKind::Changed, Category::Services),
        &[ChangeRecord::Changed {
            property: "port".into(),
            old_value: Value::from(80),
            new_value: Value::from(81),
        }]
    );
    assert_eq!(
        report.text,
        "### Added:\n### Removed:\n### Changed:\n- Services:\n  - Property `port`: 80 -> 81"
    );
}

#[test]
fn test_port_change_json_under_innermost_strategy() {
    let report = Differ::new()
        .with_strategy(CategoryStrategy::Innermost)
        .diff_files(
            &fixture_path("single_service.yaml"),
            &fixture_path("single_service_port_changed.yaml"),
        )
        .unwrap();

    assert_eq!(
        serde_json::to_value(&report.categorized).unwrap(),
        serde_json::json!({
            "Added": {},
            "Removed": {},
            "Changed": {"upstreams": [{"property": "port", "old_value": 80, "new_value": 81}]}
        })
    );
}

#[test]
fn test_file_against_itself_is_empty() {
    let path = fixture_path("input.yaml");
    let report = Differ::new().diff_files(&path, &path).unwrap();
    assert!(report.categorized.is_empty());
    assert_eq!(report.text, "### Added:\n### Removed:\n### Changed:");
}

#[test]
fn test_reordered_upstreams_are_not_a_change() {
    let a = ConfigLoader::load_file(&fixture_path("input.yaml")).unwrap();
    let text = std::fs::read_to_string(fixture_path("input.yaml")).unwrap();
    let mut root: Value = serde_yaml::from_str(&text).unwrap();
    root["services"][0]["upstreams"]
        .as_sequence_mut()
        .unwrap()
        .reverse();
    let b = rollcfg::Document::new(root);

    assert!(rollcfg::diff(&a, &b).is_empty());
}

#[test]
fn test_added_and_removed_services() {
    let single = std::fs::read_to_string(fixture_path("single_service.yaml")).unwrap();
    let full = std::fs::read_to_string(fixture_path("input.yaml")).unwrap();

    let report = diff_sources(&single, &full).unwrap();
    let added = report.categorized.records(ChangeKind::Added, Category::Services);
    // svc1 shares no name with checkout or search, so nothing pairs.
    assert_eq!(
        added,
        &[
            ChangeRecord::Path("root['services'][0]".into()),
            ChangeRecord::Path("root['services'][1]".into()),
        ]
    );
    assert_eq!(
        report.categorized.records(ChangeKind::Removed, Category::Services),
        &[ChangeRecord::Path("root['services'][0]".into())]
    );
    assert!(report.categorized.kind(ChangeKind::Changed).is_empty());

    let reverse = diff_sources(&full, &single).unwrap();
    assert!(reverse
        .categorized
        .records(ChangeKind::Removed, Category::Services)
        .contains(&ChangeRecord::Path("root['services'][1]".into())));
}

#[test]
fn test_malformed_file_is_diff_error() {
    let err = Differ::new()
        .diff_files(&fixture_path("input.yaml"), &fixture_path("malformed.yaml"))
        .unwrap_err();
    assert!(err.is_diff());
    assert!(err.to_string().starts_with("Error diffing files: YAML parsing error in"));
}
