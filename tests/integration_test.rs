// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for designbot

use designbot::builder::{BuilderConfig, TreeBuilder, UNKNOWN_NODE_ID};
use designbot::component::{Component, FOCUSABLE};
use designbot::config::Config;
use designbot::fleet::FindingSet;
use designbot::report::{generate_report, OutputFormat, ScanResult};
use designbot::scanner;
use designbot::services::{audit::RULES, build_tab_order, generate_reading_order, run_audit};
use designbot::source::{extract_nodes, DocumentSource, FileSource};
use designbot::DesignbotError;
use serde_json::json;
use std::path::Path;

fn build_fixture(name: &str) -> TreeBuilder {
    let document = FileSource::new("tests/fixtures")
        .fetch(name)
        .expect("fixture should load");
    let mut builder = TreeBuilder::new();
    builder.build_nodes(&extract_nodes(&document));
    builder
}

#[test]
fn test_storefront_builds_cleanly() {
    let builder = build_fixture("storefront");
    assert_eq!(builder.roots().len(), 3);
    assert!(builder.errors().is_empty());
    assert_eq!(builder.result().component_count(), 7);
}

#[test]
fn test_reading_order_has_one_line_per_component() {
    let builder = build_fixture("storefront");
    let lines = generate_reading_order(builder.roots());
    assert_eq!(lines.len(), builder.result().component_count());
    assert_eq!(lines[0], "Header Navigation, navigation region with 2 items");
    assert_eq!(lines[3], "Search Input, text input");
}

#[test]
fn test_tab_order_is_ordered_subset_of_reading_order() {
    let builder = build_fixture("storefront");
    let lines = generate_reading_order(builder.roots());
    let stops = build_tab_order(builder.roots());
    assert_eq!(stops.len(), 5);

    let mut cursor = 0;
    for stop in &stops {
        let found = lines[cursor..]
            .iter()
            .position(|line| line.starts_with(&stop.label))
            .unwrap_or_else(|| panic!("{} missing from reading order", stop.label));
        cursor += found + 1;
    }
}

#[test]
fn test_audit_entry_count() {
    let builder = build_fixture("storefront");
    let report = run_audit(builder.roots());
    assert_eq!(report.total(), 7 * RULES.len());
    assert!(report.is_clean());
}

#[test]
fn test_malformed_document_degrades_per_node() {
    let builder = build_fixture("malformed");

    let ids: Vec<_> = builder.roots().iter().map(Component::id).collect();
    assert_eq!(ids, vec!["2:1", "3:1"]);
    assert_eq!(builder.roots()[0].children().len(), 1);
    assert_eq!(builder.roots()[0].children()[0].id(), "2:2");

    let error_ids: Vec<_> = builder.errors().iter().map(|e| e.node_id.as_str()).collect();
    assert_eq!(
        error_ids,
        vec!["1:1", UNKNOWN_NODE_ID, UNKNOWN_NODE_ID, "2:4", UNKNOWN_NODE_ID]
    );
}

#[test]
fn test_navigation_with_two_buttons() {
    let mut builder = TreeBuilder::new();
    builder
        .build(&json!([{
            "id": "n1",
            "name": "Primary Nav",
            "children": [
                { "id": "b1", "name": "Save Button" },
                { "id": "b2", "name": "Cancel Button" }
            ]
        }]))
        .unwrap();

    let roots = builder.roots();
    let lines = generate_reading_order(roots);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Primary Nav"));
    assert_eq!(build_tab_order(roots).len(), 2);
    assert_eq!(run_audit(roots).total(), 9);
}

#[test]
fn test_unfocusable_button_fails_audit() {
    let mut button = Component::button("b1", "Ghost Button").unwrap();
    button.set_state(FOCUSABLE, false);
    let report = run_audit(&[button]);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].starts_with("[FOCUSABLE_BUTTON]"));
}

#[test]
fn test_empty_input_everywhere() {
    let mut builder = TreeBuilder::with_config(BuilderConfig::default());
    builder.build(&json!([])).unwrap();
    assert!(builder.roots().is_empty());
    assert!(builder.errors().is_empty());
    assert!(generate_reading_order(builder.roots()).is_empty());
    assert!(build_tab_order(builder.roots()).is_empty());
    let audit = run_audit(builder.roots());
    assert!(audit.passed.is_empty() && audit.failed.is_empty());
}

#[test]
fn test_non_array_input_is_rejected() {
    let mut builder = TreeBuilder::new();
    let err = builder.build(&json!({ "document": {} })).unwrap_err();
    assert!(matches!(err, DesignbotError::InvalidInput(_)));
}

#[test]
fn test_scan_fixtures_directory() {
    let scan = scanner::scan_directory(Path::new("tests/fixtures"), &Config::default())
        .expect("scan should succeed");
    assert_eq!(scan.documents.len(), 2);
    assert!(scan.skipped.is_empty());
    assert!(!scan.has_failures());

    let findings = FindingSet::from_scan(&scan);
    assert_eq!(findings.warnings().len(), 5);
    assert!(!findings.blocks_release());
}

#[test]
fn test_sarif_report_valid() {
    let document = scanner::scan_file(Path::new("tests/fixtures/malformed.json"), &Config::default())
        .expect("scan should succeed");

    let report = generate_report(&ScanResult::from(document), OutputFormat::Sarif);
    let parsed: serde_json::Value =
        serde_json::from_str(&report).expect("SARIF report should be valid JSON");

    assert_eq!(parsed["version"], "2.1.0");
    assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "designbot");
    assert_eq!(parsed["runs"][0]["results"].as_array().unwrap().len(), 5);
}

#[test]
fn test_text_report_format() {
    let document = scanner::scan_file(Path::new("tests/fixtures/storefront.json"), &Config::default())
        .expect("scan should succeed");

    let report = generate_report(&ScanResult::from(document), OutputFormat::Text);
    assert!(report.contains("Designbot Semantic Analysis Report"));
    assert!(report.contains("Audit: 21 passed, 0 failed"));
    assert!(report.contains("RESULT: PASS"));
}
