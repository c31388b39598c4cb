//! Integration tests for parsing escalation policy data.
//!
//! These tests validate that the pagerduty-escalation models can correctly
//! deserialize recorded API response envelopes.

use std::fs;
use std::path::PathBuf;

use pagerduty_core::envelope::unwrap_list;
use pagerduty_core::{ListPage, ResourceType};
use pagerduty_escalation::models::EscalationPolicy;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load and unwrap the escalation policy list fixture.
fn load_policy_page() -> ListPage<EscalationPolicy> {
    let fixture_path = fixtures_dir().join("escalation_policy_list.json");
    let data = fs::read(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read policy fixture at {}: {}",
            fixture_path.display(),
            e
        )
    });
    unwrap_list(&data, ResourceType::EscalationPolicy.collection_key())
        .unwrap_or_else(|e| panic!("Failed to unwrap policy list: {e}"))
}

#[test]
fn test_policy_list_meta() {
    let page = load_policy_page();

    assert_eq!(page.items.len(), 2, "Expected 2 policies in test data");
    assert_eq!(page.meta.limit, Some(25));
    assert_eq!(page.meta.offset, Some(0));
    assert!(!page.has_more());
    assert_eq!(page.meta.total, None);
}

#[test]
fn test_policy_identity_and_links() {
    let page = load_policy_page();
    let policy = &page.items[0];

    assert_eq!(policy.id(), "PANZZEQ");
    assert_eq!(policy.object.kind, "escalation_policy");
    assert_eq!(
        policy.object.self_url.as_deref(),
        Some("https://api.pagerduty.com/escalation_policies/PANZZEQ")
    );
    assert_eq!(policy.name, "Engineering Escalation Policy");
    assert_eq!(policy.num_loops, Some(2));
    assert_eq!(policy.repeat_enabled, Some(true));
}

#[test]
fn test_policy_rules_keep_order() {
    let page = load_policy_page();
    let rules = &page.items[0].escalation_rules;

    let ids: Vec<_> = rules.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["PANZZEQ1", "PANZZEQ2"]);
    assert_eq!(rules[0].delay, Some(30));
    assert_eq!(rules[1].delay, Some(15));

    assert_eq!(
        rules[0].targets[0].resource_type().unwrap(),
        ResourceType::User
    );
    assert_eq!(
        rules[1].targets[0].resource_type().unwrap(),
        ResourceType::Schedule
    );
}

#[test]
fn test_policy_references() {
    let page = load_policy_page();
    let policy = &page.items[0];

    assert_eq!(policy.services.len(), 1);
    assert_eq!(policy.services[0].id, "PIJ90N7");
    assert_eq!(policy.teams[0].summary.as_deref(), Some("Engineering"));
}

#[test]
fn test_sparse_policy() {
    let page = load_policy_page();
    let policy = &page.items[1];

    assert_eq!(policy.id(), "PT20YPA");
    assert!(policy.escalation_rules.is_empty());
    assert!(policy.description.is_none());
    assert!(policy.repeat_enabled.is_none());
}
