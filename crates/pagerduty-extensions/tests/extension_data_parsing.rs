//! Integration tests for parsing extension data.
//!
//! These tests validate that the pagerduty-extensions models can correctly
//! deserialize recorded API response envelopes.

use std::fs;
use std::path::PathBuf;

use pagerduty_core::envelope::{unwrap_list, unwrap_root};
use pagerduty_core::ResourceType;
use pagerduty_extensions::models::{Extension, ExtensionSchema};

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture from disk.
fn load_fixture(name: &str) -> Vec<u8> {
    let fixture_path = fixtures_dir().join(name);
    fs::read(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

#[test]
fn test_extension_list() {
    let data = load_fixture("extension_list.json");
    let page = unwrap_list::<Extension>(&data, ResourceType::Extension.collection_key())
        .unwrap_or_else(|e| panic!("Failed to unwrap extension list: {e}"));

    assert_eq!(page.items.len(), 1);
    assert!(!page.has_more());

    let extension = &page.items[0];
    assert_eq!(extension.id(), "PPGPXHO");
    assert_eq!(extension.name, "Internal Status Page");
    assert_eq!(
        extension.endpoint_url,
        "https://example.com/receive_a_pagerduty_webhook"
    );
    assert!(extension.object.html_url.is_none());
    assert!(extension.placeholder_fields().is_empty());
}

#[test]
fn test_extension_references() {
    let data = load_fixture("extension_list.json");
    let page = unwrap_list::<Extension>(&data, ResourceType::Extension.collection_key()).unwrap();
    let extension = &page.items[0];

    assert_eq!(extension.extension_schema.object.id, "PJFWPEP");
    assert_eq!(
        extension.extension_schema.object.resource_type().unwrap(),
        ResourceType::ExtensionSchema
    );

    let services: Vec<_> = extension
        .extension_objects
        .iter()
        .map(|o| o.id.as_str())
        .collect();
    assert_eq!(services, ["PIJ90N7", "PZYX321"]);
}

#[test]
fn test_extension_schema() {
    let data = load_fixture("extension_schema.json");
    let schema: ExtensionSchema =
        unwrap_root(&data, ResourceType::ExtensionSchema.root_key()).unwrap();

    assert_eq!(schema.object.id, "PJFWPEP");
    assert_eq!(schema.key.as_deref(), Some("generic_v2_webhook"));
    assert_eq!(schema.send_types.len(), 5);
    assert_eq!(schema.send_types[0], "trigger");
}

#[test]
fn test_schema_fixture_under_wrong_root() {
    let data = load_fixture("extension_schema.json");
    let err = unwrap_root::<Extension>(&data, ResourceType::Extension.root_key()).unwrap_err();

    assert_eq!(err.error_code(), "MISSING_FIELD");
}
