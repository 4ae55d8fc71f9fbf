//! Schema Document Tests
//!
//! End-to-end flow: schema documents written as JSON, loaded through the
//! registry, then used to validate data. Covers:
//! - Declaration order drives error order
//! - Unknown kind names are configuration errors, not silent passes
//! - Loaded schemas behave identically to programmatically built ones

use serde_json::json;
use std::fs;
use strictform::schema::{Schema, SchemaError, SchemaRegistry};
use strictform::validator::Validator;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_schema(dir: &TempDir, name: &str, document: &serde_json::Value) {
    let path = dir.path().join(format!("{}.json", name));
    fs::write(path, serde_json::to_string_pretty(document).unwrap()).unwrap();
}

// =============================================================================
// Document Round Trip
// =============================================================================

/// A schema document on disk validates data after a registry load.
#[test]
fn test_load_then_validate() {
    let tmp = TempDir::new().unwrap();
    write_schema(
        &tmp,
        "users",
        &json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "number" },
                "email": { "type": "string", "pattern": "^\\S+@\\S+\\.\\S+$" },
                "role": { "type": "string", "enum": ["admin", "user", "moderator"] }
            },
            "required": ["name", "age", "email", "role"]
        }),
    );

    let mut registry = SchemaRegistry::new(tmp.path());
    registry.load_all().unwrap();

    let schema = registry.get("users").unwrap();
    let validator = Validator::new(schema);

    let valid = validator
        .validate(&json!({
            "name": "John",
            "age": 30,
            "email": "john.doe@example.com",
            "role": "admin"
        }))
        .unwrap();
    assert!(valid.valid);

    let invalid = validator
        .validate(&json!({ "name": "John", "email": "john.doe@example.com" }))
        .unwrap();
    assert!(!invalid.valid);
    assert_eq!(invalid.errors.len(), 5);
}

/// Loaded and built schemas produce identical results for identical rules.
#[test]
fn test_loaded_matches_built() {
    let tmp = TempDir::new().unwrap();
    write_schema(
        &tmp,
        "tagged",
        &json!({
            "type": "object",
            "properties": {
                "tags": { "type": "array", "items": { "type": "string" } }
            }
        }),
    );

    let mut registry = SchemaRegistry::new(tmp.path());
    registry.load_all().unwrap();

    let built = Schema::object().with_property("tags", Schema::array(Schema::string()));

    let data = json!({ "tags": ["a", 2, true] });
    let from_disk = Validator::new(registry.get("tagged").unwrap())
        .validate(&data)
        .unwrap();
    let from_code = Validator::new(&built).validate(&data).unwrap();

    assert_eq!(from_disk, from_code);
    let paths: Vec<&str> = from_disk.errors.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["tags[1]", "tags[2]"]);
}

// =============================================================================
// Ordering From Documents
// =============================================================================

/// Property declaration order in the document drives type-error order.
#[test]
fn test_document_order_preserved_in_errors() {
    let tmp = TempDir::new().unwrap();
    write_schema(
        &tmp,
        "ordered",
        &json!({
            "type": "object",
            "properties": {
                "zulu": { "type": "string" },
                "alpha": { "type": "string" },
                "mike": { "type": "string" }
            }
        }),
    );

    let mut registry = SchemaRegistry::new(tmp.path());
    registry.load_all().unwrap();

    let result = Validator::new(registry.get("ordered").unwrap())
        .validate(&json!({}))
        .unwrap();

    let paths: Vec<&str> = result.errors.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["zulu", "alpha", "mike"]);
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// An unknown kind name in a document fails the load, naming the file.
#[test]
fn test_unknown_kind_fails_load() {
    let tmp = TempDir::new().unwrap();
    write_schema(
        &tmp,
        "bad_kind",
        &json!({
            "type": "object",
            "properties": { "count": { "type": "integer" } }
        }),
    );

    let mut registry = SchemaRegistry::new(tmp.path());
    let result = registry.load_all();

    match result {
        Err(SchemaError::Malformed { source_name, .. }) => {
            assert!(source_name.contains("bad_kind.json"));
        }
        other => panic!("expected malformed error, got {:?}", other),
    }
}

/// An uncompilable pattern in a document fails the load.
#[test]
fn test_bad_pattern_fails_load() {
    let tmp = TempDir::new().unwrap();
    write_schema(
        &tmp,
        "bad_pattern",
        &json!({
            "type": "object",
            "properties": { "code": { "type": "string", "pattern": "[unclosed" } }
        }),
    );

    let mut registry = SchemaRegistry::new(tmp.path());
    assert!(registry.load_all().is_err());
}

/// Custom message overrides survive the document round trip.
#[test]
fn test_messages_from_document() {
    let tmp = TempDir::new().unwrap();
    write_schema(
        &tmp,
        "messaged",
        &json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "messages": { "required": "custom text" }
                }
            },
            "required": ["name"]
        }),
    );

    let mut registry = SchemaRegistry::new(tmp.path());
    registry.load_all().unwrap();

    let result = Validator::new(registry.get("messaged").unwrap())
        .validate(&json!({}))
        .unwrap();

    assert!(result
        .errors
        .iter()
        .any(|e| e.message == "custom text" && e.path == "name"));
}
