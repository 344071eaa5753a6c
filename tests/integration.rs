//! Integration tests for the idxjson library
//!
//! These tests read real documents from disk, index them and run the query
//! surface end to end, including the behaviour guaranteed for any document:
//! pre-order registry order, tags never reported as keys, filter results
//! always satisfying the matcher, and idempotent filtering.

use idxjson::core::flatten::flatten;
use idxjson::core::pipeline;
use idxjson::{convenience, matches, DocumentReader, IdxJsonError, IndexedJson, Step};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn provenance_document() -> Value {
    json!({
        "prefix": {"ex": "http://example.org/", "foaf": "http://xmlns.com/foaf/0.1/"},
        "entity": {
            "ex:report": {"prov:type": "document", "ex:version": 2},
            "ex:chart": {"prov:type": "figure", "ex:version": "2"},
            "ex:draft": {"prov:type": "document", "ex:version": 1}
        },
        "activity": {
            "ex:compile": {"prov:startTime": "2020-01-01T10:00:00"},
            "ex:plot": {"prov:startTime": "2020-01-02T09:00:00"}
        },
        "agent": {
            "ex:alice": {"prov:type": "prov:Person", "foaf:name": "Alice"},
            "ex:bob": {"prov:type": "prov:Person", "foaf:name": "Bob"}
        },
        "wasGeneratedBy": {
            "_:g1": {"prov:entity": "ex:report", "prov:activity": "ex:compile"},
            "_:g2": {"prov:entity": "ex:chart", "prov:activity": "ex:plot"}
        },
        "wasAssociatedWith": {
            "_:as1": {"prov:activity": "ex:compile", "prov:agent": "ex:alice"},
            "_:as2": {"prov:activity": "ex:plot", "prov:agent": "ex:bob"}
        },
        "bundle": {
            "ex:b1": {
                "entity": {"ex:appendix": {"prov:type": "document"}}
            }
        }
    })
}

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Every node of `value` in pre-order, as a reference walk independent of the flattener
fn pre_order_nodes<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            for child in map.values() {
                if child.is_object() || child.is_array() {
                    out.push(child);
                }
                pre_order_nodes(child, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                pre_order_nodes(item, out);
            }
        }
        _ => {}
    }
}

#[test]
fn test_read_and_query_json_file() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "prov.json",
        &serde_json::to_string_pretty(&provenance_document()).unwrap(),
    );

    let document = DocumentReader::new().read_file(&path).unwrap();
    let index = IndexedJson::new(&document);

    let compile = index.get_by_tag("ex:compile").unwrap();
    assert_eq!(
        compile.value(),
        &json!({"prov:startTime": "2020-01-01T10:00:00"})
    );

    let generation = index
        .get_by_key_value("prov:activity", &json!("ex:plot"))
        .unwrap();
    assert_eq!(generation.tag(), Some("_:g2"));

    assert_eq!(
        index.tag_of("prov:agent", &json!("ex:alice")),
        Some("_:as1")
    );
}

#[test]
fn test_yaml_and_json_documents_index_identically() {
    let dir = TempDir::new().unwrap();
    let json_path = write_fixture(
        &dir,
        "prov.json",
        r#"{"entity": {"e1": {"prov:label": "report"}}, "agent": ["urn:a1"]}"#,
    );
    let yaml_path = write_fixture(
        &dir,
        "prov.yaml",
        "entity:\n  e1:\n    prov:label: report\nagent:\n  - urn:a1\n",
    );

    let reader = DocumentReader::new();
    let from_json = reader.read_file(&json_path).unwrap();
    let from_yaml = reader.read_file(&yaml_path).unwrap();
    assert_eq!(from_json, from_yaml);

    let json_index = IndexedJson::new(&from_json);
    let yaml_index = IndexedJson::new(&from_yaml);
    assert_eq!(json_index.collect_keys(None), yaml_index.collect_keys(None));
}

#[test]
fn test_registry_is_pre_order() {
    let doc = provenance_document();
    let registry = flatten(&doc);

    let mut expected = vec![&doc];
    pre_order_nodes(&doc, &mut expected);

    let actual: Vec<&Value> = registry.iter().map(|e| e.value()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_collect_keys_never_reports_tags_as_domain_keys() {
    let doc = provenance_document();
    let index = IndexedJson::new(&doc);

    for entry in index.entries() {
        let own_keys = entry.keys();
        let expected: Vec<&str> = entry
            .value()
            .as_object()
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(own_keys, expected);
    }

    assert_eq!(
        index.collect_keys(Some("entity")),
        vec!["ex:report", "ex:chart", "ex:draft", "ex:appendix"]
    );
}

#[test]
fn test_filter_results_satisfy_matcher() {
    let doc = provenance_document();
    let index = IndexedJson::new(&doc);
    let query = json!(2);

    let filtered = index.filter("ex:version", Some(&query));
    assert_eq!(
        filtered.collect_keys(None),
        vec!["ex:report", "ex:chart"]
    );
    for entry in filtered.entries() {
        assert!(matches(entry.property("ex:version").unwrap(), &query));
    }
}

#[test]
fn test_filter_is_idempotent() {
    let doc = provenance_document();
    let index = IndexedJson::new(&doc);
    let query = json!("document");

    let once = index.filter("prov:type", Some(&query));
    let twice = once.filter("prov:type", Some(&query));
    assert_eq!(once, twice);
    assert_eq!(
        once.collect_keys(None),
        vec!["ex:report", "ex:draft", "ex:appendix"]
    );
}

#[test]
fn test_membership_query_over_identifiers() {
    let doc = provenance_document();
    let index = IndexedJson::new(&doc);
    let people = json!({"ex:alice": true, "ex:bob": true, "ex:carol": false});

    let associations = index.filter("prov:agent", Some(&people));
    assert_eq!(associations.collect_keys(None), vec!["_:as1", "_:as2"]);

    let activities: Vec<&Value> = associations.collect_values(Some("prov:activity"));
    assert_eq!(activities, vec![&json!("ex:compile"), &json!("ex:plot")]);
}

#[test]
fn test_traversal_chain() {
    let doc = provenance_document();
    let index = IndexedJson::new(&doc);

    let nested_entities = index
        .children_of("bundle")
        .within("entity")
        .filter("prov:type", Some(&json!("document")));
    assert_eq!(nested_entities.collect_keys(None), vec!["ex:appendix"]);

    let steps: Vec<Step> = ["in:agent", "value:Bob"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let bob = pipeline::run(&index, &steps);
    assert_eq!(bob.collect_keys(None), vec!["ex:bob"]);
}

#[test]
fn test_scalar_sequences_collect_but_do_not_traverse() {
    let doc = json!({"agent": ["urn:a1", "urn:a2"]});
    let index = IndexedJson::new(&doc);

    assert_eq!(
        index.collect_values(Some("agent")),
        vec![&json!("urn:a1"), &json!("urn:a2")]
    );

    let children = index.children_of("agent");
    assert!(children.is_empty());
    assert!(children.collect_values(None).is_empty());
}

#[test]
fn test_missing_entity_is_not_found() {
    let doc = provenance_document();
    let index = IndexedJson::new(&doc);

    assert_eq!(index.get_by_key_value("entity", &json!("missing-id")), None);
    assert_eq!(index.tag_of("entity", &json!("missing-id")), None);
    assert_eq!(index.get("missing-id", None), None);
}

#[test]
fn test_batch_over_directory() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir, "one.json", r#"{"entity": {"e1": {}}}"#);
    write_fixture(&dir, "two.yml", "entity:\n  e2: {}\n");
    write_fixture(&dir, "ignored.txt", "not a document");
    write_fixture(&dir, "empty.json", "");

    let files = convenience::resolve_documents(&[dir.path()]).unwrap();
    assert_eq!(files.len(), 3);

    let mut tags = Vec::new();
    for file in &files {
        let document = convenience::read_document(file).unwrap();
        let index = IndexedJson::new(&document);
        tags.extend(
            index
                .children_of("entity")
                .collect_keys(None)
                .into_iter()
                .map(str::to_string),
        );
    }
    tags.sort();
    assert_eq!(tags, vec!["e1".to_string(), "e2".to_string()]);
}

#[test]
fn test_invalid_document_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "broken.json", r#"{"entity": "#);

    let err = DocumentReader::new().read_file(&path).unwrap_err();
    match err {
        IdxJsonError::InvalidDocument { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}
