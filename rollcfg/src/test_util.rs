//! Shared fixtures for unit tests.

use serde_yaml::{Mapping, Value};

use crate::Document;

/// A known-good document: one service with a rollout, one without.
///
/// Both services reuse the upstream id `u1`; ids only need to be unique
/// within a service.
pub const VALID_CONFIG: &str = r#"
services:
  - name: checkout
    uri: /checkout/*
    default_upstream: u1
    matches:
      - id: m1
        header_name: x-canary
        operator: "=="
        value: "true"
      - id: m2
        header_name: x-user-group
        operator: "~="
        value: "^beta-"
    rules:
      - id: r1
        matches: [m1]
        upstream_id: u2
      - id: r2
        matches: [m1, m2]
        upstream_id: u2
    upstreams:
      - id: u1
        target: 10.0.0.1
        port: 80
      - id: u2
        target: 10.0.0.2
        port: 8080
    rollstrategy:
      name: canary
      groups:
        - id: A
          upstream_id: u1
          weight: 90
        - id: B
          upstream_id: u2
          weight: 10
  - name: search
    uri: /search
    default_upstream: u1
    matches: []
    rules: []
    upstreams:
      - id: u1
        target: search.internal
        port: 9200
"#;

/// Parse [`VALID_CONFIG`].
///
/// # Panics
///
/// Panics if the fixture does not parse.
#[must_use]
pub fn valid_document() -> Document {
    Document::parse("fixture", VALID_CONFIG).unwrap()
}

/// Parse arbitrary YAML into a document.
///
/// # Panics
///
/// Panics if the text does not parse.
#[must_use]
pub fn document(yaml: &str) -> Document {
    Document::parse("test", yaml).unwrap()
}

/// Mutable access to the mapping of the service at `index`.
///
/// # Panics
///
/// Panics if the document does not have that service.
pub fn service_mut(doc: &mut Document, index: usize) -> &mut Mapping {
    doc.root_mut()
        .get_mut("services")
        .and_then(|s| s.get_mut(index))
        .and_then(Value::as_mapping_mut)
        .unwrap()
}
