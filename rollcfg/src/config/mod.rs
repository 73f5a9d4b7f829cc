//! Routing configuration: schema, loading and validation.
//!
//! A configuration document lists services. Each service maps a URI to
//! upstreams, chosen by header rules or by a weighted rollout:
//!
//! ```yaml
//! services:
//!   - name: checkout
//!     uri: /checkout/*
//!     default_upstream: u1
//!     matches:
//!       - { id: m1, header_name: x-canary, operator: "==", value: "true" }
//!     rules:
//!       - { id: r1, matches: [m1], upstream_id: u2 }
//!     upstreams:
//!       - { id: u1, target: 10.0.0.1, port: 80 }
//!       - { id: u2, target: 10.0.0.2, port: 80 }
//!     rollstrategy:
//!       groups:
//!         - { id: A, upstream_id: u1, weight: 90 }
//!         - { id: B, upstream_id: u2, weight: 10 }
//! ```
//!
//! # Examples
//!
//! ```
//! use rollcfg::config::ConfigValidator;
//! use rollcfg::Document;
//!
//! let yaml = r#"
//! services:
//!   - name: svc1
//!     uri: /
//!     default_upstream: u1
//!     matches: []
//!     rules: []
//!     upstreams:
//!       - { id: u1, target: 10.0.0.1, port: 80 }
//! "#;
//! let doc = Document::parse("inline", yaml).unwrap();
//! let config = ConfigValidator::validate(&doc).unwrap();
//! assert_eq!(config.services()[0].default_upstream, "u1");
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{ConfigLoader, ConfigSource};
pub use schema::{
    Match, Operator, RollGroup, RollStrategy, RoutingConfig, Rule, Service, Upstream,
};
pub use validator::{ConfigValidator, ValidatedConfig};
