#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # rollcfg
//!
//! A library for validating, compiling and diffing traffic-routing
//! configuration.
//!
//! A configuration document declares services, each mapping a URI to
//! upstreams selected by header rules or by a weighted staged rollout. The
//! library checks documents for structural and referential integrity,
//! compiles them into an APISIX-style traffic-split configuration, and
//! reports categorized differences between two documents for change review.
//!
//! ## Core Types
//!
//! - [`Document`]: Parsed configuration tree
//! - [`ConfigValidator`] and [`ValidatedConfig`]: Validation and its proof
//! - [`Compiler`] and [`TargetConfig`]: Routing-engine output
//! - [`Differ`] and [`CategorizedDiff`]: Semantic differences
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use rollcfg::{diff, Compiler, ConfigValidator, Document};
//!
//! let yaml = r#"
//! services:
//!   - name: checkout
//!     uri: /checkout
//!     default_upstream: u1
//!     matches: []
//!     rules: []
//!     upstreams:
//!       - { id: u1, target: 10.0.0.1, port: 80 }
//!       - { id: u2, target: 10.0.0.2, port: 80 }
//!     rollstrategy:
//!       groups:
//!         - { id: A, upstream_id: u1, weight: 90 }
//!         - { id: B, upstream_id: u2, weight: 10 }
//! "#;
//!
//! let doc = Document::parse("inline", yaml).unwrap();
//! let config = ConfigValidator::validate(&doc).unwrap();
//!
//! let target = Compiler::compile(&config);
//! assert_eq!(target.routes.len(), 1);
//! assert_eq!(target.upstreams.len(), 2);
//!
//! assert!(diff(&doc, &doc.clone()).is_empty());
//! ```

pub mod compiler;
pub mod config;
pub mod diff;
pub mod document;
pub mod error;
pub mod logging;
pub mod operations;
pub mod output;

#[cfg(test)]
mod test_util;

// Re-export key types at crate root for convenience
pub use compiler::{Compiler, TargetConfig};
pub use config::{ConfigLoader, ConfigSource, ConfigValidator, ValidatedConfig};
pub use diff::{diff, diff_sources, CategorizedDiff, CategoryStrategy, Differ, DiffReport};
pub use document::Document;
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{edit_match, summarize, MatchEdit, ServiceSummary};
pub use output::OutputFormat;
