//! Operations on validated configuration.
//!
//! Edits follow a read, copy, re-validate, persist sequence: the input
//! [`ValidatedConfig`](crate::ValidatedConfig) is never modified, and an
//! edited copy is only handed back once it validates.
//!
//! # Examples
//!
//! ```no_run
//! use rollcfg::config::{ConfigLoader, Operator};
//! use rollcfg::operations::{edit_match, summarize, MatchEdit};
//! use std::path::Path;
//!
//! let path = Path::new("config/input.yaml");
//! let config = ConfigLoader::load_and_validate(path).unwrap();
//! for summary in summarize(&config) {
//!     println!("{}", summary.render_human());
//! }
//!
//! let edit = MatchEdit::new().with_operator(Operator::Regex).with_value("^beta-");
//! let edited = edit_match(&config, "checkout", "m1", &edit).unwrap();
//! ConfigLoader::persist(path, &edited).unwrap();
//! ```

pub mod edit;
pub mod summary;

pub use edit::{edit_match, MatchEdit};
pub use summary::{summarize, RolloutStatus, RuleRow, ServiceSummary};
