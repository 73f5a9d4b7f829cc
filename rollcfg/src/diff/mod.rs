//! Semantic differences between configuration documents.
//!
//! Documents are compared structurally with sequence order ignored, then
//! each change is filed under the configuration object its path names.
//!
//! # Examples
//!
//! ```
//! use rollcfg::diff::{diff, Category, ChangeKind};
//! use rollcfg::Document;
//!
//! let a = Document::parse("a", "services: [{name: s, upstreams: [{id: u1, port: 80}]}]").unwrap();
//! let b = Document::parse("b", "services: [{name: s, upstreams: [{id: u1, port: 81}]}]").unwrap();
//!
//! let changes = diff(&a, &b);
//! assert_eq!(changes.len(), 1);
//! assert_eq!(changes.records(ChangeKind::Changed, Category::Services).len(), 1);
//! ```

mod category;
mod report;
mod structural;

use std::path::Path;

use serde::Serialize;

use crate::config::ConfigLoader;
use crate::document::Document;
use crate::error::{Error, Result};

pub use category::{Category, CategoryStrategy};
pub use report::{CategorizedDiff, ChangeKind, ChangeRecord};

use structural::{structural_diff, RawChange};

/// A diff together with its text rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffReport {
    /// Structured changes.
    pub categorized: CategorizedDiff,
    /// [`CategorizedDiff::render_human`] of the same changes.
    pub text: String,
}

impl From<CategorizedDiff> for DiffReport {
    fn from(categorized: CategorizedDiff) -> Self {
        let text = categorized.render_human();
        Self { categorized, text }
    }
}

/// Compares documents.
///
/// # Examples
///
/// ```
/// use rollcfg::diff::{CategoryStrategy, Differ};
///
/// let report = Differ::new()
///     .with_strategy(CategoryStrategy::Innermost)
///     .diff_sources("a: 1\n", "a: 2\n")
///     .unwrap();
/// assert!(report.text.contains("Property `a`: 1 -> 2"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Differ {
    strategy: CategoryStrategy,
}

impl Differ {
    /// A differ using [`CategoryStrategy::Precedence`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how changed paths are categorized.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: CategoryStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Compare two documents.
    #[must_use]
    pub fn diff(&self, a: &Document, b: &Document) -> CategorizedDiff {
        let mut categorized = CategorizedDiff::default();
        for change in structural_diff(a.root(), b.root()) {
            let (kind, path, record) = match change {
                RawChange::Added(path) => {
                    let rendered = path.to_string();
                    (ChangeKind::Added, rendered.clone(), ChangeRecord::Path(rendered))
                }
                RawChange::Removed(path) => {
                    let rendered = path.to_string();
                    (ChangeKind::Removed, rendered.clone(), ChangeRecord::Path(rendered))
                }
                RawChange::Changed { path, old, new } => (
                    ChangeKind::Changed,
                    path.to_string(),
                    ChangeRecord::Changed {
                        property: path.property(),
                        old_value: old,
                        new_value: new,
                    },
                ),
            };
            categorized.push(kind, self.strategy.categorize(&path), record);
        }
        log::debug!("diff found {} change(s)", categorized.len());
        categorized
    }

    /// Parse two YAML texts and compare them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Diff`] if either text fails to parse.
    pub fn diff_sources(&self, a: &str, b: &str) -> Result<DiffReport> {
        let a = Document::parse("first document", a).map_err(Self::wrap)?;
        let b = Document::parse("second document", b).map_err(Self::wrap)?;
        Ok(self.diff(&a, &b).into())
    }

    /// Load two YAML files and compare them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Diff`] if either file cannot be read or parsed.
    pub fn diff_files(&self, a: &Path, b: &Path) -> Result<DiffReport> {
        let a = ConfigLoader::load_file(a).map_err(Self::wrap)?;
        let b = ConfigLoader::load_file(b).map_err(Self::wrap)?;
        Ok(self.diff(&a, &b).into())
    }

    fn wrap(err: Error) -> Error {
        Error::Diff {
            message: err.to_string(),
        }
    }
}

/// Compare two documents with the default categorization.
#[must_use]
pub fn diff(a: &Document, b: &Document) -> CategorizedDiff {
    Differ::new().diff(a, b)
}

/// Parse and compare two YAML texts with the default categorization.
///
/// # Errors
///
/// Returns [`Error::Diff`] if either text fails to parse.
pub fn diff_sources(a: &str, b: &str) -> Result<DiffReport> {
    Differ::new().diff_sources(a, b)
}
