//! Categorized diff results and their rendering.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_yaml::Value;

use super::category::Category;
use crate::document::display_value;

/// Kind of change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ChangeKind {
    /// Present only in the second document.
    Added,
    /// Present only in the first document.
    Removed,
    /// Present in both with different values.
    Changed,
}

impl ChangeKind {
    /// All kinds in rendering order.
    pub const ALL: [Self; 3] = [Self::Added, Self::Removed, Self::Changed];
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Added => "Added",
            Self::Removed => "Removed",
            Self::Changed => "Changed",
        };
        write!(f, "{name}")
    }
}

/// One recorded change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChangeRecord {
    /// Path of an added or removed node.
    Path(String),
    /// A value that changed in place.
    Changed {
        /// Last segment of the changed node's path.
        property: String,
        /// Value in the first document.
        old_value: Value,
        /// Value in the second document.
        new_value: Value,
    },
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{path}"),
            Self::Changed {
                property,
                old_value,
                new_value,
            } => write!(
                f,
                "Property `{property}`: {} -> {}",
                display_value(old_value),
                display_value(new_value)
            ),
        }
    }
}

type Buckets = BTreeMap<Category, Vec<ChangeRecord>>;

/// Differences between two documents, grouped by kind and category.
///
/// All three kinds are always present, empty when nothing of that kind
/// changed. Serializes as
/// `{"Added": {category: [...]}, "Removed": {...}, "Changed": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorizedDiff {
    #[serde(rename = "Added")]
    added: Buckets,
    #[serde(rename = "Removed")]
    removed: Buckets,
    #[serde(rename = "Changed")]
    changed: Buckets,
}

impl CategorizedDiff {
    /// Changes of one kind, by category.
    #[must_use]
    pub const fn kind(&self, kind: ChangeKind) -> &BTreeMap<Category, Vec<ChangeRecord>> {
        match kind {
            ChangeKind::Added => &self.added,
            ChangeKind::Removed => &self.removed,
            ChangeKind::Changed => &self.changed,
        }
    }

    /// Changes of one kind in one category.
    #[must_use]
    pub fn records(&self, kind: ChangeKind, category: Category) -> &[ChangeRecord] {
        self.kind(kind)
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of recorded changes.
    #[must_use]
    pub fn len(&self) -> usize {
        ChangeKind::ALL
            .iter()
            .flat_map(|kind| self.kind(*kind).values())
            .map(Vec::len)
            .sum()
    }

    /// Whether the documents were equivalent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn push(&mut self, kind: ChangeKind, category: Category, record: ChangeRecord) {
        let buckets = match kind {
            ChangeKind::Added => &mut self.added,
            ChangeKind::Removed => &mut self.removed,
            ChangeKind::Changed => &mut self.changed,
        };
        buckets.entry(category).or_default().push(record);
    }

    /// Plain-text rendering for review.
    ///
    /// ```text
    /// ### Added:
    /// ### Removed:
    /// ### Changed:
    /// - Services:
    ///   - Property `port`: 80 -> 81
    /// ```
    #[must_use]
    pub fn render_human(&self) -> String {
        let mut lines = Vec::new();
        for kind in ChangeKind::ALL {
            lines.push(format!("### {kind}:"));
            for (category, records) in self.kind(kind) {
                lines.push(format!("- {}:", category.title()));
                for record in records {
                    lines.push(format!("  - {record}"));
                }
            }
        }
        lines.join("\n")
    }
}
