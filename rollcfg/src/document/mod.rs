//! Document model.
//!
//! A [`Document`] is a parsed configuration tree of mappings, sequences and
//! scalars. Validation and diffing both operate on this generic tree; the
//! typed view lives in [`crate::config::schema`].

mod path;

pub use path::{NodePath, PathSegment};

use serde_yaml::Value;

use crate::error::{Error, Result};

/// A parsed configuration document.
///
/// # Examples
///
/// ```
/// use rollcfg::Document;
///
/// let doc = Document::parse("inline", "services: []\n").unwrap();
/// assert!(doc.root().get("services").is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Wrap an already-parsed tree.
    #[must_use]
    pub const fn new(root: Value) -> Self {
        Self { root }
    }

    /// Parse YAML text into a document.
    ///
    /// `source_name` only labels the error message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the text is not well-formed YAML.
    pub fn parse(source_name: &str, text: &str) -> Result<Self> {
        serde_yaml::from_str(text)
            .map(Self::new)
            .map_err(|e| Error::Parse {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })
    }

    /// The root node of the tree.
    #[must_use]
    pub const fn root(&self) -> &Value {
        &self.root
    }

    /// Mutable access to the root node.
    ///
    /// Only used on private copies; validated documents are never edited
    /// in place.
    pub(crate) fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    /// Consume the document, returning the tree.
    #[must_use]
    pub fn into_root(self) -> Value {
        self.root
    }

    /// Serialize the document back to YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the tree cannot be emitted.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.root).map_err(|e| Error::Serialization {
            message: e.to_string(),
        })
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}

/// Render a node for messages and diff output.
///
/// Strings are shown bare, other scalars in their YAML spelling and
/// collections as compact JSON.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, display_value(&tagged.value)),
        Value::Sequence(_) | Value::Mapping(_) => {
            serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

/// Whether a node counts as present-and-set.
///
/// Null, `false`, zero, and empty strings or collections are all unset.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}
