//! Structural paths into a document tree.

use std::fmt;

use serde_yaml::Value;

use super::display_value;

/// One step from a node to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A string mapping key.
    Key(String),
    /// A non-string mapping key, rendered without quotes.
    Literal(String),
    /// A sequence position.
    Index(usize),
}

impl PathSegment {
    /// Segment for a mapping key of any scalar type.
    #[must_use]
    pub fn from_key(key: &Value) -> Self {
        match key {
            Value::String(s) => Self::Key(s.clone()),
            other => Self::Literal(display_value(other)),
        }
    }

    /// The segment as a bare name (no brackets or quotes).
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Key(k) | Self::Literal(k) => k.clone(),
            Self::Index(i) => i.to_string(),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => write!(f, "['{k}']"),
            Self::Literal(k) => write!(f, "[{k}]"),
            Self::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Path from the document root to a node.
///
/// Displays as `root['services'][0]['upstreams'][0]['port']`.
///
/// # Examples
///
/// ```
/// use rollcfg::document::{NodePath, PathSegment};
///
/// let path = NodePath::root()
///     .child(PathSegment::Key("services".into()))
///     .child(PathSegment::Index(0));
/// assert_eq!(path.to_string(), "root['services'][0]");
/// assert_eq!(path.property(), "0");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<PathSegment>,
}

impl NodePath {
    /// The empty path.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// A new path one step below this one.
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// The steps making up this path.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Name of the last step, or `root` for the empty path.
    #[must_use]
    pub fn property(&self) -> String {
        self.segments
            .last()
            .map_or_else(|| "root".to_string(), PathSegment::name)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root")?;
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
