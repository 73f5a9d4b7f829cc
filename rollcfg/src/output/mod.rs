//! Output formatting for pipeline results.
//!
//! Compiled configurations, diffs and service summaries can be rendered as
//! human-readable text, JSON or YAML.

mod formatters;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::compiler::TargetConfig;
use crate::diff::{CategorizedDiff, DiffReport};
use crate::operations::ServiceSummary;
use crate::Result;

pub use formatters::{HumanFormatter, JsonFormatter, YamlFormatter};

/// A value with a human-readable rendering.
pub trait Render: Serialize {
    /// Render for a terminal reader.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded serialization fails.
    fn to_human(&self) -> Result<String>;
}

/// Trait for formatting renderable values.
pub trait OutputFormatter {
    /// Format the given value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`](crate::Error::Serialization) if the
    /// value cannot be encoded.
    fn format<T: Render + ?Sized>(&self, value: &T) -> Result<String>;
}

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Human,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

impl OutputFormat {
    /// Render `value` in this format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`](crate::Error::Serialization) if the
    /// value cannot be encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use rollcfg::output::OutputFormat;
    /// use rollcfg::diff::CategorizedDiff;
    ///
    /// let empty = CategorizedDiff::default();
    /// let json = OutputFormat::Json.render(&empty).unwrap();
    /// assert!(json.contains("\"Added\": {}"));
    /// ```
    pub fn render<T: Render + ?Sized>(self, value: &T) -> Result<String> {
        match self {
            Self::Human => HumanFormatter.format(value),
            Self::Json => JsonFormatter.format(value),
            Self::Yaml => YamlFormatter.format(value),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Human => "human",
            Self::Json => "json",
            Self::Yaml => "yaml",
        };
        write!(f, "{name}")
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!(
                "unknown output format '{other}' (expected human, json or yaml)"
            )),
        }
    }
}

impl Render for CategorizedDiff {
    fn to_human(&self) -> Result<String> {
        Ok(self.render_human())
    }
}

impl Render for DiffReport {
    fn to_human(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

// Compiled configuration has no prose form; humans read the YAML.
impl Render for TargetConfig {
    fn to_human(&self) -> Result<String> {
        YamlFormatter.format(self)
    }
}

impl Render for ServiceSummary {
    fn to_human(&self) -> Result<String> {
        Ok(self.render_human())
    }
}

impl Render for [ServiceSummary] {
    fn to_human(&self) -> Result<String> {
        Ok(self
            .iter()
            .map(ServiceSummary::render_human)
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}
