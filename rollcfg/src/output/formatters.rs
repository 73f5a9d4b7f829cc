//! Output formatter implementations.

use crate::{Error, Result};

use super::{OutputFormatter, Render};

/// Formatter for human-readable output.
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format<T: Render + ?Sized>(&self, value: &T) -> Result<String> {
        value.to_human()
    }
}

/// Formatter for pretty-printed JSON.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format<T: Render + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

/// Formatter for YAML.
pub struct YamlFormatter;

impl OutputFormatter for YamlFormatter {
    fn format<T: Render + ?Sized>(&self, value: &T) -> Result<String> {
        serde_yaml::to_string(value).map_err(|e| Error::Serialization {
            message: e.to_string(),
        })
    }
}
