//! Error types for the rollcfg library.
//!
//! Every failure in the validate/compile/diff pipeline is reported through
//! [`Error`]. The set of kinds is closed: callers branch on a known
//! validation problem versus a parse or diff failure using the `is_*`
//! helpers rather than matching on message text.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a rollcfg error.
///
/// # Examples
///
/// ```
/// use rollcfg::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the rollcfg library.
#[derive(Debug, Error)]
pub enum Error {
    /// The textual document could not be parsed into a tree.
    #[error("YAML parsing error in {source_name}: {message}")]
    Parse {
        /// Where the document came from (file path or a caller-chosen label).
        source_name: String,
        /// The parser's description of the problem.
        message: String,
    },

    /// The document parsed but violates a structural or referential invariant.
    #[error("configuration validation failed: {message}")]
    Validation {
        /// Human-readable description of the first violation found.
        message: String,
    },

    /// Diffing two documents failed, typically because one did not parse.
    #[error("Error diffing files: {message}")]
    Diff {
        /// Description of the underlying failure.
        message: String,
    },

    /// A file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A result could not be serialized for output.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the serializer failure.
        message: String,
    },
}

impl Error {
    /// Build a validation error from a message.
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Check if the error is a known validation problem.
    ///
    /// # Examples
    ///
    /// ```
    /// use rollcfg::Error;
    ///
    /// let err = Error::Validation { message: "Duplicate match ID 'm1' in service svc1".into() };
    /// assert!(err.is_validation());
    /// assert!(!err.is_parse());
    /// ```
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if the error came from parsing a document.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Check if the error was raised while diffing.
    #[must_use]
    pub fn is_diff(&self) -> bool {
        matches!(self, Self::Diff { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = Error::Parse {
            source_name: "input.yaml".to_string(),
            message: "did not find expected key".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("YAML parsing error"));
        assert!(display.contains("input.yaml"));
        assert!(display.contains("did not find expected key"));
        assert!(err.is_parse());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_error_display() {
        let err = Error::validation("Missing 'services' section in configuration");
        let display = format!("{err}");
        assert!(display.starts_with("configuration validation failed: "));
        assert!(display.contains("Missing 'services' section"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_diff_error_display() {
        let err = Error::Diff {
            message: "YAML parsing error in a.yaml: bad indent".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Error diffing files: YAML parsing error in a.yaml: bad indent"
        );
        assert!(err.is_diff());
        assert!(!err.is_parse());
    }

    #[test]
    fn test_io_error_display() {
        let err = Error::Io {
            path: PathBuf::from("/config/missing.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        let display = format!("{err}");
        assert!(display.contains("I/O error"));
        assert!(display.replace(std::path::MAIN_SEPARATOR, "/").contains("missing.yaml"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<u16> {
            Err(Error::validation("test"))
        }

        assert!(returns_result().is_err());
    }
}
