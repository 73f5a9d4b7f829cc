//! Configuration document discovery, loading and persistence.
//!
//! All file access goes through an explicit [`ConfigSource`]; nothing in the
//! library reads a process-wide default location.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::validator::{ConfigValidator, ValidatedConfig};
use crate::document::Document;
use crate::error::{Error, Result};

/// File extensions recognized as configuration documents.
const DOCUMENT_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// A directory holding configuration documents.
///
/// # Examples
///
/// ```
/// use rollcfg::config::ConfigSource;
/// use std::path::{Path, PathBuf};
///
/// let source = ConfigSource::new("/etc/routes");
/// assert_eq!(source.resolve(Path::new("input.yaml")), PathBuf::from("/etc/routes/input.yaml"));
/// assert_eq!(source.resolve(Path::new("/tmp/x.yaml")), PathBuf::from("/tmp/x.yaml"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    dir: PathBuf,
}

impl ConfigSource {
    /// Use `dir` as the document directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The document directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve a document name against the directory.
    ///
    /// Absolute paths are returned unchanged.
    #[must_use]
    pub fn resolve(&self, name: &Path) -> PathBuf {
        if name.is_absolute() {
            name.to_path_buf()
        } else {
            self.dir.join(name)
        }
    }

    /// List configuration documents in the directory, sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory cannot be read.
    pub fn list_documents(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir).map_err(|source| Error::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut documents = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            let is_document = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext));
            if is_document && path.is_file() {
                documents.push(path);
            }
        }
        documents.sort();
        Ok(documents)
    }
}

impl Default for ConfigSource {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Loads and stores configuration documents.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and parse a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Parse`]
    /// if it is not well-formed YAML.
    pub fn load_file(path: &Path) -> Result<Document> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded {} bytes from {}", contents.len(), path.display());
        Document::parse(&path.display().to_string(), &contents)
    }

    /// Load a document and validate it.
    ///
    /// # Errors
    ///
    /// Returns the load error, or [`Error::Validation`] for the first
    /// violated invariant.
    pub fn load_and_validate(path: &Path) -> Result<ValidatedConfig> {
        let document = Self::load_file(path)?;
        ConfigValidator::validate(&document)
    }

    /// Write a validated configuration back to disk as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn persist(path: &Path, config: &ValidatedConfig) -> Result<()> {
        let yaml = config.document().to_yaml()?;
        fs::write(path, yaml).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("wrote configuration to {}", path.display());
        Ok(())
    }
}
