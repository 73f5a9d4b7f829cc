//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including document resolution, loading and output formatting.

use crate::error::CliError;
use clap::ValueEnum;
use rollcfg::output::{OutputFormat, Render};
use rollcfg::{ConfigLoader, ConfigSource, ValidatedConfig};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // verbose is consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Directory that relative document names resolve against.
    pub config_dir: PathBuf,
}

impl GlobalOptions {
    /// The configuration source for this invocation.
    pub fn source(&self) -> ConfigSource {
        ConfigSource::new(&self.config_dir)
    }

    /// Resolve a document name against the configuration directory.
    pub fn resolve(&self, name: &Path) -> PathBuf {
        self.source().resolve(name)
    }
}

/// Output format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// Human-readable text
    Human,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Human => OutputFormat::Human,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

/// Load and validate a document named relative to the configuration directory.
pub fn load_validated(global: &GlobalOptions, name: &Path) -> Result<ValidatedConfig, CliError> {
    let path = global.resolve(name);
    log::debug!("loading {}", path.display());
    ConfigLoader::load_and_validate(&path).map_err(CliError::from)
}

/// Render a value and write it to stdout.
pub fn print_rendered<T: Render + ?Sized>(format: FormatArg, value: &T) -> Result<(), CliError> {
    let rendered = OutputFormat::from(format).render(value)?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", rendered.trim_end())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_and_absolute() {
        let global = GlobalOptions {
            verbose: false,
            quiet: false,
            config_dir: PathBuf::from("/etc/rollcfg"),
        };
        assert_eq!(
            global.resolve(Path::new("input.yaml")),
            PathBuf::from("/etc/rollcfg/input.yaml")
        );
        assert_eq!(
            global.resolve(Path::new("/tmp/other.yaml")),
            PathBuf::from("/tmp/other.yaml")
        );
    }

    #[test]
    fn test_format_arg_conversion() {
        assert_eq!(OutputFormat::from(FormatArg::Json), OutputFormat::Json);
        assert_eq!(OutputFormat::from(FormatArg::Yaml), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from(FormatArg::Human), OutputFormat::Human);
    }
}
