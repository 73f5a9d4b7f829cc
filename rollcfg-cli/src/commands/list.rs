//! List command implementation.
//!
//! This module implements the `list` command, which shows the configuration
//! documents found in the configuration directory.

use crate::error::CliError;
use crate::utils::{FormatArg, GlobalOptions};
use clap::Args;
use rollcfg::ConfigLoader;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// List configuration documents in the configuration directory.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "human",
        env = "ROLLCFG_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: FormatArg,

    /// Also validate each document and report its status
    #[arg(long)]
    pub check: bool,
}

/// One listed document.
#[derive(Serialize)]
struct DocumentEntry {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    services: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl DocumentEntry {
    fn new(path: &Path, check: bool) -> Self {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        if !check {
            return Self {
                name,
                services: None,
                error: None,
            };
        }
        match ConfigLoader::load_and_validate(path) {
            Ok(config) => Self {
                name,
                services: Some(config.services().len()),
                error: None,
            },
            Err(e) => Self {
                name,
                services: None,
                error: Some(e.to_string()),
            },
        }
    }

    fn status(&self) -> String {
        match (&self.services, &self.error) {
            (Some(count), _) => format!("valid ({count} service(s))"),
            (None, Some(error)) => format!("invalid: {error}"),
            (None, None) => String::new(),
        }
    }
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let entries: Vec<DocumentEntry> = global
            .source()
            .list_documents()?
            .iter()
            .map(|path| DocumentEntry::new(path, self.check))
            .collect();

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        match self.format {
            FormatArg::Human => {
                if entries.is_empty() && !global.quiet {
                    eprintln!("No YAML documents found in {}", global.config_dir.display());
                }
                for entry in &entries {
                    if self.check {
                        writeln!(handle, "{}\t{}", entry.name, entry.status())?;
                    } else {
                        writeln!(handle, "{}", entry.name)?;
                    }
                }
            }
            FormatArg::Json => {
                let json = serde_json::to_string_pretty(&entries)
                    .map_err(|e| CliError::Library(e.into()))?;
                writeln!(handle, "{json}")?;
            }
            FormatArg::Yaml => {
                let yaml = serde_yaml::to_string(&entries).map_err(|e| {
                    CliError::Library(rollcfg::Error::Serialization {
                        message: e.to_string(),
                    })
                })?;
                write!(handle, "{yaml}")?;
            }
        }

        Ok(())
    }
}
