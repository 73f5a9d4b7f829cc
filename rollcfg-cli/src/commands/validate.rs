//! Command to validate routing configuration documents.

use crate::error::CliError;
use crate::utils::{load_validated, GlobalOptions};
use clap::Args;
use rollcfg::ConfigLoader;
use std::path::PathBuf;

/// Validate a routing configuration document.
#[derive(Args)]
pub struct ValidateCommand {
    /// Document to validate, relative to the configuration directory
    #[arg(value_name = "FILE", default_value = "input.yaml", conflicts_with = "all")]
    pub file: PathBuf,

    /// Validate every document in the configuration directory
    #[arg(long)]
    pub all: bool,
}

impl ValidateCommand {
    /// Execute the validate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.all {
            let config = load_validated(global, &self.file)?;
            if !global.quiet {
                println!(
                    "Configuration is valid: {} ({} service(s))",
                    self.file.display(),
                    config.services().len()
                );
            }
            return Ok(());
        }

        let documents = global.source().list_documents()?;
        if documents.is_empty() {
            return Err(CliError::InvalidArguments(format!(
                "no YAML documents found in {}",
                global.config_dir.display()
            )));
        }

        let mut failed = 0;
        for path in &documents {
            match ConfigLoader::load_and_validate(path) {
                Ok(config) => {
                    if !global.quiet {
                        println!(
                            "{}: valid ({} service(s))",
                            path.display(),
                            config.services().len()
                        );
                    }
                }
                Err(e) => {
                    failed += 1;
                    eprintln!("{}: {e}", path.display());
                }
            }
        }

        if failed > 0 {
            return Err(CliError::SemanticFailure(format!(
                "{failed} of {} document(s) failed validation",
                documents.len()
            )));
        }
        Ok(())
    }
}
