//! Show command implementation.
//!
//! Prints an overview of each service in a document: its route, rollout
//! state, object counts and rule table.

use crate::error::CliError;
use crate::utils::{load_validated, print_rendered, FormatArg, GlobalOptions};
use clap::Args;
use rollcfg::{summarize, ServiceSummary};
use std::path::PathBuf;

/// Show a service overview.
#[derive(Args)]
pub struct ShowCommand {
    /// Document to read, relative to the configuration directory
    #[arg(value_name = "FILE", default_value = "input.yaml")]
    pub file: PathBuf,

    /// Only show this service
    #[arg(long, value_name = "NAME")]
    pub service: Option<String>,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "human",
        env = "ROLLCFG_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: FormatArg,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_validated(global, &self.file)?;
        let mut summaries = summarize(&config);

        if let Some(name) = &self.service {
            summaries.retain(|s: &ServiceSummary| &s.name == name);
            if summaries.is_empty() {
                return Err(CliError::InvalidArguments(format!(
                    "service '{name}' not found in {}",
                    self.file.display()
                )));
            }
        }

        print_rendered(self.format, summaries.as_slice())
    }
}
