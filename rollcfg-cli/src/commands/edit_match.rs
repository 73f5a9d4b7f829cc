//! Edit-match command implementation.
//!
//! Changes one header match of a service. The edited document is
//! re-validated before anything is written.

use crate::error::CliError;
use crate::utils::{load_validated, GlobalOptions};
use clap::Args;
use rollcfg::config::Operator;
use rollcfg::{edit_match, ConfigLoader, Differ, MatchEdit};
use std::path::PathBuf;

/// Edit a header match of a service.
#[derive(Args)]
pub struct EditMatchCommand {
    /// Document to edit, relative to the configuration directory
    #[arg(value_name = "FILE", default_value = "input.yaml")]
    pub file: PathBuf,

    /// Service owning the match
    #[arg(long, value_name = "NAME")]
    pub service: String,

    /// Id of the match to edit
    #[arg(long = "match", value_name = "ID")]
    pub match_id: String,

    /// New header name
    #[arg(long, value_name = "HEADER")]
    pub header_name: Option<String>,

    /// New operator (== or ~=)
    #[arg(long, value_name = "OP", allow_hyphen_values = true)]
    pub operator: Option<String>,

    /// New comparison value
    #[arg(long, value_name = "VALUE", allow_hyphen_values = true)]
    pub value: Option<String>,

    /// Write the edited document here instead of updating FILE
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Show the resulting changes without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl EditMatchCommand {
    fn build_edit(&self) -> Result<MatchEdit, CliError> {
        let mut edit = MatchEdit::new();
        if let Some(header_name) = &self.header_name {
            edit = edit.with_header_name(header_name);
        }
        if let Some(operator) = &self.operator {
            let operator: Operator = operator.parse().map_err(CliError::InvalidArguments)?;
            edit = edit.with_operator(operator);
        }
        if let Some(value) = &self.value {
            edit = edit.with_value(value);
        }
        if edit.is_empty() {
            return Err(CliError::InvalidArguments(
                "nothing to change: pass --header-name, --operator or --value".to_string(),
            ));
        }
        Ok(edit)
    }

    /// Execute the edit-match command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let edit = self.build_edit()?;
        let config = load_validated(global, &self.file)?;
        let edited = edit_match(&config, &self.service, &self.match_id, &edit)?;

        if self.dry_run {
            let changes = Differ::new().diff(config.document(), edited.document());
            println!("{}", changes.render_human());
            return Ok(());
        }

        let target = match &self.output {
            Some(path) => path.clone(),
            None => global.resolve(&self.file),
        };
        ConfigLoader::persist(&target, &edited)?;
        if !global.quiet {
            println!(
                "Updated match '{}' in service {} ({})",
                self.match_id,
                self.service,
                target.display()
            );
        }
        Ok(())
    }
}
