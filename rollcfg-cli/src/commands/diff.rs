//! Diff command implementation.
//!
//! Compares two documents and prints the changes grouped by kind and by the
//! configuration object they touch.

use crate::error::CliError;
use crate::utils::{print_rendered, FormatArg, GlobalOptions};
use clap::{Args, ValueEnum};
use rollcfg::{CategoryStrategy, Differ};
use std::path::PathBuf;

/// Show the differences between two documents.
#[derive(Args)]
pub struct DiffCommand {
    /// Original document, relative to the configuration directory
    #[arg(value_name = "OLD")]
    pub old: PathBuf,

    /// Updated document, relative to the configuration directory
    #[arg(value_name = "NEW")]
    pub new: PathBuf,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "human",
        env = "ROLLCFG_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: FormatArg,

    /// How changed paths are assigned to categories
    #[arg(long, value_enum, default_value = "precedence")]
    pub categorize: CategorizeArg,

    /// Exit with status 1 when the documents differ
    #[arg(long)]
    pub exit_code: bool,
}

/// Categorization strategy argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum CategorizeArg {
    /// First known label found anywhere in the path
    Precedence,
    /// Label closest to the changed node
    Innermost,
}

impl From<CategorizeArg> for CategoryStrategy {
    fn from(arg: CategorizeArg) -> Self {
        match arg {
            CategorizeArg::Precedence => CategoryStrategy::Precedence,
            CategorizeArg::Innermost => CategoryStrategy::Innermost,
        }
    }
}

impl DiffCommand {
    /// Execute the diff command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let old = global.resolve(&self.old);
        let new = global.resolve(&self.new);

        let report = Differ::new()
            .with_strategy(self.categorize.into())
            .diff_files(&old, &new)?;

        let identical = report.categorized.is_empty();
        if identical && self.format == FormatArg::Human {
            if !global.quiet {
                println!("The files are identical.");
            }
        } else {
            print_rendered(self.format, &report.categorized)?;
        }

        if self.exit_code && !identical {
            return Err(CliError::SemanticFailure(format!(
                "Differences found: {} change(s)",
                report.categorized.len()
            )));
        }
        Ok(())
    }
}
