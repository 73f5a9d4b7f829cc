//! Compile command implementation.
//!
//! Compiles a validated document into the routing engine's traffic-split
//! configuration and prints it or writes it to a file.

use crate::error::CliError;
use crate::utils::{load_validated, print_rendered, FormatArg, GlobalOptions};
use clap::Args;
use rollcfg::output::OutputFormat;
use rollcfg::Compiler;
use std::path::PathBuf;

/// Compile a document into routing-engine configuration.
#[derive(Args)]
pub struct CompileCommand {
    /// Document to compile, relative to the configuration directory
    #[arg(value_name = "FILE", default_value = "input.yaml")]
    pub file: PathBuf,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "yaml",
        env = "ROLLCFG_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: FormatArg,

    /// Write the result to this file instead of stdout
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl CompileCommand {
    /// Execute the compile command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_validated(global, &self.file)?;
        let target = Compiler::compile(&config);

        match self.output {
            Some(path) => {
                let rendered = OutputFormat::from(self.format).render(&target)?;
                std::fs::write(&path, rendered)?;
                if !global.quiet {
                    eprintln!(
                        "Compiled {} route(s) to {}",
                        target.routes.len(),
                        path.display()
                    );
                }
                Ok(())
            }
            None => print_rendered(self.format, &target),
        }
    }
}
