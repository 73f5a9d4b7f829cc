//! Shell completion generation command.
//!
//! Prints a completion script for the requested shell on stdout, with
//! installation hints on stderr.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

const BIN_NAME: &str = "rollcfg";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    fn install_hint(&self) -> Option<&'static str> {
        match self.shell {
            Shell::Bash => Some(
                "#   rollcfg completions bash > ~/.local/share/bash-completion/completions/rollcfg",
            ),
            Shell::Zsh => Some("#   rollcfg completions zsh > ~/.zsh/completions/_rollcfg"),
            Shell::Fish => {
                Some("#   rollcfg completions fish > ~/.config/fish/completions/rollcfg.fish")
            }
            Shell::PowerShell => Some("#   rollcfg completions powershell > $PROFILE"),
            _ => None,
        }
    }

    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            if let Some(hint) = self.install_hint() {
                eprintln!("# Install with:");
                eprintln!("{hint}");
                eprintln!();
            }
        }

        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}
