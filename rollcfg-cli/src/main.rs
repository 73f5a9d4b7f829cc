//! Main entry point for the rollcfg CLI.
//!
//! Commands:
//! - `validate`: check documents against the routing invariants
//! - `compile`: emit gateway routes and upstreams
//! - `diff`: categorized differences between two documents
//! - `list`, `show`: inspect documents and services
//! - `edit-match`: change a header match in place

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    rollcfg::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config_dir: cli.config_dir,
    };

    let result = match cli.command {
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Compile(cmd) => cmd.execute(&global),
        cli::Command::Diff(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::EditMatch(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
