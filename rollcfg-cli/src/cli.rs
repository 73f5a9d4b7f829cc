//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompileCommand, CompletionsCommand, DiffCommand, EditMatchCommand, ListCommand, ShowCommand,
    ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Validate, compile and diff traffic-split routing configuration.
#[derive(Parser)]
#[command(name = "rollcfg")]
#[command(
    version,
    about = "Validate, compile and diff traffic-split routing configuration",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Directory that relative document names are resolved against
    #[arg(
        long,
        value_name = "PATH",
        global = true,
        env = "ROLLCFG_CONFIG_DIR",
        default_value = "."
    )]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Validate a configuration document
    Validate(ValidateCommand),

    /// Compile a document into gateway routes and upstreams
    Compile(CompileCommand),

    /// Show categorized differences between two documents
    Diff(DiffCommand),

    /// List documents in the configuration directory
    List(ListCommand),

    /// Show an overview of each service
    Show(ShowCommand),

    /// Edit a header match of a service
    EditMatch(EditMatchCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
