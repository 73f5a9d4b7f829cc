//! Build script for rollcfg-cli.
//!
//! Generates the `rollcfg.1` man page into OUT_DIR with clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is restated here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("rollcfg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validate, compile and diff traffic-split routing configuration")
        .long_about(
            "Offline tooling for header-matched and weighted traffic-split routing documents",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Directory that relative document names are resolved against")
                .value_name("PATH")
                .global(true)
                .default_value(".")
                .env("ROLLCFG_CONFIG_DIR"),
        )
        .subcommands(vec![
            Command::new("validate")
                .about("Validate a configuration document")
                .long_about("Check one document, or every document with --all"),
            Command::new("compile")
                .about("Compile a document into gateway routes and upstreams")
                .long_about("Emit traffic-split routes and upstreams as YAML or JSON"),
            Command::new("diff")
                .about("Show categorized differences between two documents")
                .long_about("Group changes by kind and by the configuration object they touch"),
            Command::new("list")
                .about("List documents in the configuration directory")
                .long_about("List YAML documents, optionally with their validation status"),
            Command::new("show")
                .about("Show an overview of each service")
                .long_about("Print route, rollout state and rule table per service"),
            Command::new("edit-match")
                .about("Edit a header match of a service")
                .long_about("Change a match and write the re-validated document back"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("rollcfg.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
