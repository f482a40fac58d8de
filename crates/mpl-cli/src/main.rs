//! CLI entrypoint for the MPL syntax toolkit.

#![forbid(unsafe_code)]

mod cli;
mod commands;
mod config;
mod sources;

use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, Command};
use config::ProjectConfig;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => ProjectConfig::load_file(path)?,
        None => ProjectConfig::discover(&std::env::current_dir()?),
    };

    match cli.command {
        Command::Check { paths } => commands::check::run(&paths, &config),
        Command::Tree { file, json } => {
            commands::tree::run(&file, json, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Symbols { file, json } => {
            commands::symbols::run(&file, json, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Definition {
            file,
            line,
            column,
            project,
        } => commands::definition::run(&file, line, column, project.as_deref(), &config),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
