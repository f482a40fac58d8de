//! CLI definitions for mpl.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "mpl",
    version,
    about = "MPL syntax checker and inspector",
    infer_subcommands = true,
    after_help = "Examples:\n  mpl check                              # every source under the current directory\n  mpl check src/main.mpl lib/            # selected files and folders\n  mpl tree main.mpl --json               # concrete syntax tree as JSON\n  mpl definition main.mpl --line 4 --column 9 --project ."
)]
pub struct Cli {
    /// Show debug logging on stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Configuration file (default: nearest mpl.toml or .mpl.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse sources and report syntax errors.
    Check {
        /// Files or directories to check (default: current directory).
        paths: Vec<PathBuf>,
    },
    /// Print the concrete syntax tree of a file.
    Tree {
        /// Source file.
        file: PathBuf,
        /// Emit JSON instead of an indented dump.
        #[arg(long)]
        json: bool,
    },
    /// List the labels declared in a file.
    Symbols {
        /// Source file.
        file: PathBuf,
        /// Emit JSON instead of one line per label.
        #[arg(long)]
        json: bool,
    },
    /// Find the label a name refers to.
    #[command(
        after_help = "Lines and columns are 1-based; columns count bytes.\nWithout a local declaration, labels of the same name anywhere in --project are listed."
    )]
    Definition {
        /// Source file.
        file: PathBuf,
        /// Line of the caret (1-based).
        #[arg(long)]
        line: u32,
        /// Column of the caret (1-based).
        #[arg(long)]
        column: u32,
        /// Project folder searched when the file has no earlier declaration.
        #[arg(long)]
        project: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_definition_arguments() {
        let cli = Cli::try_parse_from([
            "mpl", "definition", "a.mpl", "--line", "2", "--column", "5", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Definition {
                line,
                column,
                project,
                ..
            } => {
                assert_eq!((line, column), (2, 5));
                assert!(project.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
