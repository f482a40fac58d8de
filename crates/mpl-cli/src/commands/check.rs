//! `mpl check`: parse sources and report syntax errors.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use mpl_syntax::{parse_with, LineIndex, Parse};
use tracing::info;

use crate::commands::display_position;
use crate::config::ProjectConfig;
use crate::sources::{collect_paths, load_sources};

pub fn run(inputs: &[PathBuf], config: &ProjectConfig) -> anyhow::Result<ExitCode> {
    let inputs = if inputs.is_empty() {
        vec![config.root.clone()]
    } else {
        inputs.to_vec()
    };
    let paths = collect_paths(&inputs, config)?;
    let sources = load_sources(&paths)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut errors = 0;
    for source in &sources {
        let parse = parse_with(&source.text, &config.parse_options);
        errors += report(&mut out, &source.path, &parse)?;
    }
    out.flush()?;
    info!(files = sources.len(), errors, "check finished");

    Ok(if errors == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Writes one `path:line:column: Token: message` line per error and returns
/// the number of errors.
pub(crate) fn report(out: &mut impl Write, path: &Path, parse: &Parse) -> std::io::Result<usize> {
    let index = LineIndex::new(parse.text());
    for err in parse.errors() {
        let (line, column) = display_position(&index, err.range.start());
        writeln!(
            out,
            "{}:{line}:{column}: {}: {}",
            path.display(),
            err.token,
            err.message
        )?;
    }
    Ok(parse.errors().len())
}
