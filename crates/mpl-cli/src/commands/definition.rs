//! `mpl definition`: resolve the name under a caret to its label.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use mpl_ide::{goto_definition_in_files, FileId};
use mpl_syntax::{parse_with, LineIndex, Parse};
use text_size::TextSize;
use tracing::debug;

use crate::config::ProjectConfig;
use crate::sources::{collect_paths, load_source, load_sources, LoadedSource};

pub fn run(
    file: &Path,
    line: u32,
    column: u32,
    project: Option<&Path>,
    config: &ProjectConfig,
) -> anyhow::Result<ExitCode> {
    let mut sources = vec![load_source(file)?];
    if let Some(project) = project {
        let current = file.canonicalize().ok();
        let paths: Vec<PathBuf> = collect_paths(&[project.to_path_buf()], config)?
            .into_iter()
            .filter(|path| path.canonicalize().ok() != current)
            .collect();
        debug!("indexed {} project files", paths.len());
        sources.extend(load_sources(&paths)?);
    }

    let offset = caret_offset(&sources[0].text, line, column)
        .with_context(|| format!("{line}:{column} is not a position in '{}'", file.display()))?;
    let lines = resolve(&sources, offset, config);
    if lines.is_empty() {
        eprintln!("no definition found");
        return Ok(ExitCode::FAILURE);
    }
    for line in lines {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}

/// Converts a 1-based line and column to an offset.
fn caret_offset(text: &str, line: u32, column: u32) -> Option<TextSize> {
    let line = line.checked_sub(1)?;
    let column = column.checked_sub(1)?;
    LineIndex::new(text).offset(line, column)
}

/// Looks up the name at `offset` in the first source, rendering each result
/// as `path:line:column: name`.
fn resolve(sources: &[LoadedSource], offset: TextSize, config: &ProjectConfig) -> Vec<String> {
    let parses: Vec<Parse> = sources
        .iter()
        .map(|source| parse_with(&source.text, &config.parse_options))
        .collect();
    let files: Vec<(FileId, &Parse)> = parses
        .iter()
        .enumerate()
        .filter_map(|(idx, parse)| Some((FileId(u32::try_from(idx).ok()?), parse)))
        .collect();

    goto_definition_in_files(files.iter().copied(), FileId(0), offset)
        .into_iter()
        .filter_map(|result| {
            let idx = usize::try_from(result.file_id.0).ok()?;
            let source = sources.get(idx)?;
            let def = result.definition;
            Some(format!(
                "{}:{}:{}: {}",
                source.path.display(),
                def.line + 1,
                def.column + 1,
                def.name
            ))
        })
        .collect()
}
