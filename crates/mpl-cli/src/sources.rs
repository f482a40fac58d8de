//! Source discovery and loading.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, warn};

use crate::config::ProjectConfig;

#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub path: PathBuf,
    pub text: String,
}

/// Expands files and directories into the set of source files to process.
///
/// Files named explicitly are always kept. Directories are searched
/// recursively for the configured extensions, minus exclusions.
pub fn collect_paths(inputs: &[PathBuf], config: &ProjectConfig) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = BTreeSet::new();
    for input in inputs {
        if input.is_dir() {
            collect_dir(input, config, &mut paths)?;
        } else if input.is_file() {
            paths.insert(input.clone());
        } else {
            anyhow::bail!("'{}' does not exist", input.display());
        }
    }
    Ok(paths.into_iter().collect())
}

fn collect_dir(
    root: &Path,
    config: &ProjectConfig,
    paths: &mut BTreeSet<PathBuf>,
) -> anyhow::Result<()> {
    for ext in &config.extensions {
        let pattern = format!("{}/**/*.{ext}", glob::Pattern::escape(&root.display().to_string()));
        let entries = glob::glob_with(
            &pattern,
            glob::MatchOptions {
                case_sensitive: false,
                ..glob::MatchOptions::new()
            },
        )
        .with_context(|| format!("invalid glob pattern for '{}'", root.display()))?;
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    warn!("skipping unreadable path: {err}");
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }
            if config.is_excluded(&path) {
                debug!("excluded {}", path.display());
                continue;
            }
            paths.insert(path);
        }
    }
    Ok(())
}

/// Reads every path into memory.
pub fn load_sources(paths: &[PathBuf]) -> anyhow::Result<Vec<LoadedSource>> {
    paths.iter().map(|path| load_source(path)).collect()
}

pub fn load_source(path: &Path) -> anyhow::Result<LoadedSource> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read source '{}'", path.display()))?;
    Ok(LoadedSource {
        path: path.to_path_buf(),
        text,
    })
}
