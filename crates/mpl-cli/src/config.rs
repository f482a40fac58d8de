//! Project configuration loaded from `mpl.toml`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use anyhow::Context;
use mpl_syntax::ParseOptions;

pub(crate) const CONFIG_FILES: &[&str] = &["mpl.toml", ".mpl.toml"];

/// File extensions recognized when no `[files] extensions` are configured.
pub(crate) const DEFAULT_EXTENSIONS: &[&str] = &["mpl", "smart", "fast", "easy"];

/// Resolved configuration for one project root.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Directory exclusion patterns are relative to.
    pub root: PathBuf,
    /// Config file path (if found).
    pub config_path: Option<PathBuf>,
    /// Lower-case extensions of source files, without the dot.
    pub extensions: Vec<String>,
    /// Paths matching any of these are skipped during discovery.
    pub exclude: Vec<glob::Pattern>,
    /// Options passed to the parser.
    pub parse_options: ParseOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    files: FilesSection,
    parser: ParserSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FilesSection {
    extensions: Option<Vec<String>>,
    exclude: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ParserSection {
    max_nesting_depth: Option<u32>,
}

impl ProjectConfig {
    /// Looks for a config file in `start` and its ancestors. Without one,
    /// `start` becomes the root and defaults apply.
    pub fn discover(start: &Path) -> Self {
        for dir in start.ancestors() {
            if let Some(path) = find_config_file(dir) {
                return Self::load_from(dir, path);
            }
        }
        Self::base(start, None)
    }

    /// Loads an explicitly named config file.
    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            anyhow::bail!("config file '{}' does not exist", path.display());
        }
        let root = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Ok(Self::load_from(&root, path.to_path_buf()))
    }

    fn load_from(root: &Path, path: PathBuf) -> Self {
        debug!("using config {}", path.display());
        let contents = match std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))
        {
            Ok(contents) => contents,
            Err(err) => {
                warn!("{err:#}");
                return Self::base(root, Some(path));
            }
        };
        Self::from_contents(root, Some(path), &contents)
    }

    /// Builds a configuration from TOML text. Problems are logged and the
    /// affected settings keep their defaults.
    pub fn from_contents(root: &Path, config_path: Option<PathBuf>, contents: &str) -> Self {
        let mut config = Self::base(root, config_path);
        let parsed: ConfigFile = match toml::from_str(contents) {
            Ok(parsed) => parsed,
            Err(err) => {
                if let Some(path) = &config.config_path {
                    warn!("Failed to parse mpl config at {}: {err}", path.display());
                } else {
                    warn!("Failed to parse mpl config: {err}");
                }
                return config;
            }
        };

        if let Some(extensions) = parsed.files.extensions {
            config.extensions = extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect();
        }
        for pattern in &parsed.files.exclude {
            match glob::Pattern::new(pattern) {
                Ok(pattern) => config.exclude.push(pattern),
                Err(err) => warn!("Ignoring invalid exclude pattern '{pattern}': {err}"),
            }
        }
        match parsed.parser.max_nesting_depth {
            Some(0) => warn!("max_nesting_depth must be positive, keeping the default"),
            Some(depth) if depth > ParseOptions::MAX_SUPPORTED_NESTING_DEPTH => {
                warn!(
                    "max_nesting_depth {depth} is above the supported maximum, using {}",
                    ParseOptions::MAX_SUPPORTED_NESTING_DEPTH
                );
                config.parse_options.max_nesting_depth = ParseOptions::MAX_SUPPORTED_NESTING_DEPTH;
            }
            Some(depth) => config.parse_options.max_nesting_depth = depth,
            None => {}
        }
        config
    }

    fn base(root: &Path, config_path: Option<PathBuf>) -> Self {
        Self {
            root: root.to_path_buf(),
            config_path,
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            exclude: Vec::new(),
            parse_options: ParseOptions::default(),
        }
    }

    /// True if `path` has a recognized extension and is not excluded.
    pub fn is_source_file(&self, path: &Path) -> bool {
        let has_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            });
        has_extension && !self.is_excluded(path)
    }

    /// True if `path`, taken relative to the root, matches an exclusion.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_path(relative))
    }
}

pub(crate) fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}
