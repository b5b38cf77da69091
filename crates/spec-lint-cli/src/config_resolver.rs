//! Locates the configuration for a scanned document.
//!
//! An explicit `--config` path always wins. Otherwise the document's
//! directory and then each ancestor is searched for `spec-lint.toml` or
//! `.spec-lint.toml`, so a design folder inherits the config of the project
//! it sits in. `$SPEC_LINT_CONFIG_DIR/config.toml` (default
//! `~/.spec-lint/config.toml`) is the last resort.
//!
//! A `rules.json` beside the chosen config file is that config's rule set.

use std::path::{Path, PathBuf};

const PROJECT_CONFIG_NAMES: &[&str] = &["spec-lint.toml", ".spec-lint.toml"];
const GLOBAL_CONFIG_NAME: &str = "config.toml";
const RULE_SET_NAME: &str = "rules.json";

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Nearest config in the document's directory or an ancestor.
    Project(PathBuf),
    /// The per-user config.
    Global(PathBuf),
    /// Nothing found; built-in defaults apply.
    Default,
}

impl ConfigSource {
    /// Returns the config file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` for the per-user config.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }

    /// The `rules.json` next to the config file, when there is one.
    #[must_use]
    pub fn rule_set(&self) -> Option<PathBuf> {
        let candidate = self.path()?.parent()?.join(RULE_SET_NAME);
        candidate.is_file().then_some(candidate)
    }
}

/// Resolves the configuration for `document`.
#[must_use]
pub fn resolve(document: &Path, explicit: Option<&Path>) -> ConfigSource {
    let dir = document
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let start = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    resolve_from(&start, explicit, global_config_dir())
}

fn resolve_from(
    start: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = start.ancestors().find_map(project_config_in) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, |found| {
            tracing::debug!("Found global config: {}", found.display());
            ConfigSource::Global(found)
        })
}

fn project_config_in(dir: &Path) -> Option<PathBuf> {
    PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// `$SPEC_LINT_CONFIG_DIR`, else `~/.spec-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("SPEC_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".spec-lint"))
}
