//! CLI configuration loaded from TOML.
//!
//! Search order: an explicit `--config` path, then `./adjg.toml`, then
//! `<config_dir>/adjg/config.toml`. A missing file means defaults; an
//! explicit path that cannot be read is an error.
//!
//! ```toml
//! [graph]
//! directed = false
//!
//! [output]
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const PROJECT_FILE: &str = "adjg.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Direction for graph files that do not state one.
    #[serde(default = "default_true")]
    pub directed: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed: default_true(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `pretty`, `text` or `json`.
    #[serde(default)]
    pub format: Option<String>,
}

const fn default_true() -> bool {
    true
}

/// Load the effective configuration.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read or parsed, or if
/// `explicit` does not exist.
pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        return parse_file(path);
    }

    match discover(cwd) {
        Some(path) => parse_file(&path),
        None => {
            debug!("no config file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// First existing config file in search order.
fn discover(cwd: &Path) -> Option<PathBuf> {
    let project = cwd.join(PROJECT_FILE);
    if project.is_file() {
        return Some(project);
    }

    let user = dirs::config_dir()?.join("adjg/config.toml");
    user.is_file().then_some(user)
}

fn parse_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}
