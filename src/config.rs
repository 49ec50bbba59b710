// SPDX: CC0-1.0

//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `--config` on the command line
//! 2. `$FORMULA_PARAMS_CONFIG`
//! 3. `~/.config/formula_params/config.toml`
//! 4. Built-in defaults (everything is optional)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_ENV: &str = "FORMULA_PARAMS_CONFIG";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub shell: ShellConfig,
    pub hints: HintConfig,
    pub draft: DraftConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub prompt: String,
    /// Formula set when the shell starts.
    pub formula: Option<String>,
}

/// Similar-name notes for parameters that might be misspelled symbols.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HintConfig {
    pub enabled: bool,
    pub min_similarity: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    /// Where drafts are saved. Default: the working directory.
    pub dir: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".into(),
            formula: None,
        }
    }
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_similarity: 0.7,
        }
    }
}

impl DraftConfig {
    pub fn dir(&self) -> &Path {
        self.dir.as_deref().unwrap_or(Path::new("."))
    }
}

/// Loads the config at `explicit`, or at the default location if there is
/// one. An explicit path must exist; a missing default file means defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(p) = explicit {
        return read_config(p);
    }

    match config_path() {
        Some(p) if p.exists() => read_config(&p),
        _ => {
            debug!("no config file, using defaults");
            Ok(Config::default())
        }
    }
}

fn read_config(p: &Path) -> Result<Config> {
    let content =
        std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
    let config = toml::from_str(&content).with_context(|| format!("parsing {}", p.display()))?;
    debug!(path = %p.display(), "loaded config");
    Ok(config)
}

/// Resolve the config file path.
fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(p));
    }

    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join(env!("CARGO_PKG_NAME"))
            .join("config.toml")
    })
}
