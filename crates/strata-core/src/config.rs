use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global user configuration loaded from `~/.strata/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub resolve: ResolveConfig,
}

/// Resolution policy from `[resolve]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveConfig {
    #[serde(default = "default_true", rename = "fail-on-cycle")]
    pub fail_on_cycle: bool,
    #[serde(default = "default_true", rename = "fail-on-breach")]
    pub fail_on_breach: bool,
    /// Optimize sweep cap; the resolver never goes below the tree's depth + 1.
    #[serde(default = "default_max_optimize_rounds", rename = "max-optimize-rounds")]
    pub max_optimize_rounds: usize,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            fail_on_cycle: true,
            fail_on_breach: true,
            max_optimize_rounds: default_max_optimize_rounds(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_optimize_rounds() -> usize {
    100
}

/// Per-file `[resolve]` table; every field is optional and wins over the global value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOverrides {
    #[serde(default, rename = "fail-on-cycle")]
    pub fail_on_cycle: Option<bool>,
    #[serde(default, rename = "fail-on-breach")]
    pub fail_on_breach: Option<bool>,
    #[serde(default, rename = "max-optimize-rounds")]
    pub max_optimize_rounds: Option<usize>,
}

impl ResolveConfig {
    pub fn with_overrides(mut self, overrides: &ResolveOverrides) -> Self {
        if let Some(v) = overrides.fail_on_cycle {
            self.fail_on_cycle = v;
        }
        if let Some(v) = overrides.fail_on_breach {
            self.fail_on_breach = v;
        }
        if let Some(v) = overrides.max_optimize_rounds {
            self.max_optimize_rounds = v;
        }
        self
    }
}

impl GlobalConfig {
    /// Load the global configuration, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            tracing::debug!("no global config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            strata_util::errors::StrataError::Config {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        toml::from_str(&content).map_err(|e| {
            strata_util::errors::StrataError::Config {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the Strata data directory: `$STRATA_HOME`, else `~/.strata/`.
pub fn dirs_path() -> PathBuf {
    if let Ok(home) = std::env::var("STRATA_HOME") {
        return PathBuf::from(home);
    }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".strata")
}
