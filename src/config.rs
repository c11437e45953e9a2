use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{OmError, Result};
use crate::search::DEFAULT_TOP_N;

/// File name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "occmatch.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub ranker: RankerConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path (argument or `OCCMATCH_CONFIG`) replaces both the
    /// global and the project file. Environment overrides apply last.
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        Self::load_with(explicit_path, project_root, &|key: &str| std::env::var(key).ok())
    }

    fn load_with(
        explicit_path: Option<&Path>,
        project_root: &Path,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| lookup("OCCMATCH_CONFIG").map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_patch(&project_root.join(PROJECT_CONFIG_FILE))? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides_with(lookup)?;

        Ok(config)
    }

    /// Path of the per-user config file, if the platform has a config dir.
    #[must_use]
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("occmatch/config.toml"))
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match Self::global_path() {
            Some(path) => Self::load_patch(&path),
            None => Ok(None),
        }
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| OmError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| OmError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.taxonomy {
            self.taxonomy.merge(patch);
        }
        if let Some(patch) = patch.matcher {
            self.matcher.merge(patch);
        }
        if let Some(patch) = patch.ranker {
            self.ranker.merge(patch);
        }
    }

    /// Apply `OCCMATCH_*` overrides read through `lookup`.
    pub fn apply_env_overrides_with(
        &mut self,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Result<()> {
        if let Some(path) = lookup("OCCMATCH_TAXONOMY_PATH") {
            self.taxonomy.path = Some(PathBuf::from(path));
        }
        if let Some(value) = env_usize(lookup, "OCCMATCH_TOP_N")? {
            self.matcher.default_top_n = value;
        }
        if let Some(value) = env_bool(lookup, "OCCMATCH_RANKER_ENABLED") {
            self.ranker.enabled = value;
        }
        if let Some(command) = lookup("OCCMATCH_RANKER_COMMAND") {
            self.ranker.command = Some(command);
        }
        if let Some(args) = env_list(lookup, "OCCMATCH_RANKER_ARGS") {
            self.ranker.args = args;
        }
        if let Some(value) = env_u64(lookup, "OCCMATCH_RANKER_TIMEOUT_MS")? {
            self.ranker.timeout_ms = value;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Taxonomy JSON used when `--taxonomy` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl TaxonomyConfig {
    fn merge(&mut self, patch: TaxonomyPatch) {
        if let Some(value) = patch.path {
            self.path = Some(value);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            default_top_n: DEFAULT_TOP_N,
        }
    }
}

impl MatcherConfig {
    fn merge(&mut self, patch: MatcherPatch) {
        if let Some(value) = patch.default_top_n {
            self.default_top_n = value;
        }
    }
}

/// External ranker command settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankerConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: None,
            args: Vec::new(),
            timeout_ms: DEFAULT_RANKER_TIMEOUT_MS,
        }
    }
}

impl RankerConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    fn merge(&mut self, patch: RankerPatch) {
        if let Some(value) = patch.enabled {
            self.enabled = value;
        }
        if let Some(value) = patch.command {
            self.command = Some(value);
        }
        if let Some(value) = patch.args {
            self.args = value;
        }
        if let Some(value) = patch.timeout_ms {
            self.timeout_ms = value;
        }
    }
}

pub const DEFAULT_RANKER_TIMEOUT_MS: u64 = 15_000;

const fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_RANKER_TIMEOUT_MS
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub taxonomy: Option<TaxonomyPatch>,
    pub matcher: Option<MatcherPatch>,
    pub ranker: Option<RankerPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TaxonomyPatch {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MatcherPatch {
    pub default_top_n: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RankerPatch {
    pub enabled: Option<bool>,
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
    pub timeout_ms: Option<u64>,
}

fn env_bool(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    lookup(key).map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_usize(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<Option<usize>> {
    match lookup(key) {
        Some(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|err| OmError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}

fn env_u64(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    match lookup(key) {
        Some(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|err| OmError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}

fn env_list(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<Vec<String>> {
    lookup(key).map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    })
}
