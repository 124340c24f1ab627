use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::PathResolver,
    errors::{LedgerError, Result},
    ledger::LedgerProfile,
    utils::persistence::save_json_to_file,
};

/// User preferences persisted as `config.json` in the application home.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory holding the ledger files. Defaults to `<home>/data`.
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Period prefix used by summaries when none is given. `None` means the current month.
    pub default_period: Option<String>,
    #[serde(default)]
    pub profile: LedgerProfile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            recent_limit: Self::default_recent_limit(),
            default_period: None,
            profile: LedgerProfile::default(),
        }
    }
}

impl Config {
    pub fn default_recent_limit() -> usize {
        10
    }

    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathResolver::data_dir_in(base))
    }
}

/// Loads and saves [`Config`] under an application home directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        let path = PathResolver::config_file_in(&base);
        Self { base, path }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file, returning defaults when it does not exist yet.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            LedgerError::Config(format!("{}: {}", self.path.display(), err))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        save_json_to_file(config, &self.path)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
