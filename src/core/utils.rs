use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const HOME_ENV: &str = "POCKET_LEDGER_HOME";
const DEFAULT_DIR_NAME: &str = ".pocket_ledger";
const DATA_DIR: &str = "data";
const CONFIG_FILE: &str = "config.json";

/// Resolves the application directories, honouring the `POCKET_LEDGER_HOME` override.
pub struct PathResolver;

impl PathResolver {
    /// Application home, defaulting to `~/.pocket_ledger`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(candidate: Option<PathBuf>) -> PathBuf {
        candidate.unwrap_or_else(Self::base_dir)
    }

    /// Default directory holding `records.txt` and `categories.txt`.
    pub fn data_dir_in(base: &Path) -> PathBuf {
        base.join(DATA_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}
