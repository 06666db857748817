//! Data directory layout.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

/// Overrides the data directory when set and non-empty.
pub const HIRE_HOME_ENV: &str = "HIRE_HOME";

const DEFAULT_DIR_NAME: &str = ".hire";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HirePaths {
    data_dir: PathBuf,
}

impl HirePaths {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `$HIRE_HOME`, else `~/.hire`.
    pub fn from_env() -> Result<Self> {
        if let Some(home) = std::env::var_os(HIRE_HOME_ENV).filter(|value| !value.is_empty()) {
            return Ok(Self::new(home));
        }
        let home = dirs::home_dir().ok_or_else(|| anyhow!("could not determine home directory"))?;
        Ok(Self::new(home.join(DEFAULT_DIR_NAME)))
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE_NAME)
    }

    #[must_use]
    pub fn sessions_dir(&self) -> PathBuf {
        session_store::sessions_root(&self.data_dir)
    }
}
