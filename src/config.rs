use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default number of git processes a single repository handle may run at once
pub const DEFAULT_MAX_WORKERS: usize = 4;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct StudioConfig {
    #[serde(default)]
    pub executor: ExecutorConfig,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Program invoked for every command
    pub git_binary: PathBuf,
    /// Upper bound on concurrent invocations per repository handle
    pub max_workers: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            git_binary: PathBuf::from("git"),
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

pub fn get_default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "gitstudio")
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.config_dir().join("gitstudio.toml"))
}

impl StudioConfig {
    /// Load configuration from `config_path`, or from the platform config
    /// directory when none is given. Only a missing default file yields the
    /// defaults; an explicit path must exist.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from(&path);
        }

        let path = get_default_config_path()?;
        if !path.exists() {
            return Ok(StudioConfig::default());
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: StudioConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.executor.max_workers == 0 {
            anyhow::bail!("executor.max_workers must be at least 1");
        }
        if self.executor.git_binary.as_os_str().is_empty() {
            anyhow::bail!("executor.git_binary must not be empty");
        }
        Ok(())
    }
}
