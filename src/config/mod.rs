//! Configuration management for `ct`.
//!
//! Values are resolved in layers, lowest to highest:
//! - Built-in defaults (`.contacts`, page size 10)
//! - YAML file (`--config`, else `<data_dir>/config.yaml` when present)
//! - Environment (`CT_DATA_DIR`, `CT_PAGE_SIZE`) and command-line flags
//!
//! Environment variables are read by clap into the same `CliOverrides` as
//! the flags, with a flag beating its variable.

use std::fs;
use std::path::{Path, PathBuf};

use contacts_lib::{DEFAULT_PAGE_SIZE, Result, TrackerError};
use serde::{Deserialize, Serialize};

/// Name of the config file looked up inside the data directory.
pub const CONFIG_FILE: &str = "config.yaml";

/// Data directory used when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = ".contacts";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Directory holding the snapshot records and `config.yaml`.
    pub data_dir: PathBuf,
    /// Contacts per page in list views.
    pub page_size: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TrackerConfig {
    /// Path of the config file inside the data directory.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(data_dir) = file.data_dir {
            self.data_dir = data_dir;
        }
        if let Some(page_size) = file.page_size {
            self.page_size = page_size;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(TrackerError::Config(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub page_size: Option<usize>,
}

/// On-disk shape of `config.yaml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub page_size: Option<usize>,
}

impl FileConfig {
    /// Parse a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file cannot be read or is not valid config.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| TrackerError::Config(format!("{}: {e}", path.display())))?;
        Self::parse(&text).map_err(|e| match e {
            TrackerError::Config(reason) => {
                TrackerError::Config(format!("{}: {reason}", path.display()))
            }
            other => other,
        })
    }

    /// Parse YAML text. A document with only comments is an empty config.
    ///
    /// # Errors
    ///
    /// Returns `Config` on malformed YAML or unknown keys.
    pub fn parse(text: &str) -> Result<Self> {
        let blank = text.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if blank {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| TrackerError::Config(e.to_string()))
    }
}

/// Resolve the configuration for this invocation.
///
/// # Errors
///
/// Returns `Config` if an explicit `--config` file is missing or invalid,
/// the default config file is invalid, or the page size resolves to 0.
pub fn load(overrides: &CliOverrides) -> Result<TrackerConfig> {
    let mut config = TrackerConfig::default();

    let config_path = match &overrides.config {
        Some(path) => Some(path.clone()),
        None => {
            let dir = overrides.data_dir.as_deref().unwrap_or(&config.data_dir);
            let candidate = dir.join(CONFIG_FILE);
            candidate.is_file().then_some(candidate)
        }
    };

    if let Some(path) = config_path {
        tracing::debug!(path = %path.display(), "reading config file");
        config.apply_file(FileConfig::read(&path)?);
    }

    if let Some(data_dir) = &overrides.data_dir {
        config.data_dir.clone_from(data_dir);
    }
    if let Some(page_size) = overrides.page_size {
        config.page_size = page_size;
    }

    config.validate()?;
    Ok(config)
}

/// Template written by `ct init`.
#[must_use]
pub const fn default_config_yaml() -> &'static str {
    r"# Contact tracker configuration
# Environment (CT_DATA_DIR, CT_PAGE_SIZE) and flags override these values.

# Contacts shown per page in list views.
page_size: 10
"
}
