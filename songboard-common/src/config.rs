//! Configuration loading and root folder resolution
//!
//! Root folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. `SONGBOARD_ROOT_FOLDER`, then `SONGBOARD_ROOT` environment variable
//! 3. `root_folder` key of the module's TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or malformed TOML file is never fatal: it is logged and the next
//! tier is used.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Primary root folder environment variable
pub const ROOT_FOLDER_ENV: &str = "SONGBOARD_ROOT_FOLDER";
/// Alternative root folder environment variable
pub const ROOT_ENV: &str = "SONGBOARD_ROOT";
/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "songboard.db";

/// Logging section of the TOML config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Per-module TOML configuration (`<config_dir>/songboard/<module>.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub root_folder: Option<PathBuf>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        toml::from_str(&content)
            .map_err(|e| Error::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    /// Load the module's config file if present and valid
    pub fn load_for_module(module_name: &str) -> Option<Self> {
        let path = config_file_path(module_name)?;
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return None;
        }
        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                None
            }
        }
    }
}

/// Path of a module's TOML config file
pub fn config_file_path(module_name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("songboard").join(format!("{}.toml", module_name)))
}

/// OS-dependent defaults used when nothing else is configured
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        // ~/.local/share/songboard, ~/Library/Application Support/songboard,
        // %LOCALAPPDATA%\songboard
        let root_folder = dirs::data_local_dir()
            .map(|d| d.join("songboard"))
            .unwrap_or_else(|| PathBuf::from("./songboard_data"));

        Self { root_folder }
    }
}

/// Resolves the data root folder for a module
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    module_name: String,
    cli_arg: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            cli_arg: None,
        }
    }

    /// Set the command-line override (highest priority)
    pub fn with_cli_arg(mut self, cli_arg: Option<PathBuf>) -> Self {
        self.cli_arg = cli_arg;
        self
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        for var in [ROOT_FOLDER_ENV, ROOT_ENV] {
            if let Ok(path) = std::env::var(var) {
                if !path.trim().is_empty() {
                    return PathBuf::from(path);
                }
            }
        }

        if let Some(root_folder) =
            TomlConfig::load_for_module(&self.module_name).and_then(|c| c.root_folder)
        {
            return root_folder;
        }

        CompiledDefaults::for_current_platform().root_folder
    }
}

/// Prepares the resolved root folder for use
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    /// Create the root folder (and parents) if missing; idempotent
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE)
    }

    pub fn database_exists(&self) -> bool {
        self.database_path().exists()
    }
}
