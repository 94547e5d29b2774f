//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/greengrass-cli/config.toml`
//! 3. Environment variables: `GGCLI_*` prefix
//!
//! `--ggcRootPath` on the command line still beats `root_path` from here.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading settings or message files.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config error: {0}")]
    Load(#[from] ConfigError),

    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Unified configuration for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Installation root used when `--ggcRootPath` is absent
    pub root_path: Option<String>,
    /// Control-plane socket file name, relative to the root
    pub ipc_socket: String,
    /// Log directory name, relative to the root
    pub log_dir: String,
    /// Seconds to wait for a control-plane response
    pub timeout_secs: u64,
    /// TOML file overlaying the bundled message catalog
    pub messages: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_path: None,
            ipc_socket: "ipc.socket".into(),
            log_dir: "logs".into(),
            timeout_secs: 60,
            messages: None,
        }
    }
}

/// Get the XDG config directory for the CLI.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "greengrass-cli").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}`; on failure keep the input.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Load settings with layered precedence from the global config location.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings from defaults, `file` (if it exists) and `GGCLI_*` env vars.
    pub fn load_from(file: Option<&Path>) -> Result<Self, SettingsError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("ipc_socket", defaults.ipc_socket)?
            .set_default("log_dir", defaults.log_dir)?
            .set_default("timeout_secs", defaults.timeout_secs)?;

        if let Some(path) = file {
            if path.exists() {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        // GGCLI_ROOT_PATH, GGCLI_TIMEOUT_SECS, ...
        builder = builder.add_source(
            Environment::with_prefix("GGCLI")
                .prefix_separator("_")
                .separator("__"),
        );

        let mut settings: Self = builder.build()?.try_deserialize()?;

        // Expand ~ and $VAR in path-like fields
        settings.expand_paths();

        Ok(settings)
    }

    fn expand_paths(&mut self) {
        if let Some(root) = &self.root_path {
            self.root_path = Some(expand_env_vars(root));
        }
        if let Some(messages) = &self.messages {
            self.messages = Some(PathBuf::from(expand_env_vars(
                messages.to_string_lossy().as_ref(),
            )));
        }
    }
}
