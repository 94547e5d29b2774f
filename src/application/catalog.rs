//! Message catalog for user-facing text.

use std::collections::HashMap;
use std::path::Path;

use tracing::warn;

use crate::config::SettingsError;
use crate::domain::MessageId;

const BUNDLED: &str = include_str!("messages.toml");

/// Looks up user-facing text by message id.
pub trait MessageCatalog: Send + Sync {
    fn lookup(&self, id: MessageId) -> String;
}

/// Catalog backed by a flat TOML table of `"key" = "text"` entries.
///
/// Unknown keys render as the key itself, so a swapped or partial catalog
/// never breaks dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TomlCatalog {
    messages: HashMap<String, String>,
}

impl TomlCatalog {
    /// The catalog compiled into the binary.
    pub fn bundled() -> Self {
        Self::from_toml(BUNDLED).unwrap_or_else(|e| {
            warn!("bundled message catalog unreadable: {e}");
            Self::default()
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        Ok(Self {
            messages: toml::from_str(content)?,
        })
    }

    /// Reads a catalog file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Entries of `other` replace entries of `self`.
    pub fn overlay(mut self, other: TomlCatalog) -> Self {
        self.messages.extend(other.messages);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl MessageCatalog for TomlCatalog {
    fn lookup(&self, id: MessageId) -> String {
        self.messages
            .get(id.key())
            .cloned()
            .unwrap_or_else(|| id.key().to_string())
    }
}
