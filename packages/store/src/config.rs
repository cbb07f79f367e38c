//! # Store configuration — `todos.toml`
//!
//! Optional TOML file read from the app's data directory at startup
//! (filename: [`StoreConfig::filename`] = `"todos.toml"`).
//!
//! ## Structure
//!
//! ```toml
//! [storage]
//! key = "@todos"      # slot the todo list is persisted under
//! persist = true      # false keeps the list in memory only
//! ```
//!
//! All structs derive `Default` so that a missing or empty config file is
//! equivalent to the default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `todos.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Persistence configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key of the single slot holding the serialized list.
    #[serde(default = "default_storage_key")]
    pub key: String,
    /// Mirror every mutation to storage and reload on startup.
    #[serde(default = "default_persist")]
    pub persist: bool,
}

fn default_storage_key() -> String {
    "@todos".to_string()
}

fn default_persist() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
            persist: default_persist(),
        }
    }
}

impl StoreConfig {
    /// Config that keeps the list in memory only.
    pub fn ephemeral() -> Self {
        Self::default().with_persist(false)
    }

    /// Builder method to set the storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.storage.key = key.into();
        self
    }

    /// Builder method to toggle persistence.
    pub fn with_persist(mut self, persist: bool) -> Self {
        self.storage.persist = persist;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "todos.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
