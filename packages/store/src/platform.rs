//! Platform-appropriate store constructor.
//!
//! Returns a [`TodoStore`] backed by the appropriate [`KeyValueStore`]:
//! - **Web** (WASM + `web` feature): IndexedDB via `IdbStore`
//! - **Desktop / Mobile** (native): filesystem via [`crate::FileStore`] under
//!   `<data_dir>/todos/`

use crate::config::StoreConfig;
use crate::kv::KeyValueStore;
use crate::todo_store::TodoStore;

#[cfg(not(target_arch = "wasm32"))]
const APP_DIR: &str = "todos";

/// Create a platform-appropriate to-do store. Call `init()` on the result to
/// pick up the persisted list.
pub fn make_todo_store(config: StoreConfig) -> TodoStore<impl KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        TodoStore::new(crate::IdbStore::new(), config)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        TodoStore::new(crate::MemoryStore::new(), config)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        TodoStore::new(crate::FileStore::new(data_dir()), config)
    }
}

/// Directory holding the persisted list and `todos.toml`.
#[cfg(not(target_arch = "wasm32"))]
pub fn data_dir() -> std::path::PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(APP_DIR)
}

/// Read `todos.toml` from the data directory, falling back to defaults when it
/// is missing or invalid.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> StoreConfig {
    load_config_from(&data_dir())
}

#[cfg(target_arch = "wasm32")]
pub fn load_config() -> StoreConfig {
    StoreConfig::default()
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config_from(dir: &std::path::Path) -> StoreConfig {
    let path = dir.join(StoreConfig::filename());
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return StoreConfig::default(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {e}", path.display());
            return StoreConfig::default();
        }
    };
    StoreConfig::from_toml(&text).unwrap_or_else(|e| {
        tracing::warn!("Invalid {}: {e}", path.display());
        StoreConfig::default()
    })
}
