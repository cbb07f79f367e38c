pub mod config;
pub mod error;
pub mod intent;
pub mod kv;
pub mod models;
pub mod todo_store;

mod ids;
mod platform;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod idb;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use idb::IdbStore;

pub use config::StoreConfig;
pub use error::{StorageError, StorageResult};
pub use ids::IdGenerator;
pub use intent::Intent;
pub use kv::KeyValueStore;
pub use models::{TodoItem, TodoLists, TodoStatus};
pub use platform::{load_config, make_todo_store};
#[cfg(not(target_arch = "wasm32"))]
pub use platform::data_dir;
pub use todo_store::TodoStore;
