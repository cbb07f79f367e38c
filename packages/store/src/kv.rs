//! # Key-value storage abstraction
//!
//! [`KeyValueStore`] is the only seam between [`crate::TodoStore`] and the
//! platform. It models a single-slot-per-key string store in the shape of a
//! mobile app's local storage: read a value, replace it, or drop it.
//!
//! | Implementation | Platform |
//! |----------------|----------|
//! | [`crate::MemoryStore`] | tests, ephemeral sessions |
//! | [`crate::FileStore`] | desktop and mobile (one file per key) |
//! | `IdbStore` | web, behind the `web` feature on `wasm32` |
//!
//! Unlike the todo store built on top of it, every method here reports
//! failure through [`StorageResult`]. Deciding what a failure means is left to
//! the caller.

use crate::error::StorageResult;

/// Async string key-value storage.
pub trait KeyValueStore {
    /// Read the value under `key`, or `None` if nothing was ever written.
    fn get(&self, key: &str) -> impl std::future::Future<Output = StorageResult<Option<String>>>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: String) -> impl std::future::Future<Output = StorageResult<()>>;

    /// Drop the value under `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> impl std::future::Future<Output = StorageResult<()>>;
}
