//! # TodoStore — the authoritative to-do list
//!
//! [`TodoStore`] owns the two partitions of the list (`pending` and
//! `completed`) and mirrors their union into a single slot of a
//! [`KeyValueStore`]. The rendering layer reads [`TodoStore::lists`] and sends
//! user actions back as [`Intent`]s; it never touches storage itself.
//!
//! ## Read path
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`init`](TodoStore::init) | Startup: reads the slot once and rebuilds both partitions from each item's `status`. |
//! | [`load`](TodoStore::load) | Reads and parses the slot, optionally keeping one status. Never fails: missing or unreadable data is an empty list. |
//! | [`pending`](TodoStore::pending) / [`completed`](TodoStore::completed) / [`lists`](TodoStore::lists) | In-memory partitions, in display order. |
//!
//! ## Write path
//!
//! Every mutation follows the same pattern: change the in-memory partitions,
//! then serialize `pending ++ completed` and overwrite the slot. The blob is
//! always computed from memory, never patched from what storage held before.
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`add`](TodoStore::add) | Appends a new pending item. Blank text is ignored. |
//! | [`complete`](TodoStore::complete) / [`uncomplete`](TodoStore::uncomplete) | Moves an item to the end of the other partition. |
//! | [`delete`](TodoStore::delete) / [`delete_completed`](TodoStore::delete_completed) | Removes an item from one partition. |
//! | [`remove`](TodoStore::remove) | Removes an item from whichever partition holds it. |
//! | [`apply`](TodoStore::apply) | Dispatches an [`Intent`]. |
//!
//! Operations on an unknown id are no-ops and don't write.
//!
//! ## Failures
//!
//! Storage errors are logged and swallowed. A failed read degrades to "no
//! data"; a failed write is dropped and the in-memory change stands, so
//! memory and storage may diverge until the next successful write.

use crate::config::StoreConfig;
use crate::error::StorageResult;
use crate::ids::IdGenerator;
use crate::intent::Intent;
use crate::kv::KeyValueStore;
use crate::models::{TodoItem, TodoLists, TodoStatus};

/// A to-do list backed by a KeyValueStore.
pub struct TodoStore<S: KeyValueStore> {
    store: S,
    config: StoreConfig,
    lists: TodoLists,
    ids: IdGenerator,
}

impl<S: KeyValueStore> TodoStore<S> {
    /// Create an empty store. Call [`init`](Self::init) to pick up persisted items.
    pub fn new(store: S, config: StoreConfig) -> Self {
        Self {
            store,
            config,
            lists: TodoLists::default(),
            ids: IdGenerator::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn pending(&self) -> &[TodoItem] {
        &self.lists.pending
    }

    pub fn completed(&self) -> &[TodoItem] {
        &self.lists.completed
    }

    /// Snapshot of both partitions for rendering.
    pub fn lists(&self) -> TodoLists {
        self.lists.clone()
    }

    /// Find an item in either partition.
    pub fn get(&self, id: &str) -> Option<&TodoItem> {
        self.lists
            .pending
            .iter()
            .chain(self.lists.completed.iter())
            .find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Replace the in-memory partitions with what storage holds.
    pub async fn init(&mut self) {
        let mut seen = std::collections::HashSet::new();
        let mut items = Vec::new();
        for item in self.load(None).await {
            if seen.insert(item.id.clone()) {
                self.ids.observe(&item.id);
                items.push(item);
            } else {
                tracing::warn!("Dropping duplicate todo id {} from storage", item.id);
            }
        }
        self.lists = TodoLists::partition(items);
        tracing::debug!(
            "Loaded {} pending and {} completed todos",
            self.lists.pending.len(),
            self.lists.completed.len()
        );
    }

    /// Read the persisted list, keeping only `status` when given.
    pub async fn load(&self, status: Option<TodoStatus>) -> Vec<TodoItem> {
        if !self.config.storage.persist {
            return Vec::new();
        }
        let items = match self.read_all().await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Error loading todos from {}: {e}", self.config.storage.key);
                return Vec::new();
            }
        };
        match status {
            Some(status) => items.into_iter().filter(|t| t.status == status).collect(),
            None => items,
        }
    }

    /// Add a pending item. Returns `None` when `text` is blank.
    pub async fn add(&mut self, text: &str) -> Option<TodoItem> {
        if text.trim().is_empty() {
            return None;
        }
        let mut id = self.ids.next_id();
        while self.get(&id).is_some() {
            id = self.ids.next_id();
        }
        let item = TodoItem::new(id, text.to_string());
        self.lists.pending.push(item.clone());
        self.persist().await;
        Some(item)
    }

    /// Move a pending item to the end of `completed`.
    pub async fn complete(&mut self, id: &str) -> bool {
        self.transfer(id, TodoStatus::Completed).await
    }

    /// Move a completed item to the end of `pending`.
    pub async fn uncomplete(&mut self, id: &str) -> bool {
        self.transfer(id, TodoStatus::Pending).await
    }

    /// Delete a pending item.
    pub async fn delete(&mut self, id: &str) -> bool {
        self.delete_from(TodoStatus::Pending, id).await
    }

    /// Delete a completed item.
    pub async fn delete_completed(&mut self, id: &str) -> bool {
        self.delete_from(TodoStatus::Completed, id).await
    }

    /// Delete an item from whichever partition holds it.
    pub async fn remove(&mut self, id: &str) -> bool {
        if self.delete_from(TodoStatus::Pending, id).await {
            return true;
        }
        self.delete_from(TodoStatus::Completed, id).await
    }

    /// Apply a user action. Returns whether anything changed.
    pub async fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Add { text } => self.add(&text).await.is_some(),
            Intent::Complete { id } => self.complete(&id).await,
            Intent::Uncomplete { id } => self.uncomplete(&id).await,
            Intent::Delete { id } => self.remove(&id).await,
        }
    }

    fn partition_mut(&mut self, status: TodoStatus) -> &mut Vec<TodoItem> {
        match status {
            TodoStatus::Pending => &mut self.lists.pending,
            TodoStatus::Completed => &mut self.lists.completed,
        }
    }

    fn take(&mut self, from: TodoStatus, id: &str) -> Option<TodoItem> {
        let partition = self.partition_mut(from);
        let pos = partition.iter().position(|item| item.id == id)?;
        Some(partition.remove(pos))
    }

    async fn transfer(&mut self, id: &str, to: TodoStatus) -> bool {
        let from = match to {
            TodoStatus::Pending => TodoStatus::Completed,
            TodoStatus::Completed => TodoStatus::Pending,
        };
        let Some(mut item) = self.take(from, id) else {
            return false;
        };
        item.status = to;
        self.partition_mut(to).push(item);
        self.persist().await;
        true
    }

    async fn delete_from(&mut self, from: TodoStatus, id: &str) -> bool {
        if self.take(from, id).is_none() {
            return false;
        }
        self.persist().await;
        true
    }

    /// Parse the slot item by item. An unreadable item is skipped rather than
    /// costing the whole list; it is gone after the next write.
    async fn read_all(&self) -> StorageResult<Vec<TodoItem>> {
        let Some(raw) = self.store.get(&self.config.storage.key).await? else {
            return Ok(Vec::new());
        };
        let values: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
        let items = values
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<TodoItem>(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!("Skipping unreadable todo in {}: {e}", self.config.storage.key);
                    None
                }
            })
            .collect();
        Ok(items)
    }

    async fn write_all(&self) -> StorageResult<()> {
        let json = serde_json::to_string(&self.lists.union())?;
        self.store.set(&self.config.storage.key, json).await
    }

    /// Overwrite the slot with the current union.
    async fn persist(&self) {
        if !self.config.storage.persist {
            return;
        }
        let key = &self.config.storage.key;
        match self.write_all().await {
            Ok(()) => tracing::debug!("Saved {} todos to {key}", self.lists.len()),
            Err(e) => tracing::error!("Error saving todos to {key}: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::memory::MemoryStore;

    /// Backend whose every call fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Backend("unavailable".to_string()))
        }

        async fn set(&self, _key: &str, _value: String) -> StorageResult<()> {
            Err(StorageError::Backend("unavailable".to_string()))
        }

        async fn remove(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Backend("unavailable".to_string()))
        }
    }

    fn new_store() -> (TodoStore<MemoryStore>, MemoryStore) {
        let backend = MemoryStore::new();
        (TodoStore::new(backend.clone(), StoreConfig::default()), backend)
    }

    /// Simulate an app restart over the same backend.
    async fn reopen(backend: &MemoryStore) -> TodoStore<MemoryStore> {
        let mut todos = TodoStore::new(backend.clone(), StoreConfig::default());
        todos.init().await;
        todos
    }

    fn texts(items: &[TodoItem]) -> Vec<&str> {
        items.iter().map(|i| i.text.as_str()).collect()
    }

    #[tokio::test]
    async fn test_add_appends_pending() {
        let (mut todos, _) = new_store();

        let item = todos.add("buy milk").await.unwrap();
        assert_eq!(item.status, TodoStatus::Pending);
        assert_eq!(item.text, "buy milk");
        assert_eq!(todos.pending(), &[item.clone()]);
        assert!(todos.completed().is_empty());

        todos.add("buy milk").await.unwrap();
        assert_eq!(todos.pending().len(), 2);
        assert_ne!(todos.pending()[0].id, todos.pending()[1].id);
    }

    #[tokio::test]
    async fn test_blank_add_is_ignored() {
        let (mut todos, backend) = new_store();

        assert!(todos.add("").await.is_none());
        assert!(todos.add("   ").await.is_none());
        assert!(todos.add("\t\n").await.is_none());
        assert!(todos.is_empty());
        // Nothing was written
        assert_eq!(backend.get("@todos").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_complete_then_uncomplete() {
        let (mut todos, _) = new_store();
        let a = todos.add("A").await.unwrap();
        todos.add("B").await.unwrap();

        assert!(todos.complete(&a.id).await);
        assert_eq!(texts(todos.pending()), vec!["B"]);
        assert_eq!(texts(todos.completed()), vec!["A"]);
        assert_eq!(todos.get(&a.id).unwrap().status, TodoStatus::Completed);

        assert!(todos.uncomplete(&a.id).await);
        assert_eq!(texts(todos.pending()), vec!["B", "A"]);
        assert!(todos.completed().is_empty());

        let restored = todos.get(&a.id).unwrap();
        assert_eq!(restored.text, "A");
        assert_eq!(restored.status, TodoStatus::Pending);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_noops() {
        let (mut todos, backend) = new_store();
        let a = todos.add("A").await.unwrap();
        let before = backend.get("@todos").await.unwrap();
        let lists = todos.lists();

        assert!(!todos.delete("missing").await);
        assert!(!todos.delete_completed("missing").await);
        assert!(!todos.complete("missing").await);
        assert!(!todos.uncomplete("missing").await);
        assert!(!todos.remove("missing").await);
        // Wrong partition
        assert!(!todos.uncomplete(&a.id).await);
        assert!(!todos.delete_completed(&a.id).await);

        assert_eq!(todos.lists(), lists);
        assert_eq!(backend.get("@todos").await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_reload_after_restart() {
        let (mut todos, backend) = new_store();
        todos.add("buy milk").await;

        let all = reopen(&backend).await.load(None).await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].text, "buy milk");
        assert_eq!(all[0].status, TodoStatus::Pending);
    }

    #[tokio::test]
    async fn test_init_rebuilds_partitions() {
        let (mut todos, backend) = new_store();
        let a = todos.add("A").await.unwrap();
        todos.add("B").await;
        let c = todos.add("C").await.unwrap();
        todos.complete(&c.id).await;
        todos.complete(&a.id).await;

        let reopened = reopen(&backend).await;
        assert_eq!(texts(reopened.pending()), vec!["B"]);
        assert_eq!(texts(reopened.completed()), vec!["C", "A"]);
        assert_eq!(reopened.lists(), todos.lists());
    }

    #[tokio::test]
    async fn test_load_filters_by_status() {
        let (mut todos, _) = new_store();
        let a = todos.add("A").await.unwrap();
        todos.add("B").await;
        todos.complete(&a.id).await;

        assert_eq!(texts(&todos.load(Some(TodoStatus::Pending)).await), vec!["B"]);
        assert_eq!(texts(&todos.load(Some(TodoStatus::Completed)).await), vec!["A"]);
        assert_eq!(todos.load(None).await.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_persists() {
        let (mut todos, backend) = new_store();
        let x = todos.add("X").await.unwrap();
        todos.add("Y").await;

        assert!(todos.delete(&x.id).await);

        let reloaded = reopen(&backend).await.load(None).await;
        assert_eq!(texts(&reloaded), vec!["Y"]);
    }

    #[tokio::test]
    async fn test_pending_delete_keeps_completed_in_storage() {
        let (mut todos, backend) = new_store();
        let a = todos.add("A").await.unwrap();
        let b = todos.add("B").await.unwrap();
        todos.complete(&a.id).await;

        todos.delete(&b.id).await;

        let reopened = reopen(&backend).await;
        assert!(reopened.pending().is_empty());
        assert_eq!(texts(reopened.completed()), vec!["A"]);
    }

    #[tokio::test]
    async fn test_delete_completed_writes_current_union() {
        let (mut todos, backend) = new_store();
        let x = todos.add("X").await.unwrap();
        let y = todos.add("Y").await.unwrap();
        let z = todos.add("Z").await.unwrap();
        todos.complete(&x.id).await;
        todos.delete(&y.id).await;

        assert!(todos.delete_completed(&x.id).await);

        // Y stays deleted
        let reloaded = reopen(&backend).await.load(None).await;
        assert_eq!(texts(&reloaded), vec!["Z"]);
        assert_eq!(reloaded[0].id, z.id);
    }

    #[tokio::test]
    async fn test_remove_finds_either_partition() {
        let (mut todos, _) = new_store();
        let a = todos.add("A").await.unwrap();
        let b = todos.add("B").await.unwrap();
        todos.complete(&a.id).await;

        assert!(todos.remove(&a.id).await);
        assert!(todos.completed().is_empty());
        assert!(todos.remove(&b.id).await);
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn test_apply_intents() {
        let (mut todos, _) = new_store();

        assert!(todos.apply(Intent::Add { text: "A".into() }).await);
        assert!(!todos.apply(Intent::Add { text: "  ".into() }).await);
        let id = todos.pending()[0].id.clone();

        assert!(todos.apply(Intent::Complete { id: id.clone() }).await);
        assert_eq!(texts(todos.completed()), vec!["A"]);

        assert!(todos.apply(Intent::Uncomplete { id: id.clone() }).await);
        assert_eq!(texts(todos.pending()), vec!["A"]);

        assert!(todos.apply(Intent::Delete { id: id.clone() }).await);
        assert!(!todos.apply(Intent::Delete { id }).await);
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_blob_loads_empty() {
        let backend = MemoryStore::new();
        backend.set("@todos", "{not json".to_string()).await.unwrap();

        let todos = reopen(&backend).await;
        assert!(todos.is_empty());
        assert!(todos.load(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_items_are_skipped() {
        let backend = MemoryStore::new();
        let blob = r#"[
            {"id":"1","text":"A","status":"pending"},
            {"id":"2","text":"B","status":"archived"},
            {"id":"3","status":"completed"},
            42,
            {"id":"4","text":"D","status":"completed"}
        ]"#;
        backend.set("@todos", blob.to_string()).await.unwrap();

        let mut todos = reopen(&backend).await;
        assert_eq!(texts(todos.pending()), vec!["A"]);
        assert_eq!(texts(todos.completed()), vec!["D"]);
        assert_eq!(texts(&todos.load(Some(TodoStatus::Completed)).await), vec!["D"]);

        // The good items survive the next write
        todos.add("E").await;
        let reloaded = reopen(&backend).await.load(None).await;
        assert_eq!(texts(&reloaded), vec!["A", "E", "D"]);
    }

    #[tokio::test]
    async fn test_duplicate_ids_in_storage_keep_first() {
        let backend = MemoryStore::new();
        let blob = r#"[
            {"id":"1","text":"A","status":"pending"},
            {"id":"1","text":"A again","status":"completed"},
            {"id":"2","text":"B","status":"completed"}
        ]"#;
        backend.set("@todos", blob.to_string()).await.unwrap();

        let todos = reopen(&backend).await;
        assert_eq!(texts(todos.pending()), vec!["A"]);
        assert_eq!(texts(todos.completed()), vec!["B"]);
    }

    #[tokio::test]
    async fn test_new_ids_skip_loaded_ids() {
        let backend = MemoryStore::new();
        let far_future = u64::MAX / 2;
        let blob = format!(r#"[{{"id":"{far_future}","text":"A","status":"pending"}}]"#);
        backend.set("@todos", blob).await.unwrap();

        let mut todos = reopen(&backend).await;
        let item = todos.add("B").await.unwrap();
        assert_eq!(item.id, (far_future + 1).to_string());
    }

    #[tokio::test]
    async fn test_add_after_max_stored_id() {
        let backend = MemoryStore::new();
        let blob = format!(r#"[{{"id":"{}","text":"A","status":"pending"}}]"#, u64::MAX);
        backend.set("@todos", blob).await.unwrap();

        let mut todos = reopen(&backend).await;
        let b = todos.add("B").await.unwrap();
        let c = todos.add("C").await.unwrap();

        assert_ne!(b.id, u64::MAX.to_string());
        assert_ne!(b.id, c.id);
        assert_eq!(texts(todos.pending()), vec!["A", "B", "C"]);

        let reopened = reopen(&backend).await;
        assert_eq!(reopened.lists(), todos.lists());
    }

    #[tokio::test]
    async fn test_add_skips_ids_already_in_use() {
        let backend = MemoryStore::new();
        // Counter-form ids a previous session issued after exhausting the range
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        let mut items = vec![serde_json::json!({ "id": u64::MAX.to_string(), "text": "max", "status": "pending" })];
        for ms in now..now + 5_000 {
            items.push(serde_json::json!({ "id": format!("{ms}-0"), "text": "old", "status": "pending" }));
        }
        backend.set("@todos", serde_json::Value::Array(items).to_string()).await.unwrap();

        let mut todos = reopen(&backend).await;
        let item = todos.add("new").await.unwrap();
        assert_eq!(todos.pending().iter().filter(|t| t.id == item.id).count(), 1);
    }

    #[tokio::test]
    async fn test_broken_backend_keeps_memory_state() {
        let mut todos = TodoStore::new(BrokenStore, StoreConfig::default());
        todos.init().await;
        assert!(todos.is_empty());

        let a = todos.add("A").await.unwrap();
        assert!(todos.complete(&a.id).await);
        assert_eq!(texts(todos.completed()), vec!["A"]);
        assert!(todos.load(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_ephemeral_store_never_writes() {
        let backend = MemoryStore::new();
        let mut todos = TodoStore::new(backend.clone(), StoreConfig::ephemeral());

        todos.add("A").await;
        assert_eq!(todos.pending().len(), 1);
        assert_eq!(backend.get("@todos").await.unwrap(), None);
        assert!(todos.load(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_custom_storage_key() {
        let backend = MemoryStore::new();
        let config = StoreConfig::default().with_key("@groceries");
        let mut todos = TodoStore::new(backend.clone(), config);

        todos.add("eggs").await;
        assert!(backend.get("@groceries").await.unwrap().is_some());
        assert_eq!(backend.get("@todos").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blob_shape() {
        let (mut todos, backend) = new_store();
        let a = todos.add("A").await.unwrap();
        let b = todos.add("B").await.unwrap();
        todos.complete(&a.id).await;

        let raw = backend.get("@todos").await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "id": b.id, "text": "B", "status": "pending" },
                { "id": a.id, "text": "A", "status": "completed" },
            ])
        );
    }
}
