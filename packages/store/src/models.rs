//! # Domain models for to-do items
//!
//! These types are `Serialize + Deserialize` because the full item list is
//! persisted as one JSON array. The wire shape of an item is:
//!
//! ```json
//! { "id": "1718000000000", "text": "buy milk", "status": "pending" }
//! ```
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`TodoItem`] | A single task: opaque `id`, the label the user typed, and its [`TodoStatus`]. |
//! | [`TodoStatus`] | Which partition an item belongs to, `pending` or `completed`. |
//! | [`TodoLists`] | The two ordered partitions handed to the rendering layer. |

use serde::{Deserialize, Serialize};

/// Completion state of an item. Serialized as `"pending"` / `"completed"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    #[default]
    Pending,
    Completed,
}

impl TodoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Pending => "pending",
            TodoStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task on the list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Creation timestamp in milliseconds, as a decimal string: "1718000000000"
    pub id: String,
    /// Label as entered by the user
    pub text: String,
    pub status: TodoStatus,
}

impl TodoItem {
    pub fn new(id: String, text: String) -> Self {
        Self {
            id,
            text,
            status: TodoStatus::Pending,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TodoStatus::Completed
    }
}

/// Snapshot of both partitions, in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoLists {
    pub pending: Vec<TodoItem>,
    pub completed: Vec<TodoItem>,
}

impl TodoLists {
    /// Split a flat list into partitions, keeping each item's relative order.
    pub fn partition(items: Vec<TodoItem>) -> Self {
        let (completed, pending) = items.into_iter().partition(TodoItem::is_completed);
        Self { pending, completed }
    }

    /// The union `pending ++ completed`, as it is persisted.
    pub fn union(&self) -> Vec<&TodoItem> {
        self.pending.iter().chain(self.completed.iter()).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.completed.is_empty()
    }
}
