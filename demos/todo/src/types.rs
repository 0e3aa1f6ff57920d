//! Domain types for the todo demo.
//!
//! A todo list is an ordered sequence of items that can be added,
//! toggled, deleted, and cleared of completed entries. Items keep their
//! insertion order; toggling never reorders.

use serde::{Deserialize, Serialize};

/// Unique identifier for a todo item
///
/// Ids are monotonically increasing within a session and serialize as
/// plain numbers, matching the snapshot format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from a raw sequence value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw sequence value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier, immutable once assigned
    pub id: TodoId,
    /// Trimmed, never-empty description
    pub text: String,
    /// Whether the item is done
    pub completed: bool,
}

impl TodoItem {
    /// Creates a new, not-yet-completed item
    #[must_use]
    pub const fn new(id: TodoId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }
}

/// State of the todo list
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// All items in insertion order
    pub items: Vec<TodoItem>,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns the number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the list holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an item by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Checks whether an item with the given id exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }
}

/// Actions accepted by the todo reducer
///
/// The four mutations are total: blank text and unknown ids are
/// defined as no-ops, never errors. `Load` and `SnapshotLoaded` carry
/// the startup handshake with the external snapshot store.
#[derive(Clone, Debug)]
pub enum TodoAction {
    /// Append a new item unless the trimmed text is empty
    Add {
        /// Raw user input, trimmed before storage
        text: String,
    },

    /// Flip completion on the matching item, no-op if absent
    Toggle {
        /// Item to toggle
        id: TodoId,
    },

    /// Remove the matching item, no-op if absent
    Delete {
        /// Item to remove
        id: TodoId,
    },

    /// Remove every completed item, preserving the order of the rest
    ClearCompleted,

    /// Read the persisted snapshot from the external store
    Load,

    /// Snapshot read finished; seed the list with its contents
    ///
    /// A missing or malformed snapshot arrives as an empty list.
    SnapshotLoaded {
        /// Items recovered from the snapshot
        items: Vec<TodoItem>,
    },
}
