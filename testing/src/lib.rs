//! # Reflow Testing
//!
//! Testing utilities and helpers for the Reflow architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A fluent Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use reflow_testing::mocks::{MemoryKeyValueStore, RecordingTitleSink};
//! use reflow_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_todo_flow() {
//!     let env = test_environment();
//!     let store = Store::new(TodoState::default(), TodoReducer, env);
//!
//!     let handle = store.send(TodoAction::Add { text: "milk".into() }).await.unwrap();
//!     handle.wait().await;
//!
//!     let count = store.state(|s| s.items.len()).await;
//!     assert_eq!(count, 1);
//! }
//! ```

use reflow_core::environment::{KeyValueStore, TitleSink};

pub mod reducer_test;

/// Mock implementations of Environment traits.
pub mod mocks {
    use super::{KeyValueStore, TitleSink};
    use std::collections::HashMap;
    use std::sync::{Mutex, PoisonError};

    /// In-memory key-value store
    ///
    /// Behaves like an external snapshot store without touching disk.
    /// Tests seed it with [`with_entry`] and inspect writes with [`get`].
    ///
    /// [`with_entry`]: MemoryKeyValueStore::with_entry
    /// [`get`]: MemoryKeyValueStore::get
    ///
    /// # Example
    ///
    /// ```
    /// use reflow_testing::mocks::MemoryKeyValueStore;
    /// use reflow_core::environment::KeyValueStore;
    ///
    /// let store = MemoryKeyValueStore::new().with_entry("todos", "[]");
    /// assert_eq!(store.read("todos"), Some("[]".to_string()));
    /// assert_eq!(store.read("missing"), None);
    /// ```
    #[derive(Debug, Default)]
    pub struct MemoryKeyValueStore {
        entries: Mutex<HashMap<String, String>>,
    }

    impl MemoryKeyValueStore {
        /// Create an empty store
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed the store with an entry
        #[must_use]
        pub fn with_entry(self, key: &str, value: &str) -> Self {
            self.entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key.to_string(), value.to_string());
            self
        }

        /// Read back a stored value, bypassing the trait
        #[must_use]
        pub fn get(&self, key: &str) -> Option<String> {
            self.entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(key)
                .cloned()
        }
    }

    impl KeyValueStore for MemoryKeyValueStore {
        fn read(&self, key: &str) -> Option<String> {
            self.get(key)
        }

        fn write(&self, key: &str, value: &str) {
            self.entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key.to_string(), value.to_string());
        }
    }

    /// Title sink that records every title it is given
    ///
    /// # Example
    ///
    /// ```
    /// use reflow_testing::mocks::RecordingTitleSink;
    /// use reflow_core::environment::TitleSink;
    ///
    /// let sink = RecordingTitleSink::new();
    /// sink.set_title("완료 0 / 전체 1");
    /// assert_eq!(sink.last(), Some("완료 0 / 전체 1".to_string()));
    /// assert_eq!(sink.history().len(), 1);
    /// ```
    #[derive(Debug, Default)]
    pub struct RecordingTitleSink {
        titles: Mutex<Vec<String>>,
    }

    impl RecordingTitleSink {
        /// Create a sink with no recorded titles
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Every title set so far, oldest first
        #[must_use]
        pub fn history(&self) -> Vec<String> {
            self.titles
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// The most recently set title, if any
        #[must_use]
        pub fn last(&self) -> Option<String> {
            self.titles
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .last()
                .cloned()
        }
    }

    impl TitleSink for RecordingTitleSink {
        fn set_title(&self, title: &str) {
            self.titles
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(title.to_string());
        }
    }
}

// Re-export commonly used items
pub use mocks::{MemoryKeyValueStore, RecordingTitleSink};
pub use reducer_test::ReducerTest;
