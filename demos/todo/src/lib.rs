//! Todo list demo application built on the Reflow architecture.
//!
//! A session owns an ordered todo list, mirrors every change into an
//! external key-value snapshot and a display title, and hosts an
//! optional lifecycle demo that counts seconds while visible.

pub mod app;
pub mod env;
pub mod lifecycle;
pub mod reducer;
pub mod types;
pub mod view;

pub use app::{AppAction, AppEnvironment, AppReducer, AppState};
pub use lifecycle::{
    LifecycleAction, LifecycleEnvironment, LifecycleReducer, LifecycleState, TimerStatus,
};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{TodoAction, TodoId, TodoItem, TodoState};
