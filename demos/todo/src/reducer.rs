//! Reducer logic for the todo list.
//!
//! Mutations are synchronous and total: blank text and unknown ids are
//! no-ops. Every mutation that changes the list schedules the same two
//! side effects, in order: persist the full snapshot, then mirror the
//! progress summary into the display title.

use crate::types::{TodoAction, TodoId, TodoItem, TodoState};
use crate::view;
use reflow_core::environment::{IdGenerator, KeyValueStore, SequenceIds, TitleSink};
use reflow_core::{Effect, Reducer, SmallVec, smallvec};
use std::sync::Arc;

/// Key the snapshot is stored under when none is configured
pub const DEFAULT_SNAPSHOT_KEY: &str = "todos";

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// External snapshot store
    pub storage: Arc<dyn KeyValueStore>,
    /// External display title
    pub title: Arc<dyn TitleSink>,
    /// Id source for new items
    pub ids: Arc<SequenceIds>,
    /// Key the serialized list lives under
    pub snapshot_key: String,
}

impl TodoEnvironment {
    /// Creates an environment using the default snapshot key
    #[must_use]
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        title: Arc<dyn TitleSink>,
        ids: Arc<SequenceIds>,
    ) -> Self {
        Self {
            storage,
            title,
            ids,
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
        }
    }

    /// Overrides the snapshot key
    #[must_use]
    pub fn with_snapshot_key(mut self, key: impl Into<String>) -> Self {
        self.snapshot_key = key.into();
        self
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Effects mirroring the current list into the external boundaries.
    ///
    /// Runs sequentially so the snapshot write always lands before the
    /// title update for a given mutation.
    fn sync_effects(
        state: &TodoState,
        env: &TodoEnvironment,
    ) -> SmallVec<[Effect<TodoAction>; 4]> {
        let total = state.len();
        let completed = view::completed_count(&state.items);

        let persist = match serde_json::to_string(&state.items) {
            Ok(json) => {
                let storage = Arc::clone(&env.storage);
                let key = env.snapshot_key.clone();
                Effect::future(async move {
                    storage.write(&key, &json);
                    tracing::debug!(key = %key, "todos changed, snapshot persisted");
                    None
                })
            },
            Err(error) => {
                tracing::warn!(%error, "failed to serialize todo snapshot, skipping persist");
                Effect::None
            },
        };

        let sink = Arc::clone(&env.title);
        let title = Effect::future(async move {
            sink.set_title(&view::summary(completed, total));
            None
        });

        smallvec![Effect::chain(vec![persist, title])]
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::Add { text } => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return SmallVec::new();
                }

                let id = TodoId::new(env.ids.next_id());
                state.items.push(TodoItem::new(id, trimmed.to_string()));
                Self::sync_effects(state, env)
            },

            TodoAction::Toggle { id } => {
                let Some(item) = state.items.iter_mut().find(|item| item.id == id) else {
                    return SmallVec::new();
                };

                item.completed = !item.completed;
                Self::sync_effects(state, env)
            },

            TodoAction::Delete { id } => {
                let before = state.items.len();
                state.items.retain(|item| item.id != id);
                if state.items.len() == before {
                    return SmallVec::new();
                }

                Self::sync_effects(state, env)
            },

            TodoAction::ClearCompleted => {
                let before = state.items.len();
                state.items.retain(|item| !item.completed);
                if state.items.len() == before {
                    return SmallVec::new();
                }

                Self::sync_effects(state, env)
            },

            TodoAction::Load => {
                let storage = Arc::clone(&env.storage);
                let key = env.snapshot_key.clone();
                smallvec![Effect::future(async move {
                    let items = match storage.read(&key) {
                        Some(raw) => match serde_json::from_str::<Vec<TodoItem>>(&raw) {
                            Ok(items) => {
                                tracing::info!(count = items.len(), "loaded todos from snapshot");
                                items
                            },
                            Err(error) => {
                                tracing::warn!(
                                    %error,
                                    "failed to parse persisted todos, starting empty"
                                );
                                Vec::new()
                            },
                        },
                        None => Vec::new(),
                    };
                    Some(TodoAction::SnapshotLoaded { items })
                })]
            },

            TodoAction::SnapshotLoaded { mut items } => {
                // Snapshots are external input: drop anything violating
                // the non-blank-text invariant instead of crashing.
                items.retain(|item| !item.text.trim().is_empty());

                if let Some(max) = items.iter().map(|item| item.id.value()).max() {
                    env.ids.advance_past(max);
                }

                state.items = items;
                Self::sync_effects(state, env)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_testing::reducer_test::assertions;
    use reflow_testing::{MemoryKeyValueStore, RecordingTitleSink, ReducerTest};

    fn test_env() -> TodoEnvironment {
        TodoEnvironment::new(
            Arc::new(MemoryKeyValueStore::new()),
            Arc::new(RecordingTitleSink::new()),
            Arc::new(SequenceIds::new()),
        )
    }

    fn state_with(items: Vec<TodoItem>) -> TodoState {
        TodoState { items }
    }

    fn item(id: u64, text: &str, completed: bool) -> TodoItem {
        TodoItem {
            id: TodoId::new(id),
            text: text.to_string(),
            completed,
        }
    }

    #[test]
    fn add_appends_trimmed_item() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::Add {
                text: "  buy milk  ".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.items[0].text, "buy milk");
                assert!(!state.items[0].completed);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assert!(matches!(effects[0], Effect::Sequential(_)));
            })
            .run();
    }

    #[test]
    fn add_blank_text_is_a_noop() {
        for text in ["", "   ", "\t\n"] {
            ReducerTest::new(TodoReducer::new())
                .with_env(test_env())
                .given_state(TodoState::new())
                .when_action(TodoAction::Add {
                    text: text.to_string(),
                })
                .then_state(|state| assert!(state.is_empty()))
                .then_effects(assertions::assert_no_effects)
                .run();
        }
    }

    #[test]
    fn add_assigns_unique_increasing_ids() {
        let env = test_env();
        let reducer = TodoReducer::new();
        let mut state = TodoState::new();

        for text in ["one", "two", "three"] {
            let _ = reducer.reduce(
                &mut state,
                TodoAction::Add {
                    text: text.to_string(),
                },
                &env,
            );
        }

        assert_eq!(state.len(), 3);
        assert!(state.items[0].id < state.items[1].id);
        assert!(state.items[1].id < state.items[2].id);
    }

    #[test]
    fn toggle_flips_completion_in_place() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state_with(vec![
                item(1, "one", false),
                item(2, "two", false),
            ]))
            .when_action(TodoAction::Toggle { id: TodoId::new(1) })
            .then_state(|state| {
                assert!(state.items[0].completed);
                assert!(!state.items[1].completed);
                // Order is stable under toggle
                assert_eq!(state.items[0].id, TodoId::new(1));
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
            })
            .run();
    }

    #[test]
    fn toggle_unknown_id_is_a_noop() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state_with(vec![item(1, "one", false)]))
            .when_action(TodoAction::Toggle { id: TodoId::new(99) })
            .then_state(|state| {
                assert!(!state.items[0].completed);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn delete_removes_matching_item() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state_with(vec![
                item(1, "one", false),
                item(2, "two", true),
            ]))
            .when_action(TodoAction::Delete { id: TodoId::new(1) })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.items[0].id, TodoId::new(2));
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
            })
            .run();
    }

    #[test]
    fn delete_unknown_id_is_a_noop() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state_with(vec![item(1, "one", false)]))
            .when_action(TodoAction::Delete { id: TodoId::new(99) })
            .then_state(|state| assert_eq!(state.len(), 1))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn clear_completed_preserves_remaining_order() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state_with(vec![
                item(1, "one", true),
                item(2, "two", false),
                item(3, "three", true),
                item(4, "four", false),
            ]))
            .when_action(TodoAction::ClearCompleted)
            .then_state(|state| {
                assert_eq!(state.len(), 2);
                assert_eq!(state.items[0].id, TodoId::new(2));
                assert_eq!(state.items[1].id, TodoId::new(4));
                assert_eq!(view::completed_count(&state.items), 0);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
            })
            .run();
    }

    #[test]
    fn clear_completed_with_nothing_done_is_a_noop() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state_with(vec![item(1, "one", false)]))
            .when_action(TodoAction::ClearCompleted)
            .then_state(|state| assert_eq!(state.len(), 1))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn load_produces_a_read_effect() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::Load)
            .then_state(|state| assert!(state.is_empty()))
            .then_effects(|effects| {
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn snapshot_loaded_seeds_state_and_drops_blank_items() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::SnapshotLoaded {
                items: vec![
                    item(3, "keep", true),
                    item(4, "   ", false),
                    item(5, "also keep", false),
                ],
            })
            .then_state(|state| {
                assert_eq!(state.len(), 2);
                assert_eq!(state.items[0].id, TodoId::new(3));
                assert_eq!(state.items[1].id, TodoId::new(5));
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
            })
            .run();
    }

    #[test]
    fn snapshot_loaded_advances_the_id_sequence() {
        let env = test_env();
        let reducer = TodoReducer::new();
        let mut state = TodoState::new();

        let _ = reducer.reduce(
            &mut state,
            TodoAction::SnapshotLoaded {
                items: vec![item(41, "from snapshot", false)],
            },
            &env,
        );

        let _ = reducer.reduce(
            &mut state,
            TodoAction::Add {
                text: "fresh".to_string(),
            },
            &env,
        );

        // Freshly generated ids never collide with loaded ones
        assert_eq!(state.items[1].id, TodoId::new(42));
    }
}
