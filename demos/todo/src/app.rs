//! Application root composing the todo list with the lifecycle demo.
//!
//! The todo list drives the lifecycle demo one way: whenever a todo
//! mutation changes the completed count while the demo is active, the
//! new count is forwarded as an observation. Nothing flows back.

use crate::lifecycle::{
    LifecycleAction, LifecycleEnvironment, LifecycleReducer, LifecycleState, TimerStatus,
};
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoState};
use crate::view;
use reflow_core::{Effect, Reducer, SmallVec};

/// Combined application state
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// The todo list
    pub todos: TodoState,
    /// The lifecycle demo
    pub lifecycle: LifecycleState,
}

/// Combined application action
#[derive(Clone, Debug)]
pub enum AppAction {
    /// Todo list actions
    Todo(TodoAction),
    /// Lifecycle demo actions
    Lifecycle(LifecycleAction),
}

/// Combined application environment
#[derive(Clone)]
pub struct AppEnvironment {
    /// Dependencies of the todo reducer
    pub todo: TodoEnvironment,
    /// Dependencies of the lifecycle reducer
    pub lifecycle: LifecycleEnvironment,
}

impl AppEnvironment {
    /// Creates an application environment
    #[must_use]
    pub const fn new(todo: TodoEnvironment, lifecycle: LifecycleEnvironment) -> Self {
        Self { todo, lifecycle }
    }
}

/// Root reducer routing actions to the todo and lifecycle reducers
#[derive(Clone, Debug, Default)]
pub struct AppReducer {
    todo: TodoReducer,
    lifecycle: LifecycleReducer,
}

impl AppReducer {
    /// Creates a new `AppReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            todo: TodoReducer::new(),
            lifecycle: LifecycleReducer::new(),
        }
    }

    /// Forwards the current completed count into the lifecycle demo
    fn observe_completed(
        &self,
        state: &mut AppState,
        env: &AppEnvironment,
        count: usize,
        effects: &mut SmallVec<[Effect<AppAction>; 4]>,
    ) {
        let observed = self.lifecycle.reduce(
            &mut state.lifecycle,
            LifecycleAction::CompletedCountChanged { count },
            &env.lifecycle,
        );
        effects.extend(observed.into_iter().map(|e| e.map(AppAction::Lifecycle)));
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::Todo(action) => {
                let before = view::completed_count(&state.todos.items);
                let mut effects: SmallVec<[Effect<AppAction>; 4]> = self
                    .todo
                    .reduce(&mut state.todos, action, &env.todo)
                    .into_iter()
                    .map(|e| e.map(AppAction::Todo))
                    .collect();

                let after = view::completed_count(&state.todos.items);
                if after != before && state.lifecycle.status == TimerStatus::Active {
                    self.observe_completed(state, env, after, &mut effects);
                }

                effects
            },

            AppAction::Lifecycle(action) => {
                let activating = matches!(action, LifecycleAction::Activate);
                let mut effects: SmallVec<[Effect<AppAction>; 4]> = self
                    .lifecycle
                    .reduce(&mut state.lifecycle, action, &env.lifecycle)
                    .into_iter()
                    .map(|e| e.map(AppAction::Lifecycle))
                    .collect();

                // A fresh activation observes the current count once,
                // like a child reading its input on mount.
                if activating {
                    let count = view::completed_count(&state.todos.items);
                    self.observe_completed(state, env, count, &mut effects);
                }

                effects
            },
        }
    }
}
