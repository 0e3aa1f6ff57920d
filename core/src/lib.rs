//! # Reflow Core
//!
//! Core traits and types for the Reflow architecture.
//!
//! This crate provides the fundamental abstractions for building
//! event-driven applications using the Reducer pattern with explicit
//! side effects.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer (user interactions, effect feedback)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use reflow_core::*;
//!
//! #[derive(Clone, Debug, Default)]
//! struct TodoState {
//!     items: Vec<TodoItem>,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum TodoAction {
//!     Add { text: String },
//!     Toggle { id: TodoId },
//! }
//!
//! impl Reducer for TodoReducer {
//!     type State = TodoState;
//!     type Action = TodoAction;
//!     type Environment = TodoEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut TodoState,
//!         action: TodoAction,
//!         env: &TodoEnvironment,
//!     ) -> SmallVec<[Effect<TodoAction>; 4]> {
//!         // Business logic goes here
//!         SmallVec::new()
//!     }
//! }
//! ```

// Re-export commonly used types
pub use smallvec::{SmallVec, smallvec};

pub use effect::{Effect, EffectId};
pub use reducer::Reducer;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for TodoReducer {
    ///     type State = TodoState;
    ///     type Action = TodoAction;
    ///     type Environment = TodoEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut TodoState,
    ///         action: TodoAction,
    ///         env: &TodoEnvironment,
    ///     ) -> SmallVec<[Effect<TodoAction>; 4]> {
    ///         match action {
    ///             TodoAction::Add { text } => {
    ///                 // Business logic here
    ///                 SmallVec::new()
    ///             }
    ///             _ => SmallVec::new(),
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// The effects to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable and cancellable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Identifier for a cancellable effect
    ///
    /// Effects registered under the same id share one cancellation scope:
    /// starting a new [`Effect::Cancellable`] under an id cancels the
    /// in-flight effect previously registered under that id, and
    /// [`Effect::Cancel`] cancels whatever is currently registered.
    ///
    /// # Example
    ///
    /// ```
    /// use reflow_core::effect::EffectId;
    ///
    /// const TIMER: EffectId = EffectId::new("lifecycle-timer");
    /// assert_eq!(TIMER, EffectId::new("lifecycle-timer"));
    /// ```
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EffectId(&'static str);

    impl EffectId {
        /// Creates an effect id from a static name
        #[must_use]
        pub const fn new(name: &'static str) -> Self {
            Self(name)
        }

        /// Returns the id's name
        #[must_use]
        pub const fn name(self) -> &'static str {
            self.0
        }
    }

    impl std::fmt::Display for EffectId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[allow(missing_docs)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timers, timeouts)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

        /// An effect that can be cancelled through its [`EffectId`]
        ///
        /// Registering a new cancellable effect under an id that is already
        /// in flight cancels the previous instance first, so at most one
        /// effect per id is ever live.
        Cancellable {
            /// Cancellation scope this effect belongs to
            id: EffectId,
            /// The effect to run
            effect: Box<Effect<Action>>,
        },

        /// Cancel the in-flight effect registered under the given id
        ///
        /// No-op if nothing is registered under the id.
        Cancel(EffectId),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Cancellable { id, effect } => f
                    .debug_struct("Effect::Cancellable")
                    .field("id", id)
                    .field("effect", effect)
                    .finish(),
                Effect::Cancel(id) => f.debug_tuple("Effect::Cancel").field(id).finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Wrap an async computation as an effect
        pub fn future<F>(fut: F) -> Effect<Action>
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Dispatch an action after a delay
        #[must_use]
        pub fn delay(duration: Duration, action: Action) -> Effect<Action> {
            Effect::Delay {
                duration,
                action: Box::new(action),
            }
        }

        /// Make an effect cancellable through the given id
        #[must_use]
        pub fn cancellable(id: EffectId, effect: Effect<Action>) -> Effect<Action> {
            Effect::Cancellable {
                id,
                effect: Box::new(effect),
            }
        }

        /// Cancel the in-flight effect registered under the given id
        #[must_use]
        pub const fn cancel(id: EffectId) -> Effect<Action> {
            Effect::Cancel(id)
        }

        /// Map the action type produced by this effect
        ///
        /// Used to lift a child feature's effects into the parent's action
        /// space when composing reducers with nested action enums.
        ///
        /// # Example
        ///
        /// ```
        /// use reflow_core::effect::Effect;
        ///
        /// #[derive(Debug, PartialEq)]
        /// enum Child { Tick }
        /// #[derive(Debug, PartialEq)]
        /// enum Parent { Child(Child) }
        ///
        /// let effect: Effect<Child> = Effect::delay(std::time::Duration::from_secs(1), Child::Tick);
        /// let lifted: Effect<Parent> = effect.map(Parent::Child);
        /// ```
        #[must_use]
        pub fn map<B, F>(self, f: F) -> Effect<B>
        where
            Action: Send + 'static,
            B: Send + 'static,
            F: Fn(Action) -> B + Send + Sync + Clone + 'static,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Parallel(effects) => {
                    Effect::Parallel(effects.into_iter().map(|e| e.map(f.clone())).collect())
                },
                Effect::Sequential(effects) => {
                    Effect::Sequential(effects.into_iter().map(|e| e.map(f.clone())).collect())
                },
                Effect::Delay { duration, action } => Effect::Delay {
                    duration,
                    action: Box::new(f(*action)),
                },
                Effect::Future(fut) => {
                    Effect::Future(Box::pin(async move { fut.await.map(f) }))
                },
                Effect::Cancellable { id, effect } => Effect::Cancellable {
                    id,
                    effect: Box::new(effect.map(f)),
                },
                Effect::Cancel(id) => Effect::Cancel(id),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter. Production implementations live next
/// to the traits where they need no extra dependencies; test doubles
/// live in the testing crate.
pub mod environment {
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Id generation for domain entities
    ///
    /// Wall-clock timestamps are not unique under rapid successive calls,
    /// so ids come from an injected generator instead.
    pub trait IdGenerator: Send + Sync {
        /// Returns the next unique id
        fn next_id(&self) -> u64;
    }

    /// Monotonic id sequence
    ///
    /// Process-wide unique, strictly increasing ids. [`advance_past`]
    /// reseeds the sequence above externally loaded ids so freshly
    /// generated ids never collide with them.
    ///
    /// [`advance_past`]: SequenceIds::advance_past
    #[derive(Debug)]
    pub struct SequenceIds {
        next: AtomicU64,
    }

    impl SequenceIds {
        /// Creates a sequence starting at 1
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_at(1)
        }

        /// Creates a sequence starting at the given id
        #[must_use]
        pub const fn starting_at(first: u64) -> Self {
            Self {
                next: AtomicU64::new(first),
            }
        }

        /// Ensures all future ids are strictly greater than `id`
        pub fn advance_past(&self, id: u64) {
            self.next.fetch_max(id.saturating_add(1), Ordering::SeqCst);
        }
    }

    impl Default for SequenceIds {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequenceIds {
        fn next_id(&self) -> u64 {
            self.next.fetch_add(1, Ordering::SeqCst)
        }
    }

    /// String key-value storage boundary
    ///
    /// A flat external store: one key maps to one serialized value.
    /// Reads of absent keys return `None`; writes overwrite
    /// unconditionally and report no result (fire-and-forget, the
    /// implementation logs its own failures).
    pub trait KeyValueStore: Send + Sync {
        /// Reads the value stored under `key`, if any
        fn read(&self, key: &str) -> Option<String>;

        /// Writes `value` under `key`, overwriting any prior content
        fn write(&self, key: &str, value: &str);
    }

    /// Single-value display surface for a human-readable summary
    ///
    /// Mirrors derived state into an external title (terminal title,
    /// window title). Purely presentational; no error path.
    pub trait TitleSink: Send + Sync {
        /// Replaces the displayed title
        fn set_title(&self, title: &str);
    }
}

#[cfg(test)]
mod tests {
    use super::effect::{Effect, EffectId};
    use super::environment::{IdGenerator, SequenceIds};
    use std::time::Duration;

    #[test]
    fn effect_id_equality() {
        const A: EffectId = EffectId::new("a");
        assert_eq!(A, EffectId::new("a"));
        assert_ne!(A, EffectId::new("b"));
        assert_eq!(A.name(), "a");
    }

    #[test]
    fn effect_map_delay() {
        #[derive(Debug, PartialEq)]
        enum Child {
            Tick,
        }
        #[derive(Debug, PartialEq)]
        enum Parent {
            Child(Child),
        }

        let effect: Effect<Child> = Effect::delay(Duration::from_secs(1), Child::Tick);
        let lifted = effect.map(Parent::Child);

        match lifted {
            Effect::Delay { duration, action } => {
                assert_eq!(duration, Duration::from_secs(1));
                assert_eq!(*action, Parent::Child(Child::Tick));
            },
            other => panic!("expected Delay, got {other:?}"),
        }
    }

    #[test]
    fn effect_map_preserves_cancellation_id() {
        const TIMER: EffectId = EffectId::new("timer");

        let effect: Effect<u32> =
            Effect::cancellable(TIMER, Effect::delay(Duration::from_secs(1), 7));
        let lifted: Effect<u64> = effect.map(u64::from);

        match lifted {
            Effect::Cancellable { id, .. } => assert_eq!(id, TIMER),
            other => panic!("expected Cancellable, got {other:?}"),
        }

        let cancel: Effect<u64> = Effect::<u32>::cancel(TIMER).map(u64::from);
        assert!(matches!(cancel, Effect::Cancel(id) if id == TIMER));
    }

    #[tokio::test]
    async fn effect_map_future() {
        let effect: Effect<u32> = Effect::future(async { Some(3) });
        let lifted: Effect<u64> = effect.map(u64::from);

        match lifted {
            Effect::Future(fut) => assert_eq!(fut.await, Some(3)),
            other => panic!("expected Future, got {other:?}"),
        }
    }

    #[test]
    fn sequence_ids_are_unique_and_increasing() {
        let ids = SequenceIds::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(b > a);
    }

    #[test]
    fn sequence_ids_advance_past_loaded_ids() {
        let ids = SequenceIds::new();
        ids.advance_past(41);
        assert_eq!(ids.next_id(), 42);

        // Advancing backwards never rewinds the sequence
        ids.advance_past(3);
        assert_eq!(ids.next_id(), 43);
    }
}
