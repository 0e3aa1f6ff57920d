//! Lifecycle demo: a seconds counter driven by a repeating timer.
//!
//! Demonstrates effect timing: the timer starts on activation, ticks
//! once per period while active, and is cancelled before it can fire
//! again on deactivation. Rapid deactivate/reactivate is safe because
//! every activation re-registers under the same cancellation id, which
//! cancels the previous timer instance first.

use reflow_core::effect::EffectId;
use reflow_core::{Effect, Reducer, SmallVec, smallvec};
use std::time::Duration;

/// Cancellation scope owning the demo's single repeating timer
pub const TIMER: EffectId = EffectId::new("lifecycle-timer");

/// Whether the demo timer is running
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimerStatus {
    /// Demo hidden, no timer registered
    #[default]
    Inactive,
    /// Demo visible, timer ticking
    Active,
}

/// State of the lifecycle demo
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LifecycleState {
    /// Current activation status
    pub status: TimerStatus,
    /// Seconds elapsed since the last activation
    pub seconds: u64,
    /// Last completed count observed from the todo list
    pub observed_completed: usize,
}

/// Actions accepted by the lifecycle reducer
#[derive(Clone, Debug)]
pub enum LifecycleAction {
    /// Show the demo: reset the counter and start the timer
    Activate,
    /// Hide the demo: cancel the timer before it fires again
    Deactivate,
    /// One timer period elapsed
    Tick,
    /// The todo list's completed count changed (observation only)
    CompletedCountChanged {
        /// New completed count
        count: usize,
    },
}

/// Environment dependencies for the lifecycle reducer
#[derive(Clone, Debug)]
pub struct LifecycleEnvironment {
    /// Interval between ticks
    pub tick_period: Duration,
}

impl LifecycleEnvironment {
    /// Creates an environment with the given tick period
    #[must_use]
    pub const fn new(tick_period: Duration) -> Self {
        Self { tick_period }
    }
}

impl Default for LifecycleEnvironment {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

/// Reducer for the lifecycle demo
#[derive(Clone, Debug, Default)]
pub struct LifecycleReducer;

impl LifecycleReducer {
    /// Creates a new `LifecycleReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Registers the next tick under the timer's cancellation scope
    fn schedule_tick(env: &LifecycleEnvironment) -> Effect<LifecycleAction> {
        Effect::cancellable(
            TIMER,
            Effect::delay(env.tick_period, LifecycleAction::Tick),
        )
    }
}

impl Reducer for LifecycleReducer {
    type State = LifecycleState;
    type Action = LifecycleAction;
    type Environment = LifecycleEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            LifecycleAction::Activate => {
                state.status = TimerStatus::Active;
                state.seconds = 0;
                tracing::info!("lifecycle demo mounted, interval started");
                smallvec![Self::schedule_tick(env)]
            },

            LifecycleAction::Deactivate => {
                state.status = TimerStatus::Inactive;
                tracing::info!("lifecycle demo unmounted, interval cleared");
                smallvec![Effect::cancel(TIMER)]
            },

            LifecycleAction::Tick => {
                // A tick racing a deactivation is dropped, not counted.
                if state.status != TimerStatus::Active {
                    return SmallVec::new();
                }

                state.seconds += 1;
                smallvec![Self::schedule_tick(env)]
            },

            LifecycleAction::CompletedCountChanged { count } => {
                state.observed_completed = count;
                tracing::info!(count, "observed completed count changed");
                SmallVec::new()
            },
        }
    }
}
