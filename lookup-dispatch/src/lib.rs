//! Action/reducer/effect runtime for the weather lookup TUI
//!
//! State lives in a single store and is only mutated by a reducer. Side
//! effects are declared by the reducer and executed by the runtime, which
//! feeds their outcomes back in as actions.
//!
//! # Core Concepts
//!
//! - **Action**: Events that describe state changes
//! - **EffectStore**: State container whose reducer returns [`DispatchResult`]
//! - **Component**: Pure UI elements that render based on props
//! - **TaskManager**: Keyed async tasks that report back through actions
//! - **FaultBoundary**: Render supervisor that degrades the view on a panic
//!
//! # Async Pattern
//!
//! 1. **Intent actions** trigger async work (e.g. `WeatherFetch`)
//! 2. The reducer returns an effect (e.g. `Effect::FetchWeather`)
//! 3. The effect handler spawns a task on the [`TaskManager`]
//! 4. **Result actions** carry the outcome back (e.g. `WeatherDidLoad`)
//!
//! ```ignore
//! fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::DataFetch => {
//!             state.loading = true;
//!             DispatchResult::changed_with(Effect::Fetch)
//!         }
//!         Action::DataDidLoad(data) => {
//!             state.loading = false;
//!             state.data = Some(data);
//!             DispatchResult::changed()
//!         }
//!     }
//! }
//! ```

pub mod action;
pub mod boundary;
pub mod component;
pub mod effect;
pub mod event;
pub mod runtime;
pub mod subscriptions;
pub mod tasks;
pub mod testing;

pub use action::{Action, ActionSummary};
pub use boundary::{BoundaryState, FaultBoundary};
pub use component::Component;
pub use effect::{
    DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware, Middleware,
    NoopMiddleware, TracingMiddleware,
};
pub use event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
pub use runtime::{EffectContext, EffectRuntime, EventOutcome};
pub use subscriptions::{SubKey, Subscriptions};
pub use tasks::{TaskKey, TaskManager};

pub use testing::{
    buffer_to_string_plain, char_key, ctrl_key, key, ActionAssertions, RenderHarness,
};

// Re-export ratatui types for convenience
pub use ratatui::{layout::Rect, Frame};
