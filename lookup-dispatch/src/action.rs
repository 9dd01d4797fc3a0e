//! Action trait for type-safe state mutations

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions represent intents to change state or the outcome of async work.
/// They should be:
/// - Clone: Actions are logged and may be replayed in tests
/// - Debug: For logging
/// - Send + 'static: Async tasks send them back across threads
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Concise, log-friendly description of an action.
///
/// The default is the `Debug` output. Override it for actions carrying
/// large payloads.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
