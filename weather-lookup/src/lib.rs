//! Weather lookup TUI
//!
//! Type a city or province, press Enter, and the current conditions from
//! OpenWeatherMap are shown for that place, provided it lies inside the
//! configured region. Ctrl+T flips between metric and imperial units and
//! clears the result. A background playlist loops independently.
//!
//! The crate is split the way the runtime expects:
//! - [`state`]: everything the view renders from
//! - [`action`] / [`reducer`] / [`effect`]: the only path to a state change
//! - [`api`] / [`lookup`]: the HTTP client and the submit contract
//! - [`backdrop`]: the media playlist and its readiness/playback tasks
//! - [`components`]: pure render + event mapping

pub mod action;
pub mod api;
pub mod backdrop;
pub mod components;
pub mod config;
pub mod effect;
pub mod logging;
pub mod lookup;
pub mod reducer;
pub mod state;
pub mod theme;

pub use action::Action;
pub use effect::{Effect, EffectHandler};
pub use reducer::reducer;
pub use state::AppState;
