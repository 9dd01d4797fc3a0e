//! Reducer - (state, action) -> state change + effects
//!
//! All state mutations happen here. Async work is only ever requested, by
//! returning an [`Effect`].

use lookup_dispatch::DispatchResult;
use tracing::debug;

use crate::action::Action;
use crate::backdrop::BackdropStatus;
use crate::effect::Effect;
use crate::lookup::validate_query;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Lookup =====
        Action::QueryChange(query) => {
            if state.query == query {
                return DispatchResult::unchanged();
            }
            state.query = query;
            DispatchResult::changed()
        }

        Action::WeatherFetch => {
            // One lookup at a time; a second Enter while loading is dropped
            if state.is_loading {
                debug!("Fetch already in flight, ignoring submit");
                return DispatchResult::unchanged();
            }

            match validate_query(&state.query) {
                Err(e) => {
                    state.notice = Some(e);
                    DispatchResult::changed()
                }
                Ok(query) => {
                    let effect = Effect::FetchWeather {
                        query: query.to_string(),
                        unit: state.unit,
                    };
                    state.is_loading = true;
                    state.notice = None;
                    DispatchResult::changed_with(effect)
                }
            }
        }

        Action::WeatherDidLoad(report) => {
            state.weather = Some(report);
            state.is_loading = false;
            DispatchResult::changed()
        }

        Action::WeatherDidError(e) => {
            state.weather = None;
            state.is_loading = false;
            state.notice = Some(e);
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiToggleUnits => {
            state.unit = state.unit.toggle();
            state.weather = None;
            DispatchResult::changed()
        }

        Action::NoticeDismiss => {
            if state.notice.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Backdrop =====
        Action::BackdropLoad => {
            let backdrop = &mut state.backdrop;
            backdrop.status = BackdropStatus::Loading;
            DispatchResult::changed_with(Effect::BackdropPrepare {
                index: backdrop.playlist.index(),
                source: backdrop.playlist.current().clone(),
            })
        }

        Action::BackdropDidReady { index } => {
            let backdrop = &mut state.backdrop;
            if !backdrop.is_current(index) {
                return DispatchResult::unchanged();
            }
            backdrop.status = BackdropStatus::Playing;
            DispatchResult::changed_with(Effect::BackdropPlay {
                index,
                source: backdrop.playlist.current().clone(),
            })
        }

        Action::BackdropDidEnd { index } => {
            let backdrop = &mut state.backdrop;
            if !backdrop.is_current(index) {
                return DispatchResult::unchanged();
            }
            let next = backdrop.playlist.advance();
            backdrop.status = BackdropStatus::Loading;
            DispatchResult::changed_with(Effect::BackdropPrepare {
                index: next,
                source: backdrop.playlist.current().clone(),
            })
        }

        Action::BackdropDidFail { index, reason } => {
            let backdrop = &mut state.backdrop;
            if !backdrop.is_current(index) {
                return DispatchResult::unchanged();
            }
            backdrop.status = BackdropStatus::Stalled { reason };
            DispatchResult::changed()
        }

        // ===== Global =====
        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // Only the spinner animates
            if state.is_loading {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // Handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}
