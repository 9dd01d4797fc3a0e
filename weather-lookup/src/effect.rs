//! Effects - side effects declared by the reducer
//!
//! The reducer stays pure: it returns an [`Effect`] and the runtime hands it
//! to [`EffectHandler`], which spawns the async work. Every spawned future
//! resolves to exactly one result action.

use std::future::Future;

use lookup_dispatch::EffectContext;
use tracing::{debug, warn};

use crate::action::Action;
use crate::api::WeatherClient;
use crate::backdrop::{self, MediaSource, BACKDROP_TASK};
use crate::lookup::{self, LookupError, RegionFilter};
use crate::state::{Unit, WeatherReport};

pub const WEATHER_TASK: &str = "weather";

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Run a lookup for an already validated query
    FetchWeather { query: String, unit: Unit },

    /// Wait for the playlist entry at `index` to become playable
    BackdropPrepare { index: usize, source: MediaSource },

    /// Play the entry at `index` through to its end
    BackdropPlay { index: usize, source: MediaSource },
}

/// Executes effects against the provider and the media files
#[derive(Clone, Debug)]
pub struct EffectHandler {
    client: WeatherClient,
    region: RegionFilter,
}

impl EffectHandler {
    pub fn new(client: WeatherClient, region: RegionFilter) -> Self {
        Self { client, region }
    }

    pub fn handle(&self, effect: Effect, ctx: &mut EffectContext<Action>) {
        match effect {
            Effect::FetchWeather { query, unit } => {
                let client = self.client.clone();
                let region = self.region.clone();
                spawn_lookup(ctx, async move {
                    lookup::submit(&client, &query, unit, &region).await
                });
            }

            Effect::BackdropPrepare { index, source } => {
                debug!(index, path = %source.path.display(), "Preparing backdrop");
                ctx.tasks().spawn(BACKDROP_TASK, async move {
                    match backdrop::prepare(&source).await {
                        Ok(()) => Action::BackdropDidReady { index },
                        Err(e) => {
                            warn!(index, error = %e, "Backdrop failed to load");
                            Action::BackdropDidFail {
                                index,
                                reason: e.to_string(),
                            }
                        }
                    }
                });
            }

            Effect::BackdropPlay { index, source } => {
                ctx.tasks().spawn(BACKDROP_TASK, async move {
                    match backdrop::play(&source).await {
                        Ok(()) => Action::BackdropDidEnd { index },
                        Err(e) => {
                            warn!(index, error = %e, "Backdrop failed to play");
                            Action::BackdropDidFail {
                                index,
                                reason: e.to_string(),
                            }
                        }
                    }
                });
            }
        }
    }
}

/// Run a lookup under [`WEATHER_TASK`].
///
/// A panicking lookup still reports back as `FetchFailed`, so loading always
/// clears.
fn spawn_lookup<F>(ctx: &mut EffectContext<Action>, lookup: F)
where
    F: Future<Output = Result<WeatherReport, LookupError>> + Send + 'static,
{
    ctx.tasks().spawn_guarded(
        WEATHER_TASK,
        async move {
            match lookup.await {
                Ok(report) => Action::WeatherDidLoad(report),
                Err(e) => Action::WeatherDidError(e),
            }
        },
        |message| Action::WeatherDidError(LookupError::FetchFailed { cause: message }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::reducer;
    use crate::state::AppState;
    use lookup_dispatch::EffectRuntime;
    use std::time::Duration;

    async fn exploding_submit() -> Result<WeatherReport, LookupError> {
        panic!("boom")
    }

    fn panicking_lookup(effect: Effect, ctx: &mut EffectContext<Action>) {
        if let Effect::FetchWeather { .. } = effect {
            spawn_lookup(ctx, exploding_submit());
        }
    }

    #[tokio::test]
    async fn test_panicking_lookup_clears_loading() {
        let mut state = AppState::default();
        state.query = "Gauteng".into();
        let mut runtime = EffectRuntime::new(state, reducer);
        let mut handle_effect = panicking_lookup;

        assert!(runtime.process(Action::WeatherFetch, &mut handle_effect));
        assert!(runtime.state().is_loading);

        let action = tokio::time::timeout(Duration::from_secs(1), runtime.next_action())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert_eq!(
            action,
            Action::WeatherDidError(LookupError::FetchFailed {
                cause: "boom".into()
            })
        );

        runtime.process(action, &mut handle_effect);
        let state = runtime.state();
        assert!(!state.is_loading);
        assert!(state.weather.is_none());
        assert!(matches!(state.notice, Some(LookupError::FetchFailed { .. })));
    }
}
