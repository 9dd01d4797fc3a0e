//! weather-lookup
//!
//! 1. Event (keyboard) -> LookupView.handle_event() -> Actions
//! 2. Actions dispatched to the store (through TracingMiddleware)
//! 3. Reducer updates state and returns effects
//! 4. EffectHandler spawns the lookup / backdrop tasks
//! 5. If state changed, re-render inside the fault boundary
//!
//! # Usage
//!
//! ```sh
//! OPENWEATHER_API_KEY=... weather-lookup --query Gauteng
//! weather-lookup --api-key ... --units imperial --video intro.mp4 --video loop.mp4
//! ```

use std::cell::RefCell;
use std::io::{self, Stdout};
use std::process;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lookup_dispatch::{
    Component, EffectRuntime, EffectStoreWithMiddleware, EventKind, EventOutcome, FaultBoundary,
    TracingMiddleware,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use weather_lookup::api::WeatherClient;
use weather_lookup::components::{LookupView, LookupViewProps};
use weather_lookup::config::{AppConfig, Args};
use weather_lookup::state::{AppState, LOADING_ANIM_TICK_MS};
use weather_lookup::theme::Theme;
use weather_lookup::{logging, reducer, Action, EffectHandler};

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    let config = match AppConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    let _log_guard = logging::init(&config.log_file)?;
    logging::install_panic_hook();
    if config.provider.api_key.is_empty() {
        warn!("No API key configured; every lookup will be rejected by the provider");
    }

    let client = match WeatherClient::new(config.provider.clone()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: could not create HTTP client: {}", e);
            process::exit(1);
        }
    };

    let mut guard = TerminalGuard::enter()?;
    let result = run_app(&mut guard.terminal, config, client).await;
    drop(guard);

    info!("Exited");
    result
}

/// Raw mode + alternate screen for as long as it lives, restored on drop
/// (including unwinding).
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

struct LookupUi {
    view: LookupView,
    theme: Theme,
}

impl LookupUi {
    fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        if let EventKind::Resize(..) = event {
            return EventOutcome::ignored().with_render();
        }
        let props = LookupViewProps {
            state,
            theme: &self.theme,
        };
        EventOutcome::from_actions(self.view.handle_event(event, props))
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: AppConfig,
    client: WeatherClient,
) -> io::Result<()> {
    let state = AppState::new(config.view_settings(), config.unit, config.playlist.clone());
    let store = EffectStoreWithMiddleware::new(state, reducer, TracingMiddleware::new());
    let boundary = FaultBoundary::default().with_fallback_color(config.theme.error);
    let mut runtime = EffectRuntime::from_store(store).with_boundary(boundary);

    // Spinner animation; the reducer only re-renders on it while loading
    runtime
        .subscriptions()
        .interval("tick", Duration::from_millis(LOADING_ANIM_TICK_MS), || {
            Action::Tick
        });

    runtime.enqueue(Action::BackdropLoad);
    if let Some(query) = config.initial_query.clone() {
        runtime.enqueue(Action::QueryChange(query));
        runtime.enqueue(Action::WeatherFetch);
    }

    info!(
        region = %config.region.code,
        unit = %config.unit,
        videos = config.playlist.len(),
        "Starting weather lookup"
    );

    let effects = EffectHandler::new(client, config.region.clone());
    let ui = RefCell::new(LookupUi {
        view: LookupView::new(),
        theme: config.theme,
    });

    runtime
        .run(
            terminal,
            |frame, area, state| {
                let mut ui = ui.borrow_mut();
                let theme = ui.theme;
                ui.view.render(
                    frame,
                    area,
                    LookupViewProps {
                        state,
                        theme: &theme,
                    },
                );
            },
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
            |effect, ctx| effects.handle(effect, ctx),
        )
        .await
}
