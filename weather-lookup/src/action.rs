//! Actions
//!
//! Naming follows the category-prefix convention:
//! - `Query*`, `Weather*`: the lookup
//! - `Ui*`, `Notice*`: view-only changes
//! - `Backdrop*`: the media playlist
//! - a `Did` infix marks the result of an async task

use lookup_dispatch::ActionSummary;

use crate::lookup::LookupError;
use crate::state::WeatherReport;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Lookup =====
    /// Replace the search field contents
    QueryChange(String),

    /// Intent: submit the current query (spawns the fetch task)
    WeatherFetch,

    /// Result: an accepted report
    WeatherDidLoad(WeatherReport),

    /// Result: invalid input, rejected region or fetch failure
    WeatherDidError(LookupError),

    // ===== UI =====
    /// Flip metric/imperial and drop the displayed result
    UiToggleUnits,

    NoticeDismiss,

    // ===== Backdrop =====
    /// Begin readying the current playlist entry
    BackdropLoad,

    /// Result: the entry at `index` can play
    BackdropDidReady { index: usize },

    /// Result: the entry at `index` finished playing
    BackdropDidEnd { index: usize },

    /// Result: the entry at `index` failed to start
    BackdropDidFail { index: usize, reason: String },

    // ===== Global =====
    /// Periodic tick for the loading spinner
    Tick,

    Quit,
}

impl lookup_dispatch::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::QueryChange(_) => "QueryChange",
            Action::WeatherFetch => "WeatherFetch",
            Action::WeatherDidLoad(_) => "WeatherDidLoad",
            Action::WeatherDidError(_) => "WeatherDidError",
            Action::UiToggleUnits => "UiToggleUnits",
            Action::NoticeDismiss => "NoticeDismiss",
            Action::BackdropLoad => "BackdropLoad",
            Action::BackdropDidReady { .. } => "BackdropDidReady",
            Action::BackdropDidEnd { .. } => "BackdropDidEnd",
            Action::BackdropDidFail { .. } => "BackdropDidFail",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }
}

/// Concise log lines for data-heavy actions
impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Action::WeatherDidLoad(report) => format!(
                "WeatherDidLoad {{ {}, {} }}",
                report.location_label(),
                report.temperature_label()
            ),
            // The cause can be a long transport error; it is logged elsewhere
            Action::WeatherDidError(LookupError::FetchFailed { .. }) => {
                "WeatherDidError(FetchFailed)".to_string()
            }
            Action::BackdropDidFail { index, reason } => {
                let reason = if reason.len() > 40 {
                    format!("{}...", reason.chars().take(37).collect::<String>())
                } else {
                    reason.clone()
                };
                format!("BackdropDidFail {{ index: {}, reason: {:?} }}", index, reason)
            }
            _ => format!("{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Unit;
    use lookup_dispatch::Action as _;

    #[test]
    fn test_names() {
        assert_eq!(Action::WeatherFetch.name(), "WeatherFetch");
        assert_eq!(
            Action::BackdropDidEnd { index: 2 }.name(),
            "BackdropDidEnd"
        );
    }

    #[test]
    fn test_summary_is_compact() {
        let report = WeatherReport {
            name: "Gauteng".into(),
            country: "ZA".into(),
            temperature: 22.5,
            unit: Unit::Metric,
            description: "clear sky".into(),
            icon: "01d".into(),
            humidity: 40.0,
            wind_speed: 3.1,
        };
        assert_eq!(
            Action::WeatherDidLoad(report).summary(),
            "WeatherDidLoad { Gauteng, ZA, 22.5° C }"
        );

        let failed = Action::WeatherDidError(LookupError::FetchFailed {
            cause: "x".repeat(500),
        });
        assert_eq!(failed.summary(), "WeatherDidError(FetchFailed)");
    }
}
