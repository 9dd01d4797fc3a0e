//! Application state - single source of truth
//!
//! Components receive `&AppState` through props and never mutate it; only
//! the reducer does.

use std::fmt;
use std::str::FromStr;

use crate::backdrop::{Backdrop, Playlist};
use crate::lookup::{LookupError, RegionFilter};

/// Spinner frame interval while a fetch is outstanding.
pub const LOADING_ANIM_TICK_MS: u64 = 100;

/// Unit system sent to the provider and used to label the result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
}

impl Unit {
    pub fn toggle(self) -> Self {
        match self {
            Unit::Metric => Unit::Imperial,
            Unit::Imperial => Unit::Metric,
        }
    }

    /// Value of the provider's `units` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        }
    }

    pub fn temperature_suffix(self) -> &'static str {
        match self {
            Unit::Metric => "C",
            Unit::Imperial => "F",
        }
    }

    /// The provider reports wind in m/s for metric and mph for imperial.
    pub fn speed_suffix(self) -> &'static str {
        match self {
            Unit::Metric => "m/s",
            Unit::Imperial => "mph",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" | "c" | "celsius" => Ok(Unit::Metric),
            "imperial" | "f" | "fahrenheit" => Ok(Unit::Imperial),
            other => Err(other.to_string()),
        }
    }
}

/// A successful, region-accepted lookup.
///
/// `unit` is the unit the request was issued with, so the labels always
/// match the numbers even if the toggle has moved on since.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherReport {
    pub name: String,
    pub country: String,
    pub temperature: f64,
    pub unit: Unit,
    pub description: String,
    pub icon: String,
    pub humidity: f64,
    pub wind_speed: f64,
}

impl WeatherReport {
    pub fn location_label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }

    pub fn temperature_label(&self) -> String {
        format!("{}° {}", self.temperature, self.unit.temperature_suffix())
    }

    pub fn humidity_label(&self) -> String {
        format!("Humidity: {}%", self.humidity)
    }

    pub fn wind_label(&self) -> String {
        format!("Wind Speed: {} {}", self.wind_speed, self.unit.speed_suffix())
    }

    /// `{icon_base}/{icon}.png`
    pub fn icon_url(&self, icon_base: &str) -> String {
        format!("{}/{}.png", icon_base.trim_end_matches('/'), self.icon)
    }
}

/// Read-only settings the view needs but never changes
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSettings {
    pub region: RegionFilter,
    pub icon_base_url: String,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            region: RegionFilter::default(),
            icon_base_url: crate::api::DEFAULT_ICON_BASE_URL.to_string(),
        }
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug)]
pub struct AppState {
    /// Current contents of the search field
    pub query: String,

    /// Unit used for the next fetch
    pub unit: Unit,

    /// True while a fetch is outstanding
    pub is_loading: bool,

    /// Last accepted result (None = nothing to show)
    pub weather: Option<WeatherReport>,

    /// Transient notification waiting to be dismissed
    pub notice: Option<LookupError>,

    /// Background playlist
    pub backdrop: Backdrop,

    pub settings: ViewSettings,

    /// Animation frame counter (for the loading spinner)
    pub tick_count: u32,
}

impl AppState {
    pub fn new(settings: ViewSettings, unit: Unit, playlist: Playlist) -> Self {
        Self {
            query: String::new(),
            unit,
            is_loading: false,
            weather: None,
            notice: None,
            backdrop: Backdrop::new(playlist),
            settings,
            tick_count: 0,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewSettings::default(), Unit::default(), Playlist::default())
    }
}
