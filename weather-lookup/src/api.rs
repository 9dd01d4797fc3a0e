//! OpenWeatherMap current-conditions client
//!
//! One call: `GET {base}/weather?q=..&units=..&appid=..`. The response is
//! decoded into a [`WeatherReport`] tagged with the unit the request used.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::state::{Unit, WeatherReport};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Error bodies are kept for the log, but not all of them
const MAX_ERROR_BODY: usize = 256;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response has no weather condition")]
    MissingCondition,
}

/// Where and how to reach the provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub icon_base_url: String,
    pub api_key: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
            api_key: String::new(),
        }
    }
}

// Only the fields the view reads; everything else in the payload is ignored.

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    sys: Sys,
    main: Main,
    weather: Vec<Condition>,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct Sys {
    // Absent for some unpopulated places; treated as "no country"
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

impl CurrentResponse {
    fn into_report(self, unit: Unit) -> Result<WeatherReport, ApiError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or(ApiError::MissingCondition)?;

        Ok(WeatherReport {
            name: self.name,
            country: self.sys.country,
            temperature: self.main.temp,
            unit,
            description: condition.description,
            icon: condition.icon,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
        })
    }
}

/// Decode a current-conditions payload.
pub fn parse_current(body: &str, unit: Unit) -> Result<WeatherReport, ApiError> {
    let response: CurrentResponse = serde_json::from_str(body)?;
    response.into_report(unit)
}

#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl WeatherClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("weather-lookup/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Current conditions for `query`, in `unit`.
    pub async fn current(&self, query: &str, unit: Unit) -> Result<WeatherReport, ApiError> {
        let url = format!("{}/weather", self.config.base_url.trim_end_matches('/'));

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("units", unit.as_param()),
                ("appid", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                body: truncate(body, MAX_ERROR_BODY),
            });
        }

        parse_current(&body, unit)
    }
}

fn truncate(mut body: String, max: usize) -> String {
    if body.len() > max {
        let mut end = max;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
    body
}
