//! Command line + environment configuration
//!
//! [`Args`] is what clap parses; [`AppConfig`] is the validated form the
//! rest of the app is built from.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::api::{ProviderConfig, DEFAULT_BASE_URL, DEFAULT_ICON_BASE_URL};
use crate::backdrop::{MediaSource, Playlist, PlaylistError, DEFAULT_VIDEO, DEFAULT_VIDEO_SECS};
use crate::lookup::{RegionFilter, DEFAULT_REGION_CODE, DEFAULT_REGION_NAME};
use crate::state::{Unit, ViewSettings};
use crate::theme::Theme;

pub const DEFAULT_LOG_FILE: &str = "weather-lookup.log";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown unit system {0:?} (expected metric or imperial)")]
    UnknownUnit(String),

    #[error("region code must be a two-letter country code, got {0:?}")]
    BadRegion(String),

    #[error("--video-secs must be greater than zero")]
    ZeroVideoLength,

    #[error(transparent)]
    Playlist(#[from] PlaylistError),
}

/// Terminal weather lookup limited to one country
#[derive(Parser, Debug)]
#[command(name = "weather-lookup")]
#[command(about = "Look up current weather for places in one country")]
pub struct Args {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Provider base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Base URL for condition icons
    #[arg(long, default_value = DEFAULT_ICON_BASE_URL)]
    pub icon_base_url: String,

    /// Only accept results from this country (ISO 3166 alpha-2)
    #[arg(long, default_value = DEFAULT_REGION_CODE)]
    pub region: String,

    /// Country name used in the rejection notice
    #[arg(long, default_value = DEFAULT_REGION_NAME)]
    pub region_name: String,

    /// Initial unit system: metric or imperial
    #[arg(long, short, default_value = "metric")]
    pub units: String,

    /// Prefill the search field and fetch on start
    #[arg(long, short)]
    pub query: Option<String>,

    /// Background clip, repeat for a playlist
    #[arg(long = "video", default_value = DEFAULT_VIDEO)]
    pub videos: Vec<PathBuf>,

    /// Play length of each background clip in seconds
    #[arg(long, default_value_t = DEFAULT_VIDEO_SECS)]
    pub video_secs: u64,

    /// Log destination (the terminal is owned by the UI)
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

/// Validated configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub region: RegionFilter,
    pub unit: Unit,
    pub initial_query: Option<String>,
    pub playlist: Playlist,
    pub theme: Theme,
    pub log_file: PathBuf,
}

impl AppConfig {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        // An empty key is still sent; the provider's 401 surfaces as a fetch failure
        let api_key = args
            .api_key
            .map(|key| key.trim().to_string())
            .unwrap_or_default();

        let unit = args.units.parse::<Unit>().map_err(ConfigError::UnknownUnit)?;

        let code = args.region.trim().to_string();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::BadRegion(args.region));
        }

        if args.video_secs == 0 {
            return Err(ConfigError::ZeroVideoLength);
        }
        let duration = Duration::from_secs(args.video_secs);
        let playlist = Playlist::new(
            args.videos
                .into_iter()
                .map(|path| MediaSource::new(path, duration))
                .collect(),
        )?;

        let initial_query = args
            .query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        Ok(Self {
            provider: ProviderConfig {
                base_url: args.base_url,
                icon_base_url: args.icon_base_url,
                api_key,
            },
            region: RegionFilter::new(code, args.region_name),
            unit,
            initial_query,
            playlist,
            theme: Theme::default(),
            log_file: args.log_file,
        })
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            region: self.region.clone(),
            icon_base_url: self.provider.icon_base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Result<AppConfig, ConfigError> {
        let mut argv = vec!["weather-lookup", "--api-key", "secret"];
        argv.extend_from_slice(extra);
        AppConfig::from_args(Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.provider.api_key, "secret");
        assert_eq!(config.region, RegionFilter::default());
        assert_eq!(config.unit, Unit::Metric);
        assert_eq!(config.initial_query, None);
        assert_eq!(config.playlist.len(), 1);
        assert_eq!(config.playlist.current().path, PathBuf::from(DEFAULT_VIDEO));
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_playlist_from_repeated_flag() {
        let config = parse(&["--video", "a.mp4", "--video", "b.mp4", "--video-secs", "5"]).unwrap();
        assert_eq!(config.playlist.len(), 2);
        assert_eq!(config.playlist.current().duration, Duration::from_secs(5));
    }

    #[test]
    fn test_imperial_and_query() {
        let config = parse(&["--units", "imperial", "--query", " Gauteng "]).unwrap();
        assert_eq!(config.unit, Unit::Imperial);
        assert_eq!(config.initial_query.as_deref(), Some("Gauteng"));
    }

    #[test]
    fn test_blank_query_is_none() {
        let config = parse(&["--query", "  "]).unwrap();
        assert_eq!(config.initial_query, None);
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            parse(&["--units", "kelvin"]).unwrap_err(),
            ConfigError::UnknownUnit("kelvin".into())
        );
        assert_eq!(
            parse(&["--region", "zaf"]).unwrap_err(),
            ConfigError::BadRegion("zaf".into())
        );
        assert_eq!(
            parse(&["--video-secs", "0"]).unwrap_err(),
            ConfigError::ZeroVideoLength
        );
    }

    #[test]
    fn test_blank_api_key_is_kept_empty() {
        let args = Args::try_parse_from(["weather-lookup", "--api-key", "  "]).unwrap();
        let config = AppConfig::from_args(args).unwrap();
        assert_eq!(config.provider.api_key, "");
    }
}
