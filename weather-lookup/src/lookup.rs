//! The submit contract
//!
//! `submit` turns a raw query into either an accepted [`WeatherReport`] or a
//! [`LookupError`]. It owns input validation and the region filter; the HTTP
//! detail lives in [`crate::api`].

use thiserror::Error;
use tracing::{debug, error, info};

use crate::api::WeatherClient;
use crate::state::{Unit, WeatherReport};

pub const DEFAULT_REGION_CODE: &str = "ZA";
pub const DEFAULT_REGION_NAME: &str = "South Africa";

/// Why a submit did not produce a result
///
/// Every variant is shown to the user as a dismissable notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Empty or whitespace-only query; no request was made
    #[error("Please enter a valid city name.")]
    InvalidInput,

    /// The provider resolved the query to a place outside the region
    #[error("Please enter a city in {expected}.")]
    UnsupportedRegion { country: String, expected: String },

    /// Transport, status or payload failure. `cause` is for the log only.
    #[error("Unable to fetch weather data. Please try again later.")]
    FetchFailed { cause: String },
}

impl LookupError {
    /// Short heading for the notice box.
    pub fn title(&self) -> &'static str {
        match self {
            LookupError::InvalidInput => "Invalid input",
            LookupError::UnsupportedRegion { .. } => "Outside region",
            LookupError::FetchFailed { .. } => "Fetch failed",
        }
    }
}

/// The only country a result is accepted from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionFilter {
    /// ISO 3166 alpha-2, compared exactly against the provider's `sys.country`
    pub code: String,
    /// Human name used in the rejection notice
    pub name: String,
}

impl RegionFilter {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    pub fn accepts(&self, country: &str) -> bool {
        country == self.code
    }
}

impl Default for RegionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_REGION_CODE, DEFAULT_REGION_NAME)
    }
}

/// Trim the query; reject it if nothing is left.
pub fn validate_query(query: &str) -> Result<&str, LookupError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(LookupError::InvalidInput)
    } else {
        Ok(trimmed)
    }
}

/// Look up current conditions for `query` and apply the region filter.
///
/// - blank query: `InvalidInput`, no request is made
/// - request/status/decode failure: `FetchFailed` (cause logged)
/// - country outside `region`: `UnsupportedRegion`
pub async fn submit(
    client: &WeatherClient,
    query: &str,
    unit: Unit,
    region: &RegionFilter,
) -> Result<WeatherReport, LookupError> {
    let query = validate_query(query)?;
    debug!(query, %unit, "Submitting weather lookup");

    let report = client.current(query, unit).await.map_err(|e| {
        error!(query, error = %e, "Weather fetch failed");
        LookupError::FetchFailed {
            cause: e.to_string(),
        }
    })?;

    if !region.accepts(&report.country) {
        info!(
            query,
            country = %report.country,
            expected = %region.code,
            "Rejected result outside region"
        );
        return Err(LookupError::UnsupportedRegion {
            country: report.country,
            expected: region.name.clone(),
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_query_trims() {
        assert_eq!(validate_query("  Gauteng "), Ok("Gauteng"));
    }

    #[test]
    fn test_validate_query_rejects_blank() {
        assert_eq!(validate_query(""), Err(LookupError::InvalidInput));
        assert_eq!(validate_query("   \t"), Err(LookupError::InvalidInput));
    }

    #[test]
    fn test_notice_texts() {
        assert_eq!(
            LookupError::InvalidInput.to_string(),
            "Please enter a valid city name."
        );
        let rejected = LookupError::UnsupportedRegion {
            country: "FR".into(),
            expected: "South Africa".into(),
        };
        assert_eq!(rejected.to_string(), "Please enter a city in South Africa.");
        let failed = LookupError::FetchFailed {
            cause: "connection refused".into(),
        };
        assert_eq!(
            failed.to_string(),
            "Unable to fetch weather data. Please try again later."
        );
    }

    #[test]
    fn test_region_match_is_exact() {
        let region = RegionFilter::default();
        assert!(region.accepts("ZA"));
        assert!(!region.accepts("za"));
        assert!(!region.accepts("FR"));
        assert!(!region.accepts(""));
    }
}
