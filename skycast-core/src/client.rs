use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::{fmt::Debug, ops::RangeInclusive, time::Duration};
use tracing::{debug, warn};

use crate::{
    config::ApiConfig,
    error::WeatherError,
    model::{ApiErrorBody, CurrentConditions, ForecastData},
};

/// Forecast lengths accepted by `forecast.json`.
pub const FORECAST_DAYS: RangeInclusive<u8> = 1..=10;

/// WeatherAPI.com error code for an unresolvable `q` parameter.
const NO_MATCHING_LOCATION: u32 = 1006;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only access to current conditions and forecasts.
///
/// Implementations hold no mutable state, so both calls can be in flight at
/// once for the same location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, location: &str) -> Result<CurrentConditions, WeatherError>;

    async fn fetch_forecast(&self, location: &str, days: u8) -> Result<ForecastData, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    config: ApiConfig,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(WeatherError::ClientSetup)?;
        Ok(Self { config, http })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        location: &str,
        params: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = self.config.endpoint(endpoint);
        debug!(endpoint, location, "requesting WeatherAPI");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.config.api_key.as_str()), ("q", location)])
            .query(params)
            .send()
            .await
            .inspect_err(|err| warn!(endpoint, location, error = %err, "WeatherAPI unreachable"))?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let err = classify_failure(status, &body, location);
            warn!(endpoint, location, %status, error = %err, "WeatherAPI request failed");
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|err| WeatherError::Upstream {
            status,
            message: format!("Failed to parse WeatherAPI {endpoint} JSON: {err}"),
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn fetch_current(&self, location: &str) -> Result<CurrentConditions, WeatherError> {
        let location = validate_location(location)?;
        self.get_json("current.json", location, &[("aqi", "no".to_string())]).await
    }

    async fn fetch_forecast(
        &self,
        location: &str,
        days: u8,
    ) -> Result<ForecastData, WeatherError> {
        let location = validate_location(location)?;
        if !FORECAST_DAYS.contains(&days) {
            return Err(WeatherError::InvalidRequest(format!(
                "forecast days must be between {} and {}, got {days}",
                FORECAST_DAYS.start(),
                FORECAST_DAYS.end()
            )));
        }

        self.get_json(
            "forecast.json",
            location,
            &[
                ("days", days.to_string()),
                ("aqi", "no".to_string()),
                ("alerts", "no".to_string()),
            ],
        )
        .await
    }
}

fn validate_location(location: &str) -> Result<&str, WeatherError> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err(WeatherError::InvalidRequest("location must not be empty".to_string()));
    }
    Ok(trimmed)
}

fn classify_failure(status: StatusCode, body: &str, location: &str) -> WeatherError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if parsed.error.code == NO_MATCHING_LOCATION => {
            WeatherError::LocationNotFound(location.to_string())
        }
        Ok(parsed) => WeatherError::Upstream { status, message: parsed.error.message },
        Err(_) => WeatherError::Upstream { status, message: truncate_body(body) },
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_not_found_code_is_classified() {
        let body = r#"{"error":{"code":1006,"message":"No matching location found."}}"#;
        let err = classify_failure(StatusCode::BAD_REQUEST, body, "Atlantis");
        assert!(matches!(err, WeatherError::LocationNotFound(ref l) if l == "Atlantis"));
    }

    #[test]
    fn other_provider_codes_are_upstream_errors() {
        let body = r#"{"error":{"code":2006,"message":"API key provided is invalid"}}"#;
        let err = classify_failure(StatusCode::UNAUTHORIZED, body, "Paris");
        match err {
            WeatherError::Upstream { status, message } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(message, "API key provided is invalid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unparseable_error_body_is_truncated() {
        let body = "x".repeat(500);
        let err = classify_failure(StatusCode::BAD_GATEWAY, &body, "Paris");
        match err {
            WeatherError::Upstream { message, .. } => {
                assert_eq!(message.len(), 203);
                assert!(message.ends_with("..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn client_builds_with_default_backend() {
        let client = WeatherApiClient::new(ApiConfig::new("KEY", "http://127.0.0.1:9/v1"));
        assert!(client.is_ok());
    }

    #[test]
    fn blank_location_is_rejected() {
        assert!(matches!(validate_location("   "), Err(WeatherError::InvalidRequest(_))));
        assert_eq!(validate_location("  Paris ").unwrap(), "Paris");
    }
}
