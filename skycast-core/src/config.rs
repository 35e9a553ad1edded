use reqwest::Url;

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "WEATHER_API_KEY";
pub const BASE_URL_VAR: &str = "WEATHER_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Process-wide API settings, validated once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), base_url: base_url.into() }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// A missing or blank API key is an error; the base URL falls back to
    /// the public WeatherAPI.com endpoint and must be an http(s) URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_VAR))?;

        let base_url = lookup(BASE_URL_VAR)
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        match Url::parse(&base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::InvalidBaseUrl(base_url)),
        }

        Ok(Self { api_key, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = ApiConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey(API_KEY_VAR));
    }

    #[test]
    fn blank_api_key_is_an_error() {
        let err = ApiConfig::from_lookup(lookup(&[(API_KEY_VAR, "   ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey(API_KEY_VAR));
    }

    #[test]
    fn base_url_defaults_to_public_endpoint() {
        let cfg = ApiConfig::from_lookup(lookup(&[(API_KEY_VAR, "KEY")])).unwrap();
        assert_eq!(cfg.api_key, "KEY");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.endpoint("current.json"), "https://api.weatherapi.com/v1/current.json");
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let cfg = ApiConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "KEY"),
            (BASE_URL_VAR, "http://127.0.0.1:8080/v1/"),
        ]))
        .unwrap();
        assert_eq!(cfg.endpoint("forecast.json"), "http://127.0.0.1:8080/v1/forecast.json");
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = ApiConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "KEY"),
            (BASE_URL_VAR, "ftp://example.com"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }
}
