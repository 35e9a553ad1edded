//! Error types surfaced by the weather client and startup configuration.

use reqwest::StatusCode;
use thiserror::Error;

/// Startup configuration failures. These abort the process before any request is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "WeatherAPI key is not defined.\n\
         Hint: set {0} in the environment or in a .env file."
    )]
    MissingApiKey(&'static str),

    #[error("Invalid API base URL '{0}'")]
    InvalidBaseUrl(String),
}

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("No matching location found for '{0}'")]
    LocationNotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("WeatherAPI request failed with status {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to initialise HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),
}

impl WeatherError {
    /// User-facing message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::LocationNotFound(_) => {
                "Location not found. Please try a different city name.".to_string()
            }
            Self::Network(_) | Self::Upstream { .. } => {
                "Failed to load weather data. Please try again later.".to_string()
            }
            Self::InvalidRequest(msg) => format!("Invalid request: {msg}"),
            Self::ClientSetup(_) => "Weather client could not be initialised.".to_string(),
        }
    }

    /// Whether the caller may reasonably try the same request again later.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Upstream { .. })
    }
}
