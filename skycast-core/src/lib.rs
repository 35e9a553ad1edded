//! Core library for the `skycast` weather lookup tool.
//!
//! This crate defines:
//! - Startup configuration (API key, endpoint)
//! - The WeatherAPI.com client and its payload models
//! - Condition-code and metric icon resolution
//! - Persisted user preferences (default location, unit system)
//! - The report/search/settings flows a presentation layer drives
//!
//! It is used by `skycast-cli`, but can also be reused by other front ends.

pub mod client;
pub mod config;
pub mod error;
pub mod icon;
pub mod model;
pub mod preferences;
pub mod report;

pub use client::{WeatherApiClient, WeatherProvider};
pub use config::ApiConfig;
pub use error::{ConfigError, WeatherError};
pub use icon::{Icon, MetricKind, metric_icon, resolve_icon};
pub use model::{ConditionDescriptor, CurrentConditions, ForecastData, ForecastDay};
pub use preferences::{PreferenceStore, Unit};
pub use report::{ReportView, ViewState, WeatherReport, fetch_report};
