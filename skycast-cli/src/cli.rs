use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use skycast_core::{
    ApiConfig, ConfigError, PreferenceStore, ReportView, Unit, ViewState, WeatherApiClient,
    WeatherError,
    config::API_KEY_VAR,
    metric_icon,
    report::{
        DETAIL_FORECAST_DAYS, HOME_FORECAST_DAYS, SearchOutcome, save_settings, search_location,
    },
    resolve_icon,
};
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather and forecasts from WeatherAPI.com")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Current conditions with today's range and a 3-day forecast.
    Show {
        /// Location to show instead of the saved default (not persisted).
        #[arg(long)]
        location: Option<String>,
    },

    /// Detailed conditions and a 5-day forecast.
    Details {
        /// Location to show instead of the saved default (not persisted).
        #[arg(long)]
        location: Option<String>,
    },

    /// Look up a city and, if it exists, make it the default location.
    Search {
        /// City name or "lat,lon" coordinates.
        query: String,
    },

    /// Change the default location and unit system.
    ///
    /// Prompts interactively when no flag is given.
    Settings {
        #[arg(long)]
        location: Option<String>,

        /// "metric" or "imperial".
        #[arg(long)]
        unit: Option<Unit>,
    },

    /// Print the icon asset for a WeatherAPI condition code.
    Icon {
        code: u32,

        /// Use the night variant where one exists.
        #[arg(long)]
        night: bool,
    },

    /// Print the icon asset for a metric kind, e.g. "humidity" or "windDirection".
    MetricIcon { kind: String },
}

impl Command {
    /// Whether the command talks to WeatherAPI and so needs a configured key.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Command::Show { .. } | Command::Details { .. } | Command::Search { .. })
    }
}

impl Cli {
    pub async fn run(self, config: Option<ApiConfig>) -> anyhow::Result<()> {
        match self.command {
            Command::Show { location } => {
                let prefs = PreferenceStore::open_default()?;
                let (location, unit) = resolve_view_inputs(&prefs, location);
                let client = client_from(config)?;

                let mut view = ReportView::new();
                match view.load(&client, &location, HOME_FORECAST_DAYS).await {
                    ViewState::Ready(report) => println!("{}", render::home(report, unit)),
                    ViewState::Failed(message) => bail!("{message}"),
                    other => debug!(state = ?other, "view did not settle"),
                }
            }
            Command::Details { location } => {
                let prefs = PreferenceStore::open_default()?;
                let (location, unit) = resolve_view_inputs(&prefs, location);
                let client = client_from(config)?;

                let mut view = ReportView::new();
                match view.load(&client, &location, DETAIL_FORECAST_DAYS).await {
                    ViewState::Ready(report) => println!("{}", render::details(report, unit)),
                    ViewState::Failed(message) => bail!("{message}"),
                    other => debug!(state = ?other, "view did not settle"),
                }
            }
            Command::Search { query } => {
                let mut prefs = PreferenceStore::open_default()?;
                let client = client_from(config)?;

                match search_location(&client, &mut prefs, &query).await {
                    Ok(SearchOutcome::Saved(current)) => {
                        println!("Default location set to {}", current.location.display_name());
                        println!("{}", render::snapshot_line(&current, prefs.unit()));
                    }
                    Ok(SearchOutcome::Skipped) => println!("Nothing to search for."),
                    Err(err) => match err.downcast_ref::<WeatherError>() {
                        Some(weather_err) => bail!("{}", weather_err.user_message()),
                        None => return Err(err),
                    },
                }
            }
            Command::Settings { location, unit } => {
                let mut prefs = PreferenceStore::open_default()?;

                let (location, unit) = if location.is_none() && unit.is_none() {
                    prompt_settings(&prefs)?
                } else {
                    (
                        location.unwrap_or_else(|| prefs.default_location()),
                        unit.unwrap_or_else(|| prefs.unit()),
                    )
                };

                save_settings(&mut prefs, &location, unit)?;
                println!("Settings saved successfully!");
                println!("  Default location: {}", prefs.default_location());
                println!("  Units: {}", prefs.unit());
            }
            Command::Icon { code, night } => {
                println!("{}", resolve_icon(code, !night).asset_path());
            }
            Command::MetricIcon { kind } => {
                println!("{}", metric_icon(&kind).asset_path());
            }
        }

        Ok(())
    }
}

fn client_from(config: Option<ApiConfig>) -> anyhow::Result<WeatherApiClient> {
    let config = config.ok_or_else(|| anyhow!(ConfigError::MissingApiKey(API_KEY_VAR)))?;
    Ok(WeatherApiClient::new(config)?)
}

fn resolve_view_inputs(prefs: &PreferenceStore, location: Option<String>) -> (String, Unit) {
    let location = location
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| prefs.default_location());
    (location, prefs.unit())
}

fn prompt_settings(prefs: &PreferenceStore) -> anyhow::Result<(String, Unit)> {
    let current_location = prefs.default_location();
    let location = Text::new("Default location:")
        .with_default(&current_location)
        .with_help_message("Enter the city name for your default weather location")
        .prompt()
        .context("Failed to read default location")?;

    let current_unit = prefs.unit();
    let cursor = Unit::all().iter().position(|u| *u == current_unit).unwrap_or(0);
    let unit = Select::new("Temperature units:", Unit::all().to_vec())
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read unit selection")?;

    Ok((location, unit))
}
