//! What a presentation layer needs: both payloads for a location fetched
//! together, a view state that ignores stale responses, and the search and
//! settings flows that update preferences.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    client::WeatherProvider,
    error::WeatherError,
    model::{CurrentConditions, ForecastData},
    preferences::{PreferenceStore, Unit},
};

/// Forecast length of the home view.
pub const HOME_FORECAST_DAYS: u8 = 3;
/// Forecast length of the detail view.
pub const DETAIL_FORECAST_DAYS: u8 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: ForecastData,
}

/// Fetch current conditions and forecast concurrently.
///
/// Resolves once both finish; the first failure is returned and the other
/// result is dropped.
pub async fn fetch_report(
    provider: &dyn WeatherProvider,
    location: &str,
    days: u8,
) -> Result<WeatherReport, WeatherError> {
    let (current, forecast) = tokio::try_join!(
        provider.fetch_current(location),
        provider.fetch_forecast(location, days),
    )?;

    Ok(WeatherReport { current, forecast })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading {
        location: String,
    },
    Ready(Box<WeatherReport>),
    /// User-facing message; no data from the failed request is kept.
    Failed(String),
}

/// Loading state for one screen. Only the most recently issued request may
/// complete it.
#[derive(Debug, Default)]
pub struct ReportView {
    issued: u64,
    pending: Option<u64>,
    state: ViewState,
}

impl ReportView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading { .. })
    }

    /// Start a request for `location`, superseding any request in flight.
    pub fn begin(&mut self, location: &str) -> RequestTicket {
        self.issued += 1;
        self.pending = Some(self.issued);
        self.state = ViewState::Loading { location: location.to_string() };
        RequestTicket(self.issued)
    }

    /// Apply the outcome of `ticket`. Returns `false` when it was superseded.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<WeatherReport, WeatherError>,
    ) -> bool {
        if self.pending != Some(ticket.0) {
            warn!(request = ticket.0, latest = self.issued, "discarding stale weather response");
            return false;
        }

        self.pending = None;
        self.state = match result {
            Ok(report) => ViewState::Ready(Box::new(report)),
            Err(err) => {
                warn!(error = %err, "weather request failed");
                ViewState::Failed(err.user_message())
            }
        };
        true
    }

    /// Begin, fetch and complete in one step.
    pub async fn load(
        &mut self,
        provider: &dyn WeatherProvider,
        location: &str,
        days: u8,
    ) -> &ViewState {
        let ticket = self.begin(location);
        let result = fetch_report(provider, location, days).await;
        self.complete(ticket, result);
        &self.state
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was blank; nothing was requested or stored.
    Skipped,
    /// The location resolved and is now the default.
    Saved(Box<CurrentConditions>),
}

/// Check that `query` resolves upstream and, only then, make it the default location.
pub async fn search_location(
    provider: &dyn WeatherProvider,
    prefs: &mut PreferenceStore,
    query: &str,
) -> Result<SearchOutcome> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(SearchOutcome::Skipped);
    }

    let current = provider.fetch_current(query).await?;
    prefs.set_default_location(query)?;
    info!(location = query, "default location updated from search");

    Ok(SearchOutcome::Saved(Box::new(current)))
}

/// Persist the settings form. The unit is always written; the location
/// only when it isn't blank. Returns whether the location was written.
pub fn save_settings(prefs: &mut PreferenceStore, location: &str, unit: Unit) -> Result<bool> {
    prefs.set_unit(unit)?;

    let location = location.trim();
    if location.is_empty() {
        debug!("blank location in settings, keeping previous default");
        return Ok(false);
    }

    prefs.set_default_location(location)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_ticket_is_discarded() {
        let mut view = ReportView::new();
        let first = view.begin("London");
        let second = view.begin("Paris");

        let applied =
            view.complete(first, Err(WeatherError::LocationNotFound("London".into())));
        assert!(!applied);
        assert_eq!(view.state(), &ViewState::Loading { location: "Paris".into() });

        let applied = view.complete(second, Err(WeatherError::LocationNotFound("Paris".into())));
        assert!(applied);
        assert!(matches!(view.state(), ViewState::Failed(msg) if msg.contains("different city")));
    }

    #[test]
    fn ticket_cannot_complete_twice() {
        let mut view = ReportView::new();
        let ticket = view.begin("London");
        assert!(view.complete(ticket, Err(WeatherError::InvalidRequest("x".into()))));
        assert!(!view.complete(ticket, Err(WeatherError::InvalidRequest("y".into()))));
        assert!(matches!(view.state(), ViewState::Failed(msg) if msg.contains('x')));
    }

    #[test]
    fn view_starts_idle() {
        let view = ReportView::new();
        assert_eq!(view.state(), &ViewState::Idle);
        assert!(!view.is_loading());
    }

    #[test]
    fn save_settings_keeps_location_when_blank() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = PreferenceStore::open(dir.path().join("preferences.toml")).unwrap();
        prefs.set_default_location("Oslo").unwrap();

        let saved = save_settings(&mut prefs, "   ", Unit::Imperial).unwrap();
        assert!(!saved);
        assert_eq!(prefs.default_location(), "Oslo");
        assert_eq!(prefs.unit(), Unit::Imperial);

        let saved = save_settings(&mut prefs, "  Tokyo ", Unit::Metric).unwrap();
        assert!(saved);
        assert_eq!(prefs.default_location(), "Tokyo");
        assert_eq!(prefs.unit(), Unit::Metric);
    }
}
