//! Payloads returned by the WeatherAPI.com `current.json` and `forecast.json`
//! endpoints. Both unit systems are always present; the unit preference only
//! selects which one gets displayed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    #[serde(default)]
    pub localtime: String,
}

impl Location {
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// `{text, icon, code}`; `icon` is the provider-hosted image, kept as a fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionDescriptor {
    pub text: String,
    #[serde(rename = "icon", default)]
    pub icon_url: String,
    pub code: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub temp_c: f64,
    pub temp_f: f64,
    pub is_day: u8,
    pub condition: ConditionDescriptor,
    pub wind_mph: f64,
    pub wind_kph: f64,
    #[serde(default)]
    pub wind_degree: u16,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    #[serde(default)]
    pub precip_mm: f64,
    #[serde(default)]
    pub precip_in: f64,
    pub humidity: u8,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub vis_km: f64,
    pub vis_miles: f64,
    pub uv: f64,
}

impl Snapshot {
    pub fn is_day(&self) -> bool {
        self.is_day == 1
    }
}

/// Response of `current.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location: Location,
    pub current: Snapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    pub avgtemp_c: f64,
    pub avgtemp_f: f64,
    pub condition: ConditionDescriptor,
    pub maxwind_mph: f64,
    pub maxwind_kph: f64,
    pub totalprecip_mm: f64,
    pub totalprecip_in: f64,
    pub avghumidity: f64,
    #[serde(default)]
    pub daily_will_it_rain: u8,
    #[serde(default)]
    pub daily_chance_of_rain: u8,
    #[serde(default)]
    pub daily_will_it_snow: u8,
    #[serde(default)]
    pub daily_chance_of_snow: u8,
    pub uv: f64,
}

impl DaySummary {
    pub fn will_rain(&self) -> bool {
        self.daily_will_it_rain == 1
    }

    pub fn will_snow(&self) -> bool {
        self.daily_will_it_snow == 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
    #[serde(default)]
    pub moonrise: String,
    #[serde(default)]
    pub moonset: String,
    pub moon_phase: String,
    #[serde(default)]
    pub moon_illumination: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourRecord {
    pub time_epoch: i64,
    pub time: String,
    pub temp_c: f64,
    pub temp_f: f64,
    #[serde(default = "default_is_day")]
    pub is_day: u8,
    pub condition: ConditionDescriptor,
    pub wind_mph: f64,
    pub wind_kph: f64,
    #[serde(default)]
    pub wind_degree: u16,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    #[serde(default)]
    pub precip_mm: f64,
    #[serde(default)]
    pub precip_in: f64,
    pub humidity: u8,
    #[serde(default)]
    pub cloud: u8,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    #[serde(default)]
    pub windchill_c: f64,
    #[serde(default)]
    pub windchill_f: f64,
    #[serde(default)]
    pub heatindex_c: f64,
    #[serde(default)]
    pub heatindex_f: f64,
    #[serde(default)]
    pub dewpoint_c: f64,
    #[serde(default)]
    pub dewpoint_f: f64,
    #[serde(default)]
    pub will_it_rain: u8,
    #[serde(default)]
    pub chance_of_rain: u8,
    #[serde(default)]
    pub will_it_snow: u8,
    #[serde(default)]
    pub chance_of_snow: u8,
    pub vis_km: f64,
    pub vis_miles: f64,
    pub uv: f64,
}

fn default_is_day() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub date_epoch: i64,
    pub day: DaySummary,
    pub astro: Astro,
    #[serde(default)]
    pub hour: Vec<HourRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

/// Response of `forecast.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastData {
    pub location: Location,
    #[serde(default)]
    pub current: Option<Snapshot>,
    pub forecast: Forecast,
}

impl ForecastData {
    pub fn days(&self) -> &[ForecastDay] {
        &self.forecast.forecastday
    }

    pub fn today(&self) -> Option<&ForecastDay> {
        self.forecast.forecastday.first()
    }
}

/// Error body WeatherAPI.com sends with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub code: u32,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT: &str = r#"{
        "location": {"name": "London", "region": "City of London, Greater London",
                     "country": "United Kingdom", "lat": 51.52, "lon": -0.11,
                     "localtime": "2024-05-01 14:30"},
        "current": {"temp_c": 16.0, "temp_f": 60.8, "is_day": 1,
                    "condition": {"text": "Partly cloudy",
                                  "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png",
                                  "code": 1003},
                    "wind_mph": 8.1, "wind_kph": 13.0, "wind_degree": 240, "wind_dir": "WSW",
                    "pressure_mb": 1012.0, "pressure_in": 29.88, "precip_mm": 0.0,
                    "precip_in": 0.0, "humidity": 63, "cloud": 50,
                    "feelslike_c": 16.0, "feelslike_f": 60.8,
                    "vis_km": 10.0, "vis_miles": 6.0, "uv": 4.0, "gust_kph": 18.4}
    }"#;

    #[test]
    fn parses_current_payload_and_ignores_unknown_fields() {
        let parsed: CurrentConditions = serde_json::from_str(CURRENT).unwrap();
        assert_eq!(parsed.location.display_name(), "London, United Kingdom");
        assert!(parsed.current.is_day());
        assert_eq!(parsed.current.condition.code, 1003);
        assert_eq!(parsed.current.condition.icon_url, "//cdn.weatherapi.com/weather/64x64/day/116.png");
        assert_eq!(parsed.current.humidity, 63);
        assert_eq!(parsed.current.wind_dir, "WSW");
    }

    #[test]
    fn parses_api_error_body() {
        let body = r#"{"error":{"code":1006,"message":"No matching location found."}}"#;
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.code, 1006);
        assert_eq!(parsed.error.message, "No matching location found.");
    }
}
