//! Plain-text rendering of weather reports in the user's unit system.

use skycast_core::{
    CurrentConditions, ForecastDay, Icon, MetricKind, Unit, WeatherReport, resolve_icon,
};

/// Round half up, the way the values are rounded for display everywhere else.
fn round(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn temperature(celsius: f64, fahrenheit: f64, unit: Unit) -> String {
    match unit {
        Unit::Metric => format!("{}°C", round(celsius)),
        Unit::Imperial => format!("{}°F", round(fahrenheit)),
    }
}

pub fn wind(kph: f64, mph: f64, unit: Unit) -> String {
    match unit {
        Unit::Metric => format!("{} km/h", round(kph)),
        Unit::Imperial => format!("{} mph", round(mph)),
    }
}

pub fn pressure(mb: f64, inches: f64, unit: Unit) -> String {
    match unit {
        Unit::Metric => format!("{mb} hPa"),
        Unit::Imperial => format!("{inches} inHg"),
    }
}

fn metric_row(kind: MetricKind, label: &str, value: String) -> String {
    format!("  {:<34} {:<15} {}", kind.icon().asset_path(), label, value)
}

fn condition_icon(current: &CurrentConditions) -> Icon {
    resolve_icon(current.current.condition.code, current.current.is_day())
}

/// One-line summary used after a successful search.
pub fn snapshot_line(current: &CurrentConditions, unit: Unit) -> String {
    let now = &current.current;
    format!(
        "{}, {} ({})",
        temperature(now.temp_c, now.temp_f, unit),
        now.condition.text,
        condition_icon(current).asset_path()
    )
}

/// Home view: headline conditions plus today's range.
pub fn home(report: &WeatherReport, unit: Unit) -> String {
    let current = &report.current;
    let now = &current.current;

    let mut lines = vec![
        format!("{}  ({})", current.location.display_name(), current.location.localtime),
        format!("  {}", condition_icon(current).asset_path()),
        format!("  {}  {}", temperature(now.temp_c, now.temp_f, unit), now.condition.text),
    ];

    if let Some(today) = report.forecast.today() {
        lines.push(format!(
            "  Max: {}  Min: {}",
            temperature(today.day.maxtemp_c, today.day.maxtemp_f, unit),
            temperature(today.day.mintemp_c, today.day.mintemp_f, unit),
        ));
    }

    lines.push(format!(
        "  Feels Like {} | Humidity {}% | Wind {}",
        temperature(now.feelslike_c, now.feelslike_f, unit),
        now.humidity,
        wind(now.wind_kph, now.wind_mph, unit),
    ));

    lines.push(String::new());
    lines.push("Forecast".to_string());
    lines.extend(report.forecast.days().iter().map(|day| forecast_row(day, unit)));

    lines.join("\n")
}

/// Detail view: every current metric with its icon, then the daily forecast.
pub fn details(report: &WeatherReport, unit: Unit) -> String {
    let current = &report.current;
    let now = &current.current;

    let mut lines = vec![
        "Detailed Weather".to_string(),
        current.location.display_name(),
        String::new(),
        "Current Conditions".to_string(),
        metric_row(
            MetricKind::Temperature,
            "Temperature",
            temperature(now.temp_c, now.temp_f, unit),
        ),
        metric_row(
            MetricKind::Temperature,
            "Feels Like",
            temperature(now.feelslike_c, now.feelslike_f, unit),
        ),
        metric_row(MetricKind::Humidity, "Humidity", format!("{}%", now.humidity)),
        metric_row(MetricKind::Pressure, "Pressure", pressure(now.pressure_mb, now.pressure_in, unit)),
        metric_row(MetricKind::Wind, "Wind Speed", wind(now.wind_kph, now.wind_mph, unit)),
        metric_row(MetricKind::WindDirection, "Wind Direction", now.wind_dir.clone()),
        String::new(),
        "Forecast".to_string(),
    ];

    lines.extend(report.forecast.days().iter().map(|day| forecast_row(day, unit)));
    lines.join("\n")
}

// Daily rows always use the day icon.
fn forecast_row(day: &ForecastDay, unit: Unit) -> String {
    let summary = &day.day;
    format!(
        "  {:<10} {:<28} Min: {:<6} Max: {:<6} {:<9} {}",
        day.date.format("%A").to_string(),
        summary.condition.text,
        temperature(summary.mintemp_c, summary.mintemp_f, unit),
        temperature(summary.maxtemp_c, summary.maxtemp_f, unit),
        wind(summary.maxwind_kph, summary.maxwind_mph, unit),
        resolve_icon(summary.condition.code, true).asset_path(),
    )
}
