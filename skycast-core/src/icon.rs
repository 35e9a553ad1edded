//! Mapping from WeatherAPI.com condition codes to bundled icon assets.
//!
//! See <https://www.weatherapi.com/docs/weather_conditions.json> for the code
//! vocabulary. Resolution never fails: unknown codes fall back to the clear
//! sky icon for the given time of day.

use std::{fmt, str::FromStr};

const ASSET_DIR: &str = "icons/fill/svg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Overcast,
    Fog,
    PartlyCloudyDayRain,
    PartlyCloudyNightRain,
    OvercastRain,
    Snow,
    Thunderstorms,
    ThunderstormsRain,
    Humidity,
    Thermometer,
    Barometer,
    Wind,
    Compass,
}

impl Icon {
    /// Generic fallback used when a metric kind is not recognised.
    pub const DEFAULT: Icon = Icon::Thermometer;

    pub fn name(&self) -> &'static str {
        match self {
            Icon::ClearDay => "clear-day",
            Icon::ClearNight => "clear-night",
            Icon::PartlyCloudyDay => "partly-cloudy-day",
            Icon::PartlyCloudyNight => "partly-cloudy-night",
            Icon::Cloudy => "cloudy",
            Icon::Overcast => "overcast",
            Icon::Fog => "fog",
            Icon::PartlyCloudyDayRain => "partly-cloudy-day-rain",
            Icon::PartlyCloudyNightRain => "partly-cloudy-night-rain",
            Icon::OvercastRain => "overcast-rain",
            Icon::Snow => "snow",
            Icon::Thunderstorms => "thunderstorms",
            Icon::ThunderstormsRain => "thunderstorms-rain",
            Icon::Humidity => "humidity",
            Icon::Thermometer => "thermometer",
            Icon::Barometer => "barometer",
            Icon::Wind => "wind",
            Icon::Compass => "compass",
        }
    }

    /// Relative path of the SVG asset.
    pub fn asset_path(&self) -> String {
        format!("{ASSET_DIR}/{}.svg", self.name())
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Fixed(Icon),
    DayNight { day: Icon, night: Icon },
}

impl Outcome {
    fn pick(self, is_day: bool) -> Icon {
        match self {
            Outcome::Fixed(icon) => icon,
            Outcome::DayNight { day, night } => {
                if is_day {
                    day
                } else {
                    night
                }
            }
        }
    }
}

struct Rule {
    codes: &'static [u32],
    outcome: Outcome,
}

// Evaluated top to bottom. 1279 and 1282 are listed under both snow and
// thunderstorms-rain; the snow rule comes first and shadows the later one.
const RULES: &[Rule] = &[
    Rule {
        codes: &[1000],
        outcome: Outcome::DayNight { day: Icon::ClearDay, night: Icon::ClearNight },
    },
    Rule {
        codes: &[1003],
        outcome: Outcome::DayNight { day: Icon::PartlyCloudyDay, night: Icon::PartlyCloudyNight },
    },
    Rule { codes: &[1006], outcome: Outcome::Fixed(Icon::Cloudy) },
    Rule { codes: &[1009], outcome: Outcome::Fixed(Icon::Overcast) },
    Rule { codes: &[1030, 1135, 1147], outcome: Outcome::Fixed(Icon::Fog) },
    Rule {
        codes: &[1063, 1180, 1183, 1186, 1189, 1192, 1195, 1240, 1243, 1246],
        outcome: Outcome::DayNight {
            day: Icon::PartlyCloudyDayRain,
            night: Icon::PartlyCloudyNightRain,
        },
    },
    Rule {
        codes: &[1069, 1072, 1168, 1171, 1198, 1201, 1204, 1207, 1249, 1252],
        outcome: Outcome::Fixed(Icon::OvercastRain),
    },
    Rule {
        codes: &[
            1066, 1114, 1117, 1210, 1213, 1216, 1219, 1222, 1225, 1255, 1258, 1279, 1282,
        ],
        outcome: Outcome::Fixed(Icon::Snow),
    },
    Rule { codes: &[1087], outcome: Outcome::Fixed(Icon::Thunderstorms) },
    Rule { codes: &[1273, 1276, 1279, 1282], outcome: Outcome::Fixed(Icon::ThunderstormsRain) },
];

const FALLBACK: Outcome = Outcome::DayNight { day: Icon::ClearDay, night: Icon::ClearNight };

/// Resolve the icon for a condition code; first matching rule wins.
pub fn resolve_icon(code: u32, is_day: bool) -> Icon {
    RULES
        .iter()
        .find(|rule| rule.codes.contains(&code))
        .map_or(FALLBACK, |rule| rule.outcome)
        .pick(is_day)
}

/// Kind of measurement shown next to a value in the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Humidity,
    Temperature,
    Pressure,
    Wind,
    WindDirection,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Humidity => "humidity",
            MetricKind::Temperature => "temperature",
            MetricKind::Pressure => "pressure",
            MetricKind::Wind => "wind",
            MetricKind::WindDirection => "windDirection",
        }
    }

    pub const fn all() -> &'static [MetricKind] {
        &[
            MetricKind::Humidity,
            MetricKind::Temperature,
            MetricKind::Pressure,
            MetricKind::Wind,
            MetricKind::WindDirection,
        ]
    }

    pub fn icon(&self) -> Icon {
        match self {
            MetricKind::Humidity => Icon::Humidity,
            MetricKind::Temperature => Icon::Thermometer,
            MetricKind::Pressure => Icon::Barometer,
            MetricKind::Wind => Icon::Wind,
            MetricKind::WindDirection => Icon::Compass,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMetricKind(pub String);

impl fmt::Display for UnknownMetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown metric kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownMetricKind {}

impl FromStr for MetricKind {
    type Err = UnknownMetricKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownMetricKind(s.to_string()))
    }
}

/// Icon for a metric kind given by name; unknown names get [`Icon::DEFAULT`].
pub fn metric_icon(kind: &str) -> Icon {
    kind.parse::<MetricKind>().map_or(Icon::DEFAULT, |k| k.icon())
}
