use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{fmt, fs, path::PathBuf, str::FromStr};
use tracing::debug;

pub const DEFAULT_LOCATION_KEY: &str = "defaultLocation";
pub const UNIT_KEY: &str = "unit";
pub const FALLBACK_LOCATION: &str = "London";

/// Overrides the on-disk location of the preferences file.
pub const PREFERENCES_PATH_VAR: &str = "SKYCAST_PREFERENCES";

/// Display unit system. Upstream payloads carry both; this only picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Unit] {
        &[Unit::Metric, Unit::Imperial]
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(Unit::Metric),
            "imperial" => Ok(Unit::Imperial),
            _ => Err(anyhow!("Unknown unit '{value}'. Supported units: metric, imperial.")),
        }
    }
}

/// Named preferences persisted as a flat TOML table.
///
/// Every read supplies its own default; every write hits the disk before
/// returning.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    values: toml::Table,
}

impl PreferenceStore {
    /// Open the store at `path`, or start empty if the file doesn't exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self { path, values: toml::Table::new() });
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read preferences file: {}", path.display()))?;

        let values: toml::Table = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse preferences file: {}", path.display()))?;

        Ok(Self { path, values })
    }

    /// Open the store at [`PreferenceStore::default_path`].
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// `$SKYCAST_PREFERENCES` if set, else the platform data directory.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(PREFERENCES_PATH_VAR).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("preferences.toml"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read `key`, or `default` when it was never written or doesn't fit `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.values.get(key).cloned().and_then(|v| v.try_into().ok()).unwrap_or(default)
    }

    /// Store `value` under `key` and write the file.
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let value = toml::Value::try_from(value)
            .with_context(|| format!("Failed to serialize preference '{key}'"))?;

        let previous = self.values.insert(key.to_string(), value);

        if let Err(err) = self.save() {
            match previous {
                Some(old) => self.values.insert(key.to_string(), old),
                None => self.values.remove(key),
            };
            return Err(err);
        }

        debug!(key, path = %self.path.display(), "preference saved");
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(&self.values)
            .context("Failed to serialize preferences to TOML")?;

        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write preferences file: {}", self.path.display()))
    }

    pub fn default_location(&self) -> String {
        self.get(DEFAULT_LOCATION_KEY, FALLBACK_LOCATION.to_string())
    }

    pub fn set_default_location(&mut self, location: &str) -> Result<()> {
        self.set(DEFAULT_LOCATION_KEY, location)
    }

    pub fn unit(&self) -> Unit {
        self.get(UNIT_KEY, Unit::default())
    }

    pub fn set_unit(&mut self, unit: Unit) -> Result<()> {
        self.set(UNIT_KEY, unit)
    }
}
