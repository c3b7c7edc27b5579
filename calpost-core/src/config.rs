//! calpost configuration.
//!
//! Every field has a default, so running without a config file is fine.
//! The emoji and location tables in the file are layered over the built-in
//! ones rather than replacing them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::compose::{Composer, Templates};
use crate::constants::{
    DEFAULT_EVENTS_PATH, DEFAULT_FUTURE_OUTPUT, DEFAULT_IMPORT_KIND, DEFAULT_IMPORT_TIMEZONE,
    DEFAULT_IN_PERSON_OUTPUT, DEFAULT_LOCATION_MARKER, DEFAULT_PREFACE_PATH,
    DEFAULT_VIRTUAL_OUTPUT, DEFAULT_WINDOW_WEEKS, ONLINE_EVENT_LOCATION,
};
use crate::date_window::WindowMode;
use crate::error::{CalpostError, CalpostResult};
use crate::event::Bucket;
use crate::format::{EmojiTable, LineFormatter, LocationRenames};

/// Name of the config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "calpost.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalpostConfig {
    /// Events CSV read on interactive runs
    pub events_path: PathBuf,

    pub preface_path: PathBuf,

    /// Used when the preface file can't be read
    pub default_preface: String,

    pub window_weeks: i64,
    pub window_mode: WindowMode,

    /// Location string the feed uses for online events
    pub online_location: String,

    pub location_marker: String,

    pub output: OutputPaths,
    pub templates: Templates,

    /// Extra or replacement kind → emoji code entries
    pub emoji: BTreeMap<String, String>,

    /// Extra or replacement location renames
    pub locations: BTreeMap<String, String>,

    pub import: ImportConfig,
}

impl Default for CalpostConfig {
    fn default() -> Self {
        CalpostConfig {
            events_path: PathBuf::from(DEFAULT_EVENTS_PATH),
            preface_path: PathBuf::from(DEFAULT_PREFACE_PATH),
            default_preface: String::new(),
            window_weeks: DEFAULT_WINDOW_WEEKS,
            window_mode: WindowMode::default(),
            online_location: ONLINE_EVENT_LOCATION.to_string(),
            location_marker: DEFAULT_LOCATION_MARKER.to_string(),
            output: OutputPaths::default(),
            templates: Templates::default(),
            emoji: BTreeMap::new(),
            locations: BTreeMap::new(),
            import: ImportConfig::default(),
        }
    }
}

/// Payload file written for each bucket on automated runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPaths {
    #[serde(rename = "virtual")]
    pub virtual_events: PathBuf,
    pub in_person: PathBuf,
    pub future: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        OutputPaths {
            virtual_events: PathBuf::from(DEFAULT_VIRTUAL_OUTPUT),
            in_person: PathBuf::from(DEFAULT_IN_PERSON_OUTPUT),
            future: PathBuf::from(DEFAULT_FUTURE_OUTPUT),
        }
    }
}

impl OutputPaths {
    pub fn for_bucket(&self, bucket: Bucket) -> &Path {
        match bucket {
            Bucket::Virtual => &self.virtual_events,
            Bucket::InPerson => &self.in_person,
            Bucket::Future => &self.future,
        }
    }
}

/// Settings for converting calendar feeds into events CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Kind written for every imported event
    pub default_kind: String,
    /// IANA zone UTC times are converted to
    pub timezone: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            default_kind: DEFAULT_IMPORT_KIND.to_string(),
            timezone: DEFAULT_IMPORT_TIMEZONE.to_string(),
        }
    }
}

impl ImportConfig {
    pub fn tz(&self) -> CalpostResult<Tz> {
        Tz::from_str(&self.timezone).map_err(|_| {
            CalpostError::Config(format!("Unknown timezone '{}'", self.timezone))
        })
    }
}

impl CalpostConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `./calpost.toml` and then
    /// `~/.config/calpost/config.toml` are tried before falling back to defaults.
    pub fn load(explicit: Option<&Path>) -> CalpostResult<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CalpostError::Config(format!(
                    "Config file not found at {}",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        let candidates = [Some(PathBuf::from(LOCAL_CONFIG_FILE)), Self::user_config_path()];
        match candidates.into_iter().flatten().find(|p| p.exists()) {
            Some(path) => Self::from_file(&path),
            None => {
                log::debug!("No config file found, using defaults");
                Ok(CalpostConfig::default())
            }
        }
    }

    /// ~/.config/calpost/config.toml, if the platform has a config directory.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("calpost").join("config.toml"))
    }

    pub fn from_file(path: &Path) -> CalpostResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CalpostError::Config(format!("Could not read {}: {e}", path.display()))
        })?;

        let config = Self::from_toml(&contents)
            .map_err(|e| CalpostError::Config(format!("{}: {e}", path.display())))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> CalpostResult<Self> {
        let config: CalpostConfig =
            toml::from_str(contents).map_err(|e| CalpostError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> CalpostResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalpostError::Serialization(e.to_string()))
    }

    fn validate(&self) -> CalpostResult<()> {
        if self.window_weeks < 0 {
            return Err(CalpostError::Config(format!(
                "window_weeks must not be negative (got {})",
                self.window_weeks
            )));
        }
        self.import.tz()?;
        Ok(())
    }

    pub fn line_formatter(&self) -> LineFormatter {
        LineFormatter {
            emoji: EmojiTable::with_overrides(&self.emoji),
            locations: LocationRenames::with_overrides(&self.locations),
            location_marker: self.location_marker.clone(),
        }
    }

    pub fn composer(&self) -> Composer {
        Composer::new(self.line_formatter(), self.templates.clone())
    }
}
