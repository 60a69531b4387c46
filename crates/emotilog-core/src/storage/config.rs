//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Which calendar (time zone) decides what "today" is
//! - Date/time display patterns and the fallback color
//! - Display overrides for emotion categories
//!
//! Configuration is stored at `~/.config/emotilog/config.toml`.
//!
//! Category overrides are validated when the table is built at startup:
//! unknown or duplicated identifiers are configuration errors. Malformed
//! color codes are not, they fall back to the neutral color when rendered.

use chrono::format::{Item, StrftimeItems};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::data_dir;
use crate::emotion::{CategoryTable, Emotion, Rgb};
use crate::error::ConfigError;
use crate::log::{DATE_FORMAT, TIME_FORMAT};

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// `local`, `utc` or a fixed offset such as `+09:00`.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default = "default_neutral_color")]
    pub neutral_color: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

/// Attribute override for one emotion category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOverride {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyph: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/emotilog/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub categories: Vec<CategoryOverride>,
}

/// Calendar used to decide which day an instant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneSetting {
    Local,
    Fixed(FixedOffset),
}

impl FromStr for ZoneSetting {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidValue {
            key: "display.time_zone".to_string(),
            message: format!("expected 'local', 'utc' or '+HH:MM', got '{s}'"),
        };

        let value = s.trim();
        if value.eq_ignore_ascii_case("local") {
            return Ok(ZoneSetting::Local);
        }
        if value.eq_ignore_ascii_case("utc") {
            return Ok(ZoneSetting::Fixed(FixedOffset::east_opt(0).ok_or_else(invalid)?));
        }

        let (sign, rest) = match value.chars().next() {
            Some('+') => (1, &value[1..]),
            Some('-') => (-1, &value[1..]),
            _ => return Err(invalid()),
        };
        let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
        // Digits only: no second sign inside either part.
        let field = |part: &str| -> Result<i32, ConfigError> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u32>()
                .ok()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(invalid)
        };
        let hours = field(hours)?;
        let minutes = field(minutes)?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(ZoneSetting::Fixed)
            .ok_or_else(invalid)
    }
}

/// Reject strftime patterns chrono cannot render.
fn check_pattern(key: &str, pattern: &str) -> Result<(), ConfigError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{pattern}' is not a valid date/time pattern"),
        });
    }
    Ok(())
}

// Default functions
fn default_time_zone() -> String {
    "local".into()
}
fn default_neutral_color() -> String {
    Rgb::NEUTRAL.to_string()
}
fn default_date_format() -> String {
    DATE_FORMAT.into()
}
fn default_time_format() -> String {
    TIME_FORMAT.into()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
            neutral_color: default_neutral_color(),
            date_format: default_date_format(),
            time_format: default_time_format(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Path of `config.toml` in the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or is
    /// invalid, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving. Rejects unknown keys and
    /// values that would make the configuration invalid.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value is invalid,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Check everything that is resolved at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.zone()?;
        check_pattern("display.date_format", &self.display.date_format)?;
        check_pattern("display.time_format", &self.display.time_format)?;
        self.category_table()?;
        Ok(())
    }

    pub fn zone(&self) -> Result<ZoneSetting, ConfigError> {
        self.display.time_zone.parse()
    }

    /// Fallback display color; itself falls back to [`Rgb::NEUTRAL`].
    pub fn neutral_color(&self) -> Rgb {
        Rgb::parse_or(&self.display.neutral_color, Rgb::NEUTRAL)
    }

    /// Built-in categories with the configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if an override names an unknown identifier or the
    /// same identifier twice.
    pub fn category_table(&self) -> Result<CategoryTable, ConfigError> {
        let mut table = CategoryTable::builtin();
        let mut seen = HashSet::new();

        for item in &self.categories {
            let emotion: Emotion = item
                .identifier
                .parse()
                .map_err(|_| ConfigError::UnknownCategory(item.identifier.clone()))?;
            if !seen.insert(emotion) {
                return Err(ConfigError::DuplicateCategory(emotion.to_string()));
            }
            table.set_attributes(
                emotion,
                item.display_name.clone(),
                item.glyph.clone(),
                item.color_code.clone(),
            );
        }

        Ok(table)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("using default configuration: {e}");
            Self::default()
        })
    }
}
