//! Persisted user flags and the stores that hold them.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, fmt::Debug};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "c")]
    Celsius,
    #[serde(rename = "f")]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Convert a Celsius reading into this unit.
    pub fn convert(&self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "12")]
    TwelveHour,
    #[serde(rename = "24")]
    TwentyFourHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    On,
    #[default]
    Off,
}

/// Flag keys, as stored.
pub const THEME: &str = "theme";
pub const TEMP_UNIT: &str = "tempUnit";
pub const TIME_FORMAT: &str = "timeFormat";
pub const WEATHER_ALERTS: &str = "weatherAlerts";

pub const KEYS: [&str; 4] = [THEME, TEMP_UNIT, TIME_FORMAT, WEATHER_ALERTS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme: Theme,
    pub temp_unit: TemperatureUnit,
    pub time_format: TimeFormat,
    pub weather_alerts: Toggle,
}

impl Settings {
    /// String value of a flag, or `None` for an unknown key.
    pub fn get(&self, key: &str) -> Option<&'static str> {
        let value = match key {
            THEME => match self.theme {
                Theme::Light => "light",
                Theme::Dark => "dark",
            },
            TEMP_UNIT => match self.temp_unit {
                TemperatureUnit::Celsius => "c",
                TemperatureUnit::Fahrenheit => "f",
            },
            TIME_FORMAT => match self.time_format {
                TimeFormat::TwelveHour => "12",
                TimeFormat::TwentyFourHour => "24",
            },
            WEATHER_ALERTS => match self.weather_alerts {
                Toggle::On => "on",
                Toggle::Off => "off",
            },
            _ => return None,
        };
        Some(value)
    }

    /// Set a flag from its string form. Only the enumerated values are accepted.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || anyhow!("Invalid value '{value}' for setting '{key}'");
        match key {
            THEME => {
                self.theme = match value {
                    "light" => Theme::Light,
                    "dark" => Theme::Dark,
                    _ => return Err(invalid()),
                }
            }
            TEMP_UNIT => {
                self.temp_unit = match value {
                    "c" => TemperatureUnit::Celsius,
                    "f" => TemperatureUnit::Fahrenheit,
                    _ => return Err(invalid()),
                }
            }
            TIME_FORMAT => {
                self.time_format = match value {
                    "12" => TimeFormat::TwelveHour,
                    "24" => TimeFormat::TwentyFourHour,
                    _ => return Err(invalid()),
                }
            }
            WEATHER_ALERTS => {
                self.weather_alerts = match value {
                    "on" => Toggle::On,
                    "off" => Toggle::Off,
                    _ => return Err(invalid()),
                }
            }
            _ => {
                return Err(anyhow!(
                    "Unknown setting '{key}'. Known settings: {}.",
                    KEYS.join(", ")
                ));
            }
        }
        Ok(())
    }
}

/// Where flags live between runs.
pub trait SettingsStore: Debug {
    /// Read the current flags. Unreadable storage yields defaults.
    fn load_settings(&self) -> Settings;

    fn save_settings(&self, settings: &Settings) -> Result<()>;
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    settings: RefCell<Settings>,
}

impl MemoryStore {
    pub fn new(settings: Settings) -> Self {
        Self { settings: RefCell::new(settings) }
    }
}

impl SettingsStore for MemoryStore {
    fn load_settings(&self) -> Settings {
        *self.settings.borrow()
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        *self.settings.borrow_mut() = *settings;
        Ok(())
    }
}
