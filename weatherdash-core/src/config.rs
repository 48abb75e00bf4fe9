use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    model::Coordinate,
    settings::{Settings, SettingsStore},
};

/// Base URLs of the external services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub forecast_url: String,
    pub air_quality_url: String,
    pub search_url: String,
    pub reverse_url: String,
    /// Nominatim rejects requests without an identifying user agent.
    pub user_agent: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            air_quality_url: "https://air-quality-api.open-meteo.com/v1/air-quality".to_string(),
            search_url: "https://nominatim.openstreetmap.org/search".to_string(),
            reverse_url: "https://nominatim.openstreetmap.org/reverse".to_string(),
            user_agent: concat!("weatherdash/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// user_name = "Ada"
///
/// [home]
/// latitude = 48.85
/// longitude = 2.35
///
/// [settings]
/// tempUnit = "c"
/// timeFormat = "24"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_name: Option<String>,

    /// Position reported when no coordinate is given on the command line.
    pub home: Option<Coordinate>,

    pub endpoints: Endpoints,

    pub settings: Settings,
}

impl Config {
    /// Load config from `path`, or return defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherdash", "weatherdash")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Settings persisted inside a config file. Other config sections are preserved on save.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for ConfigFile {
    fn load_settings(&self) -> Settings {
        match Config::load_from(&self.path) {
            Ok(cfg) => cfg.settings,
            Err(e) => {
                tracing::warn!("Failed to read settings, using defaults: {e:#}");
                Settings::default()
            }
        }
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        let mut cfg = Config::load_from(&self.path)?;
        cfg.settings = *settings;
        cfg.save_to(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{TIME_FORMAT, TimeFormat};

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("nope.toml")).expect("load");
        assert_eq!(cfg, Config::default());
        assert!(cfg.endpoints.forecast_url.contains("open-meteo"));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            user_name: Some("Ada".into()),
            home: Some(Coordinate::new(48.85, 2.35)),
            ..Default::default()
        };
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\ntimeFormat = \"24\"\n").expect("write");

        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.settings.time_format, TimeFormat::TwentyFourHour);
        assert_eq!(cfg.endpoints, Endpoints::default());
        assert!(cfg.home.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "settings = [").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn config_file_store_keeps_other_sections() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        Config { user_name: Some("Ada".into()), ..Default::default() }
            .save_to(&path)
            .expect("save");

        let store = ConfigFile::new(path.clone());
        let mut settings = store.load_settings();
        settings.set(TIME_FORMAT, "24").expect("valid");
        store.save_settings(&settings).expect("save settings");

        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.user_name.as_deref(), Some("Ada"));
        assert_eq!(cfg.settings.time_format, TimeFormat::TwentyFourHour);
    }

    #[test]
    fn unreadable_store_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "not = [valid").expect("write");

        let store = ConfigFile::new(path);
        assert_eq!(store.load_settings(), Settings::default());
    }
}
