//! Core library for the `weatherdash` dashboard.
//!
//! This crate defines:
//! - Weather-code and metric classifiers
//! - Clients for the forecast, air-quality and geocoding services
//! - The fetch cycle that aggregates them into one bundle
//! - Projection of a bundle onto abstract screen regions
//! - The view switcher and the map, calendar and settings view models
//! - Configuration & persisted settings
//!
//! It is used by `weatherdash-cli`, but any host able to implement
//! [`render::Screen`] and [`view::ViewHost`] can drive it.

pub mod calendar;
pub mod classify;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod location;
pub mod map;
pub mod model;
pub mod provider;
pub mod render;
pub mod settings;
pub mod view;

pub use config::{Config, ConfigFile, Endpoints};
pub use dashboard::Dashboard;
pub use error::{LocationError, WeatherError};
pub use model::{Coordinate, LocatedBundle, Place, WeatherBundle};
pub use provider::{AirQualitySource, ForecastSource, Geocoder, Services, services_from_config};
pub use settings::{Settings, SettingsStore};
pub use view::{AppState, ViewHost, ViewKey};
