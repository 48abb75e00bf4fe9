use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{
    Config, WeatherError,
    model::{Address, Coordinate, Forecast, Place},
    provider::{nominatim::NominatimClient, openmeteo::OpenMeteoClient},
};

pub mod nominatim;
pub mod openmeteo;

/// Primary forecast: current conditions plus hourly and daily series.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn forecast(&self, at: Coordinate) -> Result<Forecast, WeatherError>;
}

/// Current US AQI. `Ok(None)` when the service has no reading for the coordinate.
#[async_trait]
pub trait AirQualitySource: Send + Sync + Debug {
    async fn us_aqi(&self, at: Coordinate) -> Result<Option<u32>, WeatherError>;
}

#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// First search hit for `query`, or `None` when nothing matched.
    async fn search(&self, query: &str) -> Result<Option<Place>, WeatherError>;

    /// Raw address fields for a coordinate.
    async fn lookup(&self, at: Coordinate) -> Result<Address, WeatherError>;
}

/// Place name for a coordinate. Never fails: lookup errors are logged and the
/// coordinate fallback is returned instead.
pub async fn reverse_geocode(geocoder: &dyn Geocoder, at: Coordinate) -> String {
    match geocoder.lookup(at).await {
        Ok(address) => {
            let name = address.place_name(at);
            tracing::debug!("Reverse geocoded to: {name}");
            name
        }
        Err(e) => {
            tracing::warn!("Reverse geocode failed, using coordinates: {e}");
            at.fallback_name()
        }
    }
}

/// The three services a dashboard talks to.
#[derive(Debug, Clone)]
pub struct Services {
    pub forecast: Arc<dyn ForecastSource>,
    pub air_quality: Arc<dyn AirQualitySource>,
    pub geocoder: Arc<dyn Geocoder>,
}

/// Construct the HTTP-backed services from the configured endpoints.
pub fn services_from_config(config: &Config) -> Result<Services, WeatherError> {
    let meteo = Arc::new(OpenMeteoClient::new(&config.endpoints)?);
    let geocoder = Arc::new(NominatimClient::new(&config.endpoints)?);

    Ok(Services {
        forecast: meteo.clone(),
        air_quality: meteo,
        geocoder,
    })
}
