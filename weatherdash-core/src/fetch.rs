//! One fetch cycle: forecast, place name and air quality for a coordinate.

use tracing::{error, instrument, warn};

use crate::{
    WeatherError,
    model::{Coordinate, LocatedBundle, WeatherBundle},
    provider::{Services, reverse_geocode},
};

#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    services: Services,
}

impl WeatherFetcher {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Issue the three requests concurrently and merge them by field.
    ///
    /// Only the forecast is required. A failed place lookup yields the
    /// coordinate fallback name and a failed air-quality request yields
    /// `air_quality: None`; neither affects the forecast.
    #[instrument(skip(self, at), fields(lat = at.latitude, lon = at.longitude))]
    pub async fn fetch_bundle(&self, at: Coordinate) -> Result<LocatedBundle, WeatherError> {
        let (forecast, location_name, air_quality) = tokio::join!(
            self.services.forecast.forecast(at),
            reverse_geocode(self.services.geocoder.as_ref(), at),
            self.services.air_quality.us_aqi(at),
        );

        let forecast = forecast.map_err(|e| {
            error!("Weather data fetch failed: {e}");
            WeatherError::Forecast(Box::new(e))
        })?;

        let air_quality = air_quality.unwrap_or_else(|e| {
            warn!("Air quality unavailable: {e}");
            None
        });

        Ok(LocatedBundle {
            coordinate: at,
            location_name,
            bundle: WeatherBundle::from_parts(forecast, air_quality),
        })
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    //! In-process stand-ins for the HTTP services.

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Arc;

    use crate::{
        WeatherError,
        model::{
            Address, Coordinate, CurrentConditions, DailyPoint, DailySeries, Forecast,
            HourlyPoint, HourlySeries, Place,
        },
        provider::{AirQualitySource, ForecastSource, Geocoder, Services},
    };

    pub fn sample_forecast(hours: usize) -> Forecast {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
        let hourly = (0..hours)
            .map(|i| HourlyPoint {
                time: day
                    .and_hms_opt(0, 0, 0)
                    .expect("valid time")
                    + chrono::Duration::hours(i as i64),
                temperature: 10.0 + i as f64 * 0.5,
                weather_code: if i % 2 == 0 { 0 } else { 61 },
                humidity: Some(55.0),
                pressure: Some(1008.6),
                visibility: Some(24_000.0),
            })
            .collect();
        let daily = (0..7)
            .map(|i| DailyPoint {
                date: day + chrono::Duration::days(i),
                weather_code: 3,
                temperature_max: 14.6,
                temperature_min: 4.4,
                sunrise: day.and_hms_opt(7, 15, 0),
                sunset: day.and_hms_opt(16, 30, 0),
                uv_index_max: Some(2.0),
            })
            .collect();

        Forecast {
            current: CurrentConditions { temperature: 12.6, weather_code: 2, wind_speed: 9.7 },
            hourly: HourlySeries::new(hourly),
            daily: DailySeries::new(daily),
        }
    }

    #[derive(Debug)]
    pub struct FakeForecast(pub Option<Forecast>);

    #[async_trait]
    impl ForecastSource for FakeForecast {
        async fn forecast(&self, _at: Coordinate) -> Result<Forecast, WeatherError> {
            self.0
                .clone()
                .ok_or_else(|| WeatherError::Network("status 500".into()))
        }
    }

    #[derive(Debug)]
    pub struct FakeAirQuality(pub Option<u32>);

    #[async_trait]
    impl AirQualitySource for FakeAirQuality {
        async fn us_aqi(&self, _at: Coordinate) -> Result<Option<u32>, WeatherError> {
            self.0.map(Some).ok_or_else(|| WeatherError::Parse("bad body".into()))
        }
    }

    #[derive(Debug, Default)]
    pub struct FakeGeocoder {
        pub address: Option<Address>,
        pub place: Option<Place>,
        pub search_fails: bool,
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn search(&self, _query: &str) -> Result<Option<Place>, WeatherError> {
            if self.search_fails {
                return Err(WeatherError::Network("status 503".into()));
            }
            Ok(self.place.clone())
        }

        async fn lookup(&self, _at: Coordinate) -> Result<Address, WeatherError> {
            self.address
                .clone()
                .ok_or_else(|| WeatherError::Network("timed out".into()))
        }
    }

    pub fn services(
        forecast: Option<Forecast>,
        aqi: Option<u32>,
        geocoder: FakeGeocoder,
    ) -> Services {
        Services {
            forecast: Arc::new(FakeForecast(forecast)),
            air_quality: Arc::new(FakeAirQuality(aqi)),
            geocoder: Arc::new(geocoder),
        }
    }

    pub fn paris() -> Address {
        Address {
            city: Some("Paris".into()),
            country_code: Some("fr".into()),
            ..Default::default()
        }
    }
}
