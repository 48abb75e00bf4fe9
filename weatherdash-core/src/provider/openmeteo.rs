use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    WeatherError,
    config::Endpoints,
    model::{
        Coordinate, CurrentConditions, DailyPoint, DailySeries, Forecast, HourlyPoint,
        HourlySeries,
    },
};

use super::{AirQualitySource, ForecastSource};

const HOURLY_FIELDS: &str = "temperature_2m,relativehumidity_2m,weathercode,surface_pressure,visibility";
const DAILY_FIELDS: &str =
    "weathercode,temperature_2m_max,temperature_2m_min,sunrise,sunset,uv_index_max";

/// Open-Meteo forecast and air-quality APIs. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    forecast_url: String,
    air_quality_url: String,
}

impl OpenMeteoClient {
    pub fn new(endpoints: &Endpoints) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .user_agent(endpoints.user_agent.as_str())
            .build()
            .map_err(|e| WeatherError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            forecast_url: endpoints.forecast_url.clone(),
            air_quality_url: endpoints.air_quality_url.clone(),
        })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        service: &str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| WeatherError::transport(service, e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| WeatherError::transport(service, e))?;

        if !status.is_success() {
            return Err(WeatherError::status(service, status, &body));
        }

        serde_json::from_str(&body).map_err(|e| WeatherError::parse(service, e))
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoClient {
    #[instrument(skip(self, at), fields(lat = at.latitude, lon = at.longitude))]
    async fn forecast(&self, at: Coordinate) -> Result<Forecast, WeatherError> {
        let lat = at.latitude.to_string();
        let lon = at.longitude.to_string();

        debug!(url = %self.forecast_url, "Fetching forecast");
        let parsed: OmForecastResponse = self
            .get_json(
                "Open-Meteo forecast",
                &self.forecast_url,
                &[
                    ("latitude", lat.as_str()),
                    ("longitude", lon.as_str()),
                    ("current_weather", "true"),
                    ("hourly", HOURLY_FIELDS),
                    ("daily", DAILY_FIELDS),
                    ("timezone", "auto"),
                ],
            )
            .await?;

        Ok(parsed.into_forecast())
    }
}

#[async_trait]
impl AirQualitySource for OpenMeteoClient {
    #[instrument(skip(self, at), fields(lat = at.latitude, lon = at.longitude))]
    async fn us_aqi(&self, at: Coordinate) -> Result<Option<u32>, WeatherError> {
        let lat = at.latitude.to_string();
        let lon = at.longitude.to_string();

        debug!(url = %self.air_quality_url, "Fetching air quality");
        let parsed: OmAirQualityResponse = self
            .get_json(
                "Open-Meteo air quality",
                &self.air_quality_url,
                &[
                    ("latitude", lat.as_str()),
                    ("longitude", lon.as_str()),
                    ("current", "us_aqi"),
                ],
            )
            .await?;

        Ok(parsed
            .current
            .and_then(|c| c.us_aqi)
            .filter(|v| v.is_finite())
            .map(|v| v.round().max(0.0) as u32))
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    weathercode: i32,
    windspeed: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OmHourly {
    time: Vec<Option<String>>,
    temperature_2m: Vec<Option<f64>>,
    relativehumidity_2m: Vec<Option<f64>>,
    weathercode: Vec<Option<i32>>,
    surface_pressure: Vec<Option<f64>>,
    visibility: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OmDaily {
    time: Vec<Option<String>>,
    weathercode: Vec<Option<i32>>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    sunrise: Vec<Option<String>>,
    sunset: Vec<Option<String>>,
    uv_index_max: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current_weather: OmCurrentWeather,
    #[serde(default)]
    hourly: OmHourly,
    #[serde(default)]
    daily: OmDaily,
}

#[derive(Debug, Deserialize)]
struct OmAirQualityCurrent {
    us_aqi: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OmAirQualityResponse {
    current: Option<OmAirQualityCurrent>,
}

impl OmForecastResponse {
    fn into_forecast(self) -> Forecast {
        Forecast {
            current: CurrentConditions {
                temperature: self.current_weather.temperature,
                weather_code: self.current_weather.weathercode,
                wind_speed: self.current_weather.windspeed,
            },
            hourly: self.hourly.into_series(),
            daily: self.daily.into_series(),
        }
    }
}

impl OmHourly {
    /// Zip the columns; stop at the first slot missing a time, temperature or code.
    fn into_series(self) -> HourlySeries {
        let visibility_reported = !self.visibility.is_empty();
        let mut points = Vec::with_capacity(self.time.len());

        for i in 0..self.time.len() {
            let time = cell(&self.time, i).and_then(|t| parse_local_datetime(&t));
            let (Some(time), Some(temperature), Some(weather_code)) =
                (time, cell(&self.temperature_2m, i), cell(&self.weathercode, i))
            else {
                break;
            };

            points.push(HourlyPoint {
                time,
                temperature,
                weather_code,
                humidity: cell(&self.relativehumidity_2m, i),
                pressure: cell(&self.surface_pressure, i),
                visibility: cell(&self.visibility, i),
            });
        }

        HourlySeries::new(points).with_visibility_reported(visibility_reported)
    }
}

impl OmDaily {
    fn into_series(self) -> DailySeries {
        let mut points = Vec::with_capacity(self.time.len());

        for i in 0..self.time.len() {
            let date = cell(&self.time, i)
                .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok());
            let (Some(date), Some(weather_code), Some(temperature_max), Some(temperature_min)) = (
                date,
                cell(&self.weathercode, i),
                cell(&self.temperature_2m_max, i),
                cell(&self.temperature_2m_min, i),
            ) else {
                break;
            };

            points.push(DailyPoint {
                date,
                weather_code,
                temperature_max,
                temperature_min,
                sunrise: cell(&self.sunrise, i).and_then(|t| parse_local_datetime(&t)),
                sunset: cell(&self.sunset, i).and_then(|t| parse_local_datetime(&t)),
                uv_index_max: cell(&self.uv_index_max, i),
            });
        }

        DailySeries::new(points)
    }
}

fn cell<T: Clone>(column: &[Option<T>], index: usize) -> Option<T> {
    column.get(index).cloned().flatten()
}

/// Open-Meteo sends local wall-clock times like `2024-01-15T07:15` when `timezone=auto`.
fn parse_local_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}
