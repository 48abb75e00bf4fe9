use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Name used when no place name can be resolved, e.g. `Lat: 48.86, Lon: 2.35`.
    pub fn fallback_name(&self) -> String {
        format!("Lat: {:.2}, Lon: {:.2}", self.latitude, self.longitude)
    }
}

/// Current conditions block of the forecast response.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub weather_code: i32,
    pub wind_speed: f64,
}

/// One hourly slot. Optional readings stay `None` when the provider omitted them.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyPoint {
    pub time: NaiveDateTime,
    pub temperature: f64,
    pub weather_code: i32,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub visibility: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub weather_code: i32,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub sunrise: Option<NaiveDateTime>,
    pub sunset: Option<NaiveDateTime>,
    pub uv_index_max: Option<f64>,
}

/// Hourly forecast, one entry per slot, ordered by time.
///
/// The provider sends parallel arrays; they are zipped into points at the
/// deserialization boundary and the series ends at the first index where a
/// required column has no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    points: Vec<HourlyPoint>,
    /// Whether the provider sent a visibility column at all. A column with
    /// null entries counts as sent.
    visibility_reported: bool,
}

impl HourlySeries {
    pub fn new(points: Vec<HourlyPoint>) -> Self {
        Self { points, visibility_reported: true }
    }

    pub fn with_visibility_reported(mut self, reported: bool) -> Self {
        self.visibility_reported = reported;
        self
    }

    pub fn visibility_reported(&self) -> bool {
        self.visibility_reported
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HourlyPoint> {
        self.points.get(index)
    }

    /// Up to `len` points starting at `start`. Never wraps or pads.
    pub fn window(&self, start: usize, len: usize) -> &[HourlyPoint] {
        match self.points.get(start..) {
            Some(rest) => &rest[..rest.len().min(len)],
            None => &[],
        }
    }

    pub fn points(&self) -> &[HourlyPoint] {
        &self.points
    }
}

/// Daily forecast, same alignment rule as [`HourlySeries`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries(Vec<DailyPoint>);

impl DailySeries {
    pub fn new(points: Vec<DailyPoint>) -> Self {
        Self(points)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&DailyPoint> {
        self.0.first()
    }

    pub fn window(&self, len: usize) -> &[DailyPoint] {
        &self.0[..self.0.len().min(len)]
    }
}

/// Normalized forecast response.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub current: CurrentConditions,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

/// Aggregated result of one fetch cycle. Replaced wholesale on the next fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherBundle {
    pub current_temperature: f64,
    pub current_weather_code: i32,
    pub wind_speed: f64,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
    /// US AQI; `None` when the air-quality service failed.
    pub air_quality: Option<u32>,
}

impl WeatherBundle {
    pub fn from_parts(forecast: Forecast, air_quality: Option<u32>) -> Self {
        Self {
            current_temperature: forecast.current.temperature,
            current_weather_code: forecast.current.weather_code,
            wind_speed: forecast.current.wind_speed,
            hourly: forecast.hourly,
            daily: forecast.daily,
            air_quality,
        }
    }
}

/// A bundle together with the place name resolved for its coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedBundle {
    pub coordinate: Coordinate,
    pub location_name: String,
    pub bundle: WeatherBundle,
}

/// First hit of a forward geocoding search.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub coordinate: Coordinate,
    pub name: String,
}

/// Address fields of a reverse geocoding response. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub municipality: Option<String>,
    pub county: Option<String>,
    pub country_code: Option<String>,
}

impl Address {
    /// Place name by priority city > town > village > municipality > county,
    /// falling back to the coordinate, with the upper-cased country code appended.
    pub fn place_name(&self, coordinate: Coordinate) -> String {
        let place = [
            &self.city,
            &self.town,
            &self.village,
            &self.municipality,
            &self.county,
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| coordinate.fallback_name());

        match self.country_code.as_deref().filter(|c| !c.is_empty()) {
            Some(code) => format!("{place}, {}", code.to_uppercase()),
            None => place,
        }
    }
}
