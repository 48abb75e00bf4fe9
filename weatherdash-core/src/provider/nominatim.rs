//! Forward and reverse geocoding through Nominatim (OpenStreetMap).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    WeatherError,
    config::Endpoints,
    model::{Address, Coordinate, Place},
};

use super::Geocoder;

#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: Client,
    search_url: String,
    reverse_url: String,
}

impl NominatimClient {
    pub fn new(endpoints: &Endpoints) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .user_agent(endpoints.user_agent.as_str())
            .build()
            .map_err(|e| WeatherError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            search_url: endpoints.search_url.clone(),
            reverse_url: endpoints.reverse_url.clone(),
        })
    }

    async fn get_body(&self, service: &str, url: &str, query: &[(&str, &str)]) -> Result<String, WeatherError> {
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
        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct NmSearchHit {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NmReverseResponse {
    #[serde(default)]
    address: Option<Address>,
}

#[async_trait]
impl Geocoder for NominatimClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Option<Place>, WeatherError> {
        let body = self
            .get_body(
                "Nominatim search",
                &self.search_url,
                &[("format", "json"), ("q", query)],
            )
            .await?;

        let hits: Vec<NmSearchHit> =
            serde_json::from_str(&body).map_err(|e| WeatherError::parse("Nominatim search", e))?;

        let Some(hit) = hits.into_iter().next() else {
            debug!("No search results");
            return Ok(None);
        };

        let latitude = parse_degrees(&hit.lat)?;
        let longitude = parse_degrees(&hit.lon)?;
        let name = hit
            .display_name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| query.to_string());

        Ok(Some(Place {
            coordinate: Coordinate::new(latitude, longitude),
            name,
        }))
    }

    #[instrument(skip(self, at), fields(lat = at.latitude, lon = at.longitude))]
    async fn lookup(&self, at: Coordinate) -> Result<Address, WeatherError> {
        let lat = at.latitude.to_string();
        let lon = at.longitude.to_string();

        let body = self
            .get_body(
                "Nominatim reverse",
                &self.reverse_url,
                &[("format", "json"), ("lat", lat.as_str()), ("lon", lon.as_str())],
            )
            .await?;

        let parsed: NmReverseResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::parse("Nominatim reverse", e))?;

        Ok(parsed.address.unwrap_or_default())
    }
}

fn parse_degrees(s: &str) -> Result<f64, WeatherError> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| WeatherError::Parse(format!("Invalid coordinate in search result: '{s}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_degrees_accepts_nominatim_strings() {
        assert_eq!(parse_degrees("48.8534951").ok(), Some(48.8534951));
        assert_eq!(parse_degrees(" -0.09 ").ok(), Some(-0.09));
    }

    #[test]
    fn parse_degrees_rejects_garbage() {
        assert!(matches!(parse_degrees("north"), Err(WeatherError::Parse(_))));
        assert!(parse_degrees("NaN").is_err());
    }

    #[test]
    fn reverse_response_without_address() {
        let parsed: NmReverseResponse =
            serde_json::from_str(r#"{"error":"Unable to geocode"}"#).expect("parse");
        assert!(parsed.address.is_none());
    }

    #[test]
    fn reverse_response_ignores_unknown_address_fields() {
        let parsed: NmReverseResponse = serde_json::from_str(
            r#"{"address":{"road":"Rue de Rivoli","city":"Paris","postcode":"75001","country_code":"fr"}}"#,
        )
        .expect("parse");
        let addr = parsed.address.expect("address");
        assert_eq!(addr.city.as_deref(), Some("Paris"));
        assert_eq!(addr.country_code.as_deref(), Some("fr"));
    }
}
