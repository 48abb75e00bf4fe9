use thiserror::Error;

/// Geolocation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable: {0}")]
    Unavailable(String),
    #[error("Location request timed out")]
    Timeout,
}

/// Errors produced while talking to the weather, air-quality and geocoding services.
///
/// An empty forward-geocoding result is not an error; it surfaces as `Ok(None)`.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Transport failure or a non-2xx response.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    /// The primary forecast request failed, so no bundle could be built.
    #[error("Weather data fetch failed: {0}")]
    Forecast(#[source] Box<WeatherError>),
}

impl WeatherError {
    pub(crate) fn status(service: &str, status: reqwest::StatusCode, body: &str) -> Self {
        WeatherError::Network(format!(
            "{service} request failed with status {status}: {}",
            truncate_body(body)
        ))
    }

    pub(crate) fn transport(service: &str, err: reqwest::Error) -> Self {
        WeatherError::Network(format!("Failed to send request to {service}: {err}"))
    }

    pub(crate) fn parse(service: &str, err: serde_json::Error) -> Self {
        WeatherError::Parse(format!("Failed to parse {service} JSON: {err}"))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
