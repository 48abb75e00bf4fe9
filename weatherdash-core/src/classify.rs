//! Lookup tables from provider codes and scalar metrics to display labels.
//!
//! Every function here is total: out-of-range codes map to a fallback and
//! non-finite metrics are treated as `0.0` before classification.

/// Sky/precipitation condition derived from a WMO weather code.
/// See: https://open-meteo.com/en/docs#weathervariables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCondition {
    ClearSky,
    PartlyCloudy,
    Foggy,
    Rainy,
    Snowy,
    Showers,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// First matching range wins.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::ClearSky,
            1..=3 => Self::PartlyCloudy,
            45..=48 => Self::Foggy,
            51..=67 => Self::Rainy,
            71..=77 => Self::Snowy,
            80..=82 => Self::Showers,
            95..=99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::ClearSky => "Clear Sky",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Foggy => "Foggy",
            Self::Rainy => "Rainy",
            Self::Snowy => "Snowy",
            Self::Showers => "Showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }

    /// Remix icon class name.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::ClearSky => "ri-sun-line",
            Self::PartlyCloudy => "ri-sun-cloudy-line",
            Self::Foggy => "ri-mist-line",
            Self::Rainy => "ri-rainy-line",
            Self::Snowy => "ri-snowy-line",
            Self::Showers => "ri-showers-line",
            Self::Thunderstorm => "ri-thunderstorms-line",
            Self::Unknown => "ri-question-line",
        }
    }
}

/// Replace NaN and infinities with zero.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvStatus {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvStatus {
    pub fn classify(uv: f64) -> Self {
        let uv = finite_or_zero(uv);
        if uv <= 2.0 {
            Self::Low
        } else if uv <= 5.0 {
            Self::Moderate
        } else if uv <= 7.0 {
            Self::High
        } else if uv <= 10.0 {
            Self::VeryHigh
        } else {
            Self::Extreme
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Extreme => "Extreme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumidityStatus {
    Dry,
    Normal,
    High,
}

impl HumidityStatus {
    pub fn classify(humidity_pct: f64) -> Self {
        let h = finite_or_zero(humidity_pct);
        if h < 30.0 {
            Self::Dry
        } else if h <= 60.0 {
            Self::Normal
        } else {
            Self::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dry => "Dry",
            Self::Normal => "Normal 🤙",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityStatus {
    Excellent,
    Good,
    Average,
    Poor,
}

impl VisibilityStatus {
    pub fn classify(visibility_m: f64) -> Self {
        let v = finite_or_zero(visibility_m);
        if v > 10_000.0 {
            Self::Excellent
        } else if v > 5_000.0 {
            Self::Good
        } else if v > 2_000.0 {
            Self::Average
        } else {
            Self::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Poor => "Poor",
        }
    }
}

/// US AQI bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiStatus {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiStatus {
    pub fn classify(aqi: f64) -> Self {
        let aqi = finite_or_zero(aqi);
        if aqi <= 50.0 {
            Self::Good
        } else if aqi <= 100.0 {
            Self::Moderate
        } else if aqi <= 150.0 {
            Self::UnhealthyForSensitive
        } else if aqi <= 200.0 {
            Self::Unhealthy
        } else if aqi <= 300.0 {
            Self::VeryUnhealthy
        } else {
            Self::Hazardous
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitive => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_ranges() {
        let cases = [
            (0, WeatherCondition::ClearSky),
            (1, WeatherCondition::PartlyCloudy),
            (3, WeatherCondition::PartlyCloudy),
            (45, WeatherCondition::Foggy),
            (48, WeatherCondition::Foggy),
            (51, WeatherCondition::Rainy),
            (67, WeatherCondition::Rainy),
            (71, WeatherCondition::Snowy),
            (77, WeatherCondition::Snowy),
            (80, WeatherCondition::Showers),
            (82, WeatherCondition::Showers),
            (95, WeatherCondition::Thunderstorm),
            (99, WeatherCondition::Thunderstorm),
        ];
        for (code, expected) in cases {
            assert_eq!(WeatherCondition::from_code(code), expected, "code {code}");
        }
    }

    #[test]
    fn codes_between_ranges_are_unknown() {
        for code in [-1, 4, 44, 49, 50, 68, 70, 78, 79, 83, 94, 100, 999] {
            let c = WeatherCondition::from_code(code);
            assert_eq!(c, WeatherCondition::Unknown, "code {code}");
            assert_eq!(c.text(), "Unknown");
            assert_eq!(c.icon(), "ri-question-line");
        }
    }

    #[test]
    fn condition_text_and_icon() {
        let c = WeatherCondition::from_code(0);
        assert_eq!(c.text(), "Clear Sky");
        assert_eq!(c.icon(), "ri-sun-line");

        let c = WeatherCondition::from_code(81);
        assert_eq!(c.text(), "Showers");
        assert_eq!(c.icon(), "ri-showers-line");
    }

    #[test]
    fn uv_boundaries() {
        assert_eq!(UvStatus::classify(2.0), UvStatus::Low);
        assert_eq!(UvStatus::classify(2.01), UvStatus::Moderate);
        assert_eq!(UvStatus::classify(5.0), UvStatus::Moderate);
        assert_eq!(UvStatus::classify(7.0), UvStatus::High);
        assert_eq!(UvStatus::classify(10.0), UvStatus::VeryHigh);
        assert_eq!(UvStatus::classify(10.1).label(), "Extreme");
    }

    #[test]
    fn humidity_boundaries() {
        assert_eq!(HumidityStatus::classify(29.9).label(), "Dry");
        assert_eq!(HumidityStatus::classify(30.0).label(), "Normal 🤙");
        assert_eq!(HumidityStatus::classify(60.0).label(), "Normal 🤙");
        assert_eq!(HumidityStatus::classify(60.5).label(), "High");
    }

    #[test]
    fn visibility_boundaries() {
        assert_eq!(VisibilityStatus::classify(10_000.0), VisibilityStatus::Good);
        assert_eq!(VisibilityStatus::classify(10_000.1), VisibilityStatus::Excellent);
        assert_eq!(VisibilityStatus::classify(5_000.0), VisibilityStatus::Average);
        assert_eq!(VisibilityStatus::classify(2_000.0), VisibilityStatus::Poor);
    }

    #[test]
    fn aqi_boundaries() {
        assert_eq!(AqiStatus::classify(50.0).label(), "Good");
        assert_eq!(AqiStatus::classify(51.0).label(), "Moderate");
        assert_eq!(AqiStatus::classify(150.0), AqiStatus::UnhealthyForSensitive);
        assert_eq!(AqiStatus::classify(200.0), AqiStatus::Unhealthy);
        assert_eq!(AqiStatus::classify(300.0), AqiStatus::VeryUnhealthy);
        assert_eq!(AqiStatus::classify(301.0), AqiStatus::Hazardous);
    }

    #[test]
    fn non_finite_input_classifies_as_zero() {
        assert_eq!(UvStatus::classify(f64::NAN), UvStatus::Low);
        assert_eq!(HumidityStatus::classify(f64::NAN), HumidityStatus::Dry);
        assert_eq!(VisibilityStatus::classify(f64::INFINITY), VisibilityStatus::Poor);
        assert_eq!(AqiStatus::classify(f64::NEG_INFINITY), AqiStatus::Good);
    }
}
