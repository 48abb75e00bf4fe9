//! Projection of a [`WeatherBundle`] onto screen regions.
//!
//! A screen is a set of independently addressable regions. Each region is
//! cleared and fully rewritten on every render; a region the screen does not
//! provide is skipped without affecting the others.

use chrono::{NaiveDateTime, Timelike};

use crate::{
    classify::{AqiStatus, HumidityStatus, UvStatus, VisibilityStatus, WeatherCondition, finite_or_zero},
    model::{DailySeries, HourlySeries, WeatherBundle},
    settings::{Settings, TemperatureUnit, TimeFormat},
};

pub mod memory;

pub use memory::{MemoryRegion, MemoryScreen};

pub const HOURLY_SLOTS: usize = 8;
pub const DAILY_SLOTS: usize = 7;

const DEFAULT_PRESSURE_HPA: f64 = 1013.0;
const DEFAULT_VISIBILITY_M: f64 = 10_000.0;
const UV_SCALE_MAX: f64 = 11.0;
const UNHEALTHY_AQI: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HighlightCard {
    Uv,
    Wind,
    Sun,
    Humidity,
    Visibility,
    AirQuality,
}

impl HighlightCard {
    pub const ALL: [HighlightCard; 6] = [
        HighlightCard::Uv,
        HighlightCard::Wind,
        HighlightCard::Sun,
        HighlightCard::Humidity,
        HighlightCard::Visibility,
        HighlightCard::AirQuality,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Uv => "UV Index",
            Self::Wind => "Wind Status",
            Self::Sun => "Sunrise & Sunset",
            Self::Humidity => "Humidity",
            Self::Visibility => "Visibility",
            Self::AirQuality => "Air Quality",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionId {
    Greeting,
    Header,
    Stats,
    Hourly,
    Highlight(HighlightCard),
    Daily,
}

impl RegionId {
    pub fn all() -> Vec<RegionId> {
        let mut ids = vec![RegionId::Greeting, RegionId::Header, RegionId::Stats, RegionId::Hourly];
        ids.extend(HighlightCard::ALL.into_iter().map(RegionId::Highlight));
        ids.push(RegionId::Daily);
        ids
    }
}

/// One rectangular part of the screen.
pub trait Region {
    fn clear(&mut self);
    fn set_text(&mut self, slot: &str, text: &str);
    fn set_icon(&mut self, slot: &str, icon: &str);
    /// Fill width of a gauge, in percent.
    fn set_width(&mut self, slot: &str, percent: f64);
}

pub trait Screen {
    fn region(&mut self, id: RegionId) -> Option<&mut dyn Region>;
}

/// Everything besides the bundle that affects rendering.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub location_name: &'a str,
    /// Local wall-clock time at the forecast location.
    pub now: NaiveDateTime,
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourSlot {
    pub label: String,
    pub icon: &'static str,
    pub temperature: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySlot {
    pub label: String,
    pub icon: &'static str,
    pub condition: &'static str,
    pub high: String,
    pub low: String,
}

/// Nearest integer, halves rounding towards positive infinity (-2.5 becomes -2).
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn format_temperature(celsius: f64, unit: TemperatureUnit) -> String {
    format!("{}°", round_half_up(unit.convert(celsius)))
}

pub fn format_clock(time: NaiveDateTime, format: TimeFormat) -> String {
    match format {
        TimeFormat::TwelveHour => time.format("%I:%M %p").to_string(),
        TimeFormat::TwentyFourHour => time.format("%H:%M").to_string(),
    }
}

fn format_hour(time: NaiveDateTime, format: TimeFormat) -> String {
    match format {
        TimeFormat::TwelveHour => {
            let h = time.hour();
            let display = if h % 12 == 0 { 12 } else { h % 12 };
            format!("{display} {}", if h >= 12 { "PM" } else { "AM" })
        }
        TimeFormat::TwentyFourHour => time.format("%H:00").to_string(),
    }
}

fn format_header_time(now: NaiveDateTime, format: TimeFormat) -> String {
    match format {
        TimeFormat::TwelveHour => now.format("%A, %-I:%M %p").to_string(),
        TimeFormat::TwentyFourHour => now.format("%A, %H:%M").to_string(),
    }
}

/// Up to [`HOURLY_SLOTS`] slots starting at index `start`. The first slot is "Now".
pub fn hourly_slots(series: &HourlySeries, start: usize, settings: &Settings) -> Vec<HourSlot> {
    series
        .window(start, HOURLY_SLOTS)
        .iter()
        .enumerate()
        .map(|(i, point)| HourSlot {
            label: if i == 0 {
                "Now".to_string()
            } else {
                format_hour(point.time, settings.time_format)
            },
            icon: WeatherCondition::from_code(point.weather_code).icon(),
            temperature: format_temperature(point.temperature, settings.temp_unit),
        })
        .collect()
}

/// Up to [`DAILY_SLOTS`] days. The first is "Today".
pub fn daily_slots(series: &DailySeries, settings: &Settings) -> Vec<DaySlot> {
    series
        .window(DAILY_SLOTS)
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let condition = WeatherCondition::from_code(day.weather_code);
            DaySlot {
                label: if i == 0 {
                    "Today".to_string()
                } else {
                    day.date.format("%a").to_string()
                },
                icon: condition.icon(),
                condition: condition.text(),
                high: format_temperature(day.temperature_max, settings.temp_unit),
                low: format!("/ {}", format_temperature(day.temperature_min, settings.temp_unit)),
            }
        })
        .collect()
}

/// Render every region of the dashboard from one bundle.
pub fn render_bundle(screen: &mut dyn Screen, bundle: &WeatherBundle, ctx: &RenderContext<'_>) {
    render_header(screen, bundle, ctx);
    render_stats(screen, bundle, ctx);
    render_hourly(screen, bundle, ctx);
    render_highlights(screen, bundle, ctx);
    render_daily(screen, bundle, ctx);
}

pub fn render_greeting(screen: &mut dyn Screen, name: Option<&str>) {
    let Some(region) = screen.region(RegionId::Greeting) else {
        return;
    };
    region.clear();
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => region.set_text("greeting", &format!("Hello, {name}")),
        None => region.set_text("greeting", "Hello"),
    }
}

/// Update only the location line of the header.
pub fn render_location_name(screen: &mut dyn Screen, name: &str) {
    if let Some(region) = screen.region(RegionId::Header) {
        region.set_text("location", name);
    }
}

fn render_header(screen: &mut dyn Screen, bundle: &WeatherBundle, ctx: &RenderContext<'_>) {
    let Some(region) = screen.region(RegionId::Header) else {
        return;
    };
    let condition = WeatherCondition::from_code(bundle.current_weather_code);

    region.clear();
    region.set_text("location", ctx.location_name);
    region.set_text("time", &format_header_time(ctx.now, ctx.settings.time_format));
    region.set_text(
        "temperature",
        &format_temperature(bundle.current_temperature, ctx.settings.temp_unit),
    );
    region.set_text("condition", condition.text());
    region.set_icon("condition", condition.icon());
}

fn render_stats(screen: &mut dyn Screen, bundle: &WeatherBundle, ctx: &RenderContext<'_>) {
    let Some(region) = screen.region(RegionId::Stats) else {
        return;
    };
    let pressure = bundle
        .hourly
        .get(0)
        .and_then(|p| p.pressure)
        .unwrap_or(DEFAULT_PRESSURE_HPA);

    region.clear();
    region.set_text("pressure", &format!("{} hPa", round_half_up(pressure)));
    region.set_text("wind", &format!("{} km/h", bundle.wind_speed));
    if let Some(sunrise) = bundle.daily.first().and_then(|d| d.sunrise) {
        region.set_text("sunrise", &format_clock(sunrise, ctx.settings.time_format));
    }
}

fn render_hourly(screen: &mut dyn Screen, bundle: &WeatherBundle, ctx: &RenderContext<'_>) {
    let Some(region) = screen.region(RegionId::Hourly) else {
        return;
    };
    let start = ctx.now.hour() as usize;

    region.clear();
    for (i, slot) in hourly_slots(&bundle.hourly, start, &ctx.settings).iter().enumerate() {
        region.set_text(&format!("{i}.hour"), &slot.label);
        region.set_icon(&format!("{i}.icon"), slot.icon);
        region.set_text(&format!("{i}.temp"), &slot.temperature);
    }
}

fn render_daily(screen: &mut dyn Screen, bundle: &WeatherBundle, ctx: &RenderContext<'_>) {
    let Some(region) = screen.region(RegionId::Daily) else {
        return;
    };

    region.clear();
    for (i, slot) in daily_slots(&bundle.daily, &ctx.settings).iter().enumerate() {
        region.set_text(&format!("{i}.day"), &slot.label);
        region.set_icon(&format!("{i}.icon"), slot.icon);
        region.set_text(&format!("{i}.condition"), slot.condition);
        region.set_text(&format!("{i}.high"), &slot.high);
        region.set_text(&format!("{i}.low"), &slot.low);
    }
}

fn render_highlights(screen: &mut dyn Screen, bundle: &WeatherBundle, ctx: &RenderContext<'_>) {
    let hour = ctx.now.hour() as usize;
    let current_hour = bundle.hourly.get(hour);
    let today = bundle.daily.first();

    if let Some(card) = screen.region(RegionId::Highlight(HighlightCard::Uv)) {
        let uv = finite_or_zero(today.and_then(|d| d.uv_index_max).unwrap_or(0.0));
        card.clear();
        card.set_text("value", &format!("{uv:.1}"));
        card.set_text("status", UvStatus::classify(uv).label());
        card.set_width("fill", uv.clamp(0.0, UV_SCALE_MAX) / UV_SCALE_MAX * 100.0);
    }

    if let Some(card) = screen.region(RegionId::Highlight(HighlightCard::Wind)) {
        card.clear();
        card.set_text("value", &format!("{} km/h", bundle.wind_speed));
    }

    if let Some(card) = screen.region(RegionId::Highlight(HighlightCard::Sun)) {
        card.clear();
        if let Some(rise) = today.and_then(|d| d.sunrise) {
            card.set_text("sunrise", &format_clock(rise, ctx.settings.time_format));
        }
        if let Some(set) = today.and_then(|d| d.sunset) {
            card.set_text("sunset", &format_clock(set, ctx.settings.time_format));
        }
    }

    if let Some(card) = screen.region(RegionId::Highlight(HighlightCard::Humidity)) {
        let humidity = finite_or_zero(current_hour.and_then(|p| p.humidity).unwrap_or(0.0))
            .clamp(0.0, 100.0);
        card.clear();
        card.set_text("value", &format!("{}%", round_half_up(humidity)));
        card.set_text("status", HumidityStatus::classify(humidity).label());
        card.set_width("fill", humidity / 2.0);
    }

    if let Some(card) = screen.region(RegionId::Highlight(HighlightCard::Visibility)) {
        let visibility = if bundle.hourly.visibility_reported() {
            finite_or_zero(current_hour.and_then(|p| p.visibility).unwrap_or(0.0))
        } else {
            DEFAULT_VISIBILITY_M
        };
        card.clear();
        card.set_text("value", &format!("{:.1} km", visibility / 1000.0));
        card.set_text("status", VisibilityStatus::classify(visibility).label());
    }

    if let Some(card) = screen.region(RegionId::Highlight(HighlightCard::AirQuality)) {
        card.clear();
        if let Some(aqi) = bundle.air_quality {
            card.set_text("value", &aqi.to_string());
            card.set_text("status", AqiStatus::classify(f64::from(aqi)).label());
            if aqi > UNHEALTHY_AQI {
                card.set_icon("severity", "unhealthy");
            }
        }
    }
}
