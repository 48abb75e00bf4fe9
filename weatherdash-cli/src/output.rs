//! Plain-text drawing of the views.

use weatherdash_core::{
    calendar::{WEEKDAY_LABELS, YearCalendar},
    map::{ATTRIBUTION, MapInstance, TILE_URL},
    render::{HighlightCard, MemoryRegion, MemoryScreen, RegionId},
    view::SettingsPanel,
};

pub fn print_dashboard(screen: &MemoryScreen) {
    if let Some(greeting) = screen.get(RegionId::Greeting).and_then(|r| r.text("greeting")) {
        println!("{greeting}\n");
    }

    if let Some(header) = screen.get(RegionId::Header).filter(|r| !r.is_empty()) {
        println!("{}", header.text("location").unwrap_or("-"));
        if let Some(time) = header.text("time") {
            println!("{time}");
        }
        if let Some(temperature) = header.text("temperature") {
            let icon = header.icon("condition").map(glyph).unwrap_or(" ");
            println!(
                "{icon} {temperature}  {}",
                header.text("condition").unwrap_or_default()
            );
        }
        println!();
    }

    if let Some(stats) = screen.get(RegionId::Stats).filter(|r| !r.is_empty()) {
        for (slot, value) in stats.texts() {
            println!("  {slot:<10} {value}");
        }
        println!();
    }

    if let Some(hourly) = screen.get(RegionId::Hourly).filter(|r| !r.is_empty()) {
        println!("Hourly");
        for i in 0..hourly.item_count() {
            println!(
                "  {:<6} {} {}",
                slot_text(hourly, i, "hour"),
                item_glyph(hourly, i),
                slot_text(hourly, i, "temp")
            );
        }
        println!();
    }

    for card in HighlightCard::ALL {
        let Some(region) = screen.get(RegionId::Highlight(card)).filter(|r| !r.is_empty()) else {
            continue;
        };
        print_card(card, region);
    }

    if let Some(daily) = screen.get(RegionId::Daily).filter(|r| !r.is_empty()) {
        println!("\nDaily");
        for i in 0..daily.item_count() {
            println!(
                "  {:<5} {} {:>5} {:<6} {}",
                slot_text(daily, i, "day"),
                item_glyph(daily, i),
                slot_text(daily, i, "high"),
                slot_text(daily, i, "low"),
                slot_text(daily, i, "condition")
            );
        }
    }
}

fn print_card(card: HighlightCard, region: &MemoryRegion) {
    let mut line = format!("{:<18}", card.title());

    match card {
        HighlightCard::Sun => {
            line.push_str(&format!(
                "↑ {}  ↓ {}",
                region.text("sunrise").unwrap_or("-"),
                region.text("sunset").unwrap_or("-")
            ));
        }
        _ => {
            line.push_str(region.text("value").unwrap_or("-"));
            if let Some(status) = region.text("status") {
                line.push_str(&format!("  {status}"));
            }
        }
    }

    if let Some(fill) = region.width("fill") {
        line.push_str(&format!("  {}", gauge(fill)));
    }
    if region.icon("severity") == Some("unhealthy") {
        line.push_str("  (!)");
    }
    println!("{line}");
}

pub fn print_map(map: Option<&MapInstance>) {
    let Some(map) = map else {
        println!("Map not initialized");
        return;
    };

    if let Some(marker) = &map.marker {
        println!("📍 {}", marker.label);
    }
    println!(
        "Center: {:.4}, {:.4} (zoom {})",
        map.center.latitude, map.center.longitude, map.zoom
    );
    println!("{}", map.osm_link());
    println!("Tiles: {TILE_URL}");
    println!("{ATTRIBUTION}");
}

pub fn print_calendar(calendar: &YearCalendar) {
    println!("{}\n", calendar.year);

    for month in &calendar.months {
        println!("{}", month.name);
        println!(" {}", WEEKDAY_LABELS.map(|d| format!("{d:>3}")).join(" "));

        let mut cells: Vec<String> = (0..month.leading_blanks).map(|_| "   ".to_string()).collect();
        cells.extend((1..=month.days).map(|day| {
            if month.today == Some(day) {
                format!("[{day:>2}")
            } else {
                format!(" {day:>2}")
            }
        }));

        for week in cells.chunks(7) {
            println!(" {}", week.join(" "));
        }
        println!();
    }
}

pub fn print_settings(panel: &SettingsPanel) {
    for control in &panel.controls {
        println!("{} ({})", control.label, control.key);
        println!("  {}", control.description);
        for option in &control.options {
            let mark = if option.value == control.selected { "*" } else { " " };
            println!("  [{mark}] {:<18} {}", option.label, option.value);
        }
        println!();
    }
}

fn slot_text<'a>(region: &'a MemoryRegion, index: usize, slot: &str) -> &'a str {
    region.text(&format!("{index}.{slot}")).unwrap_or_default()
}

fn item_glyph(region: &MemoryRegion, index: usize) -> &'static str {
    region
        .icon(&format!("{index}.icon"))
        .map(glyph)
        .unwrap_or(" ")
}

/// Terminal stand-in for an icon class.
fn glyph(icon: &str) -> &'static str {
    match icon {
        "ri-sun-line" => "☀",
        "ri-sun-cloudy-line" => "⛅",
        "ri-mist-line" => "🌫",
        "ri-showers-line" => "🌦",
        "ri-rainy-line" => "🌧",
        "ri-snowy-line" => "❄",
        "ri-thunderstorms-line" => "⛈",
        _ => "?",
    }
}

fn gauge(percent: f64) -> String {
    const WIDTH: usize = 20;
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(WIDTH - filled))
}
