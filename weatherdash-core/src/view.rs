//! Top-level views and the switch between them.
//!
//! Exactly one view is visible at a time. Activating a view hides the others
//! and runs that view's activation hook against [`AppState`].

use chrono::NaiveDate;
use std::{fmt, str::FromStr};

use crate::{
    calendar::YearCalendar,
    map::MapView,
    model::Coordinate,
    settings::{Settings, SettingsStore, TEMP_UNIT, TIME_FORMAT, WEATHER_ALERTS},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewKey {
    #[default]
    Dashboard,
    Map,
    Calendar,
    Settings,
}

impl ViewKey {
    pub const ALL: [ViewKey; 4] =
        [ViewKey::Dashboard, ViewKey::Map, ViewKey::Calendar, ViewKey::Settings];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKey::Dashboard => "dashboard",
            ViewKey::Map => "map",
            ViewKey::Calendar => "calendar",
            ViewKey::Settings => "settings",
        }
    }

    /// Unrecognized keys select the dashboard.
    pub fn parse_or_default(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKey {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ViewKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown view '{value}'. Views: dashboard, map, calendar, settings."
                )
            })
    }
}

/// Where views are shown.
pub trait ViewHost {
    fn set_visible(&mut self, view: ViewKey, visible: bool);

    /// Navigation entry highlighting. Hosts without navigation ignore it.
    fn set_nav_active(&mut self, _view: ViewKey, _active: bool) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// One control of the settings view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingControl {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub options: Vec<SettingOption>,
    pub selected: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPanel {
    pub controls: Vec<SettingControl>,
}

impl SettingsPanel {
    pub fn build(settings: &Settings) -> Self {
        let selected = |key: &str| settings.get(key).unwrap_or_default();
        let controls = vec![
            SettingControl {
                key: TEMP_UNIT,
                label: "Temperature Unit",
                description: "Choose Celsius or Fahrenheit",
                options: vec![
                    SettingOption { value: "c", label: "Celsius (°C)" },
                    SettingOption { value: "f", label: "Fahrenheit (°F)" },
                ],
                selected: selected(TEMP_UNIT),
            },
            SettingControl {
                key: TIME_FORMAT,
                label: "Time Format",
                description: "Choose 12h or 24h format",
                options: vec![
                    SettingOption { value: "12", label: "12-hour" },
                    SettingOption { value: "24", label: "24-hour" },
                ],
                selected: selected(TIME_FORMAT),
            },
            SettingControl {
                key: WEATHER_ALERTS,
                label: "Weather Alerts",
                description: "Enable notifications for severe weather",
                options: vec![
                    SettingOption { value: "on", label: "Enable" },
                    SettingOption { value: "off", label: "Disable" },
                ],
                selected: selected(WEATHER_ALERTS),
            },
        ];
        Self { controls }
    }
}

/// Mutable state of the application, owned by whoever drives it.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub active_view: ViewKey,
    /// Last coordinate weather was requested for, or the last search hit.
    pub coordinate: Option<Coordinate>,
    pub map: MapView,
    pub calendar: Option<YearCalendar>,
    pub settings: Settings,
    pub settings_panel: Option<SettingsPanel>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self { settings, ..Default::default() }
    }

    /// Switch to the view named `key`, falling back to the dashboard.
    pub fn activate(
        &mut self,
        key: &str,
        host: &mut dyn ViewHost,
        store: &dyn SettingsStore,
        today: NaiveDate,
    ) -> ViewKey {
        let target = ViewKey::parse_or_default(key);
        if target.as_str() != key {
            tracing::debug!("View '{key}' resolved to '{target}'");
        }
        self.activate_view(target, host, store, today);
        target
    }

    pub fn activate_view(
        &mut self,
        target: ViewKey,
        host: &mut dyn ViewHost,
        store: &dyn SettingsStore,
        today: NaiveDate,
    ) {
        for view in ViewKey::ALL {
            host.set_visible(view, view == target);
            host.set_nav_active(view, view == target);
        }
        self.active_view = target;

        match target {
            ViewKey::Dashboard => {}
            ViewKey::Map => self.map.show(self.coordinate),
            ViewKey::Calendar => self.calendar = Some(YearCalendar::for_date(today)),
            ViewKey::Settings => {
                self.settings = store.load_settings();
                self.settings_panel = Some(SettingsPanel::build(&self.settings));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{MemoryStore, TemperatureUnit};
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    struct RecordingHost {
        visible: HashMap<ViewKey, bool>,
        nav: HashMap<ViewKey, bool>,
    }

    impl RecordingHost {
        fn shown(&self) -> Vec<ViewKey> {
            ViewKey::ALL
                .into_iter()
                .filter(|k| self.visible.get(k).copied().unwrap_or(false))
                .collect()
        }
    }

    impl ViewHost for RecordingHost {
        fn set_visible(&mut self, view: ViewKey, visible: bool) {
            self.visible.insert(view, visible);
        }

        fn set_nav_active(&mut self, view: ViewKey, active: bool) {
            self.nav.insert(view, active);
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
    }

    #[test]
    fn initial_view_is_dashboard() {
        assert_eq!(AppState::default().active_view, ViewKey::Dashboard);
    }

    #[test]
    fn unknown_key_falls_back_to_dashboard() {
        let mut state = AppState::default();
        let mut host = RecordingHost::default();
        let store = MemoryStore::default();

        state.activate("map", &mut host, &store, today());
        let active = state.activate("bogus-view", &mut host, &store, today());

        assert_eq!(active, ViewKey::Dashboard);
        assert_eq!(state.active_view, ViewKey::Dashboard);
        assert_eq!(host.shown(), vec![ViewKey::Dashboard]);
        assert_eq!(host.nav.get(&ViewKey::Map), Some(&false));
    }

    #[test]
    fn exactly_one_view_visible() {
        let mut state = AppState::default();
        let mut host = RecordingHost::default();
        let store = MemoryStore::default();

        for key in ["calendar", "settings", "map", "dashboard"] {
            state.activate(key, &mut host, &store, today());
            assert_eq!(host.shown().len(), 1);
            assert_eq!(host.shown()[0].as_str(), key);
        }
    }

    #[test]
    fn map_is_created_once_then_reused() {
        let mut state = AppState { coordinate: Some(Coordinate::new(5.0, 6.0)), ..Default::default() };
        let mut host = RecordingHost::default();
        let store = MemoryStore::default();

        state.activate("map", &mut host, &store, today());
        state.activate("dashboard", &mut host, &store, today());
        state.activate("map", &mut host, &store, today());

        let map = state.map.instance().expect("map");
        assert_eq!(map.resizes, 1);
        assert_eq!(map.center, Coordinate::new(5.0, 6.0));
    }

    #[test]
    fn calendar_regenerated_for_current_year() {
        let mut state = AppState::default();
        let mut host = RecordingHost::default();
        state.activate("calendar", &mut host, &MemoryStore::default(), today());

        let cal = state.calendar.as_ref().expect("calendar");
        assert_eq!(cal.year, 2024);
        assert_eq!(cal.months[5].today, Some(1));
    }

    #[test]
    fn settings_reread_on_activation() {
        let mut state = AppState::default();
        let mut host = RecordingHost::default();
        let store = MemoryStore::default();

        let mut stored = Settings::default();
        stored.set(TEMP_UNIT, "f").expect("valid");
        store.save_settings(&stored).expect("save");

        state.activate("settings", &mut host, &store, today());
        assert_eq!(state.settings.temp_unit, TemperatureUnit::Fahrenheit);

        let panel = state.settings_panel.as_ref().expect("panel");
        assert_eq!(panel.controls.len(), 3);
        assert_eq!(panel.controls[0].selected, "f");
        assert_eq!(panel.controls[1].selected, "12");
        assert_eq!(panel.controls[2].selected, "off");
    }

    #[test]
    fn panel_selection_follows_stored_flags() {
        let mut settings = Settings::default();
        settings.set(TIME_FORMAT, "24").expect("valid");
        settings.set(WEATHER_ALERTS, "on").expect("valid");

        let panel = SettingsPanel::build(&settings);
        let selected: Vec<_> = panel.controls.iter().map(|c| (c.key, c.selected)).collect();
        assert_eq!(
            selected,
            vec![(TEMP_UNIT, "c"), (TIME_FORMAT, "24"), (WEATHER_ALERTS, "on")]
        );
        for control in &panel.controls {
            assert!(control.options.iter().any(|o| o.value == control.selected));
        }
    }

    #[test]
    fn parse_is_case_insensitive_but_strict() {
        assert_eq!("Calendar".parse::<ViewKey>().ok(), Some(ViewKey::Calendar));
        assert!("calendars".parse::<ViewKey>().is_err());
        assert_eq!(ViewKey::parse_or_default("calendars"), ViewKey::Dashboard);
    }
}
