//! Event handlers of the dashboard.
//!
//! Every handler here swallows its errors: failures are logged and the screen
//! keeps whatever it showed before.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{error, info, warn};

use crate::{
    fetch::WeatherFetcher,
    location::Locator,
    model::{Coordinate, LocatedBundle, Place},
    provider::{Services, reverse_geocode},
    render::{RenderContext, Screen, render_bundle, render_greeting, render_location_name},
    settings::SettingsStore,
    view::{AppState, ViewHost, ViewKey},
};

#[derive(Debug)]
pub struct Dashboard {
    fetcher: WeatherFetcher,
    locator: Locator,
    store: Box<dyn SettingsStore>,
    state: AppState,
    current: Option<LocatedBundle>,
}

impl Dashboard {
    pub fn new(services: Services, locator: Locator, store: Box<dyn SettingsStore>) -> Self {
        let state = AppState::new(store.load_settings());
        Self {
            fetcher: WeatherFetcher::new(services),
            locator,
            store,
            state,
            current: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The bundle currently on screen.
    pub fn current(&self) -> Option<&LocatedBundle> {
        self.current.as_ref()
    }

    pub fn greet(&self, screen: &mut dyn Screen, name: Option<&str>) {
        render_greeting(screen, name);
    }

    /// Acquire the device position and make it the active coordinate.
    pub async fn locate(&mut self) -> Option<Coordinate> {
        match self.locator.acquire().await {
            Ok(at) => {
                self.state.coordinate = Some(at);
                Some(at)
            }
            Err(e) => {
                error!("Location access denied or error: {e}");
                None
            }
        }
    }

    /// Locate the device, then load and render weather for it.
    pub async fn start(&mut self, screen: &mut dyn Screen, now: NaiveDateTime) -> bool {
        match self.locate().await {
            Some(at) => self.refresh(at, screen, now).await,
            None => false,
        }
    }

    /// Fetch and render weather for `at`. Returns whether the screen was updated.
    pub async fn refresh(
        &mut self,
        at: Coordinate,
        screen: &mut dyn Screen,
        now: NaiveDateTime,
    ) -> bool {
        self.state.coordinate = Some(at);

        match self.fetcher.fetch_bundle(at).await {
            Ok(located) => {
                let ctx = RenderContext {
                    location_name: &located.location_name,
                    now,
                    settings: self.state.settings,
                };
                render_bundle(screen, &located.bundle, &ctx);
                self.current = Some(located);
                true
            }
            Err(e) => {
                error!("Dashboard refresh failed: {e}");
                false
            }
        }
    }

    /// Locate the device and show only its place name.
    pub async fn locate_only(&mut self, screen: &mut dyn Screen) -> Option<String> {
        let at = self.locate().await?;
        let name = reverse_geocode(self.fetcher.services().geocoder.as_ref(), at).await;
        render_location_name(screen, &name);
        Some(name)
    }

    /// Look up `query` and show the first hit on the map view.
    pub async fn search(
        &mut self,
        query: &str,
        host: &mut dyn ViewHost,
        today: NaiveDate,
    ) -> Option<Place> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        match self.fetcher.services().geocoder.search(query).await {
            Ok(Some(place)) => {
                info!("Search '{query}' resolved to {}", place.name);
                self.state.activate_view(ViewKey::Map, host, self.store.as_ref(), today);
                self.state.coordinate = Some(place.coordinate);
                self.state.map.show_at(place.coordinate, &place.name);
                Some(place)
            }
            Ok(None) => {
                warn!("No matching location found for '{query}'");
                None
            }
            Err(e) => {
                error!("Search failed: {e}");
                None
            }
        }
    }

    pub fn activate(&mut self, key: &str, host: &mut dyn ViewHost, today: NaiveDate) -> ViewKey {
        self.state.activate(key, host, self.store.as_ref(), today)
    }
}
