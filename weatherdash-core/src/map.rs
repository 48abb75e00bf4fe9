//! Map view state. The map instance is created on first use and reused afterwards.

use crate::model::Coordinate;

pub const DEFAULT_CENTER: Coordinate = Coordinate { latitude: 51.505, longitude: -0.09 };
pub const DEFAULT_ZOOM: u8 = 13;
pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const ATTRIBUTION: &str = "© OpenStreetMap contributors";

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapInstance {
    pub center: Coordinate,
    pub zoom: u8,
    pub marker: Option<Marker>,
    /// Times the map was re-laid out after its container became visible again.
    pub resizes: u32,
}

impl MapInstance {
    fn new(center: Coordinate) -> Self {
        Self { center, zoom: DEFAULT_ZOOM, marker: None, resizes: 0 }
    }

    fn set_view(&mut self, center: Coordinate) {
        self.center = center;
        self.zoom = DEFAULT_ZOOM;
    }

    /// Browser link to the current view.
    pub fn osm_link(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat:.5}&mlon={lon:.5}#map={z}/{lat:.5}/{lon:.5}",
            lat = self.center.latitude,
            lon = self.center.longitude,
            z = self.zoom,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapView {
    instance: Option<MapInstance>,
}

impl MapView {
    pub fn instance(&self) -> Option<&MapInstance> {
        self.instance.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.instance.is_some()
    }

    /// Activation hook. The first call builds the map, centred on `location`
    /// with a "You are here" marker, or on [`DEFAULT_CENTER`] when no location
    /// is known. Later calls resize and recentre the existing map.
    pub fn show(&mut self, location: Option<Coordinate>) {
        match &mut self.instance {
            None => {
                let instance = match location {
                    Some(at) => {
                        let mut map = MapInstance::new(at);
                        map.marker = Some(Marker { position: at, label: "You are here".into() });
                        map
                    }
                    None => {
                        tracing::info!("No location data available yet");
                        MapInstance::new(DEFAULT_CENTER)
                    }
                };
                self.instance = Some(instance);
            }
            Some(map) => {
                map.resizes += 1;
                if let Some(at) = location {
                    map.set_view(at);
                }
            }
        }
    }

    /// Centre on `at` and move (or place) the marker there with `label`.
    pub fn show_at(&mut self, at: Coordinate, label: &str) {
        if self.instance.is_none() {
            self.show(Some(at));
        }
        if let Some(map) = &mut self.instance {
            map.set_view(at);
            match &mut map.marker {
                Some(marker) => {
                    marker.position = at;
                    marker.label = label.to_string();
                }
                None => map.marker = Some(Marker { position: at, label: label.to_string() }),
            }
        }
    }
}
