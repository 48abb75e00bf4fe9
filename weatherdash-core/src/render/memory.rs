use std::collections::{BTreeMap, BTreeSet};

use super::{Region, RegionId, Screen};

/// Region contents held in memory, keyed by slot name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRegion {
    texts: BTreeMap<String, String>,
    icons: BTreeMap<String, String>,
    widths: BTreeMap<String, f64>,
}

impl MemoryRegion {
    pub fn text(&self, slot: &str) -> Option<&str> {
        self.texts.get(slot).map(String::as_str)
    }

    pub fn icon(&self, slot: &str) -> Option<&str> {
        self.icons.get(slot).map(String::as_str)
    }

    pub fn width(&self, slot: &str) -> Option<f64> {
        self.widths.get(slot).copied()
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.texts.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.icons.is_empty() && self.widths.is_empty()
    }

    /// Number of list items, i.e. distinct `<index>.` slot prefixes.
    pub fn item_count(&self) -> usize {
        self.texts
            .keys()
            .chain(self.icons.keys())
            .filter_map(|k| k.split_once('.'))
            .filter_map(|(idx, _)| idx.parse::<usize>().ok())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

impl Region for MemoryRegion {
    fn clear(&mut self) {
        self.texts.clear();
        self.icons.clear();
        self.widths.clear();
    }

    fn set_text(&mut self, slot: &str, text: &str) {
        self.texts.insert(slot.to_string(), text.to_string());
    }

    fn set_icon(&mut self, slot: &str, icon: &str) {
        self.icons.insert(slot.to_string(), icon.to_string());
    }

    fn set_width(&mut self, slot: &str, percent: f64) {
        self.widths.insert(slot.to_string(), percent);
    }
}

/// A screen whose regions are plain maps. Hosts read it back to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryScreen {
    regions: BTreeMap<RegionId, MemoryRegion>,
}

impl Default for MemoryScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScreen {
    /// A screen providing every region.
    pub fn new() -> Self {
        Self {
            regions: RegionId::all()
                .into_iter()
                .map(|id| (id, MemoryRegion::default()))
                .collect(),
        }
    }

    /// Drop a region, as if the page had no element for it.
    pub fn without(mut self, id: RegionId) -> Self {
        self.regions.remove(&id);
        self
    }

    pub fn get(&self, id: RegionId) -> Option<&MemoryRegion> {
        self.regions.get(&id)
    }
}

impl Screen for MemoryScreen {
    fn region(&mut self, id: RegionId) -> Option<&mut dyn Region> {
        self.regions.get_mut(&id).map(|r| r as &mut dyn Region)
    }
}
