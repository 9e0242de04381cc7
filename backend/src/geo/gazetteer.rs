//! Static place-name gazetteer.
//!
//! Resolves free-text locations ("Paris, France", "Dessau") to city-level
//! coordinates without a geocoding service. Coverage is limited to the
//! table below plus any entries added through configuration; anything else
//! resolves to `None`.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Bit-exact key used for grouping. Two points are the same bucket only if
    /// both coordinates are identical. `-0.0` and `0.0` share a key.
    pub(crate) fn key(&self) -> (u64, u64) {
        fn bits(v: f64) -> u64 {
            if v == 0.0 {
                0.0f64.to_bits()
            } else {
                v.to_bits()
            }
        }
        (bits(self.lat), bits(self.lng))
    }
}

/// One named place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazetteerEntry {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl GazetteerEntry {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
        }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// How a location string was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    /// A gazetteer name occurs inside the text.
    Contains,
    /// The text occurs inside a gazetteer name.
    ContainedIn,
}

/// Successful resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub name: String,
    pub point: GeoPoint,
    pub kind: MatchKind,
}

/// Minimum text length for the reverse (text inside name) fallback.
pub const MIN_REVERSE_MATCH_LEN: usize = 4;

/// Built-in table. Cities come before countries so that ties in table order
/// favour the more precise entry.
const BUILTIN_ENTRIES: &[(&str, f64, f64)] = &[
    // Europe
    ("paris", 48.8566, 2.3522),
    ("london", 51.5074, -0.1278),
    ("rome", 41.9028, 12.4964),
    ("florence", 43.7696, 11.2558),
    ("venice", 45.4408, 12.3155),
    ("milan", 45.4642, 9.1900),
    ("vicenza", 45.5455, 11.5354),
    ("ravenna", 44.4184, 12.2035),
    ("turin", 45.0703, 7.6869),
    ("berlin", 52.5200, 13.4050),
    ("dessau", 51.8306, 12.2423),
    ("weimar", 50.9795, 11.3235),
    ("munich", 48.1351, 11.5820),
    ("stuttgart", 48.7758, 9.1829),
    ("cologne", 50.9375, 6.9603),
    ("vienna", 48.2082, 16.3738),
    ("prague", 50.0755, 14.4378),
    ("budapest", 47.4979, 19.0402),
    ("brussels", 50.8503, 4.3517),
    ("amsterdam", 52.3676, 4.9041),
    ("rotterdam", 51.9244, 4.4777),
    ("utrecht", 52.0907, 5.1214),
    ("barcelona", 41.3851, 2.1734),
    ("madrid", 40.4168, -3.7038),
    ("granada", 37.1773, -3.5986),
    ("cordoba", 37.8882, -4.7794),
    ("lisbon", 38.7223, -9.1393),
    ("porto", 41.1579, -8.6291),
    ("glasgow", 55.8642, -4.2518),
    ("edinburgh", 55.9533, -3.1883),
    ("helsinki", 60.1699, 24.9384),
    ("stockholm", 59.3293, 18.0686),
    ("copenhagen", 55.6761, 12.5683),
    ("oslo", 59.9139, 10.7522),
    ("moscow", 55.7558, 37.6173),
    ("st. petersburg", 59.9311, 30.3609),
    ("saint petersburg", 59.9311, 30.3609),
    ("athens", 37.9838, 23.7275),
    ("istanbul", 41.0082, 28.9784),
    ("constantinople", 41.0082, 28.9784),
    ("chartres", 48.4439, 1.4890),
    ("reims", 49.2583, 4.0317),
    ("poissy", 48.9296, 2.0456),
    ("ronchamp", 47.7042, 6.6353),
    ("marseille", 43.2965, 5.3698),
    ("bilbao", 43.2630, -2.9350),
    // Americas
    ("new york", 40.7128, -74.0060),
    ("chicago", 41.8781, -87.6298),
    ("los angeles", 34.0522, -118.2437),
    ("san francisco", 37.7749, -122.4194),
    ("washington", 38.9072, -77.0369),
    ("boston", 42.3601, -71.0589),
    ("philadelphia", 39.9526, -75.1652),
    ("mill run", 39.9062, -79.4678),
    ("mexico city", 19.4326, -99.1332),
    ("brasilia", -15.7939, -47.8828),
    ("brasília", -15.7939, -47.8828),
    ("rio de janeiro", -22.9068, -43.1729),
    ("sao paulo", -23.5505, -46.6333),
    ("buenos aires", -34.6037, -58.3816),
    ("cusco", -13.5320, -71.9675),
    // Africa, Asia, Oceania
    ("cairo", 30.0444, 31.2357),
    ("giza", 29.9792, 31.1342),
    ("luxor", 25.6872, 32.6396),
    ("jerusalem", 31.7683, 35.2137),
    ("isfahan", 32.6546, 51.6680),
    ("delhi", 28.7041, 77.1025),
    ("agra", 27.1767, 78.0081),
    ("chandigarh", 30.7333, 76.7794),
    ("ahmedabad", 23.0225, 72.5714),
    ("beijing", 39.9042, 116.4074),
    ("shanghai", 31.2304, 121.4737),
    ("hong kong", 22.3193, 114.1694),
    ("tokyo", 35.6762, 139.6503),
    ("kyoto", 35.0116, 135.7681),
    ("nara", 34.6851, 135.8048),
    ("angkor", 13.4125, 103.8670),
    ("dubai", 25.2048, 55.2708),
    ("singapore", 1.3521, 103.8198),
    ("sydney", -33.8688, 151.2093),
    ("melbourne", -37.8136, 144.9631),
    // Countries and regions
    ("france", 46.2276, 2.2137),
    ("italy", 41.8719, 12.5674),
    ("germany", 51.1657, 10.4515),
    ("austria", 47.5162, 14.5501),
    ("spain", 40.4637, -3.7492),
    ("portugal", 39.3999, -8.2245),
    ("netherlands", 52.1326, 5.2913),
    ("belgium", 50.5039, 4.4699),
    ("england", 52.3555, -1.1743),
    ("united kingdom", 55.3781, -3.4360),
    ("scotland", 56.4907, -4.2026),
    ("finland", 61.9241, 25.7482),
    ("sweden", 60.1282, 18.6435),
    ("denmark", 56.2639, 9.5018),
    ("russia", 61.5240, 105.3188),
    ("greece", 39.0742, 21.8243),
    ("turkey", 38.9637, 35.2433),
    ("egypt", 26.8206, 30.8025),
    ("iran", 32.4279, 53.6880),
    ("persia", 32.4279, 53.6880),
    ("india", 20.5937, 78.9629),
    ("china", 35.8617, 104.1954),
    ("japan", 36.2048, 138.2529),
    ("cambodia", 12.5657, 104.9910),
    ("mesopotamia", 33.2232, 43.6793),
    ("united states", 37.0902, -95.7129),
    ("mexico", 23.6345, -102.5528),
    ("brazil", -14.2350, -51.9253),
    ("peru", -9.1900, -75.0152),
    ("australia", -25.2744, 133.7751),
];

/// Name→coordinate lookup table.
#[derive(Debug, Clone, PartialEq)]
pub struct Gazetteer {
    entries: Vec<GazetteerEntry>,
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Gazetteer {
    /// Table with the built-in entries.
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_ENTRIES
                .iter()
                .map(|&(name, lat, lng)| GazetteerEntry::new(name, lat, lng)),
        )
    }

    /// Shared built-in table, built once per process.
    pub fn shared() -> &'static Gazetteer {
        static SHARED: OnceLock<Gazetteer> = OnceLock::new();
        SHARED.get_or_init(Gazetteer::builtin)
    }

    /// Table with only the given entries. Names are normalized; blank names are skipped.
    pub fn from_entries(entries: impl IntoIterator<Item = GazetteerEntry>) -> Self {
        let mut gazetteer = Self {
            entries: Vec::new(),
        };
        for entry in entries {
            gazetteer.insert(entry);
        }
        gazetteer
    }

    /// Built-in table extended with `extra`. An extra entry with an existing
    /// name replaces the built-in coordinates.
    pub fn with_extra_entries(extra: impl IntoIterator<Item = GazetteerEntry>) -> Self {
        let mut gazetteer = Self::builtin();
        for entry in extra {
            gazetteer.insert(entry);
        }
        gazetteer
    }

    fn insert(&mut self, entry: GazetteerEntry) {
        let name = normalize(&entry.name);
        if name.is_empty() || !entry.lat.is_finite() || !entry.lng.is_finite() {
            return;
        }
        let entry = GazetteerEntry { name, ..entry };
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[GazetteerEntry] {
        &self.entries
    }

    /// Coordinates for a free-text location, if any entry matches.
    pub fn resolve(&self, text: &str) -> Option<GeoPoint> {
        self.resolve_detailed(text).map(|r| r.point)
    }

    /// Resolve with details about which entry matched and how.
    ///
    /// Order of preference:
    /// 1. exact case-insensitive match of the whole (trimmed) text;
    /// 2. an entry name contained in the text. The earliest occurrence wins,
    ///    then the longer name, then table order, so "Paris, France"
    ///    resolves to Paris and "New York" does not resolve to "York";
    /// 3. the text contained in an entry name (text of at least
    ///    [`MIN_REVERSE_MATCH_LEN`] characters), first in table order.
    pub fn resolve_detailed(&self, text: &str) -> Option<Resolution> {
        let query = normalize(text);
        if query.is_empty() {
            return None;
        }

        if let Some(entry) = self.entries.iter().find(|e| e.name == query) {
            return Some(Self::resolution(entry, MatchKind::Exact));
        }

        let forward = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(idx, e)| query.find(&e.name).map(|pos| (pos, e.name.len(), idx)))
            .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)).then(a.2.cmp(&b.2)));
        if let Some((_, _, idx)) = forward {
            return Some(Self::resolution(&self.entries[idx], MatchKind::Contains));
        }

        if query.chars().count() >= MIN_REVERSE_MATCH_LEN {
            if let Some(entry) = self.entries.iter().find(|e| e.name.contains(&query)) {
                return Some(Self::resolution(entry, MatchKind::ContainedIn));
            }
        }

        None
    }

    fn resolution(entry: &GazetteerEntry, kind: MatchKind) -> Resolution {
        Resolution {
            name: entry.name.clone(),
            point: entry.point(),
            kind,
        }
    }
}

/// Lowercase, trim and collapse internal whitespace.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
