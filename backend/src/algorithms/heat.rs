//! Geographic heat aggregation for the map view's density overlay.
//!
//! Each item carries a free-text location. Items are resolved through a
//! [`Gazetteer`], grouped by exact coordinate pair, and emitted as
//! `(lat, lng, intensity)` triples. Unresolvable items are dropped; callers
//! that care about coverage read the [`HeatSummary`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::geo::Gazetteer;

/// Anything with an id and a location string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedItem {
    pub id: String,
    pub location_text: String,
}

impl LocatedItem {
    pub fn new(id: impl Into<String>, location_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location_text: location_text.into(),
        }
    }
}

/// Density triple consumed by the heat layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    pub lat: f64,
    pub lng: f64,
    pub intensity: usize,
}

/// Accumulator for one coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatBucket {
    pub lat: f64,
    pub lng: f64,
    pub intensity: usize,
    /// Contributing item ids, in input order. Diagnostics only.
    pub contributors: Vec<String>,
}

impl From<&HeatBucket> for HeatPoint {
    fn from(bucket: &HeatBucket) -> Self {
        HeatPoint {
            lat: bucket.lat,
            lng: bucket.lng,
            intensity: bucket.intensity,
        }
    }
}

/// Coverage of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatSummary {
    pub input_count: usize,
    pub matched_count: usize,
    pub unmatched_ids: Vec<String>,
    pub bucket_count: usize,
    /// `matched_count / input_count`, or 0 for empty input.
    pub match_rate: f64,
}

/// Aggregate items into heat triples using the built-in gazetteer.
pub fn aggregate_heat(points: &[LocatedItem]) -> Vec<HeatPoint> {
    aggregate_heat_with(points, Gazetteer::shared())
}

/// Aggregate items into heat triples using a specific gazetteer.
pub fn aggregate_heat_with(points: &[LocatedItem], gazetteer: &Gazetteer) -> Vec<HeatPoint> {
    aggregate_heat_buckets(points, gazetteer)
        .0
        .iter()
        .map(HeatPoint::from)
        .collect()
}

/// Full aggregation: buckets with contributors, plus a coverage summary.
///
/// Buckets appear in order of their first contributor in `points`.
pub fn aggregate_heat_buckets(
    points: &[LocatedItem],
    gazetteer: &Gazetteer,
) -> (Vec<HeatBucket>, HeatSummary) {
    let mut buckets: Vec<HeatBucket> = Vec::new();
    let mut index: HashMap<(u64, u64), usize> = HashMap::new();
    let mut unmatched_ids = Vec::new();
    let mut matched_count = 0;

    for item in points {
        let Some(point) = gazetteer.resolve(&item.location_text) else {
            unmatched_ids.push(item.id.clone());
            continue;
        };
        matched_count += 1;

        let slot = *index.entry(point.key()).or_insert_with(|| {
            buckets.push(HeatBucket {
                lat: point.lat,
                lng: point.lng,
                intensity: 0,
                contributors: Vec::new(),
            });
            buckets.len() - 1
        });
        let bucket = &mut buckets[slot];
        bucket.intensity += 1;
        bucket.contributors.push(item.id.clone());
    }

    if !unmatched_ids.is_empty() {
        log::debug!(
            "heat aggregation dropped {} of {} items with unresolved locations",
            unmatched_ids.len(),
            points.len()
        );
    }

    let summary = HeatSummary {
        input_count: points.len(),
        matched_count,
        bucket_count: buckets.len(),
        match_rate: if points.is_empty() {
            0.0
        } else {
            matched_count as f64 / points.len() as f64
        },
        unmatched_ids,
    };

    (buckets, summary)
}
