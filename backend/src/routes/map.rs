//! Map view types.

use serde::{Deserialize, Serialize};

use crate::algorithms::{HeatPoint, HeatSummary};
use crate::geo::GeoPoint;
use crate::models::YearSpan;

/// A resolved work pinned on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub location: String,
    pub movement_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<YearSpan>,
    pub hovered: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Smallest box holding every point, or `None` for no points.
    pub fn enclosing(points: impl IntoIterator<Item = GeoPoint>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => BoundingBox {
                    min_lat: p.lat,
                    min_lng: p.lng,
                    max_lat: p.lat,
                    max_lng: p.lng,
                },
                Some(b) => BoundingBox {
                    min_lat: b.min_lat.min(p.lat),
                    min_lng: b.min_lng.min(p.lng),
                    max_lat: b.max_lat.max(p.lat),
                    max_lng: b.max_lng.max(p.lng),
                },
            })
        })
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    pub heat: Vec<HeatPoint>,
    pub markers: Vec<MapMarker>,
    pub summary: HeatSummary,
    pub bounds: Option<BoundingBox>,
}

/// Route function name constant for map data
pub const GET_MAP_DATA: &str = "get_map_data";
