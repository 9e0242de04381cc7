//! Timeline layout types.

use serde::{Deserialize, Serialize};

use crate::models::YearSpan;

/// One movement on a band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chip {
    pub id: String,
    pub name: String,
    pub span: YearSpan,
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub visible: bool,
    pub hovered: bool,
    pub selected: bool,
    pub expanded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Work,
    Figure,
}

/// A work or figure drawn under its expanded movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub kind: MarkerKind,
    pub name: String,
    pub start: f64,
    pub end: f64,
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub visible: bool,
    pub hovered: bool,
    pub selected: bool,
}

/// Marker lane for the expanded movement, placed under the band's chips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLane {
    pub movement_id: String,
    pub y: f64,
    pub height: f64,
    pub row_count: usize,
    pub markers: Vec<Marker>,
}

/// One macro era (or the unassigned group) with its chips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<YearSpan>,
    pub y: f64,
    pub height: f64,
    pub row_count: usize,
    pub visible: bool,
    pub hovered: bool,
    pub selected: bool,
    pub chips: Vec<Chip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markers: Option<MarkerLane>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDiagnostics {
    pub chip_count: usize,
    pub visible_chip_count: usize,
    pub marker_count: usize,
    /// Largest row count of any band.
    pub max_band_rows: usize,
    /// Largest clique of mutually overlapping chips in any band. Equals
    /// `max_band_rows` when packing is optimal.
    pub max_overlap: usize,
    /// Year gap the chips were packed with.
    pub chip_gap_years: f64,
    pub marker_gap_years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub bands: Vec<Band>,
    pub total_height: f64,
    /// `(view_start, view_end)` in years.
    pub visible_year_range: (f64, f64),
    pub px_per_year: f64,
    pub diagnostics: LayoutDiagnostics,
}

/// Route function name constant for the timeline layout
pub const GET_TIMELINE_LAYOUT: &str = "get_timeline_layout";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&MarkerKind::Figure).unwrap(),
            "\"figure\""
        );
    }

    #[test]
    fn test_band_skips_missing_optionals() {
        let band = Band {
            id: "unassigned".to_string(),
            name: "Unassigned".to_string(),
            color: None,
            span: None,
            y: 0.0,
            height: 32.0,
            row_count: 0,
            visible: false,
            hovered: false,
            selected: false,
            chips: vec![],
            markers: None,
        };
        let json = serde_json::to_value(&band).unwrap();
        assert!(json.get("color").is_none());
        assert!(json.get("markers").is_none());
        assert_eq!(json["height"], 32.0);
    }

    #[test]
    fn test_const_value() {
        assert_eq!(GET_TIMELINE_LAYOUT, "get_timeline_layout");
    }
}
