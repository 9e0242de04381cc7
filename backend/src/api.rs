//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::landing::DatasetInfo;
pub use crate::routes::layout::HeatRequest;
pub use crate::routes::layout::HeatResponse;
pub use crate::routes::layout::{IntervalInput, PackRowsRequest};
pub use crate::routes::layout::ReduceRequest;
pub use crate::routes::map::BoundingBox;
pub use crate::routes::map::MapData;
pub use crate::routes::map::MapMarker;
pub use crate::routes::search::SearchHit;
pub use crate::routes::search::SearchKind;
pub use crate::routes::search::SearchQuery;
pub use crate::routes::timeline::Band;
pub use crate::routes::timeline::Chip;
pub use crate::routes::timeline::LayoutDiagnostics;
pub use crate::routes::timeline::Marker;
pub use crate::routes::timeline::MarkerKind;
pub use crate::routes::timeline::MarkerLane;
pub use crate::routes::timeline::TimelineLayout;

pub use crate::algorithms::{HeatPoint, HeatSummary, Interval, LocatedItem, RowAssignment};
pub use crate::models::{ContentCounts, ContentSet, Figure, MacroEra, Movement, Work, YearSpan};
pub use crate::parsing::NormalizationReport;
pub use crate::state::{ViewAction, ViewMode, ViewState};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dataset identifier (repository key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DatasetId(pub i64);

impl DatasetId {
    pub fn new(value: i64) -> Self {
        DatasetId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for DatasetId {
    fn from(value: i64) -> Self {
        DatasetId(value)
    }
}
