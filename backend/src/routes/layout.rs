//! Request/response types for the stateless layout endpoints.

use serde::{Deserialize, Serialize};

use crate::algorithms::{HeatPoint, HeatSummary, Interval, LocatedItem};
use crate::state::{ViewAction, ViewState};

/// Interval as sent by clients. Either bound may be missing or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalInput {
    pub id: String,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
}

impl IntervalInput {
    pub fn to_interval(&self, fallback: f64) -> Interval {
        Interval::from_optional(self.id.clone(), self.start, self.end, fallback)
    }
}

impl From<Interval> for IntervalInput {
    fn from(interval: Interval) -> Self {
        Self {
            id: interval.id,
            start: Some(interval.start),
            end: Some(interval.end),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackRowsRequest {
    pub intervals: Vec<IntervalInput>,
    /// Minimum spacing between intervals sharing a row, in interval units.
    #[serde(default)]
    pub gap: f64,
    /// Position of intervals with no usable bound.
    #[serde(default)]
    pub fallback: f64,
}

impl PackRowsRequest {
    pub fn intervals(&self) -> Vec<Interval> {
        self.intervals
            .iter()
            .map(|i| i.to_interval(self.fallback))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatRequest {
    pub points: Vec<LocatedItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatResponse {
    pub points: Vec<HeatPoint>,
    pub summary: HeatSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReduceRequest {
    #[serde(default)]
    pub state: ViewState,
    pub action: ViewAction,
}

pub const PACK_ROWS: &str = "pack_rows";
pub const AGGREGATE_HEAT: &str = "aggregate_heat";
pub const REDUCE_VIEW_STATE: &str = "reduce_view_state";
