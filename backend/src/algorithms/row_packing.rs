//! Greedy row assignment for overlapping time intervals.
//!
//! The timeline lays child movements inside a macro band, and works/figures
//! inside an expanded movement, on parallel horizontal tracks. This module
//! assigns each interval a 0-based row so that intervals sharing a row never
//! collide.
//!
//! # Algorithm
//!
//! 1. Stable sort by `start` (ties keep input order).
//! 2. Keep one frontier per row: `end + gap` of the last interval placed there.
//! 3. Place each interval in the first row whose frontier is `<= start`,
//!    opening a new row when none fits.
//!
//! Sorting by start makes first-fit optimal for interval graphs: the row
//! count never exceeds [`max_overlap`] for the same input and gap.
//!
//! The gap is expressed in the same units as the intervals. Callers working
//! in pixel space convert their spacing before packing (see
//! [`crate::services::timeline`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A time-ranged item to be placed on a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub id: String,
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(id: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            id: id.into(),
            start,
            end,
        }
    }

    /// Zero-width interval for a point event.
    pub fn point(id: impl Into<String>, at: f64) -> Self {
        Self::new(id, at, at)
    }

    /// Build an interval from possibly missing bounds.
    ///
    /// A missing start takes the end, and failing that `fallback`. A missing
    /// end takes the start. Non-finite values count as missing.
    pub fn from_optional(
        id: impl Into<String>,
        start: Option<f64>,
        end: Option<f64>,
        fallback: f64,
    ) -> Self {
        let start = start.filter(|v| v.is_finite());
        let end = end.filter(|v| v.is_finite());
        let s = start.or(end).unwrap_or(fallback);
        let e = end.unwrap_or(s);
        Self::new(id, s, e)
    }

    /// Replace non-finite bounds so ordering and comparisons stay total.
    fn sanitized(&self, fallback: f64) -> (f64, f64) {
        let start = if self.start.is_finite() {
            self.start
        } else if self.end.is_finite() {
            self.end
        } else {
            fallback
        };
        let end = if self.end.is_finite() { self.end } else { start };
        (start, end)
    }
}

/// Row chosen for one interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub id: String,
    pub row: usize,
}

/// Result of a packing pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowAssignment {
    /// Interval id to row index. If ids repeat, the later placement wins here;
    /// `placements` still has every entry.
    pub row_of: BTreeMap<String, usize>,
    pub row_count: usize,
    /// Rows in input order, one per input interval.
    pub placements: Vec<Placement>,
}

impl RowAssignment {
    pub fn row_of(&self, id: &str) -> Option<usize> {
        self.row_of.get(id).copied()
    }

    /// Ids grouped per row, each group in placement (start) order.
    pub fn rows(&self, intervals: &[Interval]) -> Vec<Vec<String>> {
        let mut order: Vec<usize> = (0..self.placements.len()).collect();
        order.sort_by(|&a, &b| {
            let sa = intervals.get(a).map_or(0.0, |i| i.sanitized(0.0).0);
            let sb = intervals.get(b).map_or(0.0, |i| i.sanitized(0.0).0);
            sa.total_cmp(&sb)
        });

        let mut rows = vec![Vec::new(); self.row_count];
        for idx in order {
            let placement = &self.placements[idx];
            rows[placement.row].push(placement.id.clone());
        }
        rows
    }
}

/// Pack intervals onto rows using greedy earliest-fit.
///
/// Never fails. Non-finite bounds are resolved as in
/// [`Interval::from_optional`] with a fallback of `0.0`. A negative or NaN gap is
/// treated as `0.0`.
pub fn pack_rows(intervals: &[Interval], gap: f64) -> RowAssignment {
    pack_rows_with_fallback(intervals, gap, 0.0)
}

/// [`pack_rows`] with a caller-supplied position for intervals whose bounds are unusable.
pub fn pack_rows_with_fallback(intervals: &[Interval], gap: f64, fallback: f64) -> RowAssignment {
    let gap = sanitize_gap(gap);
    let bounds: Vec<(f64, f64)> = intervals.iter().map(|i| i.sanitized(fallback)).collect();

    let mut order: Vec<usize> = (0..intervals.len()).collect();
    // sort_by is stable, ties keep input order
    order.sort_by(|&a, &b| bounds[a].0.total_cmp(&bounds[b].0));

    let mut frontiers: Vec<f64> = Vec::new();
    let mut rows = vec![0usize; intervals.len()];

    for idx in order {
        let (start, end) = bounds[idx];
        let row = match frontiers.iter().position(|&frontier| frontier <= start) {
            Some(row) => row,
            None => {
                frontiers.push(f64::NEG_INFINITY);
                frontiers.len() - 1
            }
        };
        frontiers[row] = end + gap;
        rows[idx] = row;
    }

    let mut row_of = BTreeMap::new();
    let mut placements = Vec::with_capacity(intervals.len());
    for (interval, &row) in intervals.iter().zip(rows.iter()) {
        row_of.insert(interval.id.clone(), row);
        placements.push(Placement {
            id: interval.id.clone(),
            row,
        });
    }

    RowAssignment {
        row_of,
        row_count: frontiers.len(),
        placements,
    }
}

/// Largest number of intervals occupying a single instant.
///
/// An interval occupies `[start, end + gap)` and always at least its own
/// start, so point events count at the instant they happen. `pack_rows`
/// never uses more rows than this. The two are equal unless zero-length
/// intervals meet with no gap, since those may share a row.
pub fn max_overlap(intervals: &[Interval], gap: f64) -> usize {
    let gap = sanitize_gap(gap);
    let bounds: Vec<(f64, f64)> = intervals.iter().map(|i| i.sanitized(0.0)).collect();

    bounds
        .iter()
        .map(|&(t, _)| {
            bounds
                .iter()
                .filter(|&&(start, end)| start <= t && (t < end + gap || t == start))
                .count()
        })
        .max()
        .unwrap_or(0)
}

fn sanitize_gap(gap: f64) -> f64 {
    if gap.is_finite() && gap > 0.0 {
        gap
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "row_packing_tests.rs"]
mod row_packing_tests;
