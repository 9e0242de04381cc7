//! Pure state transitions for the browser view.
//!
//! `reduce` never fails and never touches anything but its arguments. An
//! action carrying unusable numbers (NaN, infinities, a non-positive zoom
//! factor or width) returns the state unchanged.

use serde::{Deserialize, Serialize};

use super::view::{ViewMode, ViewState};

/// Fraction of the focused span added on each side by [`ViewAction::FocusSpan`].
pub const FOCUS_MARGIN: f64 = 0.05;

/// Shortest span, in years, that [`ViewAction::FocusSpan`] will fit.
const MIN_FOCUS_SPAN_YEARS: f64 = 1.0;

/// User intent applied to a [`ViewState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewAction {
    /// Drag the timeline. Positive `delta_px` moves content to the right,
    /// revealing earlier years.
    Pan { delta_px: f64 },
    /// Multiply the pixel density, keeping the year under `anchor_px` fixed.
    Zoom { factor: f64, anchor_px: f64 },
    SetSearch { query: String },
    ToggleMacroFilter { macro_id: String },
    /// Clears search, macro filter and year range.
    ClearFilters,
    SetYearRange { range: Option<(i32, i32)> },
    /// Expand a movement, collapsing any other. Toggling the expanded one collapses it.
    ToggleExpanded { movement_id: String },
    Hover { id: String },
    Unhover,
    Select { id: String },
    ClearSelection,
    SetMode { mode: ViewMode },
    Resize { width_px: f64 },
    /// Fit `[start, end]` into the viewport with a small margin.
    FocusSpan { start: f64, end: f64 },
}

/// Apply `action` to `state`.
pub fn reduce(state: ViewState, action: ViewAction) -> ViewState {
    let mut next = state;
    match action {
        ViewAction::Pan { delta_px } => {
            if delta_px.is_finite() && usable_density(next.px_per_year) {
                next.view_start -= delta_px / next.px_per_year;
            }
        }
        ViewAction::Zoom { factor, anchor_px } => {
            if factor.is_finite()
                && factor > 0.0
                && anchor_px.is_finite()
                && usable_density(next.px_per_year)
            {
                let anchor_year = next.px_to_year(anchor_px);
                let px_per_year = ViewState::clamp_px_per_year(next.px_per_year * factor);
                next.px_per_year = px_per_year;
                next.view_start = anchor_year - anchor_px / px_per_year;
            }
        }
        ViewAction::SetSearch { query } => next.search = query,
        ViewAction::ToggleMacroFilter { macro_id } => {
            if !next.macro_filter.remove(&macro_id) {
                next.macro_filter.insert(macro_id);
            }
        }
        ViewAction::ClearFilters => {
            next.search.clear();
            next.macro_filter.clear();
            next.year_range = None;
        }
        ViewAction::SetYearRange { range } => {
            next.year_range = range.map(|(a, b)| (a.min(b), a.max(b)));
        }
        ViewAction::ToggleExpanded { movement_id } => {
            next.expanded_movement = match next.expanded_movement.take() {
                Some(current) if current == movement_id => None,
                _ => Some(movement_id),
            };
        }
        ViewAction::Hover { id } => next.hovered = Some(id),
        ViewAction::Unhover => next.hovered = None,
        ViewAction::Select { id } => next.selected = Some(id),
        ViewAction::ClearSelection => next.selected = None,
        ViewAction::SetMode { mode } => next.mode = mode,
        ViewAction::Resize { width_px } => {
            if width_px.is_finite() && width_px > 0.0 {
                next.viewport_width_px = width_px;
            }
        }
        ViewAction::FocusSpan { start, end } => {
            if start.is_finite()
                && end.is_finite()
                && next.viewport_width_px.is_finite()
                && next.viewport_width_px > 0.0
            {
                let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
                let span = (hi - lo).max(MIN_FOCUS_SPAN_YEARS);
                let padded = span * (1.0 + 2.0 * FOCUS_MARGIN);
                let px_per_year = ViewState::clamp_px_per_year(next.viewport_width_px / padded);
                let center = (lo + hi) / 2.0;
                next.px_per_year = px_per_year;
                next.view_start = center - next.viewport_width_px / px_per_year / 2.0;
            }
        }
    }
    next
}

fn usable_density(px_per_year: f64) -> bool {
    px_per_year.is_finite() && px_per_year > 0.0
}

#[cfg(test)]
#[path = "reducer_tests.rs"]
mod reducer_tests;
