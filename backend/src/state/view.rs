use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Narrowest zoom: the whole of recorded architecture fits on a laptop screen.
pub const MIN_PX_PER_YEAR: f64 = 0.05;
/// Widest zoom: a single year spans a few hundred pixels.
pub const MAX_PX_PER_YEAR: f64 = 400.0;
pub const DEFAULT_PX_PER_YEAR: f64 = 2.0;
pub const DEFAULT_VIEW_START: f64 = -500.0;
pub const DEFAULT_VIEWPORT_WIDTH_PX: f64 = 1280.0;

/// Which surface the browser is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Timeline,
    Map,
}

/// Everything the browser needs to render one frame.
///
/// Missing fields deserialize to their defaults, so clients may send a
/// partial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub mode: ViewMode,
    /// Year at the left edge of the viewport.
    pub view_start: f64,
    pub px_per_year: f64,
    pub viewport_width_px: f64,
    pub search: String,
    /// Macro era ids. Empty means no macro filter.
    pub macro_filter: BTreeSet<String>,
    /// Inclusive year window, `(from, to)` with `from <= to`.
    pub year_range: Option<(i32, i32)>,
    pub expanded_movement: Option<String>,
    pub hovered: Option<String>,
    pub selected: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Timeline,
            view_start: DEFAULT_VIEW_START,
            px_per_year: DEFAULT_PX_PER_YEAR,
            viewport_width_px: DEFAULT_VIEWPORT_WIDTH_PX,
            search: String::new(),
            macro_filter: BTreeSet::new(),
            year_range: None,
            expanded_movement: None,
            hovered: None,
            selected: None,
        }
    }
}

impl ViewState {
    /// Horizontal pixel offset of `year` relative to the viewport's left edge.
    pub fn year_to_px(&self, year: f64) -> f64 {
        (year - self.view_start) * self.px_per_year
    }

    /// Inverse of [`ViewState::year_to_px`].
    pub fn px_to_year(&self, px: f64) -> f64 {
        self.view_start + px / self.px_per_year
    }

    /// Year at the right edge of the viewport.
    pub fn view_end(&self) -> f64 {
        self.px_to_year(self.viewport_width_px)
    }

    /// Whether any search, macro or year filter is active.
    pub fn has_filters(&self) -> bool {
        !self.search.trim().is_empty() || !self.macro_filter.is_empty() || self.year_range.is_some()
    }

    /// Pixel density clamped into the supported zoom range.
    pub fn clamp_px_per_year(px_per_year: f64) -> f64 {
        px_per_year.clamp(MIN_PX_PER_YEAR, MAX_PX_PER_YEAR)
    }
}
