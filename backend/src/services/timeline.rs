//! Timeline layout: macro bands, movement chips and the expanded movement's
//! work/figure markers.
//!
//! Horizontal positions follow the view (`x = (year - view_start) * px_per_year`).
//! Rows come from [`pack_rows`] in the time domain: pixel spacing is
//! converted to years at the current zoom, so chips keep the same visual gap
//! at every zoom level. Items outside the viewport are laid out anyway and
//! flagged `visible: false`, so rows do not shuffle while panning.

use serde::{Deserialize, Serialize};

use crate::algorithms::{max_overlap, pack_rows_with_fallback, Interval, RowAssignment};
use crate::api::{Band, Chip, LayoutDiagnostics, Marker, MarkerKind, MarkerLane, TimelineLayout};
use crate::models::{ContentSet, Movement, YearSpan};
use crate::services::search::{filter_content, ContentFilter};
use crate::state::{ViewState, DEFAULT_PX_PER_YEAR, DEFAULT_VIEWPORT_WIDTH_PX};

/// Id of the synthetic band holding movements without a (known) macro era.
pub const UNASSIGNED_BAND_ID: &str = "unassigned";

/// Pixel metrics of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub chip_row_height: f64,
    /// Horizontal space kept between chips sharing a row.
    pub chip_gap_px: f64,
    pub min_chip_px: f64,
    pub marker_row_height: f64,
    pub marker_gap_px: f64,
    pub band_header_height: f64,
    pub band_padding: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            chip_row_height: 28.0,
            chip_gap_px: 8.0,
            min_chip_px: 6.0,
            marker_row_height: 18.0,
            marker_gap_px: 10.0,
            band_header_height: 22.0,
            band_padding: 10.0,
        }
    }
}

impl LayoutSettings {
    /// Year distance equivalent to `px` at the given density.
    pub fn px_to_years(px: f64, px_per_year: f64) -> f64 {
        if px.is_finite() && px > 0.0 {
            px / px_per_year
        } else {
            0.0
        }
    }
}

/// Viewport numbers with unusable values replaced.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    start: f64,
    px_per_year: f64,
    width_px: f64,
}

impl Viewport {
    fn from_view(view: &ViewState) -> Self {
        let px_per_year = if view.px_per_year.is_finite() && view.px_per_year > 0.0 {
            ViewState::clamp_px_per_year(view.px_per_year)
        } else {
            DEFAULT_PX_PER_YEAR
        };
        let width_px = if view.viewport_width_px.is_finite() && view.viewport_width_px > 0.0 {
            view.viewport_width_px
        } else {
            DEFAULT_VIEWPORT_WIDTH_PX
        };
        Self {
            start: if view.view_start.is_finite() {
                view.view_start
            } else {
                0.0
            },
            px_per_year,
            width_px,
        }
    }

    fn end(&self) -> f64 {
        self.start + self.width_px / self.px_per_year
    }

    fn x(&self, year: f64) -> f64 {
        (year - self.start) * self.px_per_year
    }

    fn shows(&self, start: f64, end: f64) -> bool {
        end >= self.start && start <= self.end()
    }
}

/// Compute the full timeline layout for `content` under `view`.
///
/// The view's filters are applied first. Never fails: unusable view numbers
/// fall back to defaults.
pub fn compute_timeline_layout(
    content: &ContentSet,
    view: &ViewState,
    settings: &LayoutSettings,
) -> TimelineLayout {
    let filtered = filter_content(content, &ContentFilter::from_view(view));
    let viewport = Viewport::from_view(view);
    let chip_gap = LayoutSettings::px_to_years(settings.chip_gap_px, viewport.px_per_year);
    let marker_gap = LayoutSettings::px_to_years(settings.marker_gap_px, viewport.px_per_year);

    let mut groups: Vec<BandGroup> = {
        let mut macros: Vec<_> = filtered.macros.iter().collect();
        macros.sort_by_key(|m| m.span.start);
        macros
            .into_iter()
            .map(|era| BandGroup {
                id: era.id.clone(),
                name: era.name.clone(),
                color: era.color.clone(),
                span: Some(era.span),
                movements: filtered.movements_in_macro(&era.id).collect(),
            })
            .collect()
    };
    let unassigned: Vec<&Movement> = filtered
        .movements
        .iter()
        .filter(|m| {
            m.macro_id
                .as_deref()
                .map_or(true, |id| filtered.macro_by_id(id).is_none())
        })
        .collect();
    if !unassigned.is_empty() {
        groups.push(BandGroup {
            id: UNASSIGNED_BAND_ID.to_string(),
            name: "Unassigned".to_string(),
            color: None,
            span: unassigned
                .iter()
                .map(|m| m.span)
                .reduce(|acc, span| acc.union(&span)),
            movements: unassigned,
        });
    }

    let mut diagnostics = LayoutDiagnostics {
        chip_gap_years: chip_gap,
        marker_gap_years: marker_gap,
        ..Default::default()
    };
    let mut bands = Vec::with_capacity(groups.len());
    let mut y = 0.0;

    for group in groups {
        let intervals: Vec<Interval> = group
            .movements
            .iter()
            .map(|m| Interval::new(m.id.clone(), m.span.start as f64, m.span.end as f64))
            .collect();
        let assignment = pack_rows_with_fallback(&intervals, chip_gap, viewport.start);
        let rows_top = y + settings.band_header_height;

        let chips: Vec<Chip> = group
            .movements
            .iter()
            .zip(&assignment.placements)
            .map(|(m, placement)| {
                let (start, end) = (m.span.start as f64, m.span.end as f64);
                Chip {
                    id: m.id.clone(),
                    name: m.name.clone(),
                    span: m.span,
                    row: placement.row,
                    x: viewport.x(start),
                    y: rows_top + placement.row as f64 * settings.chip_row_height,
                    width: ((end - start) * viewport.px_per_year).max(settings.min_chip_px),
                    height: settings.chip_row_height,
                    visible: viewport.shows(start, end),
                    hovered: view.hovered.as_deref() == Some(m.id.as_str()),
                    selected: view.selected.as_deref() == Some(m.id.as_str()),
                    expanded: view.expanded_movement.as_deref() == Some(m.id.as_str()),
                }
            })
            .collect();

        let chips_bottom = rows_top + assignment.row_count as f64 * settings.chip_row_height;
        let markers = group
            .movements
            .iter()
            .find(|m| view.expanded_movement.as_deref() == Some(m.id.as_str()))
            .map(|m| {
                build_marker_lane(&filtered, m, view, &viewport, settings, marker_gap, chips_bottom)
            });
        let lane_height = markers.as_ref().map_or(0.0, |lane| lane.height);
        let height = settings.band_header_height
            + assignment.row_count as f64 * settings.chip_row_height
            + lane_height
            + settings.band_padding;

        diagnostics.chip_count += chips.len();
        diagnostics.visible_chip_count += chips.iter().filter(|c| c.visible).count();
        diagnostics.marker_count += markers.as_ref().map_or(0, |lane| lane.markers.len());
        diagnostics.max_band_rows = diagnostics.max_band_rows.max(assignment.row_count);
        diagnostics.max_overlap = diagnostics
            .max_overlap
            .max(max_overlap(&intervals, chip_gap));

        let band_visible = chips.iter().any(|c| c.visible)
            || group
                .span
                .is_some_and(|s| viewport.shows(s.start as f64, s.end as f64));
        bands.push(Band {
            hovered: view.hovered.as_deref() == Some(group.id.as_str()),
            selected: view.selected.as_deref() == Some(group.id.as_str()),
            id: group.id,
            name: group.name,
            color: group.color,
            span: group.span,
            y,
            height,
            row_count: assignment.row_count,
            visible: band_visible,
            chips,
            markers,
        });
        y += height;
    }

    log::debug!(
        "timeline layout: {} bands, {} chips ({} visible), {} markers",
        bands.len(),
        diagnostics.chip_count,
        diagnostics.visible_chip_count,
        diagnostics.marker_count
    );

    TimelineLayout {
        bands,
        total_height: y,
        visible_year_range: (viewport.start, viewport.end()),
        px_per_year: viewport.px_per_year,
        diagnostics,
    }
}

struct BandGroup<'a> {
    id: String,
    name: String,
    color: Option<String>,
    span: Option<YearSpan>,
    movements: Vec<&'a Movement>,
}

/// Marker intervals for a movement: its works, then its figures.
///
/// Works use their span or year. Figures use `born..died`. Anything undated
/// sits at the movement's start year.
pub fn marker_intervals(content: &ContentSet, movement: &Movement) -> Vec<(MarkerKind, String, Interval)> {
    let fallback = movement.span.start as f64;
    let works = content.works_for_movement(&movement.id).map(|w| {
        let span = w.time_span();
        (
            MarkerKind::Work,
            w.name.clone(),
            Interval::from_optional(
                w.id.clone(),
                span.map(|s| s.start as f64),
                span.map(|s| s.end as f64),
                fallback,
            ),
        )
    });
    let figures = content.figures_for_movement(&movement.id).map(|f| {
        (
            MarkerKind::Figure,
            f.name.clone(),
            Interval::from_optional(
                f.id.clone(),
                f.born.map(f64::from),
                f.died.map(f64::from),
                fallback,
            ),
        )
    });
    works.chain(figures).collect()
}

fn build_marker_lane(
    content: &ContentSet,
    movement: &Movement,
    view: &ViewState,
    viewport: &Viewport,
    settings: &LayoutSettings,
    gap: f64,
    top: f64,
) -> MarkerLane {
    let entries = marker_intervals(content, movement);
    let intervals: Vec<Interval> = entries.iter().map(|(_, _, i)| i.clone()).collect();
    let assignment: RowAssignment =
        pack_rows_with_fallback(&intervals, gap, movement.span.start as f64);

    let markers = entries
        .into_iter()
        .zip(&assignment.placements)
        .map(|((kind, name, interval), placement)| Marker {
            hovered: view.hovered.as_deref() == Some(interval.id.as_str()),
            selected: view.selected.as_deref() == Some(interval.id.as_str()),
            kind,
            name,
            row: placement.row,
            x: viewport.x(interval.start),
            y: top + placement.row as f64 * settings.marker_row_height,
            width: ((interval.end - interval.start) * viewport.px_per_year).max(0.0),
            visible: viewport.shows(interval.start, interval.end),
            start: interval.start,
            end: interval.end,
            id: interval.id,
        })
        .collect();

    MarkerLane {
        movement_id: movement.id.clone(),
        y: top,
        height: assignment.row_count as f64 * settings.marker_row_height,
        row_count: assignment.row_count,
        markers,
    }
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod timeline_tests;
