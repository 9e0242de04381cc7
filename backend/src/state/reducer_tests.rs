use super::*;
use crate::state::view::{MAX_PX_PER_YEAR, MIN_PX_PER_YEAR};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn base() -> ViewState {
    ViewState {
        view_start: 1800.0,
        px_per_year: 4.0,
        viewport_width_px: 800.0,
        ..ViewState::default()
    }
}

#[test]
fn test_pan_moves_view_start_by_years() {
    let next = reduce(base(), ViewAction::Pan { delta_px: 40.0 });
    assert!(approx(next.view_start, 1790.0));

    let back = reduce(next, ViewAction::Pan { delta_px: -40.0 });
    assert!(approx(back.view_start, 1800.0));
}

#[test]
fn test_zoom_keeps_anchor_year_fixed() {
    let state = base();
    let anchor_px = 300.0;
    let anchor_year = state.px_to_year(anchor_px);

    let zoomed = reduce(
        state,
        ViewAction::Zoom {
            factor: 2.5,
            anchor_px,
        },
    );
    assert!(approx(zoomed.px_per_year, 10.0));
    assert!(approx(zoomed.px_to_year(anchor_px), anchor_year));

    let out = reduce(
        zoomed,
        ViewAction::Zoom {
            factor: 0.25,
            anchor_px,
        },
    );
    assert!(approx(out.px_to_year(anchor_px), anchor_year));
}

#[test]
fn test_zoom_clamps_density() {
    let tight = reduce(
        base(),
        ViewAction::Zoom {
            factor: 1e9,
            anchor_px: 0.0,
        },
    );
    assert_eq!(tight.px_per_year, MAX_PX_PER_YEAR);

    let wide = reduce(
        base(),
        ViewAction::Zoom {
            factor: 1e-9,
            anchor_px: 0.0,
        },
    );
    assert_eq!(wide.px_per_year, MIN_PX_PER_YEAR);
    // anchor at the left edge: view_start does not move
    assert!(approx(wide.view_start, 1800.0));
}

#[test]
fn test_invalid_numbers_leave_state_unchanged() {
    let state = base();
    let actions = vec![
        ViewAction::Pan { delta_px: f64::NAN },
        ViewAction::Pan {
            delta_px: f64::INFINITY,
        },
        ViewAction::Zoom {
            factor: 0.0,
            anchor_px: 10.0,
        },
        ViewAction::Zoom {
            factor: -2.0,
            anchor_px: 10.0,
        },
        ViewAction::Zoom {
            factor: 2.0,
            anchor_px: f64::NAN,
        },
        ViewAction::Resize { width_px: 0.0 },
        ViewAction::Resize {
            width_px: f64::NEG_INFINITY,
        },
        ViewAction::FocusSpan {
            start: f64::NAN,
            end: 1900.0,
        },
    ];
    for action in actions {
        assert_eq!(reduce(state.clone(), action.clone()), state, "{:?}", action);
    }
}

#[test]
fn test_toggle_expanded_collapses_previous() {
    let state = reduce(
        base(),
        ViewAction::ToggleExpanded {
            movement_id: "bauhaus".to_string(),
        },
    );
    assert_eq!(state.expanded_movement.as_deref(), Some("bauhaus"));

    let state = reduce(
        state,
        ViewAction::ToggleExpanded {
            movement_id: "de-stijl".to_string(),
        },
    );
    assert_eq!(state.expanded_movement.as_deref(), Some("de-stijl"));

    let state = reduce(
        state,
        ViewAction::ToggleExpanded {
            movement_id: "de-stijl".to_string(),
        },
    );
    assert_eq!(state.expanded_movement, None);
}

#[test]
fn test_macro_filter_toggle_and_clear() {
    let state = reduce(
        base(),
        ViewAction::ToggleMacroFilter {
            macro_id: "modern".to_string(),
        },
    );
    let state = reduce(
        state,
        ViewAction::ToggleMacroFilter {
            macro_id: "gothic".to_string(),
        },
    );
    assert_eq!(state.macro_filter.len(), 2);

    let state = reduce(
        state,
        ViewAction::ToggleMacroFilter {
            macro_id: "modern".to_string(),
        },
    );
    assert!(state.macro_filter.contains("gothic"));
    assert!(!state.macro_filter.contains("modern"));

    let state = reduce(
        state,
        ViewAction::SetSearch {
            query: "villa".to_string(),
        },
    );
    let state = reduce(
        state,
        ViewAction::SetYearRange {
            range: Some((1900, 1950)),
        },
    );
    assert!(state.has_filters());

    let cleared = reduce(state, ViewAction::ClearFilters);
    assert!(!cleared.has_filters());
    assert!(cleared.macro_filter.is_empty());
    assert_eq!(cleared.search, "");
}

#[test]
fn test_year_range_bounds_are_sorted() {
    let state = reduce(
        base(),
        ViewAction::SetYearRange {
            range: Some((1950, -200)),
        },
    );
    assert_eq!(state.year_range, Some((-200, 1950)));

    let state = reduce(state, ViewAction::SetYearRange { range: None });
    assert_eq!(state.year_range, None);
}

#[test]
fn test_hover_select_and_mode() {
    let state = reduce(
        base(),
        ViewAction::Hover {
            id: "w1".to_string(),
        },
    );
    let state = reduce(
        state,
        ViewAction::Select {
            id: "w2".to_string(),
        },
    );
    let state = reduce(
        state,
        ViewAction::SetMode {
            mode: ViewMode::Map,
        },
    );
    assert_eq!(state.hovered.as_deref(), Some("w1"));
    assert_eq!(state.selected.as_deref(), Some("w2"));
    assert_eq!(state.mode, ViewMode::Map);

    let state = reduce(state, ViewAction::Unhover);
    let state = reduce(state, ViewAction::ClearSelection);
    assert_eq!(state.hovered, None);
    assert_eq!(state.selected, None);
}

#[test]
fn test_focus_span_fits_with_margin() {
    let state = reduce(
        base(),
        ViewAction::FocusSpan {
            start: 1919.0,
            end: 1933.0,
        },
    );
    // 14 years plus 5% on each side across 800 px
    let expected_density = 800.0 / (14.0 * 1.1);
    assert!(approx(state.px_per_year, expected_density));
    assert!(approx(state.px_to_year(400.0), 1926.0));
    assert!(state.view_start < 1919.0);
    assert!(state.view_end() > 1933.0);
}

#[test]
fn test_focus_span_reversed_and_point() {
    let reversed = reduce(
        base(),
        ViewAction::FocusSpan {
            start: 1933.0,
            end: 1919.0,
        },
    );
    let forward = reduce(
        base(),
        ViewAction::FocusSpan {
            start: 1919.0,
            end: 1933.0,
        },
    );
    assert_eq!(reversed, forward);

    let point = reduce(
        base(),
        ViewAction::FocusSpan {
            start: 1929.0,
            end: 1929.0,
        },
    );
    assert!(point.px_per_year <= MAX_PX_PER_YEAR);
    assert!(approx(point.px_to_year(400.0), 1929.0));
}

#[test]
fn test_resize_changes_view_end() {
    let state = reduce(base(), ViewAction::Resize { width_px: 1600.0 });
    assert_eq!(state.viewport_width_px, 1600.0);
    assert!(approx(state.view_end(), 2200.0));
}

#[test]
fn test_action_json_shape() {
    let action: ViewAction =
        serde_json::from_str(r#"{"type":"zoom","factor":2.0,"anchor_px":120.0}"#).unwrap();
    assert_eq!(
        action,
        ViewAction::Zoom {
            factor: 2.0,
            anchor_px: 120.0
        }
    );

    let action: ViewAction =
        serde_json::from_str(r#"{"type":"set_year_range","range":[1800,1700]}"#).unwrap();
    let state = reduce(base(), action);
    assert_eq!(state.year_range, Some((1700, 1800)));

    let action: ViewAction = serde_json::from_str(r#"{"type":"clear_filters"}"#).unwrap();
    assert_eq!(action, ViewAction::ClearFilters);
}

#[test]
fn test_partial_state_json_uses_defaults() {
    let state: ViewState = serde_json::from_str(r#"{"px_per_year": 8.0}"#).unwrap();
    assert_eq!(state.px_per_year, 8.0);
    assert_eq!(state.mode, ViewMode::Timeline);
    assert_eq!(state.viewport_width_px, ViewState::default().viewport_width_px);
}
