//! Serializable view state and its reducer.
//!
//! The browser keeps one [`ViewState`] and replaces it with
//! `reduce(state, action)` on every interaction. Layout and map services take
//! the state as input and never modify it.

pub mod reducer;
pub mod view;

pub use reducer::{reduce, ViewAction, FOCUS_MARGIN};
pub use view::{
    ViewMode, ViewState, DEFAULT_PX_PER_YEAR, DEFAULT_VIEWPORT_WIDTH_PX, DEFAULT_VIEW_START,
    MAX_PX_PER_YEAR, MIN_PX_PER_YEAR,
};
