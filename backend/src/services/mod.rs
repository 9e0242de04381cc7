//! Service layer: view-dependent computations over a normalized dataset.
//!
//! Services are synchronous and pure. They take a [`crate::models::ContentSet`]
//! and a [`crate::state::ViewState`] and build the DTOs of [`crate::api`].
//! Persistence lives in [`crate::db`].

pub mod map;
pub mod search;
pub mod timeline;

pub use map::compute_map_data;
pub use search::{filter_content, search, ContentFilter};
pub use timeline::{compute_timeline_layout, marker_intervals, LayoutSettings, UNASSIGNED_BAND_ID};
