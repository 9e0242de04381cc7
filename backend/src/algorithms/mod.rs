//! Layout and aggregation kernels.
//!
//! Both kernels are pure functions of their input: no I/O, no shared state,
//! cheap enough to recompute on every pan, zoom or filter change.

pub mod heat;
pub mod row_packing;

pub use heat::{
    aggregate_heat, aggregate_heat_buckets, aggregate_heat_with, HeatBucket, HeatPoint,
    HeatSummary, LocatedItem,
};
pub use row_packing::{
    max_overlap, pack_rows, pack_rows_with_fallback, Interval, Placement, RowAssignment,
};
