//! Location resolution for the map view.

pub mod gazetteer;

pub use gazetteer::{Gazetteer, GazetteerEntry, GeoPoint, MatchKind, Resolution};
