//! Repository implementations module.
//!
//! - `local`: In-memory implementation, also the target of snapshot preloads
pub mod local;

pub use local::LocalRepository;
