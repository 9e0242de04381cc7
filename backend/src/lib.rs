//! # Architecture Timeline Backend
//!
//! Computational back end of an architecture-history browser.
//!
//! The browser shows macro eras as horizontal bands, movements as chips on
//! non-overlapping rows, and an expanded movement's works and figures as
//! markers below its chips. A map view shows where works were built as a
//! heat overlay.
//!
//! ## Features
//!
//! - **Row packing**: greedy earliest-fit assignment of intervals to rows
//! - **Heat aggregation**: free-text locations resolved through a gazetteer
//!   and bucketed by coordinate
//! - **Content loading**: raw content-store documents normalized into typed records
//! - **View state**: a serializable state with a pure reducer
//! - **Views**: timeline layout, map data, filtering and search
//! - **HTTP API**: RESTful endpoints for the browser
//!
//! ## Architecture
//!
//! - [`algorithms`]: the row-packing and heat kernels
//! - [`geo`]: the gazetteer
//! - [`models`]: normalized records
//! - [`parsing`]: raw document normalization and snapshot loading
//! - [`state`]: view state and reducer
//! - [`services`]: timeline layout, map data and search
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`routes`]: Route-specific data types
//! - [`db`]: repository pattern and dataset storage
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod algorithms;
pub mod api;
pub mod geo;
pub mod models;
pub mod parsing;
pub mod state;

pub mod db;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
