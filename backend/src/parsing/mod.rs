//! Content loading: raw content-store documents and normalized snapshots.

pub mod content_json;
pub mod error;

pub use content_json::{
    load_any_from_file, load_content_from_file, load_content_from_json_str,
    load_snapshot_from_json_str, normalize_documents, parse_year, DocumentKind,
    NormalizationReport, NormalizedContent, SkippedDocument,
};
pub use error::{ContentLoadError, Result};
