//! Search types.

use serde::{Deserialize, Serialize};

use crate::models::YearSpan;

/// Record kind of a search hit. Declaration order is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Macro,
    Movement,
    Figure,
    Work,
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub kind: SearchKind,
    pub id: String,
    pub name: String,
    /// 3 exact name, 2 name prefix, 1 name substring, 0 description/location.
    pub score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<YearSpan>,
}

/// Query string of the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

pub const DEFAULT_SEARCH_LIMIT: usize = 20;
pub const MAX_SEARCH_LIMIT: usize = 200;

/// Route function name constant for search
pub const SEARCH_CONTENT: &str = "search_content";
