//! Normalization of raw content-store documents.
//!
//! Documents exported from the headless CMS are loosely shaped: the same
//! concept appears under different field names (`startYear` / `start` /
//! `from`), years arrive as numbers or strings, references come as
//! `{ "_ref": .. }` objects, bare strings or arrays of either, and drafts sit
//! next to their published versions. This module turns that into the strict
//! records of [`crate::models`]. Nothing past this boundary sees raw JSON.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

use super::error::{ContentLoadError, Result};
use crate::models::{ContentCounts, ContentSet, Figure, MacroEra, Movement, Work, YearSpan};

const DRAFT_PREFIX: &str = "drafts.";

const START_KEYS: &[&str] = &["startYear", "start", "yearStart", "from"];
const END_KEYS: &[&str] = &["endYear", "end", "yearEnd", "to"];
const WORK_YEAR_KEYS: &[&str] = &["year", "completed", "completionYear", "date"];
const BORN_KEYS: &[&str] = &["born", "birthYear", "birth"];
const DIED_KEYS: &[&str] = &["died", "deathYear", "death"];
const MACRO_REF_KEYS: &[&str] = &["macro", "macroMovement", "parent", "era"];
const MOVEMENT_REF_KEYS: &[&str] = &["movements", "movement", "styles"];
const FIGURE_REF_KEYS: &[&str] = &["figures", "architects", "architect"];
const DESCRIPTION_KEYS: &[&str] = &["description", "summary", "bio", "body"];

/// Kind of content-store document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Macro,
    Movement,
    Work,
    Figure,
}

impl DocumentKind {
    /// Map a `_type` value to a kind. Unknown types yield `None`.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "macromovement" | "macro" | "era" | "macroera" => Some(Self::Macro),
            "movement" | "childmovement" | "style" => Some(Self::Movement),
            "work" | "building" | "project" => Some(Self::Work),
            "figure" | "architect" | "person" => Some(Self::Figure),
            _ => None,
        }
    }
}

/// A document the normalizer could not use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub id: Option<String>,
    pub doc_type: Option<String>,
    pub reason: String,
}

/// What happened during normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationReport {
    pub input_count: usize,
    pub accepted: ContentCounts,
    pub skipped: Vec<SkippedDocument>,
    /// Drafts dropped because a published version exists.
    pub drafts_superseded: usize,
}

/// Normalized content plus its report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedContent {
    pub content: ContentSet,
    pub report: NormalizationReport,
}

/// Normalize raw documents into a [`ContentSet`].
///
/// Never fails: unusable documents are recorded in the report and skipped.
pub fn normalize_documents(docs: &[Value]) -> NormalizedContent {
    let published: HashSet<String> = docs
        .iter()
        .filter_map(document_id)
        .filter(|id| !id.starts_with(DRAFT_PREFIX))
        .collect();

    let mut out = NormalizedContent::default();
    out.report.input_count = docs.len();
    let mut seen: HashSet<(DocumentKind, String)> = HashSet::new();

    for doc in docs {
        let raw_type = document_type(doc);
        let skip = |reason: &str, id: Option<String>| SkippedDocument {
            id,
            doc_type: raw_type.clone(),
            reason: reason.to_string(),
        };

        if !doc.is_object() {
            out.report.skipped.push(skip("not an object", None));
            continue;
        }

        let Some(raw_id) = document_id(doc) else {
            out.report.skipped.push(skip("missing id", None));
            continue;
        };

        let id = match raw_id.strip_prefix(DRAFT_PREFIX) {
            Some(base) if published.contains(base) => {
                out.report.drafts_superseded += 1;
                continue;
            }
            Some(base) => base.to_string(),
            None => raw_id.clone(),
        };

        let Some(kind) = raw_type.as_deref().and_then(DocumentKind::from_type_name) else {
            out.report
                .skipped
                .push(skip("unknown document type", Some(id)));
            continue;
        };

        if !seen.insert((kind, id.clone())) {
            out.report.skipped.push(skip("duplicate id", Some(id)));
            continue;
        }

        let result = match kind {
            DocumentKind::Macro => {
                normalize_macro(&id, doc).map(|m| out.content.macros.push(m))
            }
            DocumentKind::Movement => {
                normalize_movement(&id, doc).map(|m| out.content.movements.push(m))
            }
            DocumentKind::Work => {
                out.content.works.push(normalize_work(&id, doc));
                Ok(())
            }
            DocumentKind::Figure => {
                out.content.figures.push(normalize_figure(&id, doc));
                Ok(())
            }
        };

        if let Err(reason) = result {
            out.report.skipped.push(skip(reason, Some(id)));
        }
    }

    for skipped in &out.report.skipped {
        warn!(
            "Skipped content document id={:?} type={:?}: {}",
            skipped.id, skipped.doc_type, skipped.reason
        );
    }
    out.report.accepted = out.content.counts();
    debug!(
        "Normalized {} documents into {:?}",
        out.report.input_count, out.report.accepted
    );
    out
}

/// Parse a JSON string of raw documents.
///
/// Accepts a top-level array, or an object carrying the array under
/// `documents` (export files) or `result` (query API responses).
pub fn load_content_from_json_str(json: &str) -> Result<NormalizedContent> {
    let value: Value = serde_json::from_str(json)?;
    let docs = extract_documents(value)?;
    Ok(normalize_documents(&docs))
}

/// Read and normalize a file of raw documents.
pub fn load_content_from_file<P: AsRef<Path>>(path: P) -> Result<NormalizedContent> {
    let json = read_file(path.as_ref())?;
    load_content_from_json_str(&json)
}

/// Parse an already normalized [`ContentSet`] snapshot.
///
/// This format is strict; errors name the offending field path.
pub fn load_snapshot_from_json_str(json: &str) -> Result<ContentSet> {
    let mut de = serde_json::Deserializer::from_str(json);
    let content: ContentSet = serde_path_to_error::deserialize(&mut de)?;
    de.end()?;
    Ok(content)
}

/// Load a file that holds either a normalized snapshot or raw documents.
///
/// A top-level object with any of `macros`, `movements`, `works` or
/// `figures` is treated as a snapshot.
pub fn load_any_from_file<P: AsRef<Path>>(path: P) -> Result<NormalizedContent> {
    let json = read_file(path.as_ref())?;
    let value: Value = serde_json::from_str(&json)?;

    let is_snapshot = value.as_object().is_some_and(|obj| {
        ["macros", "movements", "works", "figures"]
            .iter()
            .any(|k| obj.contains_key(*k))
    });

    if is_snapshot {
        let content = load_snapshot_from_json_str(&json)?;
        let counts = content.counts();
        let total = counts.macros + counts.movements + counts.works + counts.figures;
        Ok(NormalizedContent {
            content,
            report: NormalizationReport {
                input_count: total,
                accepted: counts,
                ..Default::default()
            },
        })
    } else {
        let docs = extract_documents(value)?;
        Ok(normalize_documents(&docs))
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn extract_documents(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(docs) => Ok(docs),
        Value::Object(mut obj) => {
            for key in ["documents", "result"] {
                match obj.remove(key) {
                    Some(Value::Array(docs)) => return Ok(docs),
                    Some(_) => {
                        return Err(ContentLoadError::Shape(format!(
                            "`{}` must be an array of documents",
                            key
                        )))
                    }
                    None => {}
                }
            }
            Err(ContentLoadError::Shape(
                "expected an array or an object with `documents` or `result`".to_string(),
            ))
        }
        other => Err(ContentLoadError::Shape(format!(
            "expected an array of documents, found {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ==================== Per-kind normalization ====================

fn normalize_macro(id: &str, doc: &Value) -> std::result::Result<MacroEra, &'static str> {
    let span = span_field(doc).ok_or("missing start year")?;
    Ok(MacroEra {
        id: id.to_string(),
        name: name_field(doc, id),
        span,
        color: color_field(doc),
        description: text_field(doc, DESCRIPTION_KEYS),
    })
}

fn normalize_movement(id: &str, doc: &Value) -> std::result::Result<Movement, &'static str> {
    let span = span_field(doc).ok_or("missing start year")?;
    Ok(Movement {
        id: id.to_string(),
        name: name_field(doc, id),
        macro_id: refs_field(doc, MACRO_REF_KEYS).into_iter().next(),
        span,
        description: text_field(doc, DESCRIPTION_KEYS),
        image_url: image_field(doc),
    })
}

fn normalize_work(id: &str, doc: &Value) -> Work {
    let start = year_field(doc, START_KEYS);
    let span = start.map(|s| YearSpan::new(s, year_field(doc, END_KEYS).unwrap_or(s)));
    Work {
        id: id.to_string(),
        name: name_field(doc, id),
        movement_ids: refs_field(doc, MOVEMENT_REF_KEYS),
        figure_ids: refs_field(doc, FIGURE_REF_KEYS),
        year: year_field(doc, WORK_YEAR_KEYS),
        span,
        location: location_field(doc),
        description: text_field(doc, DESCRIPTION_KEYS),
        image_url: image_field(doc),
    }
}

fn normalize_figure(id: &str, doc: &Value) -> Figure {
    Figure {
        id: id.to_string(),
        name: name_field(doc, id),
        movement_ids: refs_field(doc, MOVEMENT_REF_KEYS),
        born: year_field(doc, BORN_KEYS),
        died: year_field(doc, DIED_KEYS),
        location: location_field(doc),
        description: text_field(doc, DESCRIPTION_KEYS),
    }
}

// ==================== Field extraction ====================

fn document_id(doc: &Value) -> Option<String> {
    text_field(doc, &["_id", "id"]).or_else(|| {
        doc.pointer("/slug/current")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

fn document_type(doc: &Value) -> Option<String> {
    text_field(doc, &["_type", "type"])
}

fn name_field(doc: &Value, id: &str) -> String {
    text_field(doc, &["name", "title"]).unwrap_or_else(|| id.to_string())
}

fn span_field(doc: &Value) -> Option<YearSpan> {
    let start = year_field(doc, START_KEYS)?;
    let end = year_field(doc, END_KEYS).unwrap_or(start);
    Some(YearSpan::new(start, end))
}

/// First non-blank text among `keys`. Portable-text block arrays are flattened.
fn text_field(doc: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| doc.get(*k))
        .find_map(plain_text)
}

fn plain_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(blocks) => blocks
            .iter()
            .filter_map(|block| block.get("children").and_then(Value::as_array))
            .map(|children| {
                children
                    .iter()
                    .filter_map(|c| c.get("text").and_then(Value::as_str))
                    .collect::<String>()
            })
            .filter(|paragraph| !paragraph.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    };
    (!text.is_empty()).then_some(text)
}

/// First parseable year among `keys`.
fn year_field(doc: &Value, keys: &[&str]) -> Option<i32> {
    keys.iter()
        .filter_map(|k| doc.get(*k))
        .find_map(parse_year)
}

/// Accepts numbers, numeric strings, era suffixes ("450 BCE", "1200 AD") and
/// ISO-like dates ("1931-07-01").
pub fn parse_year(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_f64().and_then(year_from_f64),
        Value::String(s) => parse_year_str(s),
        _ => None,
    }
}

fn year_from_f64(v: f64) -> Option<i32> {
    (v.is_finite() && v.abs() <= i32::MAX as f64).then(|| v.round() as i32)
}

fn parse_year_str(raw: &str) -> Option<i32> {
    let s = raw.trim().to_ascii_uppercase();
    if s.is_empty() {
        return None;
    }

    let (body, sign) = if let Some(body) = s.strip_suffix("BCE").or_else(|| s.strip_suffix("BC")) {
        (body.trim_end().trim_end_matches('.').trim(), -1)
    } else if let Some(body) = s.strip_suffix("CE").or_else(|| s.strip_suffix("AD")) {
        (body.trim_end().trim_end_matches('.').trim(), 1)
    } else if let Some(body) = s.strip_prefix("AD") {
        (body.trim(), 1)
    } else {
        (s.as_str(), 1)
    };

    if let Ok(year) = body.parse::<i32>() {
        return year.checked_mul(sign);
    }
    if let Some(year) = body.parse::<f64>().ok().and_then(year_from_f64) {
        return year.checked_mul(sign);
    }

    // "1931-07-01" or "-0450-01-01": take the leading year component
    let (negative, rest) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    let leading = rest.split(['-', 'T', ' ']).next()?;
    if leading.is_empty() || !leading.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = leading.parse::<i32>().ok()?;
    let year = if negative { year.checked_neg()? } else { year };
    year.checked_mul(sign)
}

/// Location chain: `location` → `city, country` → `city` → `country`.
fn location_field(doc: &Value) -> Option<String> {
    if let Some(location) = doc.get("location") {
        let text = match location {
            Value::Object(_) => text_field(location, &["name", "title", "city"]),
            other => plain_text(other),
        };
        if text.is_some() {
            return text;
        }
    }

    let city = text_field(doc, &["city"]);
    let country = text_field(doc, &["country"]);
    match (city, country) {
        (Some(city), Some(country)) => Some(format!("{}, {}", city, country)),
        (Some(city), None) => Some(city),
        (None, Some(country)) => Some(country),
        (None, None) => text_field(doc, &["birthplace", "place"]),
    }
}

/// Referenced ids across `keys`, in order, without duplicates.
fn refs_field(doc: &Value, keys: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for key in keys {
        let Some(value) = doc.get(*key) else {
            continue;
        };
        let items: Vec<&Value> = match value {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };
        for item in items {
            if let Some(id) = reference_id(item) {
                if !out.contains(&id) {
                    out.push(id);
                }
            }
        }
    }
    out
}

fn reference_id(value: &Value) -> Option<String> {
    let raw = match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(obj) => obj
            .get("_ref")
            .or_else(|| obj.get("_id"))
            .and_then(Value::as_str),
        _ => None,
    }?;
    let id = raw.trim();
    let id = id.strip_prefix(DRAFT_PREFIX).unwrap_or(id);
    (!id.is_empty()).then(|| id.to_string())
}

fn image_field(doc: &Value) -> Option<String> {
    ["/imageUrl", "/image", "/image/url", "/image/asset/url", "/mainImage/asset/url"]
        .iter()
        .filter_map(|p| doc.pointer(p))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn color_field(doc: &Value) -> Option<String> {
    ["/color", "/color/hex", "/colour"]
        .iter()
        .filter_map(|p| doc.pointer(p))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "content_json_tests.rs"]
mod content_json_tests;
