//! Search and filtering over a normalized [`ContentSet`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::api::{SearchHit, SearchKind};
use crate::models::{ContentSet, YearSpan};
use crate::state::ViewState;

/// Filters derived from the view state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentFilter {
    /// Case-insensitive substring over name, description and location.
    pub query: String,
    /// Macro era ids. Empty means all.
    pub macro_ids: BTreeSet<String>,
    /// Inclusive year window.
    pub year_range: Option<(i32, i32)>,
}

impl ContentFilter {
    pub fn from_view(view: &ViewState) -> Self {
        Self {
            query: view.search.clone(),
            macro_ids: view.macro_filter.clone(),
            year_range: view.year_range,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.macro_ids.is_empty() && self.year_range.is_none()
    }

    fn macro_ok(&self, macro_id: Option<&str>) -> bool {
        self.macro_ids.is_empty() || macro_id.is_some_and(|id| self.macro_ids.contains(id))
    }

    fn year_ok(&self, span: Option<YearSpan>) -> bool {
        match (self.year_range, span) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some((from, to)), Some(span)) => span.overlaps(&YearSpan::new(from, to)),
        }
    }
}

/// Lowercased, trimmed query. `None` when blank.
fn normalized_query(query: &str) -> Option<String> {
    let q = query.trim().to_lowercase();
    (!q.is_empty()).then_some(q)
}

fn text_matches(q: &str, fields: &[Option<&str>]) -> bool {
    fields
        .iter()
        .flatten()
        .any(|text| text.to_lowercase().contains(q))
}

/// Apply `filter` and return the surviving records in their original order.
///
/// - A movement survives the macro filter when its macro is selected, and a
///   work or figure when any of its movements does.
/// - Undated works and figures inherit the year test from their movements.
/// - When the query matches a movement, its works and figures stay visible.
///   A movement or macro also stays visible when one of its descendants
///   matches, so matches keep their context.
pub fn filter_content(content: &ContentSet, filter: &ContentFilter) -> ContentSet {
    if filter.is_empty() {
        return content.clone();
    }
    let query = normalized_query(&filter.query);
    let query_ok = |fields: &[Option<&str>]| match &query {
        Some(q) => text_matches(q, fields),
        None => true,
    };

    // Movements passing the macro and year filters.
    let structural: HashSet<&str> = content
        .movements
        .iter()
        .filter(|m| filter.macro_ok(m.macro_id.as_deref()) && filter.year_ok(Some(m.span)))
        .map(|m| m.id.as_str())
        .collect();
    let query_movements: HashSet<&str> = content
        .movements
        .iter()
        .filter(|m| structural.contains(m.id.as_str()))
        .filter(|m| query_ok(&[Some(m.name.as_str()), m.description.as_deref()]))
        .map(|m| m.id.as_str())
        .collect();

    let known: HashSet<&str> = content.movements.iter().map(|m| m.id.as_str()).collect();

    let child_visible = |movement_ids: &[String], span: Option<YearSpan>, fields: &[Option<&str>]| {
        let known_ids: Vec<&str> = movement_ids
            .iter()
            .map(String::as_str)
            .filter(|id| known.contains(id))
            .collect();
        let linked: Vec<&str> = known_ids
            .iter()
            .copied()
            .filter(|id| structural.contains(id))
            .collect();
        // items tied to known movements follow them through the macro and year filters
        if !known_ids.is_empty() && linked.is_empty() {
            return false;
        }
        if known_ids.is_empty() && !filter.macro_ids.is_empty() {
            return false;
        }
        let dated_ok = match span {
            Some(_) => filter.year_ok(span),
            None => !linked.is_empty() || filter.year_range.is_none(),
        };
        dated_ok && (query_ok(fields) || linked.iter().any(|id| query_movements.contains(id)))
    };

    let works: Vec<_> = content
        .works
        .iter()
        .filter(|w| {
            child_visible(
                &w.movement_ids,
                w.time_span(),
                &[Some(w.name.as_str()), w.description.as_deref(), w.location.as_deref()],
            )
        })
        .cloned()
        .collect();
    let figures: Vec<_> = content
        .figures
        .iter()
        .filter(|f| {
            child_visible(
                &f.movement_ids,
                f.life_span(),
                &[Some(f.name.as_str()), f.description.as_deref(), f.location.as_deref()],
            )
        })
        .cloned()
        .collect();

    let with_visible_child: HashSet<&str> = works
        .iter()
        .flat_map(|w| w.movement_ids.iter())
        .chain(figures.iter().flat_map(|f| f.movement_ids.iter()))
        .map(String::as_str)
        .collect();
    let movements: Vec<_> = content
        .movements
        .iter()
        .filter(|m| {
            query_movements.contains(m.id.as_str())
                || (structural.contains(m.id.as_str())
                    && with_visible_child.contains(m.id.as_str()))
        })
        .cloned()
        .collect();

    let macros = content
        .macros
        .iter()
        .filter(|era| filter.macro_ok(Some(era.id.as_str())) && filter.year_ok(Some(era.span)))
        .filter(|era| {
            query_ok(&[Some(era.name.as_str()), era.description.as_deref()])
                || movements
                    .iter()
                    .any(|m| m.macro_id.as_deref() == Some(era.id.as_str()))
        })
        .cloned()
        .collect();

    ContentSet {
        macros,
        movements,
        works,
        figures,
    }
}

fn score(q: &str, name: &str, other: &[Option<&str>]) -> Option<u8> {
    let name = name.to_lowercase();
    if name == q {
        Some(3)
    } else if name.starts_with(q) {
        Some(2)
    } else if name.contains(q) {
        Some(1)
    } else if text_matches(q, other) {
        Some(0)
    } else {
        None
    }
}

/// Ranked search across every record kind. A blank query returns nothing.
pub fn search(content: &ContentSet, query: &str, limit: usize) -> Vec<SearchHit> {
    let Some(q) = normalized_query(query) else {
        return Vec::new();
    };

    let mut hits = Vec::new();
    let mut push = |kind, id: &str, name: &str, span, other: &[Option<&str>]| {
        if let Some(score) = score(&q, name, other) {
            hits.push(SearchHit {
                kind,
                id: id.to_string(),
                name: name.to_string(),
                score,
                span,
            });
        }
    };

    for era in &content.macros {
        push(
            SearchKind::Macro,
            &era.id,
            &era.name,
            Some(era.span),
            &[era.description.as_deref()],
        );
    }
    for m in &content.movements {
        push(
            SearchKind::Movement,
            &m.id,
            &m.name,
            Some(m.span),
            &[m.description.as_deref()],
        );
    }
    for f in &content.figures {
        push(
            SearchKind::Figure,
            &f.id,
            &f.name,
            f.life_span(),
            &[f.description.as_deref(), f.location.as_deref()],
        );
    }
    for w in &content.works {
        push(
            SearchKind::Work,
            &w.id,
            &w.name,
            w.time_span(),
            &[w.description.as_deref(), w.location.as_deref()],
        );
    }

    hits.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.kind.cmp(&b.kind))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.id.cmp(&b.id))
    });
    hits.truncate(limit);
    hits
}
