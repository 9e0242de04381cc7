//! Normalized content records.
//!
//! These are the strict shapes produced by [`crate::parsing::content_json`].
//! Everything downstream of the normalization boundary (layout, search,
//! heat aggregation) works only with these types.

use serde::{Deserialize, Serialize};

use super::year::YearSpan;

/// Top-level historical period grouping several child movements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroEra {
    pub id: String,
    pub name: String,
    pub span: YearSpan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Named architectural style nested under a macro era.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macro_id: Option<String>,
    pub span: YearSpan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A building or architectural project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub movement_ids: Vec<String>,
    #[serde(default)]
    pub figure_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<YearSpan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Work {
    /// Time extent of the work: explicit span first, then the completion year.
    pub fn time_span(&self) -> Option<YearSpan> {
        self.span.or_else(|| self.year.map(YearSpan::point))
    }
}

/// An architect, theorist or other person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub movement_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub born: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub died: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Figure {
    /// Lifetime span. A living figure (or unknown death year) collapses to the birth year.
    pub fn life_span(&self) -> Option<YearSpan> {
        YearSpan::from_bounds(self.born, self.died)
    }
}

/// One normalized dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentSet {
    #[serde(default)]
    pub macros: Vec<MacroEra>,
    #[serde(default)]
    pub movements: Vec<Movement>,
    #[serde(default)]
    pub works: Vec<Work>,
    #[serde(default)]
    pub figures: Vec<Figure>,
}

/// Record counts of a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCounts {
    pub macros: usize,
    pub movements: usize,
    pub works: usize,
    pub figures: usize,
}

impl ContentSet {
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
            && self.movements.is_empty()
            && self.works.is_empty()
            && self.figures.is_empty()
    }

    pub fn counts(&self) -> ContentCounts {
        ContentCounts {
            macros: self.macros.len(),
            movements: self.movements.len(),
            works: self.works.len(),
            figures: self.figures.len(),
        }
    }

    pub fn macro_by_id(&self, id: &str) -> Option<&MacroEra> {
        self.macros.iter().find(|m| m.id == id)
    }

    pub fn movement_by_id(&self, id: &str) -> Option<&Movement> {
        self.movements.iter().find(|m| m.id == id)
    }

    /// Child movements of a macro era, in dataset order.
    pub fn movements_in_macro<'a>(
        &'a self,
        macro_id: &'a str,
    ) -> impl Iterator<Item = &'a Movement> + 'a {
        self.movements
            .iter()
            .filter(move |m| m.macro_id.as_deref() == Some(macro_id))
    }

    pub fn works_for_movement<'a>(
        &'a self,
        movement_id: &'a str,
    ) -> impl Iterator<Item = &'a Work> + 'a {
        self.works
            .iter()
            .filter(move |w| w.movement_ids.iter().any(|id| id == movement_id))
    }

    pub fn figures_for_movement<'a>(
        &'a self,
        movement_id: &'a str,
    ) -> impl Iterator<Item = &'a Figure> + 'a {
        self.figures
            .iter()
            .filter(move |f| f.movement_ids.iter().any(|id| id == movement_id))
    }

    /// Overall year extent across macros and movements.
    pub fn year_extent(&self) -> Option<YearSpan> {
        self.macros
            .iter()
            .map(|m| m.span)
            .chain(self.movements.iter().map(|m| m.span))
            .reduce(|acc, span| acc.union(&span))
    }
}
