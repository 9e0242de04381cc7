use serde::{Deserialize, Serialize};

/// Inclusive span of calendar years. Negative values are BCE.
///
/// Deserializing goes through [`YearSpan::new`], so reversed bounds in a
/// snapshot are swapped like any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawYearSpan")]
pub struct YearSpan {
    pub start: i32,
    pub end: i32,
}

#[derive(Deserialize)]
struct RawYearSpan {
    start: i32,
    end: i32,
}

impl From<RawYearSpan> for YearSpan {
    fn from(raw: RawYearSpan) -> Self {
        YearSpan::new(raw.start, raw.end)
    }
}

impl YearSpan {
    /// Create a span, swapping the bounds if they arrive reversed.
    pub fn new(start: i32, end: i32) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Degenerate span for a point event.
    pub fn point(year: i32) -> Self {
        Self {
            start: year,
            end: year,
        }
    }

    /// Span from optional bounds. A missing end collapses to the start.
    pub fn from_bounds(start: Option<i32>, end: Option<i32>) -> Option<Self> {
        match (start, end) {
            (Some(s), Some(e)) => Some(Self::new(s, e)),
            (Some(s), None) => Some(Self::point(s)),
            (None, Some(e)) => Some(Self::point(e)),
            (None, None) => None,
        }
    }

    pub fn duration(&self) -> i32 {
        self.end.saturating_sub(self.start)
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Inclusive overlap test, so spans that share a boundary year overlap.
    pub fn overlaps(&self, other: &YearSpan) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Smallest span covering both.
    pub fn union(&self, other: &YearSpan) -> YearSpan {
        YearSpan {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl std::fmt::Display for YearSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn year(y: i32) -> String {
            if y < 0 {
                format!("{} BCE", y.unsigned_abs())
            } else {
                y.to_string()
            }
        }
        if self.start == self.end {
            write!(f, "{}", year(self.start))
        } else {
            write!(f, "{}–{}", year(self.start), year(self.end))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::YearSpan;

    #[test]
    fn test_new_swaps_reversed_bounds() {
        let span = YearSpan::new(1920, 1900);
        assert_eq!(span.start, 1900);
        assert_eq!(span.end, 1920);
    }

    #[test]
    fn test_from_bounds() {
        assert_eq!(
            YearSpan::from_bounds(Some(1919), Some(1933)),
            Some(YearSpan::new(1919, 1933))
        );
        assert_eq!(
            YearSpan::from_bounds(Some(1919), None),
            Some(YearSpan::point(1919))
        );
        assert_eq!(
            YearSpan::from_bounds(None, Some(1933)),
            Some(YearSpan::point(1933))
        );
        assert_eq!(YearSpan::from_bounds(None, None), None);
    }

    #[test]
    fn test_overlaps_is_inclusive() {
        let a = YearSpan::new(1900, 1920);
        let b = YearSpan::new(1920, 1940);
        let c = YearSpan::new(1921, 1940);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_union_and_contains() {
        let a = YearSpan::new(-500, -300);
        let b = YearSpan::new(-350, 100);
        let u = a.union(&b);
        assert_eq!(u, YearSpan::new(-500, 100));
        assert!(u.contains(0));
        assert_eq!(u.duration(), 600);
    }

    #[test]
    fn test_display_bce() {
        assert_eq!(YearSpan::new(-447, -432).to_string(), "447 BCE–432 BCE");
        assert_eq!(YearSpan::point(1929).to_string(), "1929");
        assert_eq!(YearSpan::point(i32::MIN).to_string(), "2147483648 BCE");
    }

    #[test]
    fn test_deserialize_swaps_reversed_bounds() {
        let span: YearSpan = serde_json::from_str(r#"{"start":1950,"end":1900}"#).unwrap();
        assert_eq!(span, YearSpan::new(1900, 1950));
        assert!(span.overlaps(&YearSpan::point(1920)));
    }

    #[test]
    fn test_extreme_bounds_do_not_overflow() {
        assert_eq!(YearSpan::new(i32::MIN, i32::MAX).duration(), i32::MAX);
    }
}
