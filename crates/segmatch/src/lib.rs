//! Interval matching engine: IoU scoring between labeled time intervals and
//! greedy correspondence between a reference and a candidate label set.

mod error;
pub mod config;
pub mod iou;
pub mod many_to_one;
pub mod merge;
pub mod one_to_one;
pub mod validate;

use serde::{Deserialize, Serialize};

pub use config::{ChildOrder, MatchConfig, Matcher};
pub use error::{Error, Result};
pub use iou::{score_group_iou, score_interval_iou};
pub use many_to_one::{match_children_to_parents, Assignment};
pub use merge::merge_intervals;
pub use one_to_one::{match_groups_one_to_one, Correspondence};

/// A closed span `[start, end]` on a numeric time axis.
///
/// Bounds and length are finite and bounds are never inverted. `start == end`
/// is allowed and yields a zero-length (degenerate) interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Interval {
    start: f64,
    end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(Error::NonFiniteBound { start, end });
        }
        if start > end {
            return Err(Error::InvertedInterval { start, end });
        }
        if !(end - start).is_finite() {
            return Err(Error::UnboundedLength { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f64 { self.start }

    pub fn end(&self) -> f64 { self.end }

    pub fn len(&self) -> f64 { self.end - self.start }

    pub fn is_degenerate(&self) -> bool { self.start == self.end }

    pub fn is_empty(&self) -> bool { self.is_degenerate() }

    /// Half-open overlap test: intervals that only touch at a bound do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn intersection_len(&self, other: &Interval) -> f64 {
        let lo = self.start.max(other.start);
        let hi = self.end.min(other.end);
        (hi - lo).max(0.0)
    }
}

impl TryFrom<(f64, f64)> for Interval {
    type Error = Error;

    fn try_from((start, end): (f64, f64)) -> Result<Self> {
        Interval::new(start, end)
    }
}

impl From<Interval> for (f64, f64) {
    fn from(iv: Interval) -> Self {
        (iv.start, iv.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_and_non_finite_bounds() {
        assert!(matches!(Interval::new(5.0, 1.0), Err(Error::InvertedInterval { .. })));
        assert!(matches!(Interval::new(f64::NAN, 1.0), Err(Error::NonFiniteBound { .. })));
        assert!(matches!(Interval::new(0.0, f64::INFINITY), Err(Error::NonFiniteBound { .. })));
    }

    #[test]
    fn rejects_length_that_overflows() {
        assert!(matches!(Interval::new(-1e308, 1e308), Err(Error::UnboundedLength { .. })));
        assert!(matches!(Interval::new(-f64::MAX, f64::MAX), Err(Error::UnboundedLength { .. })));

        let wide = Interval::new(-8e307, 8e307).unwrap();
        assert!(wide.len().is_finite());
        assert_eq!(crate::score_interval_iou(&wide, &wide), 1.0);
    }

    #[test]
    fn degenerate_interval_is_allowed() {
        let iv = Interval::new(3.0, 3.0).unwrap();
        assert!(iv.is_degenerate());
        assert!(iv.is_empty());
        assert!(!Interval::new(3.0, 4.0).unwrap().is_empty());
        assert_eq!(iv.len(), 0.0);
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let a = Interval::new(2.0, 8.0).unwrap();
        let b = Interval::new(8.0, 11.0).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert_eq!(a.intersection_len(&b), 0.0);

        let c = Interval::new(7.0, 9.0).unwrap();
        assert!(a.overlaps(&c));
        assert_eq!(a.intersection_len(&c), 1.0);
    }

    #[test]
    fn serde_uses_tuple_form_and_validates() {
        let iv: Interval = serde_json::from_str("[1.0, 4.5]").unwrap();
        assert_eq!((iv.start(), iv.end()), (1.0, 4.5));
        assert_eq!(serde_json::to_string(&iv).unwrap(), "[1.0,4.5]");

        let err = serde_json::from_str::<Interval>("[4.0, 1.0]").unwrap_err();
        assert!(err.to_string().contains("inverted"));
    }
}
