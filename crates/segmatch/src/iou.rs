use crate::merge::union_len;
use crate::Interval;

/// IoU of two single intervals, in `[0, 1]`.
///
/// Returns 0.0 when the intervals share no positive-length overlap, which also
/// covers the case of two degenerate intervals at the same point.
pub fn score_interval_iou(a: &Interval, b: &Interval) -> f64 {
    let inter = a.intersection_len(b);
    if inter <= 0.0 {
        return 0.0;
    }
    // overlapping, so the union is the hull
    let union = a.end().max(b.end()) - a.start().min(b.start());
    if union <= 0.0 { 0.0 } else { inter / union }
}

/// IoU of two interval collections.
///
/// The intersection is the sum of raw pairwise overlaps between the groups;
/// overlaps inside one group are not deduplicated first. The union is the
/// merged length of both groups together, so a group with internally
/// overlapping intervals can push the raw ratio above 1; the result is clamped.
/// A zero-length union scores 1.0 when both groups are empty and 0.0 otherwise.
pub fn score_group_iou(g1: &[Interval], g2: &[Interval]) -> f64 {
    let mut inter = 0.0;
    for a in g1 {
        for b in g2 {
            inter += a.intersection_len(b);
        }
    }

    let all: Vec<Interval> = g1.iter().chain(g2).copied().collect();
    let union = union_len(&all);

    if union <= 0.0 {
        return if g1.is_empty() && g2.is_empty() { 1.0 } else { 0.0 };
    }
    (inter / union).min(1.0)
}

/// Arithmetic mean of the accepted pair scores, 0.0 when there are none.
pub(crate) fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(s: f64, e: f64) -> Interval {
        Interval::new(s, e).unwrap()
    }

    #[test]
    fn identical_intervals_score_one() {
        assert_eq!(score_interval_iou(&iv(2.0, 11.0), &iv(2.0, 11.0)), 1.0);
    }

    #[test]
    fn partial_overlap() {
        // inter (2,4)=2, union (1,8)=7
        let s = score_interval_iou(&iv(2.0, 8.0), &iv(1.0, 4.0));
        assert!((s - 2.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn touching_and_degenerate_pairs_score_zero() {
        assert_eq!(score_interval_iou(&iv(1.0, 2.0), &iv(2.0, 11.0)), 0.0);
        assert_eq!(score_interval_iou(&iv(3.0, 3.0), &iv(3.0, 3.0)), 0.0);
        assert_eq!(score_interval_iou(&iv(3.0, 3.0), &iv(1.0, 5.0)), 0.0);
    }

    #[test]
    fn empty_groups() {
        assert_eq!(score_group_iou(&[], &[]), 1.0);
        assert_eq!(score_group_iou(&[], &[iv(1.0, 4.0)]), 0.0);
        assert_eq!(score_group_iou(&[iv(1.0, 4.0)], &[]), 0.0);
    }

    #[test]
    fn all_degenerate_groups_score_zero() {
        assert_eq!(score_group_iou(&[iv(2.0, 2.0)], &[iv(2.0, 2.0)]), 0.0);
    }

    #[test]
    fn self_overlapping_group_is_clamped() {
        // raw pairwise sum is 6 over a union of 3
        let g = [iv(0.0, 2.0), iv(1.0, 3.0)];
        assert_eq!(score_group_iou(&g, &g), 1.0);
    }

    #[test]
    fn split_prediction_covers_single_reference() {
        let reference = [iv(2.0, 11.0)];
        let candidate = [iv(2.0, 8.0), iv(8.0, 11.0)];
        assert_eq!(score_group_iou(&reference, &candidate), 1.0);
    }

    #[test]
    fn group_with_gap() {
        // inter 2+2+3 = 7, union (1,11) = 10
        let s = score_group_iou(&[iv(1.0, 4.0), iv(6.0, 11.0)], &[iv(2.0, 8.0), iv(8.0, 11.0)]);
        assert!((s - 0.7).abs() < 1e-12);
    }
}
