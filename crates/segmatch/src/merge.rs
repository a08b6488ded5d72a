use crate::Interval;

/// Collapses possibly-overlapping intervals into disjoint ones ordered by start.
/// Intervals that touch at a bound are merged.
pub fn merge_intervals(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by(|a, b| a.start().partial_cmp(&b.start()).unwrap_or(std::cmp::Ordering::Equal));

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for iv in sorted {
        match merged.last_mut() {
            Some(last) if iv.start() <= last.end() => {
                if iv.end() > last.end() {
                    *last = Interval { start: last.start(), end: iv.end() };
                }
            }
            _ => merged.push(iv),
        }
    }
    merged
}

/// Total length covered by the union of `intervals`.
pub fn union_len(intervals: &[Interval]) -> f64 {
    merge_intervals(intervals).iter().map(Interval::len).sum()
}
