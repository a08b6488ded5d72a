use std::collections::BTreeMap;
use std::fmt::Debug;

use tracing::warn;

use crate::Interval;

/// Keys of non-empty groups made only of zero-length intervals.
/// Such a group scores 0.0 against every other group.
pub fn degenerate_groups<K>(set: &BTreeMap<K, Vec<Interval>>) -> Vec<K>
where
    K: Ord + Clone + Debug,
{
    let keys: Vec<K> = set
        .iter()
        .filter(|(_, g)| !g.is_empty() && g.iter().all(Interval::is_degenerate))
        .map(|(k, _)| k.clone())
        .collect();
    for k in &keys {
        warn!("validate: group {:?} has only zero-length intervals", k);
    }
    keys
}

/// Keys of zero-length intervals in a parent or child set.
pub fn degenerate_intervals<K>(set: &BTreeMap<K, Interval>) -> Vec<K>
where
    K: Ord + Clone + Debug,
{
    let keys: Vec<K> = set
        .iter()
        .filter(|(_, iv)| iv.is_degenerate())
        .map(|(k, _)| k.clone())
        .collect();
    for k in &keys {
        warn!("validate: interval {:?} has zero length", k);
    }
    keys
}

/// Flags groups on either side that cannot take part in a meaningful match.
/// Empty groups are reported too: two empty groups score 1.0 against each other.
/// Returns how many groups were flagged.
pub fn check_inputs<K>(reference: &BTreeMap<K, Vec<Interval>>, candidate: &BTreeMap<K, Vec<Interval>>) -> usize
where
    K: Ord + Clone + Debug,
{
    let mut flagged = 0;
    for (side, set) in [("reference", reference), ("candidate", candidate)] {
        flagged += degenerate_groups(set).len();
        for k in set.iter().filter(|(_, g)| g.is_empty()).map(|(k, _)| k) {
            warn!("validate: {} group {:?} is empty", side, k);
            flagged += 1;
        }
    }
    flagged
}
