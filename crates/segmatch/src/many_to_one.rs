use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::ChildOrder;
use crate::iou::{mean, score_interval_iou};
use crate::Interval;

/// Child intervals bucketed under parent intervals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment<K> {
    /// Mean IoU over the assigned child -> parent pairs, 0.0 when nothing was placed.
    pub score: f64,
    /// Every parent key, mapped to its (possibly empty) list of child keys.
    pub assignment: BTreeMap<K, Vec<K>>,
}

impl<K> Assignment<K> {
    /// Number of children that were placed under some parent.
    pub fn pairs(&self) -> usize {
        self.assignment.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy)]
struct Pair {
    child: usize,
    parent: usize,
    score: f64,
}

/// Assigns each child to at most one parent, several children per parent.
///
/// Pairs are visited by descending IoU. Pass 1 places a child under the parent
/// of the first pair whose parent holds no child overlapping it. Pass 2 walks
/// the children still unplaced, in key order, through their candidate parents
/// by descending score and takes the first conflict-free one. Children that
/// share no overlap with any parent, or fit nowhere, are left out.
///
/// Child lists are ordered by key.
pub fn match_children_to_parents<K>(
    parents: &BTreeMap<K, Interval>,
    children: &BTreeMap<K, Interval>,
) -> Assignment<K>
where
    K: Ord + Clone + Debug,
{
    match_children_above(parents, children, 0.0, ChildOrder::Key)
}

pub(crate) fn match_children_above<K>(
    parents: &BTreeMap<K, Interval>,
    children: &BTreeMap<K, Interval>,
    min_iou: f64,
    order: ChildOrder,
) -> Assignment<K>
where
    K: Ord + Clone + Debug,
{
    let ps: Vec<(&K, &Interval)> = parents.iter().collect();
    let cs: Vec<(&K, &Interval)> = children.iter().collect();

    let mut pairs = Vec::with_capacity(cs.len() * ps.len());
    for (ci, (_, c)) in cs.iter().enumerate() {
        for (pi, (_, p)) in ps.iter().enumerate() {
            let score = score_interval_iou(c, p);
            trace!("match: child {:?} parent {:?} {:.4}", cs[ci].0, ps[pi].0, score);
            pairs.push(Pair { child: ci, parent: pi, score });
        }
    }
    // stable: equal scores keep child-major key order
    pairs.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    pairs.retain(|p| p.score > min_iou);

    let mut placed: Vec<Option<f64>> = vec![None; cs.len()];
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); ps.len()];

    let fits = |bucket: &[usize], child: usize| bucket.iter().all(|&o| !cs[child].1.overlaps(cs[o].1));

    for pair in &pairs {
        if placed[pair.child].is_some() {
            continue;
        }
        if fits(&buckets[pair.parent], pair.child) {
            buckets[pair.parent].push(pair.child);
            placed[pair.child] = Some(pair.score);
        }
    }

    let mut rescued = 0usize;
    for ci in 0..cs.len() {
        if placed[ci].is_some() {
            continue;
        }
        let slot = pairs
            .iter()
            .filter(|p| p.child == ci)
            .find(|p| fits(&buckets[p.parent], ci))
            .copied();
        if let Some(pair) = slot {
            buckets[pair.parent].push(ci);
            placed[ci] = Some(pair.score);
            rescued += 1;
        }
    }

    let scores: Vec<f64> = placed.iter().flatten().copied().collect();
    let score = mean(&scores);
    debug!(
        "match: placed {}/{} child(ren) ({} in backfill), mean iou={:.4}",
        scores.len(),
        cs.len(),
        rescued,
        score
    );

    let assignment = ps
        .iter()
        .zip(buckets)
        .map(|((pk, _), mut bucket)| {
            match order {
                ChildOrder::Key => bucket.sort_unstable(),
                ChildOrder::Start => bucket.sort_by(|&a, &b| {
                    cs[a].1
                        .start()
                        .partial_cmp(&cs[b].1.start())
                        .unwrap_or(Ordering::Equal)
                        .then(a.cmp(&b))
                }),
            }
            let keys: Vec<K> = bucket.into_iter().map(|ci| cs[ci].0.clone()).collect();
            ((*pk).clone(), keys)
        })
        .collect();

    Assignment { score, assignment }
}
