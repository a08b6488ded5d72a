use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::iou::{mean, score_group_iou};
use crate::Interval;

/// One-to-one pairing of reference groups to candidate groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correspondence<K> {
    /// Mean IoU over the pairs in `mapping`, 0.0 when nothing matched.
    pub score: f64,
    /// reference key -> candidate key; unmatched groups are absent.
    pub mapping: BTreeMap<K, K>,
}

impl<K> Correspondence<K> {
    pub fn pairs(&self) -> usize {
        self.mapping.len()
    }
}

/// Greedy "best global pair first" matching of whole label groups.
///
/// Each round takes the highest-scoring (candidate, reference) pair still
/// unmatched, records it and removes both sides, until no pair with a positive
/// score is left. Ties go to the first pair seen with candidates outer and
/// references inner, both in key order. This is not a maximum-weight bipartite
/// matching: an early greedy pick can lower the total reachable score.
///
/// `verbose` raises the per-pair score trace to `info` level.
pub fn match_groups_one_to_one<K>(
    reference: &BTreeMap<K, Vec<Interval>>,
    candidate: &BTreeMap<K, Vec<Interval>>,
    verbose: bool,
) -> Correspondence<K>
where
    K: Ord + Clone + Debug,
{
    match_groups_above(reference, candidate, 0.0, verbose)
}

/// As [`match_groups_one_to_one`], accepting only pairs scoring strictly above `min_iou`.
pub(crate) fn match_groups_above<K>(
    reference: &BTreeMap<K, Vec<Interval>>,
    candidate: &BTreeMap<K, Vec<Interval>>,
    min_iou: f64,
    verbose: bool,
) -> Correspondence<K>
where
    K: Ord + Clone + Debug,
{
    let refs: Vec<(&K, &Vec<Interval>)> = reference.iter().collect();
    let cands: Vec<(&K, &Vec<Interval>)> = candidate.iter().collect();

    // scores[ci][ri]; group IoU does not depend on what is still unmatched
    let scores: Vec<Vec<f64>> = cands
        .iter()
        .map(|(_, c)| refs.iter().map(|(_, r)| score_group_iou(c, r)).collect())
        .collect();

    let mut ref_left = vec![true; refs.len()];
    let mut cand_left = vec![true; cands.len()];
    let mut mapping = BTreeMap::new();
    let mut picked = Vec::new();

    loop {
        if verbose {
            info!("match: ---");
        }

        let mut best: Option<(usize, usize, f64)> = None;
        for ci in (0..cands.len()).filter(|&i| cand_left[i]) {
            for ri in (0..refs.len()).filter(|&i| ref_left[i]) {
                let s = scores[ci][ri];
                if verbose {
                    info!("match: {:?} {:?} {:.2}", refs[ri].0, cands[ci].0, s);
                } else {
                    trace!("match: {:?} {:?} {:.4}", refs[ri].0, cands[ci].0, s);
                }
                let floor = best.map_or(min_iou, |(_, _, b)| b);
                if s > floor {
                    best = Some((ci, ri, s));
                }
            }
        }

        let Some((ci, ri, s)) = best else { break };
        cand_left[ci] = false;
        ref_left[ri] = false;
        mapping.insert(refs[ri].0.clone(), cands[ci].0.clone());
        picked.push(s);
        debug!("match: paired {:?} -> {:?} iou={:.4}", refs[ri].0, cands[ci].0, s);
    }

    let score = mean(&picked);
    if verbose {
        info!("match: {:?} IoU: {:.4}", mapping, score);
    } else {
        debug!("match: {} pair(s), mean iou={:.4}", picked.len(), score);
    }
    Correspondence { score, mapping }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn group_set() -> impl Strategy<Value = BTreeMap<u8, Vec<Interval>>> {
        let interval = (0.0f64..50.0, 0.0f64..10.0).prop_map(|(s, w)| Interval::new(s, s + w).unwrap());
        prop::collection::btree_map(0u8..12, prop::collection::vec(interval, 0..4), 0..6)
    }

    proptest! {
        #[test]
        fn mapping_is_injective(reference in group_set(), candidate in group_set()) {
            let out = match_groups_one_to_one(&reference, &candidate, false);
            let values: BTreeSet<_> = out.mapping.values().collect();
            prop_assert_eq!(values.len(), out.mapping.len());
            prop_assert!(out.mapping.len() <= reference.len().min(candidate.len()));
            for (r, c) in &out.mapping {
                prop_assert!(reference.contains_key(r));
                prop_assert!(candidate.contains_key(c));
            }
            prop_assert!((0.0..=1.0).contains(&out.score));
        }
    }
}
