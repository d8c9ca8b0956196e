//! The minimality index proper.

use super::fingerprint::Fingerprint;
use indexmap::IndexSet;
use std::hash::Hash;

/// A set-like value that can be fingerprinted and compared for inclusion.
///
/// `is_subset_of` must agree with `fingerprint`: if `x.is_subset_of(y)`
/// then `x.fingerprint().covered_by(y.fingerprint())`.
pub trait ElementSet {
    fn fingerprint(&self) -> Fingerprint;

    fn is_subset_of(&self, other: &Self) -> bool;
}

impl<S: ElementSet + ?Sized> ElementSet for std::rc::Rc<S> {
    fn fingerprint(&self) -> Fingerprint {
        (**self).fingerprint()
    }

    fn is_subset_of(&self, other: &Self) -> bool {
        (**self).is_subset_of(other)
    }
}

impl<A: Hash + Eq> ElementSet for IndexSet<A> {
    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(self.iter())
    }

    fn is_subset_of(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|a| other.contains(a))
    }
}

/// Collection of sets supporting subset-minimality queries.
///
/// `is_minimal(s)` holds iff no stored set is a subset of `s` (equal sets
/// included). Stored fingerprints prune the scan: a stored `x` can only be
/// a subset of the candidate when `fingerprint(x)` is covered by the
/// candidate's fingerprint. The exact test is total, so false positives of
/// the prefilter cost time, never correctness.
#[derive(Debug, Clone)]
pub struct MinimalityIndex<S> {
    entries: Vec<(Fingerprint, S)>,
}

impl<S: ElementSet> MinimalityIndex<S> {
    pub fn new() -> Self {
        MinimalityIndex {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, set: S) {
        let fp = set.fingerprint();
        self.entries.push((fp, set));
    }

    pub fn is_minimal(&self, candidate: &S) -> bool {
        let fp = candidate.fingerprint();
        !self
            .entries
            .iter()
            .any(|(stored_fp, stored)| stored_fp.covered_by(fp) && stored.is_subset_of(candidate))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.entries.iter().map(|(_, s)| s)
    }
}

impl<S: ElementSet> Default for MinimalityIndex<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(elements: &[u32]) -> IndexSet<u32> {
        elements.iter().copied().collect()
    }

    #[test]
    fn empty_index_everything_minimal() {
        let index: MinimalityIndex<IndexSet<u32>> = MinimalityIndex::new();
        assert!(index.is_minimal(&set(&[])));
        assert!(index.is_minimal(&set(&[1, 2, 3])));
    }

    #[test]
    fn superset_not_minimal() {
        let mut index = MinimalityIndex::new();
        index.add(set(&[1, 2]));
        assert!(!index.is_minimal(&set(&[1, 2])));
        assert!(!index.is_minimal(&set(&[1, 2, 3])));
        assert!(index.is_minimal(&set(&[1])));
        assert!(index.is_minimal(&set(&[1, 3])));
    }

    #[test]
    fn stored_empty_set_dominates() {
        let mut index = MinimalityIndex::new();
        index.add(set(&[]));
        assert!(!index.is_minimal(&set(&[])));
        assert!(!index.is_minimal(&set(&[7])));
    }

    #[test]
    fn incomparable_sets_stay_minimal() {
        let mut index = MinimalityIndex::new();
        index.add(set(&[1, 2]));
        index.add(set(&[2, 3]));
        assert!(index.is_minimal(&set(&[1, 3])));
        assert!(!index.is_minimal(&set(&[2, 3, 4])));
    }

    proptest! {
        /// `is_minimal` agrees with a naive subset scan for arbitrary
        /// add/query interleavings, including hash-collision-heavy element
        /// ranges that stress the Bloom prefilter.
        #[test]
        fn matches_naive_subset_scan(
            stored in proptest::collection::vec(
                proptest::collection::hash_set(0u32..16, 0..6), 0..12),
            candidate in proptest::collection::hash_set(0u32..16, 0..6),
        ) {
            let mut index = MinimalityIndex::new();
            for s in &stored {
                index.add(s.iter().copied().collect::<IndexSet<u32>>());
            }
            let candidate: IndexSet<u32> = candidate.iter().copied().collect();
            let expected = !stored
                .iter()
                .any(|s| s.iter().all(|x| candidate.contains(x)));
            prop_assert_eq!(index.is_minimal(&candidate), expected);
        }
    }
}
