//! Bloom fingerprints over set elements.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// 64-bit Bloom fingerprint of a set: one bit per element hash.
///
/// If `X ⊆ S` then `fingerprint(X)` is covered by `fingerprint(S)`; the
/// converse does not hold, so a positive cover test must be followed by an
/// exact subset test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub const EMPTY: Fingerprint = Fingerprint(0);

    /// Fingerprint of a collection of hashable elements.
    pub fn of<T: Hash>(elements: impl IntoIterator<Item = T>) -> Self {
        let mut fp = Fingerprint::EMPTY;
        for element in elements {
            fp.insert(&element);
        }
        fp
    }

    /// Add one element to the fingerprint.
    pub fn insert<T: Hash + ?Sized>(&mut self, element: &T) {
        self.0 |= 1u64 << (element_hash(element) % 64);
    }

    /// Fingerprint of the union of the two underlying sets.
    pub fn union(self, other: Fingerprint) -> Fingerprint {
        Fingerprint(self.0 | other.0)
    }

    /// Necessary condition for "the set behind `self` is a subset of the
    /// set behind `other`".
    pub fn covered_by(self, other: Fingerprint) -> bool {
        self.0 & other.0 == self.0
    }
}

/// Deterministic element hash shared by all fingerprints.
///
/// `DefaultHasher::new()` uses fixed keys, so the same element maps to the
/// same bit in every set it occurs in. The per-instance random state of
/// `HashMap` would break this.
fn element_hash<T: Hash + ?Sized>(element: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    element.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_covered_by_everything() {
        let some = Fingerprint::of(["a", "b"]);
        assert!(Fingerprint::EMPTY.covered_by(some));
        assert!(Fingerprint::EMPTY.covered_by(Fingerprint::EMPTY));
    }

    #[test]
    fn subset_is_covered() {
        let small = Fingerprint::of(["a"]);
        let big = Fingerprint::of(["a", "b", "c"]);
        assert!(small.covered_by(big));
    }

    #[test]
    fn union_covers_both_sides() {
        let left = Fingerprint::of([1u32, 2]);
        let right = Fingerprint::of([3u32]);
        let both = left.union(right);
        assert!(left.covered_by(both));
        assert!(right.covered_by(both));
        assert_eq!(both, Fingerprint::of([1u32, 2, 3]));
    }

    #[test]
    fn same_element_same_bit() {
        assert_eq!(Fingerprint::of(["x"]), Fingerprint::of(["x"]));
    }
}
