//! Minimal-justification enumeration by goal-directed resolution.
//!
//! Given a goal conclusion, [`ResolutionEngine`] enumerates all
//! subset-minimal sets of axioms sufficient to derive the goal, in
//! non-decreasing priority order. Derived inferences are resolved against
//! each other on a selected literal, pruned by subsumption, and emitted
//! through a [`Listener`] as soon as an axiom-only derivation of the goal
//! survives all minimality checks.
//!
//! [`hitting_sets`] reduces minimal hitting sets of a set family to a
//! justification enumeration over a synthetic graph.

mod axioms;
mod derived;
pub mod hitting_sets;
mod priority;
mod resolution;
mod selection;

pub use axioms::{AxiomSet, AxiomSetView};
pub use derived::DerivedInference;
pub use hitting_sets::{minimal_hitting_sets, MinimalHittingSetEnumerator};
pub use priority::{KeyOrder, PriorityComparator, SizeOrder};
pub use resolution::{JustificationEnumerator, ResolutionEngine, ResolutionStats};
pub use selection::{
    BottomUpSelection, InferenceCounts, Selection, ThresholdSelection, TopDownSelection,
};

use crate::error::EnumeratorError;
use indexmap::IndexSet;
use std::hash::Hash;

/// Receiver of enumerated minimal subsets.
///
/// Called exactly once per minimal subset, in the enumeration order.
/// Listeners may read the set but must not call back into the engine that
/// invoked them.
pub trait Listener<E> {
    fn new_minimal_subset(&mut self, subset: &IndexSet<E>);
}

impl<E, F: FnMut(&IndexSet<E>)> Listener<E> for F {
    fn new_minimal_subset(&mut self, subset: &IndexSet<E>) {
        self(subset)
    }
}

/// Enumerator of subset-minimal sets for one query.
pub trait MinimalSubsetEnumerator<E: Eq + Hash> {
    /// Enumerate in the order given by `priority`.
    ///
    /// The priority must be monotone under strict set inclusion:
    /// `A ⊂ B` implies `priority(A) < priority(B)`. This is not checked;
    /// with a non-monotone priority the enumeration may emit non-minimal
    /// sets.
    fn enumerate_with<P: PriorityComparator<E>, L: Listener<E>>(
        &mut self,
        priority: P,
        listener: &mut L,
    ) -> Result<(), EnumeratorError>;

    /// Enumerate in ascending set size (the default order).
    fn enumerate<L: Listener<E>>(&mut self, listener: &mut L) -> Result<(), EnumeratorError> {
        self.enumerate_with(SizeOrder, listener)
    }
}
