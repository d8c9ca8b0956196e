//! Justifiers map inferences to the axioms they depend on.

use indexmap::IndexSet;
use std::hash::Hash;

/// Assigns to each inference the set of atomic axioms it depends on.
///
/// The justification of a whole derivation is the union of the
/// justifications along its inferences. Must be pure: the same inference
/// always gets the same axiom set during a query.
pub trait InferenceJustifier<A, I> {
    fn justification_of(&self, inference: &I) -> IndexSet<A>;
}

impl<A, I, F> InferenceJustifier<A, I> for F
where
    F: Fn(&I) -> IndexSet<A>,
{
    fn justification_of(&self, inference: &I) -> IndexSet<A> {
        self(inference)
    }
}

/// Justifier assigning the empty axiom set to every inference.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyJustifier;

impl<A: Eq + Hash, I> InferenceJustifier<A, I> for EmptyJustifier {
    fn justification_of(&self, _inference: &I) -> IndexSet<A> {
        IndexSet::new()
    }
}
