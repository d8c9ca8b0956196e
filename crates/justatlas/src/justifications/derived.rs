//! Derived inferences: lifted graph inferences and their resolvents.

use super::axioms::AxiomSet;
use crate::graph::Inference;
use crate::index::{ElementSet, Fingerprint};
use indexmap::IndexSet;
use std::cell::Cell;
use std::hash::Hash;
use std::rc::Rc;

/// An inference together with the axioms its derivation depends on.
///
/// Obtained either by lifting an original graph inference (premises become
/// a set, the justifier supplies the axioms) or by resolving two derived
/// inferences on a shared literal. Instances are shared by `Rc` between
/// the engine's indexes; the minimality mark is interior-mutable so a
/// shared inference is checked against the subsumption index only once.
#[derive(Debug)]
pub struct DerivedInference<C, A> {
    conclusion: C,
    premises: Rc<IndexSet<C>>,
    justification: AxiomSet<A>,
    /// Fingerprint over conclusion, premises and axioms together, for the
    /// subsumption index.
    member_fingerprint: Fingerprint,
    minimal: Cell<bool>,
}

impl<C, A> DerivedInference<C, A>
where
    C: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    /// Lift an original inference: premise sequence to premise set, axioms
    /// from the justifier.
    pub fn lifted<I: Inference<C>>(inference: &I, justification: IndexSet<A>) -> Self {
        let premises: IndexSet<C> = inference.premises().iter().cloned().collect();
        DerivedInference::new(
            inference.conclusion().clone(),
            Rc::new(premises),
            AxiomSet::new(justification),
        )
    }

    /// Resolve `first` into `second` on `first`'s conclusion, which must be
    /// among `second`'s premises. Neither input may be a tautology.
    pub fn resolve(first: &Self, second: &Self) -> Self {
        debug_assert!(!first.is_tautology() && !second.is_tautology());
        debug_assert!(second.premises.contains(&first.conclusion));
        let premises = if second.premises.len() == 1 {
            // the only premise of `second` is the resolved literal
            Rc::clone(&first.premises)
        } else {
            let mut merged: IndexSet<C> = (*first.premises).clone();
            merged.extend(
                second
                    .premises
                    .iter()
                    .filter(|p| **p != first.conclusion)
                    .cloned(),
            );
            Rc::new(merged)
        };
        DerivedInference::new(
            second.conclusion.clone(),
            premises,
            AxiomSet::union(&first.justification, &second.justification),
        )
    }

    fn new(conclusion: C, premises: Rc<IndexSet<C>>, justification: AxiomSet<A>) -> Self {
        let mut member_fingerprint = Fingerprint::EMPTY;
        member_fingerprint.insert(&(0u8, &conclusion));
        for premise in premises.iter() {
            member_fingerprint.insert(&(1u8, premise));
        }
        for axiom in justification.elements() {
            member_fingerprint.insert(&(2u8, axiom));
        }
        DerivedInference {
            conclusion,
            premises,
            justification,
            member_fingerprint,
            minimal: Cell::new(false),
        }
    }

    pub fn conclusion(&self) -> &C {
        &self.conclusion
    }

    pub fn premises(&self) -> &IndexSet<C> {
        &self.premises
    }

    pub fn justification(&self) -> &AxiomSet<A> {
        &self.justification
    }

    pub fn is_tautology(&self) -> bool {
        self.premises.contains(&self.conclusion)
    }

    pub(crate) fn minimality_checked(&self) -> bool {
        self.minimal.get()
    }

    pub(crate) fn mark_minimality_checked(&self) {
        self.minimal.set(true);
    }
}

/// Membership view used for subsumption: an inference "contains" its
/// conclusion, each premise and each axiom, tagged by kind. A stored
/// inference subsumes a candidate iff it is a subset in this view: same
/// conclusion, fewer-or-equal premises, fewer-or-equal axioms.
impl<C, A> ElementSet for DerivedInference<C, A>
where
    C: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    fn fingerprint(&self) -> Fingerprint {
        self.member_fingerprint
    }

    fn is_subset_of(&self, other: &Self) -> bool {
        self.conclusion == other.conclusion
            && self.premises.len() <= other.premises.len()
            && self.premises.iter().all(|p| other.premises.contains(p))
            && self.justification.is_subset_of(&other.justification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GenericInference;
    use crate::index::MinimalityIndex;

    fn lifted(
        conclusion: &'static str,
        premises: &[&'static str],
        axioms: &[&'static str],
    ) -> DerivedInference<&'static str, &'static str> {
        DerivedInference::lifted(
            &GenericInference::new("test", conclusion, premises.to_vec()),
            axioms.iter().copied().collect(),
        )
    }

    #[test]
    fn lifting_deduplicates_premises() {
        let inf = lifted("c", &["a", "a", "b"], &["x"]);
        assert_eq!(inf.premises().len(), 2);
        assert!(!inf.is_tautology());
    }

    #[test]
    fn tautology_detection() {
        assert!(lifted("c", &["a", "c"], &[]).is_tautology());
        assert!(!lifted("c", &["a"], &[]).is_tautology());
    }

    #[test]
    fn resolution_eliminates_the_literal() {
        // first: a -| {b} : {x};  second: c -| {a, d} : {y}
        let first = lifted("a", &["b"], &["x"]);
        let second = lifted("c", &["a", "d"], &["y"]);
        let resolvent = DerivedInference::resolve(&first, &second);
        assert_eq!(*resolvent.conclusion(), "c");
        let premises: Vec<_> = resolvent.premises().iter().copied().collect();
        assert_eq!(premises, ["b", "d"]);
        let axioms: Vec<_> = resolvent.justification().elements().iter().copied().collect();
        assert_eq!(axioms, ["x", "y"]);
    }

    #[test]
    fn resolution_shares_premises_of_unit_second() {
        let first = lifted("a", &["b", "d"], &["x"]);
        let second = lifted("c", &["a"], &[]);
        let resolvent = DerivedInference::resolve(&first, &second);
        assert!(Rc::ptr_eq(&resolvent.premises, &first.premises));
        assert_eq!(*resolvent.conclusion(), "c");
    }

    #[test]
    fn subsumption_via_element_set() {
        let general = lifted("c", &["a"], &["x"]);
        let specific = lifted("c", &["a", "b"], &["x", "y"]);
        let other = lifted("d", &["a"], &["x"]);

        assert!(general.is_subset_of(&specific));
        assert!(!specific.is_subset_of(&general));
        assert!(!other.is_subset_of(&specific), "conclusions differ");

        let mut index = MinimalityIndex::new();
        index.add(Rc::new(general));
        assert!(!index.is_minimal(&Rc::new(specific)));
        assert!(index.is_minimal(&Rc::new(other)));
    }
}
