//! Shared axiom sets and allocation-free union views.

use crate::index::{ElementSet, Fingerprint};
use indexmap::IndexSet;
use std::hash::Hash;
use std::rc::Rc;

/// An immutable set of axioms shared between derived inferences.
///
/// The element set lives behind an `Rc` so that resolution can reuse a
/// parent's justification wholesale when the other side is empty, and the
/// Bloom fingerprint is cached once per set (fingerprints of unions are
/// the union of fingerprints).
#[derive(Debug)]
pub struct AxiomSet<A> {
    elements: Rc<IndexSet<A>>,
    fingerprint: Fingerprint,
}

impl<A> Clone for AxiomSet<A> {
    fn clone(&self) -> Self {
        AxiomSet {
            elements: Rc::clone(&self.elements),
            fingerprint: self.fingerprint,
        }
    }
}

impl<A: Eq + Hash> AxiomSet<A> {
    pub fn new(elements: IndexSet<A>) -> Self {
        let fingerprint = Fingerprint::of(elements.iter());
        AxiomSet {
            elements: Rc::new(elements),
            fingerprint,
        }
    }

    pub fn empty() -> Self {
        AxiomSet::new(IndexSet::new())
    }

    pub fn elements(&self) -> &IndexSet<A> {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, axiom: &A) -> bool {
        self.elements.contains(axiom)
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }
}

impl<A: Clone + Eq + Hash> AxiomSet<A> {
    /// Union of two axiom sets, sharing one side when the other is empty.
    pub fn union(first: &Self, second: &Self) -> Self {
        if first.is_empty() {
            return second.clone();
        }
        if second.is_empty() {
            return first.clone();
        }
        let mut elements: IndexSet<A> = (*first.elements).clone();
        elements.extend(second.elements.iter().cloned());
        AxiomSet {
            elements: Rc::new(elements),
            fingerprint: first.fingerprint.union(second.fingerprint),
        }
    }
}

impl<A: Eq + Hash> ElementSet for AxiomSet<A> {
    fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    fn is_subset_of(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.elements.iter().all(|a| other.contains(a))
    }
}

/// Read-only view of one axiom set or of the union of two.
///
/// Resolvents sitting in the priority queue never materialize their
/// justification union; priorities are computed against this view, which
/// answers size and membership by inspection of the parents only.
#[derive(Debug, Clone, Copy)]
pub enum AxiomSetView<'a, A> {
    Single(&'a IndexSet<A>),
    Union(&'a IndexSet<A>, &'a IndexSet<A>),
}

impl<'a, A: Eq + Hash> AxiomSetView<'a, A> {
    pub fn len(&self) -> usize {
        match self {
            AxiomSetView::Single(set) => set.len(),
            AxiomSetView::Union(first, second) => {
                first.len() + second.iter().filter(|a| !first.contains(*a)).count()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AxiomSetView::Single(set) => set.is_empty(),
            AxiomSetView::Union(first, second) => first.is_empty() && second.is_empty(),
        }
    }

    pub fn contains(&self, axiom: &A) -> bool {
        match self {
            AxiomSetView::Single(set) => set.contains(axiom),
            AxiomSetView::Union(first, second) => first.contains(axiom) || second.contains(axiom),
        }
    }

    /// Iterate the distinct axioms of the view.
    pub fn iter(&self) -> impl Iterator<Item = &'a A> + 'a {
        let (single, union) = match *self {
            AxiomSetView::Single(set) => (Some(set.iter()), None),
            AxiomSetView::Union(first, second) => (
                None,
                Some(
                    first
                        .iter()
                        .chain(second.iter().filter(move |a| !first.contains(*a))),
                ),
            ),
        };
        single
            .into_iter()
            .flatten()
            .chain(union.into_iter().flatten())
    }
}
