//! Priority orders over justification sets.

use super::axioms::AxiomSetView;
use std::hash::Hash;

/// Maps a justification set to a totally ordered priority key.
///
/// The queue pops smaller keys first; ties are broken by premise count.
/// Keys must be monotone under strict set inclusion (`A ⊂ B` implies
/// `priority(A) < priority(B)`) for the enumeration to emit only minimal
/// sets; this is the caller's responsibility and is not checked.
pub trait PriorityComparator<A> {
    type Priority: Ord + Clone;

    fn priority(&self, axioms: &AxiomSetView<'_, A>) -> Self::Priority;
}

/// The default order: ascending number of axioms.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeOrder;

impl<A: Eq + Hash> PriorityComparator<A> for SizeOrder {
    type Priority = usize;

    fn priority(&self, axioms: &AxiomSetView<'_, A>) -> usize {
        axioms.len()
    }
}

/// Adapter turning a key-extraction closure into a [`PriorityComparator`].
#[derive(Debug, Clone, Copy)]
pub struct KeyOrder<F>(pub F);

impl<A, P, F> PriorityComparator<A> for KeyOrder<F>
where
    P: Ord + Clone,
    F: Fn(&AxiomSetView<'_, A>) -> P,
{
    type Priority = P;

    fn priority(&self, axioms: &AxiomSetView<'_, A>) -> P {
        (self.0)(axioms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexSet;

    #[test]
    fn size_order_counts_union_distinctly() {
        let xy: IndexSet<&str> = ["x", "y"].into_iter().collect();
        let yz: IndexSet<&str> = ["y", "z"].into_iter().collect();
        assert_eq!(SizeOrder.priority(&AxiomSetView::Single(&xy)), 2);
        assert_eq!(SizeOrder.priority(&AxiomSetView::Union(&xy, &yz)), 3);
    }

    fn total_length(view: &AxiomSetView<'_, &'static str>) -> usize {
        view.iter().map(|a| a.len()).sum()
    }

    #[test]
    fn key_order_wraps_functions() {
        let weighted = KeyOrder(total_length);
        let ab: IndexSet<&'static str> = ["aa", "b"].into_iter().collect();
        assert_eq!(weighted.priority(&AxiomSetView::Single(&ab)), 3);
    }
}
