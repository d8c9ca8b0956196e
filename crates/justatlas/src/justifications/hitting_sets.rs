//! Minimal hitting sets by reduction to minimal justifications.
//!
//! A hitting set of a family of sets intersects every member. The family
//! is turned into a synthetic inference graph: a sentinel goal derived by
//! a single axiom-free inference from one node per member, and each member
//! node derived by one inference per element, justified by that element
//! alone. A justification of the goal then picks one element out of every
//! member, so its minimal justifications are exactly the minimal
//! transversals of the family.

use super::resolution::ResolutionEngine;
use super::{Listener, MinimalSubsetEnumerator, PriorityComparator};
use crate::error::EnumeratorError;
use crate::graph::{Inference, InferenceJustifier, InferenceSet};
use crate::interrupt::{InterruptMonitor, NeverInterrupted};
use indexmap::IndexSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Conclusions of the synthetic graph: the sentinel goal and one node per
/// member set of the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum FamilyNode {
    Goal,
    Member(usize),
}

/// Inference of the synthetic graph. Carries the justifying element for
/// member-node inferences, nothing for the combining one.
struct FamilyInference<E> {
    conclusion: FamilyNode,
    premises: Vec<FamilyNode>,
    element: Option<E>,
}

impl<E> Inference<FamilyNode> for FamilyInference<E> {
    fn name(&self) -> &str {
        if self.element.is_some() {
            "element"
        } else {
            "combine"
        }
    }

    fn conclusion(&self) -> &FamilyNode {
        &self.conclusion
    }

    fn premises(&self) -> &[FamilyNode] {
        &self.premises
    }
}

struct FamilyInferenceSet<E> {
    members: Vec<IndexSet<E>>,
}

impl<E: Clone + Eq + Hash> InferenceSet<FamilyNode> for FamilyInferenceSet<E> {
    type Inf = FamilyInference<E>;

    fn inferences_of(&self, conclusion: &FamilyNode) -> Vec<FamilyInference<E>> {
        match *conclusion {
            FamilyNode::Goal => vec![FamilyInference {
                conclusion: FamilyNode::Goal,
                premises: (0..self.members.len()).map(FamilyNode::Member).collect(),
                element: None,
            }],
            FamilyNode::Member(i) => self.members[i]
                .iter()
                .map(|element| FamilyInference {
                    conclusion: FamilyNode::Member(i),
                    premises: Vec::new(),
                    element: Some(element.clone()),
                })
                .collect(),
        }
    }
}

struct FamilyJustifier;

impl<E: Clone + Eq + Hash> InferenceJustifier<E, FamilyInference<E>> for FamilyJustifier {
    fn justification_of(&self, inference: &FamilyInference<E>) -> IndexSet<E> {
        inference.element.iter().cloned().collect()
    }
}

/// Enumerator of the subset-minimal hitting sets of a family of sets.
///
/// A member with no elements cannot be hit, so a family containing the
/// empty set has no hitting sets; the empty family has the single hitting
/// set `{}`.
pub struct MinimalHittingSetEnumerator<E, M = NeverInterrupted> {
    family: FamilyInferenceSet<E>,
    monitor: M,
}

impl<E: Clone + Eq + Hash + Debug> MinimalHittingSetEnumerator<E, NeverInterrupted> {
    pub fn new(family: impl IntoIterator<Item = IndexSet<E>>) -> Self {
        Self::with_monitor(family, NeverInterrupted)
    }
}

impl<E: Clone + Eq + Hash + Debug, M: InterruptMonitor> MinimalHittingSetEnumerator<E, M> {
    pub fn with_monitor(family: impl IntoIterator<Item = IndexSet<E>>, monitor: M) -> Self {
        MinimalHittingSetEnumerator {
            family: FamilyInferenceSet {
                members: family.into_iter().collect(),
            },
            monitor,
        }
    }
}

impl<E, M> MinimalSubsetEnumerator<E> for MinimalHittingSetEnumerator<E, M>
where
    E: Clone + Eq + Hash + Debug,
    M: InterruptMonitor,
{
    fn enumerate_with<P: PriorityComparator<E>, L: Listener<E>>(
        &mut self,
        priority: P,
        listener: &mut L,
    ) -> Result<(), EnumeratorError> {
        let mut engine = ResolutionEngine::new(&self.family, FamilyJustifier, &self.monitor);
        engine
            .enumerator(FamilyNode::Goal)
            .enumerate_with(priority, listener)
    }
}

/// Collect all minimal hitting sets of `family`, smallest first.
pub fn minimal_hitting_sets<E>(
    family: impl IntoIterator<Item = IndexSet<E>>,
) -> Result<Vec<IndexSet<E>>, EnumeratorError>
where
    E: Clone + Eq + Hash + Debug,
{
    let mut result = Vec::new();
    MinimalHittingSetEnumerator::new(family)
        .enumerate(&mut |subset: &IndexSet<E>| result.push(subset.clone()))?;
    Ok(result)
}
