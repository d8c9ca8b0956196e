//! Literal selection strategies for resolution.
//!
//! A strategy picks the literal on which a derived inference is indexed
//! and resolved: either one of its premises, or (returning `None`) its
//! conclusion. The choice steers the search direction: premise pivots
//! resolve towards the leaves, conclusion pivots towards the goal.

use super::derived::DerivedInference;
use std::collections::HashMap;
use std::hash::Hash;

/// Number of graph inferences deriving each conclusion, recorded while the
/// engine lifts the reachable part of the graph. The provider is stable
/// within a query, so the counts stand in for repeated provider calls.
#[derive(Debug, Clone, Default)]
pub struct InferenceCounts<C> {
    counts: HashMap<C, usize>,
}

impl<C: Eq + Hash> InferenceCounts<C> {
    pub fn new() -> Self {
        InferenceCounts {
            counts: HashMap::new(),
        }
    }

    pub(crate) fn record(&mut self, conclusion: C, count: usize) {
        self.counts.insert(conclusion, count);
    }

    pub fn of(&self, conclusion: &C) -> usize {
        self.counts.get(conclusion).copied().unwrap_or(0)
    }
}

/// Picks the resolution pivot of a derived inference.
pub trait Selection<C, A> {
    /// Returns the selected premise, or `None` to select the conclusion.
    ///
    /// Returning `None` for an inference whose conclusion is the goal
    /// while it still has premises is a protocol violation; the engine
    /// reports it as
    /// [`EnumeratorError::GoalConclusionSelected`](crate::EnumeratorError::GoalConclusionSelected).
    fn resolving_atom(
        &self,
        inference: &DerivedInference<C, A>,
        counts: &InferenceCounts<C>,
        goal: &C,
    ) -> Option<C>;

    /// Name of this strategy, for diagnostics.
    fn name(&self) -> &str;
}

/// The premise derived by the fewest graph inferences, if any.
fn fewest_inference_premise<C, A>(
    inference: &DerivedInference<C, A>,
    counts: &InferenceCounts<C>,
) -> Option<(C, usize)>
where
    C: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    let mut best: Option<(C, usize)> = None;
    for premise in inference.premises() {
        let count = counts.of(premise);
        if best.as_ref().map_or(true, |(_, best_count)| count < *best_count) {
            best = Some((premise.clone(), count));
        }
    }
    best
}

/// Always resolve on a premise: the one derived by the fewest inferences.
/// Falls back to the conclusion only when there are no premises.
#[derive(Debug, Clone, Copy, Default)]
pub struct BottomUpSelection;

impl<C: Clone + Eq + Hash, A: Clone + Eq + Hash> Selection<C, A> for BottomUpSelection {
    fn resolving_atom(
        &self,
        inference: &DerivedInference<C, A>,
        counts: &InferenceCounts<C>,
        _goal: &C,
    ) -> Option<C> {
        fewest_inference_premise(inference, counts).map(|(premise, _)| premise)
    }

    fn name(&self) -> &str {
        "bottom-up"
    }
}

/// Resolve on the conclusion, except at the goal: a goal-concluding
/// inference with premises resolves on its fewest-inference premise.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopDownSelection;

impl<C: Clone + Eq + Hash, A: Clone + Eq + Hash> Selection<C, A> for TopDownSelection {
    fn resolving_atom(
        &self,
        inference: &DerivedInference<C, A>,
        counts: &InferenceCounts<C>,
        goal: &C,
    ) -> Option<C> {
        if inference.conclusion() == goal {
            fewest_inference_premise(inference, counts).map(|(premise, _)| premise)
        } else {
            None
        }
    }

    fn name(&self) -> &str {
        "top-down"
    }
}

/// Resolve on the fewest-inference premise while that count stays within
/// the threshold; above it, switch to the conclusion (unless the
/// conclusion is the goal, which must never be selected).
#[derive(Debug, Clone, Copy)]
pub struct ThresholdSelection {
    threshold: usize,
}

impl ThresholdSelection {
    pub fn new(threshold: usize) -> Self {
        ThresholdSelection { threshold }
    }
}

impl Default for ThresholdSelection {
    fn default() -> Self {
        ThresholdSelection::new(2)
    }
}

impl<C: Clone + Eq + Hash, A: Clone + Eq + Hash> Selection<C, A> for ThresholdSelection {
    fn resolving_atom(
        &self,
        inference: &DerivedInference<C, A>,
        counts: &InferenceCounts<C>,
        goal: &C,
    ) -> Option<C> {
        match fewest_inference_premise(inference, counts) {
            Some((_, count)) if count > self.threshold && inference.conclusion() != goal => None,
            Some((premise, _)) => Some(premise),
            None => None,
        }
    }

    fn name(&self) -> &str {
        "threshold"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GenericInference;

    fn derived(
        conclusion: &'static str,
        premises: &[&'static str],
    ) -> DerivedInference<&'static str, &'static str> {
        DerivedInference::lifted(
            &GenericInference::new("test", conclusion, premises.to_vec()),
            Default::default(),
        )
    }

    fn counts(entries: &[(&'static str, usize)]) -> InferenceCounts<&'static str> {
        let mut counts = InferenceCounts::new();
        for (c, n) in entries {
            counts.record(*c, *n);
        }
        counts
    }

    #[test]
    fn bottom_up_picks_fewest_inference_premise() {
        let inf = derived("c", &["a", "b"]);
        let counts = counts(&[("a", 3), ("b", 1)]);
        let selected = BottomUpSelection.resolving_atom(&inf, &counts, &"goal");
        assert_eq!(selected, Some("b"));
    }

    #[test]
    fn bottom_up_without_premises_selects_conclusion() {
        let inf = derived("c", &[]);
        let selected = BottomUpSelection.resolving_atom(&inf, &counts(&[]), &"goal");
        assert_eq!(selected, None);
    }

    #[test]
    fn top_down_selects_conclusion_away_from_goal() {
        let inf = derived("c", &["a"]);
        let counts = counts(&[("a", 1)]);
        assert_eq!(TopDownSelection.resolving_atom(&inf, &counts, &"goal"), None);
        assert_eq!(
            TopDownSelection.resolving_atom(&inf, &counts, &"c"),
            Some("a")
        );
    }

    #[test]
    fn threshold_switches_to_conclusion_on_branchy_premises() {
        let inf = derived("c", &["a", "b"]);
        let branchy = counts(&[("a", 5), ("b", 4)]);
        let selection = ThresholdSelection::default();
        assert_eq!(selection.resolving_atom(&inf, &branchy, &"goal"), None);

        // at the goal the premise must stay selected
        assert_eq!(selection.resolving_atom(&inf, &branchy, &"c"), Some("b"));

        let narrow = counts(&[("a", 5), ("b", 2)]);
        assert_eq!(selection.resolving_atom(&inf, &narrow, &"goal"), Some("b"));
    }
}
