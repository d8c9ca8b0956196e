//! The incremental derivability checker.

use crate::graph::{Inference, InferenceSet};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

/// Answers whether a conclusion is derivable by the inferences of a graph.
pub trait DerivabilityChecker<C> {
    fn is_derivable(&mut self, conclusion: &C) -> bool;
}

/// A [`DerivabilityChecker`] with a dynamic set of blocked conclusions.
///
/// Blocked conclusions are treated as if no inference produced them;
/// blocking a conclusion retracts every derivation that passed through it.
pub trait DerivabilityCheckerWithBlocking<C>: DerivabilityChecker<C> {
    /// Exclude `conclusion` from all derivations. Returns `false` if it was
    /// already blocked.
    fn block(&mut self, conclusion: &C) -> bool;

    /// Allow `conclusion` in derivations again. Returns `false` if it was
    /// not blocked.
    fn unblock(&mut self, conclusion: &C) -> bool;

    fn blocked_conclusions(&self) -> &HashSet<C>;
}

/// An expanded inference together with the scan position inside its premise
/// sequence. The position is the index of the next premise to examine; the
/// record is parked under the last un-derived premise it stopped on.
struct InferenceRecord<I> {
    inference: I,
    next_premise: usize,
}

/// Incremental derivability checker over an inference graph.
///
/// Goal-directed: querying a conclusion expands its inferences depth-first
/// (a stack of pending inference cursors), while freshly derived
/// conclusions are propagated breadth-first to the inferences waiting on
/// them. An inference suspended on an un-derived premise is resumed in
/// O(1) at its recorded scan position once that premise is derived.
pub struct InferenceDerivabilityChecker<C, S: InferenceSet<C>> {
    inferences: S,
    /// Conclusions excluded from derivations.
    blocked: HashSet<C>,
    /// Conclusions for which a derivability test was initiated.
    goals: HashSet<C>,
    /// Goals whose inference collection has not been pulled yet.
    to_check: VecDeque<C>,
    /// Goals found derivable.
    derivable: HashSet<C>,
    /// Cursors over not-yet-expanded inference snapshots, top of the stack
    /// first. Every cursor on the stack has at least one element left.
    to_expand: Vec<std::vec::IntoIter<S::Inf>>,
    /// Derivable conclusions not yet propagated to their watchers.
    to_propagate: VecDeque<C>,
    /// All expanded inferences; ids index into this arena.
    records: Vec<InferenceRecord<S::Inf>>,
    /// For each pending premise, the records waiting for it to be derived.
    watched_inferences: HashMap<C, Vec<usize>>,
    /// For each premise, the records that fired using it; drives retraction.
    fired_inferences: HashMap<C, HashSet<usize>>,
}

impl<C, S> InferenceDerivabilityChecker<C, S>
where
    C: Clone + Eq + Hash + Debug,
    S: InferenceSet<C>,
{
    pub fn new(inferences: S) -> Self {
        InferenceDerivabilityChecker {
            inferences,
            blocked: HashSet::new(),
            goals: HashSet::new(),
            to_check: VecDeque::new(),
            derivable: HashSet::new(),
            to_expand: Vec::new(),
            to_propagate: VecDeque::new(),
            records: Vec::new(),
            watched_inferences: HashMap::new(),
            fired_inferences: HashMap::new(),
        }
    }

    pub fn is_derivable(&mut self, conclusion: &C) -> bool {
        log::trace!("{:?}: checking derivability", conclusion);
        if self.blocked.contains(conclusion) {
            return false;
        }
        self.new_goal(conclusion.clone());
        self.process();
        let derivable = self.derivable.contains(conclusion);
        log::trace!("{:?}: derivable: {}", conclusion, derivable);
        derivable
    }

    pub fn block(&mut self, conclusion: &C) -> bool {
        if self.blocked.insert(conclusion.clone()) {
            log::trace!("{:?}: blocked", conclusion);
            self.retract(conclusion);
            true
        } else {
            false
        }
    }

    pub fn unblock(&mut self, conclusion: &C) -> bool {
        if self.blocked.remove(conclusion) {
            log::trace!("{:?}: unblocked", conclusion);
            if self.goals.remove(conclusion) && self.watched_inferences.contains_key(conclusion) {
                self.new_goal(conclusion.clone());
                self.process();
            }
            true
        } else {
            false
        }
    }

    pub fn blocked_conclusions(&self) -> &HashSet<C> {
        &self.blocked
    }

    /// Conclusions that could not be derived so far.
    ///
    /// Contains every conclusion for which [`Self::is_derivable`] returned
    /// `false`, plus at least one un-derived premise of each inference
    /// producing an element of this set. The set can also contain premises
    /// of unused alternative inferences for derivable conclusions, so it is
    /// a diagnostic superset, not an exact complement.
    pub fn non_derivable_conclusions(&self) -> impl Iterator<Item = &C> {
        self.watched_inferences.keys()
    }

    fn new_goal(&mut self, conclusion: C) {
        if self.goals.insert(conclusion.clone()) {
            log::trace!("{:?}: new goal", conclusion);
            self.to_check.push_back(conclusion);
        }
    }

    /// Run expansion and propagation to the fixpoint.
    ///
    /// Strict priority per turn: pull inference collections for unchecked
    /// goals first, then propagate fresh derivations to watchers, then
    /// expand one inference from the top cursor.
    fn process(&mut self) {
        loop {
            if let Some(next) = self.to_check.pop_front() {
                if self.blocked.contains(&next) {
                    continue;
                }
                let collection = self.inferences.inferences_of(&next);
                if !collection.is_empty() {
                    self.to_expand.push(collection.into_iter());
                }
                continue;
            }

            if let Some(next) = self.to_propagate.pop_front() {
                if let Some(ids) = self.watched_inferences.remove(&next) {
                    for id in ids {
                        self.check(id);
                    }
                }
                continue;
            }

            let Some(cursor) = self.to_expand.last_mut() else {
                return;
            };
            let Some(inference) = cursor.next() else {
                self.to_expand.pop();
                continue;
            };
            if self.derivable.contains(inference.conclusion()) {
                // the conclusion is settled, the rest of this cursor is moot
                self.to_expand.pop();
                continue;
            }
            log::trace!("{:?}: expanding {}", inference.conclusion(), inference.name());
            let id = self.records.len();
            self.records.push(InferenceRecord {
                inference,
                next_premise: 0,
            });
            self.check(id);
            if self
                .to_expand
                .last()
                .is_some_and(|cursor| cursor.as_slice().is_empty())
            {
                self.to_expand.pop();
            }
        }
    }

    /// Advance a record over its premises; park it on the first un-derived
    /// premise, or fire it when all premises are derived.
    fn check(&mut self, id: usize) {
        loop {
            let pending = {
                let record = &self.records[id];
                match record.inference.premises().get(record.next_premise) {
                    None => break,
                    Some(p) if self.derivable.contains(p) => None,
                    Some(p) => Some(p.clone()),
                }
            };
            self.records[id].next_premise += 1;
            if let Some(premise) = pending {
                self.add_watch(premise, id);
                return;
            }
        }
        // a premise scanned on an earlier turn may have been retracted by a
        // block since; re-watch instead of firing on stale scan state
        let retracted = {
            let record = &self.records[id];
            record
                .inference
                .premises()
                .iter()
                .enumerate()
                .find(|(_, p)| !self.derivable.contains(*p))
                .map(|(i, p)| (i, p.clone()))
        };
        if let Some((position, premise)) = retracted {
            self.records[id].next_premise = position + 1;
            self.add_watch(premise, id);
            return;
        }
        self.fire(id);
    }

    fn add_watch(&mut self, premise: C, id: usize) {
        self.watched_inferences
            .entry(premise.clone())
            .or_default()
            .push(id);
        self.new_goal(premise);
    }

    fn fire(&mut self, id: usize) {
        let conclusion = self.records[id].inference.conclusion().clone();
        log::trace!("{:?}: fired by {}", conclusion, self.records[id].inference.name());
        if self.derivable.insert(conclusion.clone()) {
            log::trace!("{:?}: derived", conclusion);
            self.to_propagate.push_back(conclusion);
        }
        for i in 0..self.records[id].inference.premises().len() {
            let premise = self.records[id].inference.premises()[i].clone();
            self.fired_inferences.entry(premise).or_default().insert(id);
        }
    }

    /// Retract `conclusion` and everything derived through it.
    ///
    /// Breadth-first over the fired-inference links. Watchers are left in
    /// place on purpose: a goal removed here is re-entered by `unblock` or
    /// by a later query if it is still wanted.
    fn retract(&mut self, conclusion: &C) {
        let mut to_retract = VecDeque::new();
        to_retract.push_back(conclusion.clone());
        while let Some(c) = to_retract.pop_front() {
            if !self.goals.remove(&c) {
                continue;
            }
            if !self.derivable.remove(&c) {
                continue;
            }
            log::trace!("{:?}: retracted", c);
            let Some(ids) = self.fired_inferences.remove(&c) else {
                continue;
            };
            for id in ids {
                to_retract.push_back(self.records[id].inference.conclusion().clone());
                for i in 0..self.records[id].inference.premises().len() {
                    let premise = &self.records[id].inference.premises()[i];
                    if *premise == c {
                        continue;
                    }
                    if let Some(fired) = self.fired_inferences.get_mut(premise) {
                        fired.remove(&id);
                    }
                }
            }
        }
    }
}

impl<C, S> DerivabilityChecker<C> for InferenceDerivabilityChecker<C, S>
where
    C: Clone + Eq + Hash + Debug,
    S: InferenceSet<C>,
{
    fn is_derivable(&mut self, conclusion: &C) -> bool {
        InferenceDerivabilityChecker::is_derivable(self, conclusion)
    }
}

impl<C, S> DerivabilityCheckerWithBlocking<C> for InferenceDerivabilityChecker<C, S>
where
    C: Clone + Eq + Hash + Debug,
    S: InferenceSet<C>,
{
    fn block(&mut self, conclusion: &C) -> bool {
        InferenceDerivabilityChecker::block(self, conclusion)
    }

    fn unblock(&mut self, conclusion: &C) -> bool {
        InferenceDerivabilityChecker::unblock(self, conclusion)
    }

    fn blocked_conclusions(&self) -> &HashSet<C> {
        InferenceDerivabilityChecker::blocked_conclusions(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GenericInference, IndexedInferenceSet};

    fn graph(edges: &[(&'static str, &[&'static str])]) -> IndexedInferenceSet<&'static str> {
        let mut set = IndexedInferenceSet::new();
        for (i, (conclusion, premises)) in edges.iter().enumerate() {
            set.produce(GenericInference::new(
                format!("r{}", i),
                *conclusion,
                premises.to_vec(),
            ));
        }
        set
    }

    #[test]
    fn chain_is_derivable() {
        let set = graph(&[("c", &["a", "b"]), ("a", &[]), ("b", &[])]);
        let mut checker = InferenceDerivabilityChecker::new(&set);
        assert!(checker.is_derivable(&"c"));
        assert!(checker.is_derivable(&"a"));
    }

    #[test]
    fn missing_premise_not_derivable() {
        let set = graph(&[("c", &["d"])]);
        let mut checker = InferenceDerivabilityChecker::new(&set);
        assert!(!checker.is_derivable(&"c"));
        let non_derivable: Vec<_> = checker.non_derivable_conclusions().copied().collect();
        assert!(non_derivable.contains(&"d"));
    }

    #[test]
    fn alternative_inference_with_dead_branch() {
        let set = graph(&[
            ("c", &["a", "b"]),
            ("c", &["d"]),
            ("a", &[]),
            ("b", &[]),
        ]);
        let mut checker = InferenceDerivabilityChecker::new(&set);
        assert!(checker.is_derivable(&"c"));
    }

    #[test]
    fn duplicate_premises() {
        let set = graph(&[("c", &["a", "a", "b"]), ("a", &[]), ("b", &[])]);
        let mut checker = InferenceDerivabilityChecker::new(&set);
        assert!(checker.is_derivable(&"c"));
    }

    #[test]
    fn block_and_unblock_round_trip() {
        let set = graph(&[("c", &["a", "b"]), ("a", &[]), ("b", &[])]);
        let mut checker = InferenceDerivabilityChecker::new(&set);
        assert!(checker.block(&"a"));
        assert!(!checker.block(&"a"), "already blocked");
        assert!(!checker.is_derivable(&"c"));
        assert!(!checker.is_derivable(&"a"));
        assert!(checker.blocked_conclusions().contains(&"a"));

        assert!(checker.unblock(&"a"));
        assert!(!checker.unblock(&"a"), "no longer blocked");
        assert!(checker.is_derivable(&"c"));
    }

    #[test]
    fn block_retracts_dependents() {
        let set = graph(&[("d", &["c"]), ("c", &["a"]), ("a", &[])]);
        let mut checker = InferenceDerivabilityChecker::new(&set);
        assert!(checker.is_derivable(&"d"));

        checker.block(&"a");
        assert!(!checker.is_derivable(&"d"));
        assert!(!checker.is_derivable(&"c"));

        checker.unblock(&"a");
        assert!(checker.is_derivable(&"d"));
        assert!(checker.is_derivable(&"c"));
    }

    #[test]
    fn blocked_conclusion_queried_directly() {
        let set = graph(&[("a", &[])]);
        let mut checker = InferenceDerivabilityChecker::new(&set);
        checker.block(&"a");
        assert!(!checker.is_derivable(&"a"));
        checker.unblock(&"a");
        assert!(checker.is_derivable(&"a"));
    }

    #[test]
    fn block_after_derivation_then_requery() {
        // derivation d <- c <- a survives a block of an unrelated premise
        let set = graph(&[("d", &["c", "b"]), ("c", &["a"]), ("a", &[]), ("b", &[])]);
        let mut checker = InferenceDerivabilityChecker::new(&set);
        assert!(checker.is_derivable(&"d"));

        checker.block(&"b");
        assert!(!checker.is_derivable(&"d"));
        assert!(checker.is_derivable(&"c"), "c does not depend on b");
    }

    #[test]
    fn underivable_cycle_parks() {
        let set = graph(&[("a", &["b"]), ("b", &["a"])]);
        let mut checker = InferenceDerivabilityChecker::new(&set);
        assert!(!checker.is_derivable(&"a"));
        assert!(!checker.is_derivable(&"b"));
    }

    #[test]
    fn cycle_with_base_case_derivable() {
        let set = graph(&[("a", &["b"]), ("b", &["a"]), ("a", &[])]);
        let mut checker = InferenceDerivabilityChecker::new(&set);
        assert!(checker.is_derivable(&"a"));
        assert!(checker.is_derivable(&"b"));
    }

    #[test]
    fn blocking_matches_fresh_computation() {
        // incremental block/unblock agrees with a checker built afresh over
        // the graph with the blocked conclusion's inferences removed
        let edges: &[(&'static str, &[&'static str])] = &[
            ("e", &["c", "d"]),
            ("c", &["a"]),
            ("d", &["b"]),
            ("a", &[]),
            ("b", &[]),
            ("d", &["a"]),
        ];
        let set = graph(edges);
        let mut incremental = InferenceDerivabilityChecker::new(&set);
        assert!(incremental.is_derivable(&"e"));

        incremental.block(&"b");
        incremental.block(&"a");
        incremental.unblock(&"b");

        // blocked set is now {a}: remove all inferences concluding "a"
        let pruned = graph(&[("e", &["c", "d"]), ("c", &["a"]), ("d", &["b"]), ("b", &[]), ("d", &["a"])]);
        let mut fresh = InferenceDerivabilityChecker::new(&pruned);
        for goal in ["a", "b", "c", "d", "e"] {
            assert_eq!(
                incremental.is_derivable(&goal),
                fresh.is_derivable(&goal),
                "mismatch at {}",
                goal
            );
        }
    }
}
