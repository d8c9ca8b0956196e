//! The resolution engine and its per-query enumerator.

use super::axioms::{AxiomSet, AxiomSetView};
use super::derived::DerivedInference;
use super::priority::PriorityComparator;
use super::selection::{InferenceCounts, Selection, ThresholdSelection};
use super::{Listener, MinimalSubsetEnumerator};
use crate::error::EnumeratorError;
use crate::graph::{Inference, InferenceJustifier, InferenceSet};
use crate::index::MinimalityIndex;
use crate::interrupt::InterruptMonitor;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

/// Observational counters; reset with
/// [`ResolutionEngine::reset_stats`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionStats {
    /// Queue elements produced (tautologies excluded).
    pub produced_inferences: usize,
    /// Derived inferences that passed the subsumption check.
    pub minimal_inferences: usize,
}

/// Enumerates minimal justifications of goal conclusions by resolution.
///
/// The engine is stateful across queries: lifted inferences, subsumption
/// indexes and pivot indexes are kept, and inferences shelved because
/// their justification was already covered for one goal are revisited when
/// the goal changes. Create one engine per inference graph and ask it for
/// an [`enumerator`](Self::enumerator) per goal.
pub struct ResolutionEngine<C, A, S, J, M>
where
    S: InferenceSet<C>,
{
    inferences: S,
    justifier: J,
    monitor: M,
    selection: Box<dyn Selection<C, A>>,
    /// Conclusions whose graph inferences have been lifted already.
    initialized: HashSet<C>,
    /// Graph inference counts per conclusion, for the selection strategies.
    counts: InferenceCounts<C>,
    /// Subsumption index per conclusion: an inference is kept only while no
    /// other stored one has the same conclusion with subset premises and
    /// subset justification.
    minimal_inferences: HashMap<C, MinimalityIndex<Rc<DerivedInference<C, A>>>>,
    /// Inferences resolved on their conclusion, indexed by it.
    by_selected_conclusion: HashMap<C, Vec<Rc<DerivedInference<C, A>>>>,
    /// Inferences resolved on a premise, indexed by that premise.
    by_selected_premise: HashMap<C, Vec<Rc<DerivedInference<C, A>>>>,
    /// Inferences whose justification was covered by an emitted one at the
    /// time they were processed; they may matter for other goals.
    shelved: VecDeque<Rc<DerivedInference<C, A>>>,
    stats: ResolutionStats,
}

impl<C, A, S, J, M> ResolutionEngine<C, A, S, J, M>
where
    C: Clone + Eq + Hash + Debug,
    A: Clone + Eq + Hash + Debug,
    S: InferenceSet<C>,
    J: InferenceJustifier<A, S::Inf>,
    M: InterruptMonitor,
{
    /// Engine with the default [`ThresholdSelection`].
    pub fn new(inferences: S, justifier: J, monitor: M) -> Self {
        Self::with_selection(
            inferences,
            justifier,
            monitor,
            Box::new(ThresholdSelection::default()),
        )
    }

    pub fn with_selection(
        inferences: S,
        justifier: J,
        monitor: M,
        selection: Box<dyn Selection<C, A>>,
    ) -> Self {
        ResolutionEngine {
            inferences,
            justifier,
            monitor,
            selection,
            initialized: HashSet::new(),
            counts: InferenceCounts::new(),
            minimal_inferences: HashMap::new(),
            by_selected_conclusion: HashMap::new(),
            by_selected_premise: HashMap::new(),
            shelved: VecDeque::new(),
            stats: ResolutionStats::default(),
        }
    }

    /// A [`MinimalSubsetEnumerator`] for the justifications of `goal`.
    ///
    /// Note on goal changes: inferences previously pivoted on the new goal
    /// as their conclusion are re-selected, since selection may decide
    /// differently at the goal. Premise pivots are left as chosen
    /// (matching the source behavior this engine derives from), so a
    /// strategy whose premise choice depends on the goal sees the pivots
    /// it chose under earlier goals.
    pub fn enumerator(&mut self, goal: C) -> JustificationEnumerator<'_, C, A, S, J, M> {
        JustificationEnumerator { engine: self, goal }
    }

    pub fn stats(&self) -> &ResolutionStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = ResolutionStats::default();
    }

    /// Lift every graph inference reachable from the goal, once per
    /// conclusion over the engine's lifetime.
    fn initialize<P>(&mut self, query: &mut QueryState<C, A, P>)
    where
        P: PriorityComparator<A>,
    {
        let mut pending = VecDeque::new();
        self.schedule_initialization(query.goal.clone(), &mut pending);
        while let Some(next) = pending.pop_front() {
            let collection = self.inferences.inferences_of(&next);
            self.counts.record(next, collection.len());
            for inference in &collection {
                for premise in inference.premises() {
                    self.schedule_initialization(premise.clone(), &mut pending);
                }
                let justification = self.justifier.justification_of(inference);
                query.produce_direct(Rc::new(DerivedInference::lifted(inference, justification)));
            }
        }
    }

    fn schedule_initialization(&mut self, conclusion: C, pending: &mut VecDeque<C>) {
        if self.initialized.insert(conclusion.clone()) {
            pending.push_back(conclusion);
        }
    }

    /// Re-enqueue inferences shelved under previous goals; their
    /// justification may be minimal for the new one.
    fn unshelve<P>(&mut self, query: &mut QueryState<C, A, P>)
    where
        P: PriorityComparator<A>,
    {
        while let Some(inference) = self.shelved.pop_front() {
            query.produce_direct(inference);
        }
    }

    /// Selection at the goal follows different rules, so inferences pivoted
    /// on the new goal as their conclusion must be re-selected.
    fn change_selection<P>(&mut self, query: &mut QueryState<C, A, P>)
    where
        P: PriorityComparator<A>,
    {
        if let Some(previous) = self.by_selected_conclusion.remove(&query.goal) {
            for inference in previous {
                query.produce_direct(inference);
            }
        }
    }

    fn process<P, L>(
        &mut self,
        query: &mut QueryState<C, A, P>,
        listener: &mut L,
    ) -> Result<(), EnumeratorError>
    where
        P: PriorityComparator<A>,
        L: Listener<A>,
    {
        loop {
            if self.monitor.is_interrupted() {
                // keep the pending work: lifting is once-per-conclusion, so
                // anything left in the queue would otherwise be lost to
                // later queries
                log::debug!(
                    "enumeration interrupted, shelving {} pending elements",
                    query.heap.len()
                );
                while let Some(Reverse(element)) = query.heap.pop() {
                    self.shelved.push_back(element.into_inference());
                }
                return Ok(());
            }
            let Some(Reverse(element)) = query.heap.pop() else {
                return Ok(());
            };
            let inference = element.into_inference();

            // a justification covered by an emitted one is useless for this
            // goal but may be minimal for another; shelve it
            if !query
                .emitted_justifications
                .is_minimal(inference.justification())
            {
                self.shelved.push_back(inference);
                continue;
            }

            if inference.premises().is_empty() && *inference.conclusion() == query.goal {
                query
                    .emitted_justifications
                    .add(inference.justification().clone());
                log::debug!(
                    "{:?}: minimal justification {:?}",
                    query.goal,
                    inference.justification().elements()
                );
                listener.new_minimal_subset(inference.justification().elements());
                self.shelved.push_back(inference);
                continue;
            }

            if !inference.minimality_checked() {
                let index = self
                    .minimal_inferences
                    .entry(inference.conclusion().clone())
                    .or_default();
                if !index.is_minimal(&inference) {
                    // subsumed by a stored inference
                    continue;
                }
                inference.mark_minimality_checked();
                index.add(Rc::clone(&inference));
                self.stats.minimal_inferences += 1;
            }

            match self
                .selection
                .resolving_atom(&inference, &self.counts, &query.goal)
            {
                Some(premise) => {
                    self.by_selected_premise
                        .entry(premise.clone())
                        .or_default()
                        .push(Rc::clone(&inference));
                    if let Some(others) = self.by_selected_conclusion.get(&premise) {
                        for other in others {
                            query.produce_resolvent(other, &inference);
                        }
                    }
                }
                None => {
                    if *inference.conclusion() == query.goal {
                        return Err(EnumeratorError::GoalConclusionSelected);
                    }
                    self.by_selected_conclusion
                        .entry(inference.conclusion().clone())
                        .or_default()
                        .push(Rc::clone(&inference));
                    if let Some(others) = self.by_selected_premise.get(inference.conclusion()) {
                        for other in others {
                            query.produce_resolvent(&inference, other);
                        }
                    }
                }
            }
        }
    }
}

/// Per-query enumerator borrowing the engine; see
/// [`ResolutionEngine::enumerator`].
pub struct JustificationEnumerator<'e, C, A, S, J, M>
where
    S: InferenceSet<C>,
{
    engine: &'e mut ResolutionEngine<C, A, S, J, M>,
    goal: C,
}

impl<C, A, S, J, M> MinimalSubsetEnumerator<A> for JustificationEnumerator<'_, C, A, S, J, M>
where
    C: Clone + Eq + Hash + Debug,
    A: Clone + Eq + Hash + Debug,
    S: InferenceSet<C>,
    J: InferenceJustifier<A, S::Inf>,
    M: InterruptMonitor,
{
    fn enumerate_with<P: PriorityComparator<A>, L: Listener<A>>(
        &mut self,
        priority: P,
        listener: &mut L,
    ) -> Result<(), EnumeratorError> {
        let mut query = QueryState {
            goal: self.goal.clone(),
            priority,
            heap: BinaryHeap::new(),
            emitted_justifications: MinimalityIndex::new(),
            produced: 0,
        };
        self.engine.initialize(&mut query);
        self.engine.unshelve(&mut query);
        self.engine.change_selection(&mut query);
        let result = self.engine.process(&mut query, listener);
        self.engine.stats.produced_inferences += query.produced;
        result
    }
}

/// State owned by a single enumeration: the priority queue and the
/// justifications emitted so far.
struct QueryState<C, A, P: PriorityComparator<A>> {
    goal: C,
    priority: P,
    heap: BinaryHeap<Reverse<QueueElement<C, A, P::Priority>>>,
    emitted_justifications: MinimalityIndex<AxiomSet<A>>,
    produced: usize,
}

impl<C, A, P> QueryState<C, A, P>
where
    C: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
    P: PriorityComparator<A>,
{
    fn produce_direct(&mut self, inference: Rc<DerivedInference<C, A>>) {
        if inference.is_tautology() {
            return;
        }
        let priority = self
            .priority
            .priority(&AxiomSetView::Single(inference.justification().elements()));
        let premise_count = inference.premises().len();
        self.produced += 1;
        self.heap.push(Reverse(QueueElement {
            priority,
            premise_count,
            payload: Payload::Direct(inference),
        }));
    }

    /// Queue the resolution of `first` into `second` without materializing
    /// it: priority, premise count and the tautology test are all computed
    /// from the parents.
    fn produce_resolvent(
        &mut self,
        first: &Rc<DerivedInference<C, A>>,
        second: &Rc<DerivedInference<C, A>>,
    ) {
        if first.premises().contains(second.conclusion()) {
            // the resolvent would be a tautology
            return;
        }
        let priority = self.priority.priority(&AxiomSetView::Union(
            first.justification().elements(),
            second.justification().elements(),
        ));
        let premise_count = first.premises().len()
            + second
                .premises()
                .iter()
                .filter(|p| !first.premises().contains(*p))
                .count()
            - 1;
        self.produced += 1;
        self.heap.push(Reverse(QueueElement {
            priority,
            premise_count,
            payload: Payload::Resolvent(Rc::clone(first), Rc::clone(second)),
        }));
    }
}

/// Queue entry: an inference, or a pending resolution of two.
struct QueueElement<C, A, P> {
    priority: P,
    premise_count: usize,
    payload: Payload<C, A>,
}

enum Payload<C, A> {
    Direct(Rc<DerivedInference<C, A>>),
    Resolvent(Rc<DerivedInference<C, A>>, Rc<DerivedInference<C, A>>),
}

impl<C, A, P> QueueElement<C, A, P>
where
    C: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    fn into_inference(self) -> Rc<DerivedInference<C, A>> {
        match self.payload {
            Payload::Direct(inference) => inference,
            Payload::Resolvent(first, second) => {
                Rc::new(DerivedInference::resolve(&first, &second))
            }
        }
    }
}

impl<C, A, P: Ord> PartialEq for QueueElement<C, A, P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl<C, A, P: Ord> Eq for QueueElement<C, A, P> {}

impl<C, A, P: Ord> PartialOrd for QueueElement<C, A, P> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<C, A, P: Ord> Ord for QueueElement<C, A, P> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.premise_count.cmp(&other.premise_count))
    }
}
