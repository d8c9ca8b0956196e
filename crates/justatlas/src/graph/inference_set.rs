//! Inference providers: the graph side of the engine contracts.

use super::inference::{GenericInference, Inference};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::HashSet;
use std::hash::Hash;

/// Provider of the inferences deriving each conclusion.
///
/// `inferences_of` returns an owned snapshot of the finite inference
/// collection for a conclusion. The collection must be semantically stable
/// for the duration of a single engine query; a fresh `Vec` per call is
/// fine. Engines keep their own cursors over the snapshots, so providers
/// never need to hand out long-lived borrows.
pub trait InferenceSet<C> {
    type Inf: Inference<C>;

    fn inferences_of(&self, conclusion: &C) -> Vec<Self::Inf>;
}

impl<C, S: InferenceSet<C> + ?Sized> InferenceSet<C> for &S {
    type Inf = S::Inf;

    fn inferences_of(&self, conclusion: &C) -> Vec<Self::Inf> {
        (**self).inferences_of(conclusion)
    }
}

/// Notification target for [`DynamicInferenceSet`] changes.
pub trait ChangeListener {
    /// Called whenever the inferences already returned for some queried
    /// conclusion may have changed, i.e. querying again may give a
    /// different result.
    fn inferences_changed(&mut self);
}

impl<F: FnMut()> ChangeListener for F {
    fn inferences_changed(&mut self) {
        self()
    }
}

/// Handle identifying a registered [`ChangeListener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// An [`InferenceSet`] whose contents can change after being queried.
///
/// Engines do not subscribe themselves; callers listen for changes and
/// invalidate engine state externally (typically by rebuilding the engine).
pub trait DynamicInferenceSet<C>: InferenceSet<C> {
    fn add_listener(&mut self, listener: Box<dyn ChangeListener>) -> ListenerId;

    fn remove_listener(&mut self, id: ListenerId);

    /// Release external resources held by this inference set. The set must
    /// not be used afterwards.
    fn dispose(&mut self);
}

/// Growable inference set indexed by conclusion.
///
/// Tracks which conclusions have been queried through
/// [`InferenceSet::inferences_of`] and notifies listeners when the
/// inferences of a queried conclusion change, so cached engine state can
/// be invalidated.
pub struct IndexedInferenceSet<C> {
    inferences: IndexMap<C, Vec<GenericInference<C>>>,
    /// Conclusions queried since the last change notification.
    queried: RefCell<HashSet<C>>,
    listeners: Vec<(ListenerId, Box<dyn ChangeListener>)>,
    next_listener_id: u64,
}

impl<C: Clone + Eq + Hash + std::fmt::Debug> IndexedInferenceSet<C> {
    pub fn new() -> Self {
        IndexedInferenceSet {
            inferences: IndexMap::new(),
            queried: RefCell::new(HashSet::new()),
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Add an inference to the graph.
    pub fn produce(&mut self, inference: GenericInference<C>) {
        log::trace!("{}: inference added", inference);
        let conclusion = inference.conclusion().clone();
        self.inferences
            .entry(conclusion.clone())
            .or_default()
            .push(inference);
        let was_queried = self.queried.borrow().contains(&conclusion);
        if was_queried {
            self.fire_changed();
        }
    }

    /// Remove all inferences.
    pub fn clear(&mut self) {
        if self.inferences.is_empty() {
            return;
        }
        log::trace!("inferences cleared");
        self.inferences.clear();
        let any_queried = !self.queried.borrow().is_empty();
        if any_queried {
            self.fire_changed();
        }
    }

    fn fire_changed(&mut self) {
        self.queried.borrow_mut().clear();
        for (_, listener) in &mut self.listeners {
            listener.inferences_changed();
        }
    }
}

impl<C: Clone + Eq + Hash + std::fmt::Debug> Default for IndexedInferenceSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clone + Eq + Hash> InferenceSet<C> for IndexedInferenceSet<C> {
    type Inf = GenericInference<C>;

    fn inferences_of(&self, conclusion: &C) -> Vec<GenericInference<C>> {
        self.queried.borrow_mut().insert(conclusion.clone());
        self.inferences
            .get(conclusion)
            .cloned()
            .unwrap_or_default()
    }
}

impl<C: Clone + Eq + Hash + std::fmt::Debug> DynamicInferenceSet<C> for IndexedInferenceSet<C> {
    fn add_listener(&mut self, listener: Box<dyn ChangeListener>) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }

    fn dispose(&mut self) {
        self.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn produce_and_query() {
        let mut set = IndexedInferenceSet::new();
        set.produce(GenericInference::new("r1", "c", vec!["a"]));
        set.produce(GenericInference::new("r2", "c", vec!["b"]));
        set.produce(GenericInference::new("axiom", "a", vec![]));

        assert_eq!(set.inferences_of(&"c").len(), 2);
        assert_eq!(set.inferences_of(&"a").len(), 1);
        assert!(set.inferences_of(&"missing").is_empty());
    }

    #[test]
    fn change_notification_only_for_queried() {
        let mut set = IndexedInferenceSet::new();
        let fired = Rc::new(Cell::new(0));
        let fired_in_listener = Rc::clone(&fired);
        set.add_listener(Box::new(move || {
            fired_in_listener.set(fired_in_listener.get() + 1)
        }));

        set.produce(GenericInference::new("r1", "c", vec![]));
        assert_eq!(fired.get(), 0, "conclusion was never queried");

        set.inferences_of(&"c");
        set.produce(GenericInference::new("r2", "c", vec![]));
        assert_eq!(fired.get(), 1);

        // queried set was reset by the notification
        set.produce(GenericInference::new("r3", "c", vec![]));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn clearing_notifies_queried() {
        let mut set = IndexedInferenceSet::new();
        let fired = Rc::new(Cell::new(0));
        let fired_in_listener = Rc::clone(&fired);
        set.add_listener(Box::new(move || {
            fired_in_listener.set(fired_in_listener.get() + 1)
        }));

        set.produce(GenericInference::new("r1", "c", vec![]));
        set.inferences_of(&"c");
        set.clear();
        assert_eq!(fired.get(), 1);
        assert!(set.inferences_of(&"c").is_empty());
    }

    #[test]
    fn removed_listener_not_notified() {
        let mut set = IndexedInferenceSet::new();
        let fired = Rc::new(Cell::new(0));
        let fired_in_listener = Rc::clone(&fired);
        let id = set.add_listener(Box::new(move || {
            fired_in_listener.set(fired_in_listener.get() + 1)
        }));
        set.remove_listener(id);

        set.inferences_of(&"c");
        set.produce(GenericInference::new("r1", "c", vec![]));
        assert_eq!(fired.get(), 0);
    }
}
