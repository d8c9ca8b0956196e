//! justatlas: reasoning over inference graphs.
//!
//! An inference graph derives conclusions from premise sets, with each
//! inference justified by a set of atomic axioms. This library answers two
//! questions about such graphs:
//!
//! - **Derivability**: is a goal conclusion derivable, given a dynamic set
//!   of blocked conclusions? See
//!   [`InferenceDerivabilityChecker`](derivability::InferenceDerivabilityChecker).
//! - **Minimal justifications**: which subset-minimal sets of axioms
//!   suffice to derive the goal? See
//!   [`ResolutionEngine`](justifications::ResolutionEngine), which also
//!   powers [`minimal_hitting_sets`](justifications::minimal_hitting_sets).
//!
//! Graphs are supplied through the [`graph`] traits; both engines read the
//! graph lazily and keep incremental state across queries.

pub mod derivability;
pub mod error;
pub mod graph;
pub mod index;
pub mod interrupt;
pub mod justifications;

// Re-export commonly used types
pub use derivability::{
    DerivabilityChecker, DerivabilityCheckerWithBlocking, InferenceDerivabilityChecker,
};
pub use error::EnumeratorError;
pub use graph::{
    ChangeListener, DynamicInferenceSet, EmptyJustifier, GenericInference, IndexedInferenceSet,
    Inference, InferenceJustifier, InferenceSet, ListenerId,
};
pub use index::{ElementSet, Fingerprint, MinimalityIndex};
pub use interrupt::{InterruptMonitor, NeverInterrupted};
pub use justifications::{
    minimal_hitting_sets, AxiomSet, AxiomSetView, BottomUpSelection, DerivedInference,
    InferenceCounts, JustificationEnumerator, KeyOrder, Listener, MinimalHittingSetEnumerator,
    MinimalSubsetEnumerator, PriorityComparator, ResolutionEngine, ResolutionStats, Selection,
    SizeOrder, ThresholdSelection, TopDownSelection,
};
