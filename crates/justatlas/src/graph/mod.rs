//! Inference-graph contracts and the stock conclusion-indexed graph.
//!
//! An inference graph is described to the engines through three small
//! traits: [`Inference`] (one derivation step), [`InferenceSet`] (all
//! inferences producing a conclusion) and [`InferenceJustifier`] (the
//! axioms an inference depends on). [`IndexedInferenceSet`] is a growable
//! in-memory implementation that also supports change notification via
//! [`DynamicInferenceSet`].

mod inference;
mod inference_set;
mod justifier;

pub use inference::{GenericInference, Inference};
pub use inference_set::{
    ChangeListener, DynamicInferenceSet, IndexedInferenceSet, InferenceSet, ListenerId,
};
pub use justifier::{EmptyJustifier, InferenceJustifier};
