//! Error types for justatlas.

use thiserror::Error;

/// Errors raised during a justification enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnumeratorError {
    /// A selection strategy selected the conclusion of an inference whose
    /// conclusion is the current goal while the inference still has
    /// premises. The goal is the terminal resolution sink, so this state is
    /// unreachable with the bundled strategies; it indicates a faulty
    /// user-supplied [`Selection`](crate::justifications::Selection).
    #[error("goal conclusion cannot be selected while the inference has premises")]
    GoalConclusionSelected,
}
