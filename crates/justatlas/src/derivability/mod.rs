//! Derivability checking with dynamic blocking.
//!
//! A conclusion is derivable when some inference produces it whose every
//! premise is recursively derivable. [`InferenceDerivabilityChecker`] keeps
//! its state across queries: repeated checks reuse earlier work, and
//! conclusions can be blocked from participating in derivations (with
//! retraction of everything that depended on them) and unblocked again.

mod checker;

pub use checker::{DerivabilityChecker, DerivabilityCheckerWithBlocking, InferenceDerivabilityChecker};
