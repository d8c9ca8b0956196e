//! Cooperative cancellation for long-running enumerations.
//!
//! The resolution engine polls an [`InterruptMonitor`] at the top of each
//! processing step and exits cleanly when it is raised; results emitted so
//! far remain valid and a later call may resume. Timeouts are built on top
//! by flipping a shared flag from a timer thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Poll-only cancellation signal.
pub trait InterruptMonitor {
    /// Returns `true` once the computation should stop at the next
    /// opportunity. Must be cheap; it is polled in a hot loop.
    fn is_interrupted(&self) -> bool;
}

/// Monitor that never interrupts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverInterrupted;

impl InterruptMonitor for NeverInterrupted {
    fn is_interrupted(&self) -> bool {
        false
    }
}

/// A shared flag doubles as a monitor, so callers can hand the same
/// `Arc<AtomicBool>` to a timer thread and to the engine.
impl InterruptMonitor for AtomicBool {
    fn is_interrupted(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<M: InterruptMonitor + ?Sized> InterruptMonitor for &M {
    fn is_interrupted(&self) -> bool {
        (**self).is_interrupted()
    }
}

impl<M: InterruptMonitor + ?Sized> InterruptMonitor for Arc<M> {
    fn is_interrupted(&self) -> bool {
        (**self).is_interrupted()
    }
}
