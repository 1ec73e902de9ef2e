use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Hook polled by the sampler before every attempt.
///
/// Returning `true` stops sampling; the stations accepted so far are kept.
pub trait CancellationCheck {
    fn is_cancelled(&self, attempt: u32) -> bool;
}

/// Never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancellationCheck for NeverCancel {
    fn is_cancelled(&self, _attempt: u32) -> bool {
        false
    }
}

/// Cancels once a shared flag is raised, e.g. from another thread.
#[derive(Debug, Clone, Copy)]
pub struct CancelFlag<'a>(pub &'a AtomicBool);

impl CancellationCheck for CancelFlag<'_> {
    fn is_cancelled(&self, _attempt: u32) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Cancels once a wall-clock deadline has passed.
#[derive(Debug, Clone, Copy)]
pub struct Deadline(pub Instant);

impl CancellationCheck for Deadline {
    fn is_cancelled(&self, _attempt: u32) -> bool {
        Instant::now() >= self.0
    }
}

impl<F: Fn(u32) -> bool> CancellationCheck for F {
    fn is_cancelled(&self, attempt: u32) -> bool {
        self(attempt)
    }
}
