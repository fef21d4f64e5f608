use std::sync::atomic::{AtomicBool, Ordering};

/// Whether the source files have been synchronized at least once.
///
/// Handlers query this before touching the pipeline. The flag is flipped
/// with a single atomic store after a fully successful sync and is never
/// downgraded: a later partial sync failure leaves the already-downloaded
/// files usable.
#[derive(Debug, Default)]
pub struct ReadinessState {
    ready: AtomicBool,
}

impl ReadinessState {
    pub fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }
}
