// src/cancel.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative stop request shared between a supervisor and the worker.
/// The worker only looks at it between accounts and while waiting for the
/// render resource to boot.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
