//! One-shot "session running" broadcast shared by every thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Starts out running and flips to stopped exactly once.
///
/// Clones share the same flag. Only the controlling thread should call
/// [`RunFlag::stop`]; producers only read it.
#[derive(Debug, Clone)]
pub struct RunFlag {
    running: Arc<AtomicBool>,
}

impl RunFlag {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Stop the session. Returns `true` only for the call that performed the transition.
    pub fn stop(&self) -> bool {
        self.running.swap(false, Ordering::AcqRel)
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}
