//! Cooperative cancellation
//!
//! Long-running loops check the token between iterations. A cancelled loop
//! finishes the iteration in progress (including any frames already being
//! sent) and then returns.

use portable_atomic::{AtomicBool, Ordering};

/// Cancellation token shared by the bridge tasks
#[derive(Debug)]
pub struct Cancel {
    flag: AtomicBool,
}

impl Cancel {
    /// Create a token that is not cancelled
    pub const fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl Default for Cancel {
    fn default() -> Self {
        Self::new()
    }
}
