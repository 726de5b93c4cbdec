//! Host execution context
//!
//! A search may only run while the hosting application has an active
//! session. The binary flips the flag off as soon as shutdown starts.

use std::sync::atomic::{AtomicBool, Ordering};

/// Availability of the hosting session
pub trait HostContext: Send + Sync {
    fn has_active_context(&self) -> bool;
}

/// Session flag shared between the host and the orchestrator
#[derive(Debug, Default)]
pub struct SessionContext {
    active: AtomicBool,
}

impl SessionContext {
    /// Create an inactive session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that is already active
    pub fn active() -> Self {
        let ctx = Self::new();
        ctx.activate();
        ctx
    }

    pub fn activate(&self) {
        self.active.store(true, Ordering::SeqCst);
    }

    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

impl HostContext for SessionContext {
    fn has_active_context(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}
