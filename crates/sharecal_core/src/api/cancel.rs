//! Cooperative cancellation for in-flight data-layer calls.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancel flag handed to every async call of one view.
///
/// Clones observe the same flag. The owning view cancels on teardown; calls
/// check the flag before applying results.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the token cancelled. Repeated calls are no-ops.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::CancellationToken;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let view = token.clone();
        assert!(!view.is_cancelled());

        token.cancel();
        token.cancel();
        assert!(view.is_cancelled());
    }
}
