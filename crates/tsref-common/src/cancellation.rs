//! Cooperative cancellation for long-running queries.
//!
//! A query threads one `CancellationToken` through every recursive call.
//! Cancellation is an abandon-query signal, not an error: a caller that
//! observes it discards all accumulated state and reports a canceled
//! status distinct from "found nothing".

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared cancellation flag. Cloning produces another handle to the same
/// flag, so the host can cancel a query it handed to the engine.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> CancellationToken {
        CancellationToken::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_canceled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_visible_through_clones() {
        let token = CancellationToken::new();
        let handle = token.clone();
        assert!(!token.is_canceled());
        handle.cancel();
        assert!(token.is_canceled());
    }
}
