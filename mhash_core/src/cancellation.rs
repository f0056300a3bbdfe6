//! Cooperative cancellation
//!
//! A hashing run polls its token once per block, after the read and before
//! the next one. Cancelling never interrupts a read in flight.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Cloneable cancellation handle; all clones share one flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    parent: Option<Box<CancellationToken>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// True once this token or any ancestor was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.is_cancelled())
    }

    /// A token that is cancelled with this one but can also be cancelled alone
    pub fn child_token(&self) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            parent: Some(Box::new(self.clone())),
        }
    }

    /// Cancel this token once `timeout` elapses
    ///
    /// Must be called from within a tokio runtime. The returned handle can be
    /// aborted to disarm the deadline.
    pub fn cancel_after(&self, timeout: Duration) -> tokio::task::JoinHandle<()> {
        let token = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            log::debug!("Deadline of {timeout:?} reached, cancelling");
            token.cancel();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_child_follows_parent_but_not_back() {
        let parent = CancellationToken::new();
        let child = parent.child_token();
        let sibling = parent.child_token();

        child.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
        assert!(!sibling.is_cancelled());

        parent.cancel();
        assert!(sibling.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_deadline() {
        let token = CancellationToken::new();
        let _deadline = token.cancel_after(Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(!token.is_cancelled());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_deadline_never_fires() {
        let token = CancellationToken::new();
        let deadline = token.cancel_after(Duration::from_secs(1));
        deadline.abort();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!token.is_cancelled());
    }
}
