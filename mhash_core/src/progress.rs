//! Progress reporting abstractions
//!
//! The hasher reports progress synchronously, at most once per block read
//! and never after finalization. Sinks decide what to do with the update:
//! drop it ([`NullProvider`]), run a closure, or forward it to an
//! asynchronous consumer over a bounded channel ([`ChannelProvider`]).

use std::path::PathBuf;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Progress of one hashing run after a block read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// File being hashed
    pub path: PathBuf,
    /// `floor(bytes_processed * 100 / total_bytes)`, capped at 100
    pub percent: u8,
    pub bytes_processed: u64,
    /// File length captured when the run started
    pub total_bytes: u64,
}

impl ProgressUpdate {
    /// Build an update, deriving the integer percentage
    pub fn new(path: PathBuf, bytes_processed: u64, total_bytes: u64) -> Self {
        Self {
            path,
            percent: percent_of(bytes_processed, total_bytes),
            bytes_processed,
            total_bytes,
        }
    }
}

/// Integer percentage, capped at 100
///
/// A file that grows while it is read would otherwise report more than 100,
/// and a file that was empty when the run started reports 100 for any bytes.
pub fn percent_of(processed: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let percent = (processed as u128 * 100) / total as u128;
    percent.min(100) as u8
}

/// Core trait for progress reporting
pub trait ProgressProvider: Send + Sync {
    /// Report a progress update
    fn report(&self, update: ProgressUpdate);
}

/// Closures are sinks too
impl<F> ProgressProvider for F
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        self(update)
    }
}

/// Null implementation for when no progress is needed
pub struct NullProvider;

impl ProgressProvider for NullProvider {
    fn report(&self, _update: ProgressUpdate) {
        // No-op: discard all progress updates
    }
}

/// Forwards updates to a bounded channel without blocking the read loop
///
/// When the channel is full the update is dropped; the next block produces a
/// fresher one anyway.
pub struct ChannelProvider {
    tx: Mutex<Option<mpsc::Sender<ProgressUpdate>>>,
}

impl ChannelProvider {
    pub fn new(tx: mpsc::Sender<ProgressUpdate>) -> Self {
        Self {
            tx: Mutex::new(Some(tx)),
        }
    }

    /// Create a provider together with the receiving end of its channel
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ProgressUpdate>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    /// Drop the sender so the receiver sees the end of the stream
    pub fn close(&self) {
        if let Ok(mut guard) = self.tx.lock() {
            *guard = None;
        }
    }
}

impl ProgressProvider for ChannelProvider {
    fn report(&self, update: ProgressUpdate) {
        let tx_opt = self.tx.lock().ok().and_then(|guard| guard.clone());
        if let Some(tx) = tx_opt {
            // Receiver might be gone or full; progress is best effort
            let _ = tx.try_send(update);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_is_floored() {
        assert_eq!(percent_of(0, 3), 0);
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 66);
        assert_eq!(percent_of(3, 3), 100);
    }

    #[test]
    fn test_percent_is_capped() {
        assert_eq!(percent_of(150, 100), 100);
        assert_eq!(percent_of(10, 0), 100);
        assert_eq!(percent_of(u64::MAX, u64::MAX), 100);
    }

    #[test]
    fn test_closure_provider() {
        let seen = Mutex::new(Vec::new());
        let sink = |update: ProgressUpdate| seen.lock().unwrap().push(update.percent);

        sink.report(ProgressUpdate::new(PathBuf::from("a.mkv"), 50, 100));
        sink.report(ProgressUpdate::new(PathBuf::from("a.mkv"), 100, 100));

        assert_eq!(*seen.lock().unwrap(), vec![50, 100]);
    }

    #[tokio::test]
    async fn test_channel_provider_delivers_and_closes() {
        let (provider, mut rx) = ChannelProvider::channel(4);

        provider.report(ProgressUpdate::new(PathBuf::from("/tmp/f"), 5, 10));
        provider.close();
        provider.report(ProgressUpdate::new(PathBuf::from("/tmp/f"), 10, 10));

        let update = rx.recv().await.unwrap();
        assert_eq!(update.percent, 50);
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_full_channel_drops_updates() {
        let (provider, mut rx) = ChannelProvider::channel(1);

        provider.report(ProgressUpdate::new(PathBuf::from("f"), 1, 4));
        provider.report(ProgressUpdate::new(PathBuf::from("f"), 2, 4));

        assert_eq!(rx.try_recv().unwrap().percent, 25);
        assert!(rx.try_recv().is_err());
    }
}
