//! View invalidation seam.
//!
//! After a successful mutation the services announce which rendered view is
//! stale. When and how the view is rebuilt is decided by whoever listens.
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Path of the home feed, the only view the services invalidate.
pub const HOME_PATH: &str = "/";

/// Receiver of "this path is stale" signals.
pub trait ViewInvalidator: Send + Sync {
    fn invalidate(&self, path: &str);
}

/// Logs every invalidation and fans it out to in-process subscribers.
pub struct BroadcastInvalidator {
    sender: broadcast::Sender<String>,
}

impl BroadcastInvalidator {
    /// Creates an invalidator whose channel buffers `capacity` signals per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribes to the paths invalidated from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }
}

impl ViewInvalidator for BroadcastInvalidator {
    fn invalidate(&self, path: &str) {
        info!(path = %path, "Invalidating view");
        match self.sender.send(path.to_string()) {
            Ok(receivers) => debug!(path = %path, receivers, "Invalidation delivered"),
            Err(_) => debug!(path = %path, "No invalidation subscribers"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_invalidated_paths() {
        let invalidator = BroadcastInvalidator::new(8);
        let mut receiver = invalidator.subscribe();

        invalidator.invalidate(HOME_PATH);

        assert_eq!(receiver.recv().await.unwrap(), "/");
    }

    #[test]
    fn invalidating_without_subscribers_is_harmless() {
        let invalidator = BroadcastInvalidator::new(0);
        invalidator.invalidate(HOME_PATH);
    }
}
