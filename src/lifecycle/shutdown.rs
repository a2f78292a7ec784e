//! Shutdown coordination for the service.
//!
//! The trigger is latched: a listener that subscribes after shutdown was
//! requested still observes it.

use tokio::sync::watch;

/// Graceful stop request shared by the signal handler and the HTTP server.
#[derive(Clone)]
pub struct Shutdown {
    requested: watch::Sender<bool>,
}

/// One listener's view of the stop request.
pub struct ShutdownSignal {
    requested: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (requested, _) = watch::channel(false);
        Self { requested }
    }

    /// Register a new listener.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            requested: self.requested.subscribe(),
        }
    }

    /// Request shutdown. Repeated calls are no-ops.
    pub fn trigger(&self) {
        let changed = self.requested.send_if_modified(|requested| !std::mem::replace(requested, true));
        if changed {
            tracing::info!(listeners = self.requested.receiver_count(), "Shutdown requested");
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.requested.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Resolve once shutdown has been requested.
    ///
    /// Also resolves if every [`Shutdown`] handle was dropped.
    pub async fn wait(mut self) {
        let _ = self.requested.wait_for(|requested| *requested).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_reaches_listeners() {
        let shutdown = Shutdown::new();
        let a = shutdown.subscribe();
        let b = shutdown.subscribe();

        shutdown.trigger();
        a.wait().await;
        b.wait().await;
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn test_late_listener_sees_trigger() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), shutdown.subscribe().wait())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_pending_until_triggered() {
        let shutdown = Shutdown::default();
        let waited = tokio::time::timeout(Duration::from_millis(50), shutdown.subscribe().wait()).await;
        assert!(waited.is_err());
        assert!(!shutdown.is_triggered());
    }
}
