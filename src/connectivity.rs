//! Connectivity state shared by all repositories.
//!
//! A single boolean, read synchronously at the start of every repository
//! call and never re-checked mid-flight. The monitor starts online
//! (optimistic default for environments without a reachability signal) and
//! can follow an external signal through [`ConnectivityMonitor::bind`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::debug;

/// Process-scoped online/offline flag.
pub struct ConnectivityMonitor {
    online: AtomicBool,
}

impl ConnectivityMonitor {
    /// New monitor, assumed online.
    pub fn new() -> Self {
        Self {
            online: AtomicBool::new(true),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Follow an environment reachability signal.
    ///
    /// Adopts the receiver's current value, then spawns one task that tracks
    /// every later transition for the life of the process. There is no
    /// unsubscribe; the monitor is constructed once at startup.
    pub fn bind(self: &Arc<Self>, mut signal: watch::Receiver<bool>) {
        self.set_online(*signal.borrow());
        let monitor = Arc::clone(self);
        tokio::spawn(async move {
            while signal.changed().await.is_ok() {
                let online = *signal.borrow();
                monitor.set_online(online);
                debug!(online, "connectivity transition");
            }
        });
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn starts_online() {
        let monitor = ConnectivityMonitor::new();
        assert!(monitor.is_online());
    }

    #[test]
    fn set_online_flips_state() {
        let monitor = ConnectivityMonitor::new();
        monitor.set_online(false);
        assert!(!monitor.is_online());
        monitor.set_online(true);
        assert!(monitor.is_online());
    }

    #[tokio::test]
    async fn bind_adopts_current_value() {
        let (_tx, rx) = watch::channel(false);
        let monitor = Arc::new(ConnectivityMonitor::new());
        monitor.bind(rx);
        assert!(!monitor.is_online());
    }

    #[tokio::test]
    async fn bind_follows_transitions() {
        let (tx, rx) = watch::channel(true);
        let monitor = Arc::new(ConnectivityMonitor::new());
        monitor.bind(rx);

        tx.send(false).unwrap();
        // The follower task needs a moment to observe the change.
        for _ in 0..50 {
            if !monitor.is_online() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(!monitor.is_online());

        tx.send(true).unwrap();
        for _ in 0..50 {
            if monitor.is_online() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(monitor.is_online());
    }
}
