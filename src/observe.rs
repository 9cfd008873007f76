//! Change notification for observable state
//!
//! Every piece of mutable state in this crate publishes a revision counter
//! through a `tokio::sync::watch` channel. Presentation layers subscribe and
//! re-read the state whenever the revision moves.

use std::sync::Arc;
use tokio::sync::watch;

/// Shared revision counter bumped on every state mutation
#[derive(Debug, Clone)]
pub struct Revision {
    sender: Arc<watch::Sender<u64>>,
}

impl Revision {
    /// Create a new revision counter starting at zero
    pub fn new() -> Self {
        let (sender, _) = watch::channel(0);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Current revision
    pub fn current(&self) -> u64 {
        *self.sender.borrow()
    }

    /// Record a mutation and wake subscribers
    pub fn bump(&self) {
        self.sender.send_modify(|rev| *rev = rev.wrapping_add(1));
    }

    /// Subscribe to revision changes
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.sender.subscribe()
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::new()
    }
}
