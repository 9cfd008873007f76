//! Observable active-key cell

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

type Listener<K> = Arc<dyn Fn(&K) + Send + Sync>;

/// Registration returned by [`ActiveKey::on_change`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Observable cell holding the currently selected key
///
/// Clones share the same cell. Listeners and subscribers are only notified
/// when `set` actually changes the value. Listeners run synchronously inside
/// `set`, before it returns.
pub struct ActiveKey<K> {
    sender: Arc<watch::Sender<K>>,
    listeners: Arc<Mutex<Vec<(ListenerId, Listener<K>)>>>,
    next_id: Arc<AtomicU64>,
}

impl<K> Clone for ActiveKey<K> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
            listeners: Arc::clone(&self.listeners),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<K: Debug> Debug for ActiveKey<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("ActiveKey")
            .field("key", &*self.sender.borrow())
            .field("listeners", &listeners)
            .finish()
    }
}

impl<K: Clone + PartialEq> ActiveKey<K> {
    /// Create a cell holding `initial`
    pub fn new(initial: K) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current key
    pub fn get(&self) -> K {
        self.sender.borrow().clone()
    }

    /// Replace the key, returning whether the value changed
    ///
    /// On a change every registered listener is called with the new key
    /// before this returns.
    pub fn set(&self, key: K) -> bool {
        let changed = self.sender.send_if_modified(|current| {
            if *current == key {
                false
            } else {
                *current = key.clone();
                true
            }
        });

        if changed {
            self.notify(&key);
        }
        changed
    }

    /// Subscribe to key changes
    pub fn subscribe(&self) -> watch::Receiver<K> {
        self.sender.subscribe()
    }
}

impl<K> ActiveKey<K> {
    /// Register a callback run synchronously on every key change
    ///
    /// The callback must not call `set` on the same cell.
    pub fn on_change<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&K) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        id
    }

    /// Unregister a callback; returns whether it was registered
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != id);
        listeners.len() != before
    }

    fn notify(&self, key: &K) {
        // Listeners run outside the lock
        let listeners: Vec<Listener<K>> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(key);
        }
    }
}
