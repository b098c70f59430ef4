//! Observable value cell.
//!
//! # Responsibility
//! - Hold one shared value and notify subscribers on every mutation.
//! - Leave the meaning of "changed" to the owning store.
//!
//! # Invariants
//! - Every subscriber reading after a mutation observes the same value;
//!   consumers receive full snapshots, never diffs.
//! - The value lock is released before notification, so listeners may read
//!   the cell or mutate other stores without deadlocking.

use crate::observe::dispatch::{Dispatcher, Subscription};
use std::sync::{Arc, Mutex};

/// A mutable value paired with a change-notification registry.
pub struct ObservableCell<T> {
    value: Mutex<T>,
    changes: Dispatcher<()>,
}

impl<T: Clone> ObservableCell<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: Mutex::new(initial),
            changes: Dispatcher::new(),
        }
    }

    /// Returns a snapshot clone of the current value.
    pub fn get(&self) -> T {
        self.lock_value().clone()
    }

    /// Replaces the value and notifies all current subscribers.
    pub fn set(&self, value: T) {
        self.update(|current| *current = value);
    }

    /// Mutates the value in place and notifies all current subscribers.
    ///
    /// Notification is unconditional: the cell does not compare old and new
    /// values, so an effective no-op mutation still fans out.
    pub fn update(&self, mutate: impl FnOnce(&mut T)) {
        {
            let mut guard = self.lock_value();
            mutate(&mut guard);
        }
        self.changes.notify(&());
    }

    /// Registers a change listener; the listener re-reads via [`Self::get`].
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.changes.subscribe(Arc::new(move |_: &()| listener()))
    }

    /// Returns the number of active change listeners.
    pub fn listener_count(&self) -> usize {
        self.changes.listener_count()
    }

    fn lock_value(&self) -> std::sync::MutexGuard<'_, T> {
        match self.value.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
