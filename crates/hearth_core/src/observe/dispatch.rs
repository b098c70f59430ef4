//! Subscriber registry with synchronous, isolated fan-out.
//!
//! # Responsibility
//! - Track listener registrations in a stable order.
//! - Deliver one payload to every listener registered at dispatch start.
//!
//! # Invariants
//! - The registry lock is never held while a listener runs, so re-entrant
//!   subscribe/notify calls from inside a listener cannot deadlock.
//! - A panicking listener is contained and logged; delivery continues.
//! - Registering the same `Arc` identity twice yields a single delivery.

use log::error;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

/// Shared listener callback receiving the dispatched payload by reference.
pub type Listener<A> = Arc<dyn Fn(&A) + Send + Sync>;

struct Registry<A> {
    entries: Vec<(u64, Listener<A>)>,
    next_token: u64,
}

impl<A> Registry<A> {
    fn token_for(&self, listener: &Listener<A>) -> Option<u64> {
        self.entries
            .iter()
            .find(|(_, existing)| same_identity(existing, listener))
            .map(|(token, _)| *token)
    }
}

/// Ordered listener set with synchronous fan-out.
///
/// Cloning a dispatcher shares the underlying registry, so a store can hand
/// out subscription access without exposing its own internals.
pub struct Dispatcher<A> {
    registry: Arc<Mutex<Registry<A>>>,
}

impl<A: 'static> Dispatcher<A> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                entries: Vec::new(),
                next_token: 0,
            })),
        }
    }

    /// Registers a listener and returns its cancellation handle.
    ///
    /// # Contract
    /// - Listeners are invoked in registration order.
    /// - Re-registering the same `Arc` identity does not add a second entry;
    ///   the returned handle cancels the original registration.
    /// - A listener stays registered until its handle is cancelled; dropping
    ///   the handle without cancelling leaks the registration for the
    ///   process lifetime.
    pub fn subscribe(&self, listener: Listener<A>) -> Subscription {
        let token = {
            let mut registry = self.lock_registry();
            match registry.token_for(&listener) {
                Some(existing) => existing,
                None => {
                    let token = registry.next_token;
                    registry.next_token += 1;
                    registry.entries.push((token, listener));
                    token
                }
            }
        };
        Subscription::new(Arc::downgrade(&self.registry), token)
    }

    /// Delivers `payload` to every listener registered right now.
    ///
    /// # Contract
    /// - Synchronous: returns only after every covered listener ran.
    /// - The registry is snapshotted first; listeners added during the pass
    ///   are not invoked in it.
    /// - Each invocation is isolated: a panic is logged and delivery moves
    ///   on to the next listener.
    pub fn notify(&self, payload: &A) {
        let snapshot: Vec<(u64, Listener<A>)> = self.lock_registry().entries.clone();
        for (token, listener) in snapshot {
            if catch_unwind(AssertUnwindSafe(|| listener(payload))).is_err() {
                error!("event=listener_panic module=observe status=error token={token}");
            }
        }
    }

    /// Returns the number of active registrations.
    pub fn listener_count(&self) -> usize {
        self.lock_registry().entries.len()
    }

    fn lock_registry(&self) -> MutexGuard<'_, Registry<A>> {
        // The lock is never held across listener code, so poisoning can only
        // come from an unrelated panic; the registry data is still coherent.
        match self.registry.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<A: 'static> Default for Dispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

/// Cancellation handle for one listener registration.
///
/// Cancellation is explicit: consumers call [`Subscription::cancel`] when
/// they stop needing updates (e.g. on unmount). A dropped-but-uncancelled
/// handle leaves the listener registered, which is unbounded growth over a
/// long session rather than a hard failure.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn new<A: 'static>(registry: Weak<Mutex<Registry<A>>>, token: u64) -> Self {
        Self {
            cancel: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    let mut guard = match registry.lock() {
                        Ok(guard) => guard,
                        Err(poisoned) => poisoned.into_inner(),
                    };
                    guard.entries.retain(|(entry, _)| *entry != token);
                }
            })),
        }
    }

    /// Removes exactly the registration this handle was created for.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

fn same_identity<A>(left: &Listener<A>, right: &Listener<A>) -> bool {
    // Compare data addresses only; vtable addresses are not stable enough
    // across codegen units to participate in identity.
    std::ptr::addr_eq(Arc::as_ptr(left), Arc::as_ptr(right))
}
