//! Memory event bus.
//!
//! # Responsibility
//! - Let any feature domain publish a structured activity record.
//! - Fan the record out synchronously to every independent listener.
//!
//! # Invariants
//! - Delivery order equals emit order for every listener; no batching,
//!   reordering, or deduplication.
//! - No history: subscribers only see events emitted after they register.
//! - Payload contents pass through unvalidated; schema ownership stays with
//!   the emitting domain.

use crate::memory::event::{MemoryEvent, MemoryEventDraft};
use crate::observe::dispatch::{Dispatcher, Subscription};
use log::debug;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Fire-and-forget channel carrying cross-domain activity events.
pub struct MemoryBus {
    events: Dispatcher<MemoryEvent>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self {
            events: Dispatcher::new(),
        }
    }

    /// Publishes one activity record to every listener active right now.
    ///
    /// # Contract
    /// - Missing `id`/`timestamp` are defaulted (process-unique counter,
    ///   current instant) before delivery.
    /// - Delivery is synchronous: this does not return until every covered
    ///   listener has processed the event.
    /// - Returns the fully constructed event as delivered.
    pub fn emit(&self, draft: MemoryEventDraft) -> MemoryEvent {
        let event = draft.into_event();
        // Metadata only; payload contents never reach the log.
        debug!(
            "event=memory_emit module=memory status=ok id={} source={} kind={}",
            event.id,
            event.source.as_str(),
            event.kind.as_str()
        );
        self.events.notify(&event);
        event
    }

    /// Registers a listener for events emitted from now on.
    pub fn subscribe(
        &self,
        listener: impl Fn(&MemoryEvent) + Send + Sync + 'static,
    ) -> Subscription {
        self.events.subscribe(Arc::new(listener))
    }

    /// Returns the number of active listeners.
    pub fn listener_count(&self) -> usize {
        self.events.listener_count()
    }
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_BUS: Lazy<MemoryBus> = Lazy::new(MemoryBus::new);

/// Returns the process-wide bus shared by all feature domains.
///
/// Tests construct their own [`MemoryBus`] instances instead of going
/// through this accessor, keeping cross-test coupling out.
pub fn memory_bus() -> &'static MemoryBus {
    &GLOBAL_BUS
}
