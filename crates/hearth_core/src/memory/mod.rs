//! Cross-domain activity feed ("AI memory") event channel.
//!
//! # Responsibility
//! - Define the structured activity event shared by all feature domains.
//! - Relay emitted events synchronously to every interested listener.
//!
//! # Invariants
//! - Generated event ids are unique for the process lifetime.
//! - The bus keeps no history: a listener only sees events emitted after it
//!   subscribed.

pub mod bus;
pub mod event;

pub use bus::{memory_bus, MemoryBus};
pub use event::{MemoryEvent, MemoryEventDraft, MemoryKind, MemorySource};
