//! Core observable state and event layer for Hearth.
//! This crate is the single source of truth for session and memory-feed
//! consistency invariants shared by every UI surface.

pub mod logging;
pub mod memory;
pub mod observe;
pub mod session;

pub use logging::{default_log_level, init_logging, logging_status};
pub use memory::{
    memory_bus, MemoryBus, MemoryEvent, MemoryEventDraft, MemoryKind, MemorySource,
};
pub use observe::{Dispatcher, Listener, ObservableCell, Subscription};
pub use session::{
    session_store, GuidanceMode, Preferences, SessionState, SessionStore,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
