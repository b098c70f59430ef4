//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `hearth_core` linkage.
//! - Walk one emit/subscribe round trip so the observable core is exercised
//!   outside the Flutter/FFI runtime.

use hearth_core::{memory_bus, session_store, MemoryEventDraft, MemoryKind, MemorySource};
use serde_json::Map;

fn main() {
    println!("hearth_core ping={}", hearth_core::ping());
    println!("hearth_core version={}", hearth_core::core_version());

    let subscription = memory_bus().subscribe(|event| {
        println!(
            "memory_event id={} source={} kind={}",
            event.id,
            event.source.as_str(),
            event.kind.as_str()
        );
    });
    memory_bus().emit(MemoryEventDraft::new(
        MemorySource::Notes,
        MemoryKind::Action,
        Map::new(),
    ));
    subscription.cancel();

    let state = session_store().snapshot();
    println!(
        "session is_complete={} domains={} guidance={}",
        state.is_complete,
        state.preferences.domains.len(),
        state
            .preferences
            .guidance
            .map_or("none", |mode| mode.as_str())
    );
}
