//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple for the UI: empty string means success.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Session reads are pull-based: the shell re-reads a snapshot after its
//!   own action calls instead of holding push subscriptions over FFI.

use hearth_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, memory_bus,
    ping as ping_inner, session_store, GuidanceMode, MemoryEventDraft, MemoryKind, MemorySource,
};
use log::{debug, info, warn};

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Idempotent for identical `level + log_dir`; reconfiguration attempts
///   return an error message.
/// - Never panics; returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Routing-guard read: whether onboarding has been completed.
///
/// # FFI contract
/// - Sync call, non-blocking; safe to call on every route evaluation.
#[flutter_rust_bridge::frb(sync)]
pub fn onboarding_complete() -> bool {
    session_store().is_complete()
}

/// Marks onboarding complete. Calling again is a no-op in effect.
///
/// # FFI contract
/// - Sync call; returns after all in-process subscribers were notified.
#[flutter_rust_bridge::frb(sync)]
pub fn complete_onboarding() {
    info!("event=complete_onboarding module=ffi status=ok");
    session_store().complete_onboarding();
}

/// Flips membership of `domain` in the preference set.
///
/// # FFI contract
/// - Sync call; unknown tags are stored verbatim, the closed set lives in
///   the UI layer's domain pickers.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_domain(domain: String) {
    session_store().toggle_domain(domain.as_str());
}

/// Sets the guidance style from its wire tag.
///
/// Input semantics: `mode` is one of `gentle|proactive|none`
/// (case-insensitive); `none` clears guidance.
///
/// # FFI contract
/// - Never panics; returns empty string on success and an error message for
///   tags outside the closed set.
#[flutter_rust_bridge::frb(sync)]
pub fn set_guidance(mode: String) -> String {
    let tag = mode.trim().to_ascii_lowercase();
    if tag == "none" {
        session_store().set_guidance(None);
        return String::new();
    }
    match GuidanceMode::parse(tag.as_str()) {
        Some(parsed) => {
            session_store().set_guidance(Some(parsed));
            String::new()
        }
        None => format!("unsupported guidance mode `{tag}`; expected gentle|proactive|none"),
    }
}

/// Full session snapshot mirror for UI consumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub is_complete: bool,
    /// Insertion-ordered enabled domain tags.
    pub domains: Vec<String>,
    /// `gentle|proactive|none`.
    pub guidance: String,
}

/// Reads the current session value as a full snapshot.
///
/// # FFI contract
/// - Sync call, non-blocking; always reflects the latest mutation.
#[flutter_rust_bridge::frb(sync)]
pub fn session_snapshot() -> SessionSnapshot {
    let state = session_store().snapshot();
    SessionSnapshot {
        is_complete: state.is_complete,
        domains: state.preferences.domains,
        guidance: state
            .preferences
            .guidance
            .map_or_else(|| "none".to_string(), |mode| mode.as_str().to_string()),
    }
}

/// Emits one activity event on the process-wide memory bus.
///
/// Input semantics:
/// - `source`: one of `relay|family|meals|finances|pets|notes|voice`.
/// - `kind`: one of `snapshot|action|query`.
/// - `payload_json`: a JSON object; contents are domain-owned and pass
///   through unvalidated.
///
/// # FFI contract
/// - Sync call; returns after all in-process subscribers were notified.
/// - Never panics; returns empty string on success and an error message for
///   unknown tags or non-object payloads.
#[flutter_rust_bridge::frb(sync)]
pub fn emit_memory_event(source: String, kind: String, payload_json: String) -> String {
    let Some(source) = MemorySource::parse(source.trim()) else {
        warn!("event=emit_memory_event module=ffi status=rejected reason=unknown_source");
        return format!("unsupported memory source `{source}`");
    };
    let Some(kind) = MemoryKind::parse(kind.trim()) else {
        warn!("event=emit_memory_event module=ffi status=rejected reason=unknown_kind");
        return format!("unsupported memory kind `{kind}`");
    };
    let payload = match serde_json::from_str::<serde_json::Value>(payload_json.as_str()) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(_) => {
            warn!("event=emit_memory_event module=ffi status=rejected reason=payload_not_object");
            return "payload must be a JSON object".to_string();
        }
        Err(err) => {
            warn!("event=emit_memory_event module=ffi status=rejected reason=payload_not_json");
            return format!("payload is not valid JSON: {err}");
        }
    };

    // Metadata only; payload contents never reach the log.
    debug!(
        "event=emit_memory_event module=ffi status=ok source={} kind={}",
        source.as_str(),
        kind.as_str()
    );
    memory_bus().emit(MemoryEventDraft::new(source, kind, payload));
    String::new()
}

#[cfg(test)]
mod tests {
    use super::{complete_onboarding, emit_memory_event, onboarding_complete, ping, set_guidance};

    #[test]
    fn ping_round_trips() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn complete_onboarding_flips_the_routing_guard() {
        complete_onboarding();
        assert!(onboarding_complete());
        // Repeat calls stay terminal.
        complete_onboarding();
        assert!(onboarding_complete());
    }

    #[test]
    fn set_guidance_rejects_unknown_mode() {
        let err = set_guidance("firm".to_string());
        assert!(err.contains("unsupported guidance mode"));
    }

    #[test]
    fn emit_rejects_unknown_tags_and_bad_payload() {
        let err = emit_memory_event(
            "tasks".to_string(),
            "action".to_string(),
            "{}".to_string(),
        );
        assert!(err.contains("unsupported memory source"));

        let err = emit_memory_event(
            "pets".to_string(),
            "mutation".to_string(),
            "{}".to_string(),
        );
        assert!(err.contains("unsupported memory kind"));

        let err = emit_memory_event("pets".to_string(), "action".to_string(), "[]".to_string());
        assert!(err.contains("JSON object"));

        let err = emit_memory_event(
            "pets".to_string(),
            "action".to_string(),
            "not json".to_string(),
        );
        assert!(err.contains("not valid JSON"));
    }

    #[test]
    fn emit_accepts_valid_event() {
        let result = emit_memory_event(
            "pets".to_string(),
            "action".to_string(),
            r#"{"petId":"p1","action":"fed"}"#.to_string(),
        );
        assert!(result.is_empty());
    }
}
