//! Memory event model.
//!
//! # Responsibility
//! - Define the canonical activity record emitted by feature domains.
//! - Generate process-unique event ids and default timestamps.
//!
//! # Invariants
//! - `MemorySource` and `MemoryKind` are closed sets; unknown tags are
//!   rejected at parse boundaries, never stored.
//! - Payload contents are owned by the emitting domain and are not
//!   validated here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Generated ids start well above any hand-written numeric id a caller is
/// likely to supply, so both can share the decimal string space.
const EVENT_ID_SEED: u64 = 1_000_000;

static NEXT_EVENT_ID: AtomicU64 = AtomicU64::new(EVENT_ID_SEED);

/// Feature domain that emitted an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemorySource {
    Relay,
    Family,
    Meals,
    Finances,
    Pets,
    Notes,
    Voice,
}

impl MemorySource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relay => "relay",
            Self::Family => "family",
            Self::Meals => "meals",
            Self::Finances => "finances",
            Self::Pets => "pets",
            Self::Notes => "notes",
            Self::Voice => "voice",
        }
    }

    /// Parses a domain tag; returns `None` for anything outside the closed set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "relay" => Some(Self::Relay),
            "family" => Some(Self::Family),
            "meals" => Some(Self::Meals),
            "finances" => Some(Self::Finances),
            "pets" => Some(Self::Pets),
            "notes" => Some(Self::Notes),
            "voice" => Some(Self::Voice),
            _ => None,
        }
    }
}

/// Classification of what an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    /// Full-state snapshot of a domain.
    Snapshot,
    /// Discrete action record.
    Action,
    /// Read/query trace.
    Query,
}

impl MemoryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Snapshot => "snapshot",
            Self::Action => "action",
            Self::Query => "query",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "snapshot" => Some(Self::Snapshot),
            "action" => Some(Self::Action),
            "query" => Some(Self::Query),
            _ => None,
        }
    }
}

/// Fully constructed activity record as delivered to listeners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEvent {
    /// Unique within the process lifetime when generated; caller-supplied
    /// ids are accepted verbatim, duplicates included.
    pub id: String,
    pub source: MemorySource,
    pub kind: MemoryKind,
    /// Open mapping; schema is owned by the emitting domain.
    pub payload: Map<String, Value>,
    /// Emission instant, ISO-8601 on the wire.
    pub timestamp: DateTime<Utc>,
}

/// Emission input: required classification plus optional identity overrides.
#[derive(Debug, Clone)]
pub struct MemoryEventDraft {
    pub source: MemorySource,
    pub kind: MemoryKind,
    pub payload: Map<String, Value>,
    pub id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl MemoryEventDraft {
    /// Starts a draft with the required fields.
    pub fn new(source: MemorySource, kind: MemoryKind, payload: Map<String, Value>) -> Self {
        Self {
            source,
            kind,
            payload,
            id: None,
            timestamp: None,
        }
    }

    /// Finalizes the draft, generating id and timestamp when not supplied.
    pub(crate) fn into_event(self) -> MemoryEvent {
        MemoryEvent {
            id: self.id.unwrap_or_else(next_event_id),
            source: self.source,
            kind: self.kind,
            payload: self.payload,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        }
    }

    /// Overrides the generated id. The bus does not check for duplicates.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Overrides the emission-time timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Returns the next process-unique generated event id.
pub(crate) fn next_event_id() -> String {
    NEXT_EVENT_ID.fetch_add(1, Ordering::Relaxed).to_string()
}
