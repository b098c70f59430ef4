//! Session store implementation.
//!
//! # Responsibility
//! - Own the shared session value and its mutation entry points.
//! - Keep the routing-guard read (`is_complete`) exact and cheap.
//!
//! # Invariants
//! - Every mutation notifies all current subscribers, even when the value is
//!   unchanged in effect (repeat `complete_onboarding`, no-op toggles do not
//!   exist: toggling always flips membership).
//! - `preferences.domains` preserves insertion order across toggles.

use crate::observe::cell::ObservableCell;
use crate::observe::dispatch::Subscription;
use log::{debug, info};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Assistant guidance style chosen during onboarding.
///
/// "No guidance" is modeled as `Option::<GuidanceMode>::None` rather than a
/// variant, so the type system keeps the two real styles closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceMode {
    /// Occasional, low-pressure suggestions.
    Gentle,
    /// Assistant surfaces suggestions on its own initiative.
    Proactive,
}

impl GuidanceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gentle => "gentle",
            Self::Proactive => "proactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "gentle" => Some(Self::Gentle),
            "proactive" => Some(Self::Proactive),
            _ => None,
        }
    }
}

/// User preference record collected during onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Insertion-ordered set of enabled feature-domain tags.
    pub domains: Vec<String>,
    /// `None` means the user opted out of guidance.
    pub guidance: Option<GuidanceMode>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            guidance: Some(GuidanceMode::Gentle),
        }
    }
}

/// Complete session value as observed by every subscriber.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub is_complete: bool,
    pub preferences: Preferences,
}

/// Observable store for onboarding completion and preferences.
pub struct SessionStore {
    state: ObservableCell<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_state(SessionState::default())
    }

    /// Starts from an explicit state; used by tests to avoid cross-test
    /// coupling through the process-wide instance.
    pub fn with_state(state: SessionState) -> Self {
        Self {
            state: ObservableCell::new(state),
        }
    }

    /// Returns a full snapshot of the current session value.
    pub fn snapshot(&self) -> SessionState {
        self.state.get()
    }

    /// Routing-guard read: while `false` the shell shows onboarding screens,
    /// once `true` the main application.
    pub fn is_complete(&self) -> bool {
        self.state.get().is_complete
    }

    /// Marks onboarding complete and notifies.
    ///
    /// Incomplete -> Complete is the only transition; calling again is a
    /// no-op in effect but still notifies, matching the cell contract.
    pub fn complete_onboarding(&self) {
        let mut first_completion = false;
        self.state.update(|state| {
            first_completion = !state.is_complete;
            state.is_complete = true;
        });
        // Log outside the update closure; the state lock is released first.
        if first_completion {
            info!("event=onboarding_complete module=session status=ok");
        }
    }

    /// Flips membership of `domain` in the preference set and notifies.
    ///
    /// Re-adding after removal appends at the end, keeping insertion order
    /// stable for the tags that stayed.
    pub fn toggle_domain(&self, domain: &str) {
        self.state.update(|state| {
            let domains = &mut state.preferences.domains;
            match domains.iter().position(|tag| tag == domain) {
                Some(index) => {
                    domains.remove(index);
                    debug!("event=domain_toggle module=session status=ok domain={domain} member=false");
                }
                None => {
                    domains.push(domain.to_string());
                    debug!("event=domain_toggle module=session status=ok domain={domain} member=true");
                }
            }
        });
    }

    /// Replaces the guidance style (including clearing it) and notifies.
    pub fn set_guidance(&self, mode: Option<GuidanceMode>) {
        self.state.update(|state| {
            state.preferences.guidance = mode;
        });
        debug!(
            "event=guidance_set module=session status=ok mode={}",
            mode.map_or("none", GuidanceMode::as_str)
        );
    }

    /// Registers a change listener; the listener re-reads via
    /// [`Self::snapshot`] on each notification.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.state.subscribe(listener)
    }

    /// Returns the number of active change listeners.
    pub fn listener_count(&self) -> usize {
        self.state.listener_count()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_STORE: Lazy<SessionStore> = Lazy::new(SessionStore::new);

/// Returns the process-wide session store shared by all screens.
pub fn session_store() -> &'static SessionStore {
    &GLOBAL_STORE
}
