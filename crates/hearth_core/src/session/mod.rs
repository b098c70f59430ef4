//! Onboarding session and preference state.
//!
//! # Responsibility
//! - Track onboarding completion and user preferences shared across
//!   disconnected screens without prop drilling.
//! - Notify subscribers synchronously on every mutation.
//!
//! # Invariants
//! - `is_complete` transitions Incomplete -> Complete exactly once logically;
//!   Complete is terminal for the process lifetime.
//! - Subscribers read full snapshots; there is no per-subscriber divergence.

pub mod store;

pub use store::{session_store, GuidanceMode, Preferences, SessionState, SessionStore};
