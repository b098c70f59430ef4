use hearth_core::{GuidanceMode, Preferences, SessionState, SessionStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[test]
fn complete_onboarding_is_one_way_and_idempotent() {
    let store = SessionStore::new();
    assert!(!store.is_complete());

    store.complete_onboarding();
    assert!(store.is_complete());

    store.complete_onboarding();
    assert!(store.is_complete());
}

#[test]
fn repeat_completion_still_notifies_subscribers() {
    let store = SessionStore::new();
    let notifications = Arc::new(AtomicUsize::new(0));

    let notifications_ref = Arc::clone(&notifications);
    let _subscription = store.subscribe(move || {
        notifications_ref.fetch_add(1, Ordering::SeqCst);
    });

    store.complete_onboarding();
    store.complete_onboarding();
    assert_eq!(notifications.load(Ordering::SeqCst), 2);
}

#[test]
fn subscriber_can_read_store_during_completion_notification() {
    let store = Arc::new(SessionStore::new());
    let observed = Arc::new(AtomicUsize::new(0));

    let store_ref = Arc::clone(&store);
    let observed_ref = Arc::clone(&observed);
    let _subscription = store.subscribe(move || {
        // Re-entrant read: no lock may be held across notification.
        if store_ref.is_complete() {
            observed_ref.fetch_add(1, Ordering::SeqCst);
        }
    });

    store.complete_onboarding();
    store.complete_onboarding();
    assert_eq!(observed.load(Ordering::SeqCst), 2);
}

#[test]
fn toggle_twice_restores_original_membership() {
    let store = SessionStore::new();
    assert!(store.snapshot().preferences.domains.is_empty());

    store.toggle_domain("finances");
    assert_eq!(store.snapshot().preferences.domains, vec!["finances"]);

    store.toggle_domain("finances");
    assert!(store.snapshot().preferences.domains.is_empty());
}

#[test]
fn toggle_preserves_insertion_order_of_remaining_tags() {
    let store = SessionStore::new();
    store.toggle_domain("pets");
    store.toggle_domain("meals");
    store.toggle_domain("notes");

    store.toggle_domain("meals");
    assert_eq!(store.snapshot().preferences.domains, vec!["pets", "notes"]);

    // Re-adding appends at the end.
    store.toggle_domain("meals");
    assert_eq!(
        store.snapshot().preferences.domains,
        vec!["pets", "notes", "meals"]
    );
}

#[test]
fn set_guidance_replaces_and_can_clear() {
    let store = SessionStore::new();
    assert_eq!(
        store.snapshot().preferences.guidance,
        Some(GuidanceMode::Gentle)
    );

    store.set_guidance(Some(GuidanceMode::Proactive));
    assert_eq!(
        store.snapshot().preferences.guidance,
        Some(GuidanceMode::Proactive)
    );

    // Clearing sticks; it does not revert to the pre-onboarding default.
    store.set_guidance(None);
    assert_eq!(store.snapshot().preferences.guidance, None);
}

#[test]
fn subscribers_observe_the_same_full_snapshot() {
    let store = Arc::new(SessionStore::new());
    let first_seen = Arc::new(Mutex::new(Vec::new()));
    let second_seen = Arc::new(Mutex::new(Vec::new()));

    let store_a = Arc::clone(&store);
    let first_ref = Arc::clone(&first_seen);
    let _first = store.subscribe(move || {
        first_ref.lock().unwrap().push(store_a.snapshot());
    });
    let store_b = Arc::clone(&store);
    let second_ref = Arc::clone(&second_seen);
    let _second = store.subscribe(move || {
        second_ref.lock().unwrap().push(store_b.snapshot());
    });

    store.toggle_domain("voice");
    store.complete_onboarding();

    let first = first_seen.lock().unwrap().clone();
    let second = second_seen.lock().unwrap().clone();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(first[1].preferences.domains, vec!["voice"]);
    assert!(first[1].is_complete);
}

#[test]
fn cancelled_screen_subscription_stops_updates() {
    let store = SessionStore::new();
    let notifications = Arc::new(AtomicUsize::new(0));

    let notifications_ref = Arc::clone(&notifications);
    let subscription = store.subscribe(move || {
        notifications_ref.fetch_add(1, Ordering::SeqCst);
    });

    store.toggle_domain("pets");
    subscription.cancel();
    store.toggle_domain("pets");

    assert_eq!(notifications.load(Ordering::SeqCst), 1);
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn with_state_starts_from_injected_value() {
    let state = SessionState {
        is_complete: true,
        preferences: Preferences {
            domains: vec!["family".to_string()],
            guidance: None,
        },
    };

    let store = SessionStore::with_state(state.clone());
    assert_eq!(store.snapshot(), state);
}

#[test]
fn state_serializes_with_snake_case_fields() {
    let store = SessionStore::new();
    store.toggle_domain("finances");
    store.set_guidance(Some(GuidanceMode::Proactive));

    let value = serde_json::to_value(store.snapshot()).unwrap();
    assert_eq!(value["is_complete"], false);
    assert_eq!(value["preferences"]["domains"][0], "finances");
    assert_eq!(value["preferences"]["guidance"], "proactive");
}
