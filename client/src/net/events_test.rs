use super::*;
use crate::net::types::User;
use std::sync::atomic::{AtomicUsize, Ordering};

fn counting_callback(counter: &Arc<AtomicUsize>) -> AuthCallback {
    let counter = Arc::clone(counter);
    auth_callback(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

fn session(email: &str) -> Session {
    Session {
        access_token: "at".to_owned(),
        refresh_token: "rt".to_owned(),
        token_type: "bearer".to_owned(),
        expires_in: Some(3600),
        expires_at: None,
        user: User {
            id: "u1".to_owned(),
            email: Some(email.to_owned()),
            user_metadata: serde_json::Value::Null,
            app_metadata: serde_json::Value::Null,
            created_at: None,
        },
    }
}

#[test]
fn emit_reaches_every_listener_with_event_and_session() {
    let bus = AuthEventBus::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_cb = Arc::clone(&seen);
    let _sub = bus.subscribe(auth_callback(move |event, session| {
        let email = session.and_then(|s| s.user.email.clone());
        seen_cb.lock().unwrap().push((event, email));
    }));

    bus.emit(AuthChangeEvent::SignedIn, Some(&session("a@b.com")));
    bus.emit(AuthChangeEvent::SignedOut, None);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![(AuthChangeEvent::SignedIn, Some("a@b.com".to_owned())), (AuthChangeEvent::SignedOut, None)]
    );
}

#[test]
fn unsubscribe_stops_delivery_for_that_listener_only() {
    let bus = AuthEventBus::new();
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let sub_first = bus.subscribe(counting_callback(&first));
    let _sub_second = bus.subscribe(counting_callback(&second));
    assert_eq!(bus.listener_count(), 2);

    sub_first.unsubscribe();
    bus.emit(AuthChangeEvent::SignedOut, None);

    assert_eq!(bus.listener_count(), 1);
    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn dropping_a_subscription_does_not_release_it() {
    let bus = AuthEventBus::new();
    let counter = Arc::new(AtomicUsize::new(0));
    drop(bus.subscribe(counting_callback(&counter)));
    bus.emit(AuthChangeEvent::SignedOut, None);
    assert_eq!(bus.listener_count(), 1);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn unsubscribe_after_bus_dropped_is_noop() {
    let bus = AuthEventBus::new();
    let sub = bus.subscribe(auth_callback(|_, _| {}));
    drop(bus);
    sub.unsubscribe();
}

#[test]
fn listener_may_unsubscribe_during_emit() {
    let bus = AuthEventBus::new();
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
    let slot_cb = Arc::clone(&slot);
    let sub = bus.subscribe(auth_callback(move |_, _| {
        if let Some(sub) = slot_cb.lock().unwrap().take() {
            sub.unsubscribe();
        }
    }));
    *slot.lock().unwrap() = Some(sub);

    bus.emit(AuthChangeEvent::SignedOut, None);
    assert_eq!(bus.listener_count(), 0);
}

#[test]
fn shared_bus_is_keyed_by_project() {
    let a1 = AuthEventBus::shared("sb-events-test-a-auth-token");
    let a2 = AuthEventBus::shared("sb-events-test-a-auth-token");
    let b = AuthEventBus::shared("sb-events-test-b-auth-token");

    let counter = Arc::new(AtomicUsize::new(0));
    let sub = a1.subscribe(counting_callback(&counter));
    a2.emit(AuthChangeEvent::SignedOut, None);
    b.emit(AuthChangeEvent::SignedOut, None);

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    sub.unsubscribe();
    assert_eq!(a2.listener_count(), 0);
}
