use hms_portal::{
    FetchError,
    resource::{Debouncer, Resource, ResourceState},
};
use std::time::Duration;

// --- Resource State Machine ---

#[test]
fn test_resource_lifecycle() {
    let mut resource: Resource<u32> = Resource::new();
    assert!(resource.is_idle());

    let ticket = resource.begin();
    assert!(resource.is_loading());

    assert!(resource.succeed(ticket, 42));
    assert_eq!(resource.value(), Some(&42));
    assert_eq!(*resource.state(), ResourceState::Ready(42));
}

#[test]
fn test_resource_failure_is_local_state() {
    let mut resource: Resource<u32> = Resource::new();
    let ticket = resource.begin();

    assert!(resource.fail(ticket, FetchError::Status(500)));
    assert_eq!(resource.error(), Some(&FetchError::Status(500)));
    assert_eq!(resource.value(), None);
}

#[test]
fn test_newer_load_supersedes_older() {
    let mut resource: Resource<&'static str> = Resource::new();

    let first = resource.begin();
    let second = resource.begin();

    // The older fetch settles late; its result must be discarded.
    assert!(!resource.complete(first, Ok("stale")));
    assert!(resource.is_loading());

    assert!(resource.complete(second, Ok("fresh")));
    assert_eq!(resource.value(), Some(&"fresh"));
}

#[test]
fn test_completion_after_cancel_mutates_nothing() {
    // The unmount guarantee: a fetch resolving after the component has
    // unmounted performs zero state updates.
    let mut resource: Resource<u32> = Resource::new();
    let ticket = resource.begin();

    resource.cancel();
    assert!(resource.is_idle());

    assert!(!resource.complete(ticket, Ok(7)));
    assert!(resource.is_idle(), "state must stay untouched after unmount");

    assert!(!resource.fail(ticket, FetchError::Network("late".into())));
    assert!(resource.is_idle());
}

#[test]
fn test_cancel_then_reload_works() {
    let mut resource: Resource<u32> = Resource::new();
    let stale = resource.begin();
    resource.cancel();

    // A remount starts a fresh generation; only the new ticket completes.
    let fresh = resource.begin();
    assert!(!resource.complete(stale, Ok(1)));
    assert!(resource.complete(fresh, Ok(2)));
    assert_eq!(resource.value(), Some(&2));
}

// --- Debouncer ---

#[tokio::test(start_paused = true)]
async fn test_single_input_settles() {
    let debouncer = Debouncer::new(Duration::from_millis(500));
    let ticket = debouncer.input();
    assert!(ticket.settled().await);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_inputs_coalesce_to_last() {
    let debouncer = Debouncer::new(Duration::from_millis(500));

    // Three keystrokes inside one quiet window: only the last survives.
    let first = debouncer.input();
    let second = debouncer.input();
    let third = debouncer.input();

    assert!(!first.settled().await);
    assert!(!second.settled().await);
    assert!(third.settled().await);
}

#[tokio::test(start_paused = true)]
async fn test_input_after_quiet_period_settles_independently() {
    let debouncer = Debouncer::new(Duration::from_millis(500));

    let first = debouncer.input();
    assert!(first.settled().await);

    // A later keystroke starts its own window.
    let second = debouncer.input();
    assert!(second.settled().await);
}

#[tokio::test(start_paused = true)]
async fn test_superseded_ticket_reports_not_current() {
    let debouncer = Debouncer::new(Duration::from_millis(500));
    let first = debouncer.input();
    assert!(first.is_current());

    let _second = debouncer.input();
    assert!(!first.is_current());
}
