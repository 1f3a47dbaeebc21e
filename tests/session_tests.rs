use hms_portal::{
    FetchError, MockApiGateway, Role, SessionState,
    models::UserIdentity,
    session::Session,
};
use uuid::Uuid;

// --- Test Utilities ---

fn identity(role: Option<&str>) -> UserIdentity {
    UserIdentity {
        user_id: Uuid::from_u128(7),
        role: role.map(|r| r.to_string()),
    }
}

fn gateway_with(role: Option<&str>) -> MockApiGateway {
    MockApiGateway {
        identity: Some(identity(role)),
        ..MockApiGateway::new()
    }
}

// --- Tests ---

#[tokio::test]
async fn test_session_starts_resolving() {
    let session = Session::new();
    assert!(session.is_resolving());
    assert_eq!(session.state(), SessionState::Resolving);
    // A resolving session exposes no role to anything downstream.
    assert_eq!(session.role(), None);
}

#[tokio::test]
async fn test_resolve_success_sets_role() {
    let gateway = gateway_with(Some("Doctor"));
    let mut session = Session::new();

    let role = session.resolve(&gateway).await;

    assert_eq!(role, Some(Role::Doctor));
    assert_eq!(session.role(), Some(Role::Doctor));
    assert!(!session.is_resolving());
    assert_eq!(session.state(), SessionState::Resolved(Some(Role::Doctor)));
}

#[tokio::test]
async fn test_resolve_absent_role_is_unauthenticated() {
    let gateway = gateway_with(None);
    let mut session = Session::new();

    assert_eq!(session.resolve(&gateway).await, None);
    assert_eq!(session.state(), SessionState::Resolved(None));
}

#[tokio::test]
async fn test_resolve_unknown_role_is_unauthenticated() {
    // A role outside the closed enumeration must degrade to "no session",
    // never to an error.
    let gateway = gateway_with(Some("Janitor"));
    let mut session = Session::new();

    assert_eq!(session.resolve(&gateway).await, None);
    assert!(!session.is_resolving());
}

#[tokio::test]
async fn test_resolve_network_failure_is_absorbed() {
    let gateway = MockApiGateway::failing(FetchError::Network("connection refused".into()));
    let mut session = Session::new();

    // The failure is fully absorbed; the visible effect is identical to
    // "unauthenticated".
    assert_eq!(session.resolve(&gateway).await, None);
    assert_eq!(session.state(), SessionState::Resolved(None));
}

#[tokio::test]
async fn test_resolve_unauthorized_status_is_absorbed() {
    // identity: None makes the mock answer 401.
    let gateway = MockApiGateway::new();
    let mut session = Session::new();

    assert_eq!(session.resolve(&gateway).await, None);
    assert_eq!(session.state(), SessionState::Resolved(None));
}

#[tokio::test]
async fn test_resolution_runs_exactly_once() {
    let gateway = gateway_with(Some("Triage"));
    let mut session = Session::new();

    assert_eq!(session.resolve(&gateway).await, Some(Role::Triage));
    // The second call returns the settled role without touching the network.
    assert_eq!(session.resolve(&gateway).await, Some(Role::Triage));
    assert_eq!(gateway.call_count(), 1);
}

#[tokio::test]
async fn test_failed_resolution_is_not_retried() {
    let gateway = MockApiGateway::failing(FetchError::Status(500));
    let mut session = Session::new();

    assert_eq!(session.resolve(&gateway).await, None);
    assert_eq!(session.resolve(&gateway).await, None);
    // A full reload is the only retry path.
    assert_eq!(gateway.call_count(), 1);
}

#[tokio::test]
async fn test_logout_settles_to_unauthenticated() {
    let gateway = gateway_with(Some("Receptionist"));
    let mut session = Session::new();
    session.resolve(&gateway).await;

    session.logout();

    assert_eq!(session.state(), SessionState::Resolved(None));
    // Logout never re-enters Resolving.
    assert!(!session.is_resolving());
}

#[test]
fn test_role_parse_round_trip() {
    for role in [
        Role::Admin,
        Role::HospitalAdministrator,
        Role::Receptionist,
        Role::Doctor,
        Role::Triage,
        Role::LabTechnician,
        Role::Patient,
    ] {
        assert_eq!(Role::parse(role.as_str()), Some(role));
    }
    assert_eq!(Role::parse("doctor"), None, "matching is case-sensitive");
    assert_eq!(Role::parse(""), None);
}

#[test]
fn test_staff_set_excludes_patient() {
    assert_eq!(Role::STAFF.len(), 6);
    assert!(!Role::STAFF.contains(&Role::Patient));
    assert!(Role::STAFF.iter().all(|r| r.is_staff()));
    assert!(!Role::Patient.is_staff());
}
