use crate::gateway::ApiGateway;
use serde::{Deserialize, Serialize};

/// Role
///
/// The closed set of actor roles the hospital portal recognizes. Every role
/// except `Patient` is a staff role and gets the navigation sidebar plus its
/// own prefix of the route table. A value outside this enumeration coming off
/// the wire is treated as "no session", never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    HospitalAdministrator,
    Receptionist,
    Doctor,
    Triage,
    LabTechnician,
    Patient,
}

impl Role {
    /// The fixed staff set used for the sidebar decision.
    pub const STAFF: [Role; 6] = [
        Role::Admin,
        Role::HospitalAdministrator,
        Role::Receptionist,
        Role::Doctor,
        Role::Triage,
        Role::LabTechnician,
    ];

    /// Maps the identity endpoint's role string onto the closed enumeration.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "Admin" => Some(Role::Admin),
            "HospitalAdministrator" => Some(Role::HospitalAdministrator),
            "Receptionist" => Some(Role::Receptionist),
            "Doctor" => Some(Role::Doctor),
            "Triage" => Some(Role::Triage),
            "LabTechnician" => Some(Role::LabTechnician),
            "Patient" => Some(Role::Patient),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::HospitalAdministrator => "HospitalAdministrator",
            Role::Receptionist => "Receptionist",
            Role::Doctor => "Doctor",
            Role::Triage => "Triage",
            Role::LabTechnician => "LabTechnician",
            Role::Patient => "Patient",
        }
    }

    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Patient)
    }
}

/// SessionState
///
/// The session's life is a two-state machine: it starts `Resolving` and moves
/// exactly once to `Resolved` when the identity call settles. There is no
/// transition back; a full application restart is the only retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Resolving,
    Resolved(Option<Role>),
}

/// Session
///
/// Owns the resolved identity for the application's lifetime. The app shell
/// is the single writer (via `resolve`); the router and the gated screens
/// only ever read the settled role. While the session is still `Resolving`,
/// no route may mount; the shell shows the loading placeholder instead, so
/// nothing downstream can observe a stale or default role.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Resolving,
        }
    }

    /// resolve
    ///
    /// Performs the one identity call of the application's lifetime and
    /// settles the session. Every failure mode (network error, non-2xx
    /// status, malformed body, unknown role string) is absorbed into
    /// `Resolved(None)`: an unauthenticated visitor, never an error screen.
    ///
    /// Idempotent: once settled, further calls return the settled role
    /// without touching the network.
    pub async fn resolve(&mut self, gateway: &dyn ApiGateway) -> Option<Role> {
        if let SessionState::Resolved(role) = self.state {
            return role;
        }

        let role = match gateway.fetch_identity().await {
            Ok(identity) => match identity.role.as_deref() {
                Some(raw) => {
                    let parsed = Role::parse(raw);
                    if parsed.is_none() {
                        tracing::warn!(role = raw, "unrecognized role, treating as unauthenticated");
                    }
                    parsed
                }
                None => None,
            },
            Err(e) => {
                tracing::debug!("identity resolution failed: {}", e);
                None
            }
        };

        // The single Resolving -> Resolved transition, strictly after the
        // call has settled.
        self.state = SessionState::Resolved(role);
        tracing::info!(role = ?role.map(|r| r.as_str()), "session resolved");
        role
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_resolving(&self) -> bool {
        self.state == SessionState::Resolving
    }

    /// The settled role. `None` both while resolving and for an
    /// unauthenticated session; use `is_resolving` to tell them apart.
    pub fn role(&self) -> Option<Role> {
        match self.state {
            SessionState::Resolved(role) => role,
            SessionState::Resolving => None,
        }
    }

    /// logout
    ///
    /// Drops the authenticated role without re-entering `Resolving`: the
    /// session settles to unauthenticated and the router immediately
    /// recomputes visibility from the new value.
    pub fn logout(&mut self) {
        self.state = SessionState::Resolved(None);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
