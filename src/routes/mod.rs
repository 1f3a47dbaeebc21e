//! Role-gated routing.
//!
//! Organizes the route table into role-segregated modules. Route presence is
//! role-scoped, not globally registered then access-checked per screen: the
//! visible table for a session contains only the public set plus the entries
//! tagged for that exact role, and everything else resolves to the not-found
//! screen. The table is static; visibility is recomputed as a pure function
//! of the current role on every navigation, so a role change (logout) can
//! never leave a stale route reachable.

use crate::session::Role;

/// Routes accessible to all visitors (anonymous or logged-in).
pub mod public;

/// Routes for the hospital administrator's dashboard and staff management.
pub mod hospital_admin;

/// Routes for the reception desk (patient registry and registration).
pub mod receptionist;

/// Routes for the triage station (unassigned queue and processing form).
pub mod triage;

/// Routes for doctors (assigned records and patient detail).
pub mod doctor;

/// Routes for the laboratory (request queue and result form).
pub mod laboratorist;

/// The single patient-facing route.
pub mod patient;

/// Screen
///
/// The typed render capability a matched route produces. The host UI layer
/// decides what each variant looks like; this crate only decides which one
/// is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    // Public
    Home,
    Department,
    About,
    Contact,
    Doctors,
    Login,
    // Hospital administrator
    AdminDashboard,
    AddStaff,
    EditStaff,
    StaffManagement,
    ViewRecords,
    // Receptionist
    PatientRegistry,
    RegisteredPatient,
    NewRegistration,
    // Triage
    ProcessPatient,
    UnassignedPatients,
    // Doctor
    AssignedRecords,
    PatientDetail,
    // Laboratory
    LabRequests,
    LabForm,
    // Patient
    PatientPortal,
}

/// Access
///
/// Who a route entry is visible to. `Only` gates on an exact role: a
/// receptionist never sees a doctor-tagged entry, staff or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Only(Role),
}

/// RouteAction
///
/// What a matched entry does: render a screen, or redirect to another path.
/// Redirect targets are resolved against the same visible table, so a
/// redirect into a path the table does not define lands on not-found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    Render(Screen),
    Redirect(&'static str),
}

/// RouteEntry
///
/// One row of the static route table. Entries are declared at process start
/// and never mutated; matching is first-match in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct RouteEntry {
    pub pattern: &'static str,
    pub action: RouteAction,
    pub access: Access,
}

impl RouteEntry {
    pub const fn render(pattern: &'static str, screen: Screen, access: Access) -> Self {
        Self {
            pattern,
            action: RouteAction::Render(screen),
            access,
        }
    }

    pub const fn redirect(pattern: &'static str, target: &'static str, access: Access) -> Self {
        Self {
            pattern,
            action: RouteAction::Redirect(target),
            access,
        }
    }
}

/// Path parameters captured from `:name` pattern segments.
pub type Params = Vec<(&'static str, String)>;

/// RouteMatch
///
/// The terminal outcome of resolving a path. Not-found is a normal render
/// state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Screen { screen: Screen, params: Params },
    NotFound,
}

/// full_table
///
/// The complete, role-annotated route table in declaration order: public
/// first, then each staff section, then the patient route. This is the only
/// place routes are registered.
pub fn full_table() -> Vec<RouteEntry> {
    let mut table = Vec::new();
    table.extend(public::routes());
    table.extend(hospital_admin::routes());
    table.extend(receptionist::routes());
    table.extend(triage::routes());
    table.extend(doctor::routes());
    table.extend(laboratorist::routes());
    table.extend(patient::routes());
    table
}

/// visible_routes
///
/// The pure role-to-routes function: public entries always, role-tagged
/// entries only on an exact role match. Called fresh on every navigation;
/// never cached across role changes.
pub fn visible_routes(role: Option<Role>) -> RouteTable {
    let entries = full_table()
        .into_iter()
        .filter(|entry| match entry.access {
            Access::Public => true,
            Access::Only(required) => role == Some(required),
        })
        .collect();
    RouteTable { entries }
}

/// sidebar_visible
///
/// Staff roles get the persistent navigation sidebar; patients and anonymous
/// visitors do not.
pub fn sidebar_visible(role: Option<Role>) -> bool {
    role.is_some_and(|r| r.is_staff())
}

/// RouteTable
///
/// The route set visible to one session. Resolution is first-match over the
/// entries in declaration order, following redirects within the same table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

// Redirect chains in the static table are short; anything deeper is a
// declaration bug, resolved as not-found rather than a spin.
const MAX_REDIRECT_HOPS: usize = 8;

impl RouteTable {
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// resolve
    ///
    /// Maps a requested path to its terminal render outcome. A path matching
    /// no visible entry resolves to not-found, even when the full table
    /// contains that path under a different role.
    pub fn resolve(&self, path: &str) -> RouteMatch {
        let mut current = path.to_string();
        for _ in 0..MAX_REDIRECT_HOPS {
            let matched = self
                .entries
                .iter()
                .find_map(|entry| match_pattern(entry.pattern, &current).map(|p| (entry, p)));

            match matched {
                Some((entry, params)) => match entry.action {
                    RouteAction::Render(screen) => return RouteMatch::Screen { screen, params },
                    RouteAction::Redirect(target) => {
                        current = target.to_string();
                    }
                },
                None => return RouteMatch::NotFound,
            }
        }
        RouteMatch::NotFound
    }

    /// True if the path terminally renders a screen (redirect chains count
    /// only when they land somewhere).
    pub fn reaches(&self, path: &str) -> bool {
        matches!(self.resolve(path), RouteMatch::Screen { .. })
    }
}

/// match_pattern
///
/// Segment-wise match of a concrete path against a pattern. `:name` segments
/// capture the corresponding path segment as a parameter; everything else
/// must match literally. Trailing slashes are ignored.
fn match_pattern(pattern: &'static str, path: &str) -> Option<Params> {
    let pattern_segs: Vec<&'static str> =
        pattern.trim_matches('/').split('/').filter(|s| !s.is_empty()).collect();
    let path_segs: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    if pattern_segs.len() != path_segs.len() {
        return None;
    }

    let mut params = Params::new();
    for (pat, seg) in pattern_segs.iter().zip(path_segs.iter()) {
        if let Some(name) = pat.strip_prefix(':') {
            params.push((name, (*seg).to_string()));
        } else if pat != seg {
            return None;
        }
    }
    Some(params)
}
