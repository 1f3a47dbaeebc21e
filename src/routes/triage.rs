use super::{Access, RouteEntry, Screen};
use crate::session::Role;

/// Triage Route Set
///
/// The unassigned-patient queue and the per-record processing form, visible
/// only to a resolved `Triage` session. The `/triage` index redirect targets
/// an undefined dashboard path (resolves to not-found; kept as-is).
pub fn routes() -> Vec<RouteEntry> {
    const ACCESS: Access = Access::Only(Role::Triage);
    vec![
        RouteEntry::render("/triage/process/:id", Screen::ProcessPatient, ACCESS),
        RouteEntry::render("/triage/unassigned", Screen::UnassignedPatients, ACCESS),
        RouteEntry::redirect("/triage", "/triage/dashboard", ACCESS),
    ]
}
