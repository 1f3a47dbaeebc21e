use super::{Access, RouteEntry, Screen};
use crate::session::Role;

/// Laboratory Route Set
///
/// The lab request queue and the result entry form, visible only to a
/// resolved `LabTechnician` session. The `/laboratorist` index redirect
/// targets an undefined dashboard path (resolves to not-found; kept as-is).
pub fn routes() -> Vec<RouteEntry> {
    const ACCESS: Access = Access::Only(Role::LabTechnician);
    vec![
        RouteEntry::render("/laboratorist/patientList", Screen::LabRequests, ACCESS),
        RouteEntry::render("/laboratorist/requests/:id", Screen::LabForm, ACCESS),
        RouteEntry::redirect("/laboratorist", "/laboratorist/dashboard", ACCESS),
    ]
}
