use super::{Access, RouteEntry, Screen};
use crate::session::Role;

/// Doctor Route Set
///
/// Assigned patient records and the per-patient detail view, visible only to
/// a resolved `Doctor` session. The `/doctor` index redirect targets an
/// undefined dashboard path (resolves to not-found; kept as-is).
pub fn routes() -> Vec<RouteEntry> {
    const ACCESS: Access = Access::Only(Role::Doctor);
    vec![
        RouteEntry::render("/doctor/assigned-records", Screen::AssignedRecords, ACCESS),
        RouteEntry::render("/doctor/records/:patient_id", Screen::PatientDetail, ACCESS),
        RouteEntry::redirect("/doctor", "/doctor/dashboard", ACCESS),
    ]
}
