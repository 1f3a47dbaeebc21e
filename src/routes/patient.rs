use super::{Access, RouteEntry, Screen};
use crate::session::Role;

/// Patient Route Set
///
/// The single patient-facing screen. Patients get no sidebar and no staff
/// routes; everything else they can reach is the public set.
pub fn routes() -> Vec<RouteEntry> {
    vec![RouteEntry::render(
        "/user",
        Screen::PatientPortal,
        Access::Only(Role::Patient),
    )]
}
