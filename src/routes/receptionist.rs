use super::{Access, RouteEntry, Screen};
use crate::session::Role;

/// Receptionist Route Set
///
/// Patient registry and registration screens, visible only to a resolved
/// `Receptionist` session.
///
/// The `/receptionist` index redirects to `/receptionist/dashboard`, a path
/// no entry defines, so it resolves to not-found. Kept as-is pending a
/// product decision on the intended target.
pub fn routes() -> Vec<RouteEntry> {
    const ACCESS: Access = Access::Only(Role::Receptionist);
    vec![
        // Searchable registry of known patients.
        RouteEntry::render("/receptionist/registration", Screen::PatientRegistry, ACCESS),
        // Detail view for a patient selected from the registry.
        RouteEntry::render(
            "/receptionist/registered/:fayda_id",
            Screen::RegisteredPatient,
            ACCESS,
        ),
        // Walk-in registration form.
        RouteEntry::render(
            "/receptionist/newRegistration",
            Screen::NewRegistration,
            ACCESS,
        ),
        RouteEntry::redirect("/receptionist", "/receptionist/dashboard", ACCESS),
    ]
}
