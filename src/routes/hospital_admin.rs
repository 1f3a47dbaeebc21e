use super::{Access, RouteEntry, Screen};
use crate::session::Role;

/// Hospital Administrator Route Set
///
/// Staff management and oversight screens, visible only when the session
/// resolved to `HospitalAdministrator`. The bare `/hospital-admin` index
/// redirects to the dashboard.
pub fn routes() -> Vec<RouteEntry> {
    const ACCESS: Access = Access::Only(Role::HospitalAdministrator);
    vec![
        RouteEntry::render("/hospital-admin/dashboard", Screen::AdminDashboard, ACCESS),
        RouteEntry::render("/hospital-admin/add-staff", Screen::AddStaff, ACCESS),
        RouteEntry::render("/hospital-admin/edit-staff", Screen::EditStaff, ACCESS),
        RouteEntry::render(
            "/hospital-admin/staff-management",
            Screen::StaffManagement,
            ACCESS,
        ),
        RouteEntry::render("/hospital-admin/view-records", Screen::ViewRecords, ACCESS),
        RouteEntry::redirect("/hospital-admin", "/hospital-admin/dashboard", ACCESS),
    ]
}
