use super::{Access, RouteEntry, Screen};

/// Public Route Set
///
/// Entries visible to every session: anonymous visitors, patients and all
/// staff roles alike. These form the base of every computed route table and
/// are the only thing reachable when identity resolution fails.
pub fn routes() -> Vec<RouteEntry> {
    vec![
        // The landing page.
        RouteEntry::render("/", Screen::Home, Access::Public),
        // Department listing for visitors choosing a clinic.
        RouteEntry::render("/department", Screen::Department, Access::Public),
        RouteEntry::render("/about", Screen::About, Access::Public),
        RouteEntry::render("/contact", Screen::Contact, Access::Public),
        // Public doctor directory.
        RouteEntry::render("/showDoctor", Screen::Doctors, Access::Public),
        // Login is public by definition; a settled session can still visit it.
        RouteEntry::render("/login", Screen::Login, Access::Public),
    ]
}
