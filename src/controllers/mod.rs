//! Page controllers.
//!
//! One controller per role-specific screen. Each controller owns its data
//! through the `Resource` machine, talks to the API exclusively through the
//! `ApiGateway` trait, and converts every failure into local state; nothing
//! a controller does can affect the router, the session, or another
//! controller. Unmounting a controller cancels its resources so late
//! completions are discarded.

pub mod doctor;
pub mod hospital_admin;
pub mod laboratorist;
pub mod receptionist;
pub mod triage;

use crate::error::FetchError;

/// Collapses a `{ success: false, message }` backend envelope into the error
/// taxonomy, keeping the server's message when it sent one.
pub(crate) fn rejected(message: Option<String>, fallback: &str) -> FetchError {
    FetchError::Rejected(message.unwrap_or_else(|| fallback.to_string()))
}
