use crate::{
    config::AppConfig,
    gateway::GatewayState,
    models::{Patient, RegisterPatientRequest, StatusResponse},
    resource::{DebounceTicket, Debouncer, Resource},
};

use super::rejected;

/// Minimum query length before the registry search fires. Shorter input
/// clears the result list without touching the network.
const MIN_QUERY_LEN: usize = 3;

/// PatientRegistryController
///
/// [Receptionist Screen] Drives the searchable patient registry. Keystrokes
/// are debounced: each input supersedes the pending quiet period, and only a
/// ticket that survives its quiet period fires a search. A search that
/// settles after the screen unmounted (or after a newer search began) is
/// discarded by the resource's generation check.
pub struct PatientRegistryController {
    gateway: GatewayState,
    debouncer: Debouncer,
    query: String,
    pub patients: Resource<Vec<Patient>>,
}

impl PatientRegistryController {
    pub fn new(gateway: GatewayState, config: &AppConfig) -> Self {
        Self {
            gateway,
            debouncer: Debouncer::new(config.search_debounce),
            query: String::new(),
            patients: Resource::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// set_query
    ///
    /// Records a keystroke. Below the minimum length the result list is
    /// cleared and no timer starts; otherwise the returned ticket must be
    /// driven through `run_search` to actually fetch.
    pub fn set_query(&mut self, query: &str) -> Option<DebounceTicket> {
        self.query = query.to_string();
        if self.query.chars().count() < MIN_QUERY_LEN {
            self.patients.cancel();
            return None;
        }
        Some(self.debouncer.input())
    }

    /// run_search
    ///
    /// Waits out the ticket's quiet period and searches if it is still the
    /// latest input. Returns whether a fetch was issued.
    pub async fn run_search(&mut self, ticket: DebounceTicket) -> bool {
        if !ticket.settled().await {
            return false;
        }
        self.search().await;
        true
    }

    /// search
    ///
    /// The undebounced fetch. The backend signals logical failure through its
    /// `{ success, message }` envelope on a 200, so both layers are checked.
    pub async fn search(&mut self) {
        let load = self.patients.begin();
        let outcome = match self.gateway.search_patients(&self.query).await {
            Ok(body) if body.success => Ok(body.patients),
            Ok(body) => Err(rejected(body.message, "Search failed")),
            Err(e) => {
                tracing::error!("patient search error: {}", e);
                Err(e)
            }
        };
        self.patients.complete(load, outcome);
    }

    /// Navigation target for a selected registry entry.
    pub fn patient_path(fayda_id: &str) -> String {
        format!("/receptionist/registered/{}", fayda_id)
    }

    pub fn unmount(&mut self) {
        self.patients.cancel();
    }
}

/// RegistrationController
///
/// [Receptionist Screen] Submits the walk-in registration form. On success
/// the caller navigates back to the registry; on failure the submission
/// state carries the error and the form stays put for a retry.
pub struct RegistrationController {
    gateway: GatewayState,
    pub submission: Resource<StatusResponse>,
}

impl RegistrationController {
    pub fn new(gateway: GatewayState) -> Self {
        Self {
            gateway,
            submission: Resource::new(),
        }
    }

    /// submit
    ///
    /// Returns the path to navigate to on success, `None` otherwise.
    pub async fn submit(&mut self, req: RegisterPatientRequest) -> Option<&'static str> {
        let load = self.submission.begin();
        let outcome = match self.gateway.register_patient(req).await {
            Ok(body) if body.success => Ok(body),
            Ok(body) => Err(rejected(body.message, "Registration failed")),
            Err(e) => {
                tracing::error!("patient registration error: {}", e);
                Err(e)
            }
        };
        let succeeded = outcome.is_ok();
        self.submission.complete(load, outcome);
        succeeded.then_some("/receptionist/registration")
    }

    pub fn unmount(&mut self) {
        self.submission.cancel();
    }
}
