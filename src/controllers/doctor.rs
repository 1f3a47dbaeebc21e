use crate::{
    credentials::CredentialState,
    error::FetchError,
    gateway::GatewayState,
    models::{AssignedRecord, StaffAccount},
    resource::Resource,
};

/// AssignedRecordsController
///
/// [Doctor Screen] Loads the doctor's own account header and the records
/// assigned to them. The load is a dependent chain (identity, then the
/// staff account keyed by the identity's user id, then the record list), so
/// a failure anywhere fails the whole screen with a single retry affordance.
///
/// An auth-shaped failure (401/403) additionally clears the stored
/// credential and steers the shell to the login screen, since retrying with
/// the same dead token cannot succeed.
pub struct AssignedRecordsController {
    gateway: GatewayState,
    credentials: CredentialState,
    search: String,
    pub doctor: Resource<StaffAccount>,
    pub records: Resource<Vec<AssignedRecord>>,
}

impl AssignedRecordsController {
    pub fn new(gateway: GatewayState, credentials: CredentialState) -> Self {
        Self {
            gateway,
            credentials,
            search: String::new(),
            doctor: Resource::new(),
            records: Resource::new(),
        }
    }

    /// load
    ///
    /// Runs the dependent fetch chain. Returns a navigation target when the
    /// failure demands leaving the screen (dead credential), `None` otherwise.
    pub async fn load(&mut self) -> Option<&'static str> {
        let doctor_load = self.doctor.begin();
        let records_load = self.records.begin();

        let chain = self.fetch_chain().await;
        match chain {
            Ok((account, records)) => {
                self.doctor.succeed(doctor_load, account);
                self.records.succeed(records_load, records);
                None
            }
            Err(e) => {
                tracing::error!("assigned records load error: {}", e);
                let auth_failure = e.is_auth();
                self.doctor.fail(doctor_load, e.clone());
                self.records.fail(records_load, e);
                if auth_failure {
                    // The token is dead; keep it around and every retry 401s.
                    self.credentials.clear();
                    Some("/login")
                } else {
                    None
                }
            }
        }
    }

    async fn fetch_chain(&self) -> Result<(StaffAccount, Vec<AssignedRecord>), FetchError> {
        let identity = self.gateway.fetch_identity().await?;
        let account = self.gateway.staff_account(identity.user_id).await?;
        let records = self.gateway.assigned_records().await?;
        Ok((account, records.data))
    }

    /// retry
    ///
    /// The screen's retry affordance; identical to the initial load.
    pub async fn retry(&mut self) -> Option<&'static str> {
        self.load().await
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
    }

    /// filtered_records
    ///
    /// The record list is filtered client-side by name or fayda id; the
    /// backend call is not search-parameterized for this screen.
    pub fn filtered_records(&self) -> Vec<&AssignedRecord> {
        let needle = self.search.to_lowercase();
        self.records
            .value()
            .map(|records| {
                records
                    .iter()
                    .filter(|r| {
                        needle.is_empty()
                            || r.first_name.to_lowercase().contains(&needle)
                            || r.last_name.to_lowercase().contains(&needle)
                            || r.fayda_id.to_lowercase().contains(&needle)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Navigation target for a record row.
    pub fn record_path(patient_id: &str) -> String {
        format!("/doctor/records/{}", patient_id)
    }

    pub fn unmount(&mut self) {
        self.doctor.cancel();
        self.records.cancel();
    }
}
