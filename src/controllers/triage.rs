use crate::{
    config::AppConfig,
    gateway::GatewayState,
    models::{
        DoctorSummary, Patient, ProcessTriageRequest, UnassignedPage, Urgency, Vitals,
    },
    resource::{DebounceTicket, Debouncer, Resource},
};
use uuid::Uuid;

use super::rejected;

/// Page size of the unassigned queue, echoed to the backend.
const PAGE_LIMIT: u32 = 10;

/// UnassignedQueueController
///
/// [Triage Screen] Drives the server-paginated queue of patients awaiting
/// triage. Both search input and page changes run through the same debounce
/// window, so rapid paging or typing coalesces into one fetch per quiet
/// period.
pub struct UnassignedQueueController {
    gateway: GatewayState,
    debouncer: Debouncer,
    search: String,
    page: u32,
    pub queue: Resource<UnassignedPage>,
}

impl UnassignedQueueController {
    pub fn new(gateway: GatewayState, config: &AppConfig) -> Self {
        Self {
            gateway,
            debouncer: Debouncer::new(config.search_debounce),
            search: String::new(),
            page: 1,
            queue: Resource::new(),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// set_search
    ///
    /// Records a search keystroke and starts a fresh quiet period.
    pub fn set_search(&mut self, search: &str) -> DebounceTicket {
        self.search = search.to_string();
        self.debouncer.input()
    }

    /// set_page
    ///
    /// Moves to another page if it is in range. Out-of-range requests return
    /// `None` and change nothing.
    pub fn set_page(&mut self, page: u32) -> Option<DebounceTicket> {
        let pages = self.queue.value().map(|q| q.pages).unwrap_or(1);
        if page == 0 || page > pages {
            return None;
        }
        self.page = page;
        Some(self.debouncer.input())
    }

    /// run
    ///
    /// Waits out the ticket's quiet period and refetches if it survived.
    pub async fn run(&mut self, ticket: DebounceTicket) -> bool {
        if !ticket.settled().await {
            return false;
        }
        self.refresh().await;
        true
    }

    /// refresh
    ///
    /// The undebounced fetch, also used for the initial mount load.
    pub async fn refresh(&mut self) {
        let load = self.queue.begin();
        let outcome = self
            .gateway
            .unassigned_patients(self.page, PAGE_LIMIT, &self.search)
            .await
            .inspect_err(|e| tracing::error!("unassigned queue error: {}", e));
        self.queue.complete(load, outcome);
    }

    /// Navigation target for a queue row.
    pub fn process_path(record_id: &str) -> String {
        format!("/triage/process/{}", record_id)
    }

    pub fn unmount(&mut self) {
        self.queue.cancel();
    }
}

/// ProcessTriageForm
///
/// Local form state of the processing screen: vitals, diagnosis, urgency and
/// the assigned doctor. Mirrors what `POST /triage/process` expects.
#[derive(Debug, Clone, Default)]
pub struct ProcessTriageForm {
    pub vitals: Vitals,
    pub diagnosis: String,
    pub urgency: Urgency,
    pub doctor_id: Option<Uuid>,
}

/// ProcessPatientController
///
/// [Triage Screen] Loads the patient under triage together with the list of
/// assignable doctors, then submits the processing form. A successful submit
/// navigates back to the unassigned queue.
pub struct ProcessPatientController {
    gateway: GatewayState,
    record_id: String,
    doctor_search: String,
    pub patient: Resource<Patient>,
    pub doctors: Resource<Vec<DoctorSummary>>,
    pub form: ProcessTriageForm,
}

impl ProcessPatientController {
    pub fn new(gateway: GatewayState, record_id: &str) -> Self {
        Self {
            gateway,
            record_id: record_id.to_string(),
            doctor_search: String::new(),
            patient: Resource::new(),
            doctors: Resource::new(),
            form: ProcessTriageForm::default(),
        }
    }

    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    /// load
    ///
    /// Fetches the patient and the doctor list. The two resources fail
    /// independently; a missing patient is a terminal "not found" render
    /// state for the screen, not an error.
    pub async fn load(&mut self) {
        let patient_load = self.patient.begin();
        let outcome = match self.gateway.triage_patient(&self.record_id).await {
            Ok(body) if body.success => body
                .data
                .ok_or_else(|| rejected(None, "Patient not found")),
            Ok(_) => Err(rejected(None, "Patient not found")),
            Err(e) => {
                tracing::error!("triage patient load error: {}", e);
                Err(e)
            }
        };
        self.patient.complete(patient_load, outcome);

        self.load_doctors().await;
    }

    /// load_doctors
    ///
    /// Refetches the assignable-doctors list for the current search string.
    pub async fn load_doctors(&mut self) {
        let doctors_load = self.doctors.begin();
        let outcome = match self.gateway.triage_doctors(&self.doctor_search).await {
            Ok(body) if body.success => Ok(body.doctors),
            Ok(_) => Err(rejected(None, "Failed to load doctors")),
            Err(e) => {
                tracing::error!("triage doctors load error: {}", e);
                Err(e)
            }
        };
        self.doctors.complete(doctors_load, outcome);
    }

    pub async fn set_doctor_search(&mut self, search: &str) {
        self.doctor_search = search.to_string();
        self.load_doctors().await;
    }

    /// submit
    ///
    /// Sends the processing payload. Returns the path to navigate to on
    /// success; on failure the form keeps its state so the triage officer
    /// can correct and resubmit.
    pub async fn submit(&mut self) -> Option<&'static str> {
        let Some(doctor_id) = self.form.doctor_id else {
            tracing::warn!("triage submit without an assigned doctor");
            return None;
        };

        let req = ProcessTriageRequest {
            record_id: self.record_id.clone(),
            vitals: self.form.vitals.clone(),
            diagnosis: self.form.diagnosis.clone(),
            urgency: self.form.urgency,
            doctor_id,
        };

        match self.gateway.process_triage(req).await {
            Ok(body) if body.success => Some("/triage/unassigned"),
            Ok(body) => {
                tracing::warn!(
                    reason = body.message.as_deref().unwrap_or("Failed to process patient"),
                    "triage processing rejected"
                );
                None
            }
            Err(e) => {
                tracing::error!("triage processing error: {}", e);
                None
            }
        }
    }

    pub fn unmount(&mut self) {
        self.patient.cancel();
        self.doctors.cancel();
    }
}
