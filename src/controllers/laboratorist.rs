use crate::{
    config::AppConfig,
    gateway::GatewayState,
    models::{LabRequest, LabStatus, UpdateLabRequest},
    resource::{DebounceTicket, Debouncer, Resource},
};

/// LabQueueController
///
/// [Laboratory Screen] Drives the lab request queue. The status filter
/// defaults to `Pending`; both the filter and the search box feed the same
/// debounce window before refetching.
pub struct LabQueueController {
    gateway: GatewayState,
    debouncer: Debouncer,
    search: String,
    status: LabStatus,
    pub requests: Resource<Vec<LabRequest>>,
}

impl LabQueueController {
    pub fn new(gateway: GatewayState, config: &AppConfig) -> Self {
        Self {
            gateway,
            debouncer: Debouncer::new(config.search_debounce),
            search: String::new(),
            status: LabStatus::Pending,
            requests: Resource::new(),
        }
    }

    pub fn status(&self) -> LabStatus {
        self.status
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: &str) -> DebounceTicket {
        self.search = search.to_string();
        self.debouncer.input()
    }

    pub fn set_status(&mut self, status: LabStatus) -> DebounceTicket {
        self.status = status;
        self.debouncer.input()
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
        let load = self.requests.begin();
        let outcome = self
            .gateway
            .lab_requests(self.status, &self.search)
            .await
            .inspect_err(|e| tracing::error!("lab queue error: {}", e));
        self.requests.complete(load, outcome);
    }

    /// Navigation target for a queue row.
    pub fn detail_path(request_id: &str) -> String {
        format!("/laboratorist/requests/{}", request_id)
    }

    pub fn unmount(&mut self) {
        self.requests.cancel();
    }
}

/// LabFormController
///
/// [Laboratory Screen] Loads one lab request and submits the result form.
/// On load the form is prefilled from any results already recorded; a
/// successful submit navigates back to the queue.
pub struct LabFormController {
    gateway: GatewayState,
    request_id: String,
    pub request: Resource<LabRequest>,
    pub form: UpdateLabRequest,
    pub submitting: bool,
}

impl LabFormController {
    pub fn new(gateway: GatewayState, request_id: &str) -> Self {
        Self {
            gateway,
            request_id: request_id.to_string(),
            request: Resource::new(),
            form: UpdateLabRequest::default(),
            submitting: false,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// load
    ///
    /// Fetches the request and prefills the form from its current results
    /// and status. A 404 leaves the screen in its "not found" render state.
    pub async fn load(&mut self) {
        let load = self.request.begin();
        let outcome = self
            .gateway
            .lab_request(&self.request_id)
            .await
            .inspect_err(|e| tracing::error!("lab request load error: {}", e));

        if let Ok(request) = &outcome {
            let results = request.results.clone().unwrap_or_default();
            self.form = UpdateLabRequest {
                test_value: results.test_value,
                normal_range: results.normal_range,
                interpretation: results.interpretation,
                notes: results.notes,
                status: request.status,
            };
        }
        self.request.complete(load, outcome);
    }

    /// submit
    ///
    /// Sends the result form. Returns the path to navigate to on success.
    pub async fn submit(&mut self) -> Option<&'static str> {
        self.submitting = true;
        let outcome = self
            .gateway
            .update_lab_request(&self.request_id, self.form.clone())
            .await;
        self.submitting = false;

        match outcome {
            Ok(_) => Some("/laboratorist/patientList"),
            Err(e) => {
                tracing::error!("lab result update error: {}", e);
                None
            }
        }
    }

    pub fn unmount(&mut self) {
        self.request.cancel();
    }
}
