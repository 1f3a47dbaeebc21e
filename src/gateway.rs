use crate::{
    config::AppConfig,
    credentials::CredentialState,
    error::FetchError,
    models::{
        AdminDashboardStats, AdminRecordSummary, AssignedRecord, AssignedRecordsResponse,
        LabRequest, LabStatus,
        NewStaffRequest, PatientSearchResponse, ProcessTriageRequest, RegisterPatientRequest,
        StaffAccount, StaffMember, StatusResponse, TriageDoctorsResponse, TriagePatientResponse,
        UnassignedPage, UpdateLabRequest, UpdateStaffRequest, UserIdentity,
    },
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use uuid::Uuid;

/// ApiGateway Trait
///
/// Defines the abstract contract for every call the client makes to the
/// hospital REST API. Page controllers and the session resolver depend on
/// this trait rather than on HTTP specifics, so the data layer can be swapped
/// (live HTTP, canned mock) without touching any controller.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn ApiGateway>`) safely shareable across the app shell and the
/// controllers' asynchronous task boundaries.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    // --- Identity ---
    // The "who am I" call that gates all route visibility.
    async fn fetch_identity(&self) -> Result<UserIdentity, FetchError>;

    // --- Reception ---
    async fn search_patients(&self, query: &str) -> Result<PatientSearchResponse, FetchError>;
    async fn register_patient(
        &self,
        req: RegisterPatientRequest,
    ) -> Result<StatusResponse, FetchError>;

    // --- Triage ---
    // Server-side paginated unassigned queue.
    async fn unassigned_patients(
        &self,
        page: u32,
        limit: u32,
        search: &str,
    ) -> Result<UnassignedPage, FetchError>;
    async fn triage_patient(&self, record_id: &str) -> Result<TriagePatientResponse, FetchError>;
    async fn triage_doctors(&self, search: &str) -> Result<TriageDoctorsResponse, FetchError>;
    async fn process_triage(&self, req: ProcessTriageRequest) -> Result<StatusResponse, FetchError>;

    // --- Laboratory ---
    async fn lab_requests(
        &self,
        status: LabStatus,
        search: &str,
    ) -> Result<Vec<LabRequest>, FetchError>;
    async fn lab_request(&self, id: &str) -> Result<LabRequest, FetchError>;
    async fn update_lab_request(
        &self,
        id: &str,
        req: UpdateLabRequest,
    ) -> Result<LabRequest, FetchError>;

    // --- Doctor ---
    async fn staff_account(&self, user_id: Uuid) -> Result<StaffAccount, FetchError>;
    async fn assigned_records(&self) -> Result<AssignedRecordsResponse, FetchError>;

    // --- Hospital Administration ---
    async fn admin_stats(&self) -> Result<AdminDashboardStats, FetchError>;
    async fn staff_list(&self, search: &str) -> Result<Vec<StaffMember>, FetchError>;
    async fn add_staff(&self, req: NewStaffRequest) -> Result<StaffMember, FetchError>;
    async fn update_staff(
        &self,
        id: Uuid,
        req: UpdateStaffRequest,
    ) -> Result<StaffMember, FetchError>;
    async fn admin_records(&self) -> Result<Vec<AdminRecordSummary>, FetchError>;
}

/// GatewayState
///
/// The concrete type used to share API access across the application.
pub type GatewayState = Arc<dyn ApiGateway>;

/// HttpApiGateway
///
/// The live implementation of `ApiGateway`, backed by reqwest. Attaches the
/// stored bearer token (when present) to every request and converts transport,
/// status and decode failures into the `FetchError` taxonomy.
pub struct HttpApiGateway {
    client: reqwest::Client,
    base_url: String,
    credentials: CredentialState,
}

impl HttpApiGateway {
    /// Constructs the gateway from the loaded configuration. The request
    /// timeout applies uniformly to every call.
    pub fn new(config: &AppConfig, credentials: CredentialState) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.api_base_url.clone(),
            credentials,
        }
    }

    /// Builds a request against the API base URL, attaching the bearer token
    /// if one is stored. An absent token simply produces an unauthenticated
    /// request; the backend's 401 then flows back through `FetchError`.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match self.credentials.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and decodes the JSON body, mapping non-2xx statuses
    /// and malformed bodies into the error taxonomy.
    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, FetchError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ApiGateway for HttpApiGateway {
    async fn fetch_identity(&self) -> Result<UserIdentity, FetchError> {
        self.send_json(self.request(Method::GET, "/api/auth/me"))
            .await
    }

    async fn search_patients(&self, query: &str) -> Result<PatientSearchResponse, FetchError> {
        self.send_json(
            self.request(Method::GET, "/reception/search-patients")
                .query(&[("query", query)]),
        )
        .await
    }

    async fn register_patient(
        &self,
        req: RegisterPatientRequest,
    ) -> Result<StatusResponse, FetchError> {
        self.send_json(
            self.request(Method::POST, "/reception/register-patient")
                .json(&req),
        )
        .await
    }

    async fn unassigned_patients(
        &self,
        page: u32,
        limit: u32,
        search: &str,
    ) -> Result<UnassignedPage, FetchError> {
        self.send_json(self.request(Method::GET, "/triage/unassigned").query(&[
            ("page", page.to_string()),
            ("limit", limit.to_string()),
            ("search", search.to_string()),
        ]))
        .await
    }

    async fn triage_patient(&self, record_id: &str) -> Result<TriagePatientResponse, FetchError> {
        self.send_json(self.request(Method::GET, &format!("/triage/patients/{}", record_id)))
            .await
    }

    async fn triage_doctors(&self, search: &str) -> Result<TriageDoctorsResponse, FetchError> {
        self.send_json(
            self.request(Method::GET, "/triage/doctors")
                .query(&[("search", search)]),
        )
        .await
    }

    async fn process_triage(&self, req: ProcessTriageRequest) -> Result<StatusResponse, FetchError> {
        self.send_json(self.request(Method::POST, "/triage/process").json(&req))
            .await
    }

    async fn lab_requests(
        &self,
        status: LabStatus,
        search: &str,
    ) -> Result<Vec<LabRequest>, FetchError> {
        self.send_json(
            self.request(Method::GET, "/api/lab/requests")
                .query(&[("status", status.as_str()), ("search", search)]),
        )
        .await
    }

    async fn lab_request(&self, id: &str) -> Result<LabRequest, FetchError> {
        self.send_json(self.request(Method::GET, &format!("/api/lab/requests/{}", id)))
            .await
    }

    async fn update_lab_request(
        &self,
        id: &str,
        req: UpdateLabRequest,
    ) -> Result<LabRequest, FetchError> {
        self.send_json(
            self.request(Method::PUT, &format!("/api/lab/requests/{}", id))
                .json(&req),
        )
        .await
    }

    async fn staff_account(&self, user_id: Uuid) -> Result<StaffAccount, FetchError> {
        self.send_json(self.request(
            Method::GET,
            &format!("/api/doctors/getStaffAccount/{}", user_id),
        ))
        .await
    }

    async fn assigned_records(&self) -> Result<AssignedRecordsResponse, FetchError> {
        self.send_json(self.request(Method::GET, "/api/doctors/patients"))
            .await
    }

    async fn admin_stats(&self) -> Result<AdminDashboardStats, FetchError> {
        self.send_json(self.request(Method::GET, "/api/admin/stats"))
            .await
    }

    async fn staff_list(&self, search: &str) -> Result<Vec<StaffMember>, FetchError> {
        self.send_json(
            self.request(Method::GET, "/api/admin/staff")
                .query(&[("search", search)]),
        )
        .await
    }

    async fn add_staff(&self, req: NewStaffRequest) -> Result<StaffMember, FetchError> {
        self.send_json(self.request(Method::POST, "/api/admin/staff").json(&req))
            .await
    }

    async fn update_staff(
        &self,
        id: Uuid,
        req: UpdateStaffRequest,
    ) -> Result<StaffMember, FetchError> {
        self.send_json(
            self.request(Method::PUT, &format!("/api/admin/staff/{}", id))
                .json(&req),
        )
        .await
    }

    async fn admin_records(&self) -> Result<Vec<AdminRecordSummary>, FetchError> {
        self.send_json(self.request(Method::GET, "/api/admin/records"))
            .await
    }
}

// The Mock Implementation (For Unit Tests)
/// MockApiGateway
///
/// A canned implementation of `ApiGateway` used by the unit test suites.
/// Every call either fails with `fail_with` (when set) or returns the
/// pre-configured value, and is recorded in `calls` so tests can assert how
/// many fetches a controller actually issued.
#[derive(Default)]
pub struct MockApiGateway {
    pub identity: Option<UserIdentity>,
    pub patients: PatientSearchResponse,
    pub register_result: StatusResponse,
    pub unassigned: UnassignedPage,
    pub triage_patient_result: TriagePatientResponse,
    pub doctors: TriageDoctorsResponse,
    pub process_result: StatusResponse,
    pub lab_queue: Vec<LabRequest>,
    pub lab_detail: Option<LabRequest>,
    pub staff_account_result: Option<StaffAccount>,
    pub assigned: Vec<AssignedRecord>,
    pub stats: AdminDashboardStats,
    pub staff: Vec<StaffMember>,
    pub records: Vec<AdminRecordSummary>,

    /// When set, every operation fails with a clone of this error.
    pub fail_with: Option<FetchError>,
    /// Spy log of every operation invoked, in order.
    pub calls: std::sync::Mutex<Vec<String>>,
}

impl MockApiGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose every call fails, for exercising error paths.
    pub fn failing(err: FetchError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("call log poisoned").len()
    }

    fn record(&self, call: impl Into<String>) -> Result<(), FetchError> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push(call.into());
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ApiGateway for MockApiGateway {
    async fn fetch_identity(&self) -> Result<UserIdentity, FetchError> {
        self.record("fetch_identity")?;
        self.identity.clone().ok_or(FetchError::Status(401))
    }

    async fn search_patients(&self, query: &str) -> Result<PatientSearchResponse, FetchError> {
        self.record(format!("search_patients:{}", query))?;
        Ok(self.patients.clone())
    }

    async fn register_patient(
        &self,
        req: RegisterPatientRequest,
    ) -> Result<StatusResponse, FetchError> {
        self.record(format!("register_patient:{}", req.fayda_id))?;
        Ok(self.register_result.clone())
    }

    async fn unassigned_patients(
        &self,
        page: u32,
        _limit: u32,
        search: &str,
    ) -> Result<UnassignedPage, FetchError> {
        self.record(format!("unassigned_patients:{}:{}", page, search))?;
        Ok(self.unassigned.clone())
    }

    async fn triage_patient(&self, record_id: &str) -> Result<TriagePatientResponse, FetchError> {
        self.record(format!("triage_patient:{}", record_id))?;
        Ok(self.triage_patient_result.clone())
    }

    async fn triage_doctors(&self, search: &str) -> Result<TriageDoctorsResponse, FetchError> {
        self.record(format!("triage_doctors:{}", search))?;
        Ok(self.doctors.clone())
    }

    async fn process_triage(&self, req: ProcessTriageRequest) -> Result<StatusResponse, FetchError> {
        self.record(format!("process_triage:{}", req.record_id))?;
        Ok(self.process_result.clone())
    }

    async fn lab_requests(
        &self,
        status: LabStatus,
        search: &str,
    ) -> Result<Vec<LabRequest>, FetchError> {
        self.record(format!("lab_requests:{}:{}", status.as_str(), search))?;
        Ok(self
            .lab_queue
            .iter()
            .filter(|r| r.status == status)
            .cloned()
            .collect())
    }

    async fn lab_request(&self, id: &str) -> Result<LabRequest, FetchError> {
        self.record(format!("lab_request:{}", id))?;
        self.lab_queue
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .or_else(|| self.lab_detail.clone())
            .ok_or(FetchError::Status(404))
    }

    async fn update_lab_request(
        &self,
        id: &str,
        req: UpdateLabRequest,
    ) -> Result<LabRequest, FetchError> {
        self.record(format!("update_lab_request:{}", id))?;
        let mut updated = self
            .lab_queue
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .or_else(|| self.lab_detail.clone())
            .ok_or(FetchError::Status(404))?;
        updated.status = req.status;
        updated.results = Some(crate::models::LabResults {
            test_value: req.test_value,
            normal_range: req.normal_range,
            interpretation: req.interpretation,
            notes: req.notes,
        });
        Ok(updated)
    }

    async fn staff_account(&self, user_id: Uuid) -> Result<StaffAccount, FetchError> {
        self.record(format!("staff_account:{}", user_id))?;
        self.staff_account_result
            .clone()
            .ok_or(FetchError::Status(404))
    }

    async fn assigned_records(&self) -> Result<AssignedRecordsResponse, FetchError> {
        self.record("assigned_records")?;
        Ok(AssignedRecordsResponse {
            data: self.assigned.clone(),
        })
    }

    async fn admin_stats(&self) -> Result<AdminDashboardStats, FetchError> {
        self.record("admin_stats")?;
        Ok(self.stats.clone())
    }

    async fn staff_list(&self, search: &str) -> Result<Vec<StaffMember>, FetchError> {
        self.record(format!("staff_list:{}", search))?;
        Ok(self.staff.clone())
    }

    async fn add_staff(&self, req: NewStaffRequest) -> Result<StaffMember, FetchError> {
        self.record(format!("add_staff:{}", req.email))?;
        Ok(StaffMember {
            id: Uuid::new_v4(),
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            role: req.role,
            department: req.department,
        })
    }

    async fn update_staff(
        &self,
        id: Uuid,
        req: UpdateStaffRequest,
    ) -> Result<StaffMember, FetchError> {
        self.record(format!("update_staff:{}", id))?;
        let mut member = self
            .staff
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(FetchError::Status(404))?;
        if let Some(first_name) = req.first_name {
            member.first_name = first_name;
        }
        if let Some(last_name) = req.last_name {
            member.last_name = last_name;
        }
        if let Some(email) = req.email {
            member.email = email;
        }
        if let Some(role) = req.role {
            member.role = role;
        }
        if let Some(department) = req.department {
            member.department = Some(department);
        }
        Ok(member)
    }

    async fn admin_records(&self) -> Result<Vec<AdminRecordSummary>, FetchError> {
        self.record("admin_records")?;
        Ok(self.records.clone())
    }
}
