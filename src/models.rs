use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Identity (Session Resolution) ---

/// UserIdentity
///
/// The payload returned by the identity endpoint (`GET /api/auth/me`).
/// The role arrives as a free-form string; parsing it into the closed
/// `Role` enumeration is the session resolver's job, so a malformed or
/// unknown value degrades to "no session" instead of an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub user_id: Uuid,
    pub role: Option<String>,
}

// --- Reception (Patient Registry) ---

/// Patient
///
/// A registered patient as returned by the reception search endpoint.
/// Patients are keyed by their national `faydaID` rather than a database id.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(rename = "faydaID")]
    pub fayda_id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub gender: String,
    pub contact_number: String,
}

/// PatientSearchResponse
///
/// Envelope for `GET /reception/search-patients`. The backend reports logical
/// failures through `success`/`message` with a 200 status, so both must be
/// inspected in addition to the HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PatientSearchResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub patients: Vec<Patient>,
}

/// RegisterPatientRequest
///
/// Input payload for registering a walk-in patient (`POST /reception/register-patient`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPatientRequest {
    #[serde(rename = "faydaID")]
    pub fayda_id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub gender: String,
    pub contact_number: String,
    pub address: Option<String>,
}

/// StatusResponse
///
/// Minimal `{ success, message }` envelope used by mutation endpoints
/// (patient registration, triage processing).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// --- Triage ---

/// Urgency
///
/// Triage urgency classification assigned when a patient is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

/// UnassignedPatient
///
/// A row in the triage unassigned-patients queue. Unlike reception results,
/// these carry the backend record id used to open the processing form.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UnassignedPatient {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "faydaID")]
    pub fayda_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
}

/// UnassignedPage
///
/// One page of the unassigned queue. Pagination is server-side; the client
/// only echoes `page`/`limit` back and renders `total`/`pages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnassignedPage {
    #[serde(default)]
    pub patients: Vec<UnassignedPatient>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "one_page")]
    pub pages: u32,
}

fn one_page() -> u32 {
    1
}

impl Default for UnassignedPage {
    fn default() -> Self {
        // An empty queue still has one (empty) page.
        Self {
            patients: Vec::new(),
            total: 0,
            pages: 1,
        }
    }
}

/// TriagePatientResponse
///
/// Envelope for `GET /triage/patients/{id}`, loading the patient under triage.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TriagePatientResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Patient>,
}

/// Vitals
///
/// Vital signs captured on the triage processing form. Kept as strings:
/// these are free-text form fields on the wire (e.g. "120/80").
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    pub blood_pressure: String,
    pub heart_rate: String,
    pub temperature: String,
    pub oxygen_saturation: String,
}

/// DoctorSummary
///
/// A doctor available for assignment, as listed by `GET /triage/doctors`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// TriageDoctorsResponse
///
/// Envelope for the assignable-doctors listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TriageDoctorsResponse {
    pub success: bool,
    #[serde(default)]
    pub doctors: Vec<DoctorSummary>,
}

/// ProcessTriageRequest
///
/// Input payload for `POST /triage/process`: vitals, diagnosis, urgency and
/// the doctor the record is assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTriageRequest {
    pub record_id: String,
    pub vitals: Vitals,
    pub diagnosis: String,
    pub urgency: Urgency,
    pub doctor_id: Uuid,
}

// --- Laboratory ---

/// LabStatus
///
/// Lifecycle of a laboratory test request. The wire spelling of the middle
/// state contains a space, hence the explicit rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LabStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl LabStatus {
    /// Wire representation, used when the status travels as a query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            LabStatus::Pending => "Pending",
            LabStatus::InProgress => "In Progress",
            LabStatus::Completed => "Completed",
        }
    }
}

/// LabPatientRef
///
/// The populated patient reference embedded in a lab request (`patientID`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LabPatientRef {
    #[serde(rename = "faydaID")]
    pub fayda_id: String,
    pub first_name: String,
    pub last_name: String,
}

/// LabResults
///
/// Result fields filled in by the lab technician. All optional-by-emptiness
/// strings, mirroring the form.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LabResults {
    #[serde(default)]
    pub test_value: String,
    #[serde(default)]
    pub normal_range: String,
    #[serde(default)]
    pub interpretation: String,
    #[serde(default)]
    pub notes: String,
}

/// LabRequest
///
/// A laboratory test request, list and detail shape of `/api/lab/requests`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LabRequest {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "patientID", default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<LabPatientRef>,
    pub test_type: String,
    pub request_date: DateTime<Utc>,
    pub status: LabStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<LabResults>,
}

/// UpdateLabRequest
///
/// Flat payload for `PUT /api/lab/requests/{id}`: the result fields plus the
/// new status, exactly as the form submits them.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLabRequest {
    pub test_value: String,
    pub normal_range: String,
    pub interpretation: String,
    pub notes: String,
    pub status: LabStatus,
}

// --- Doctor ---

/// StaffAccount
///
/// A staff member's account record (`GET /api/doctors/getStaffAccount/{id}`),
/// shown in the doctor dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StaffAccount {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// AssignedRecord
///
/// A patient record assigned to the requesting doctor. The backend flattens
/// the populated patient document into the record row.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssignedRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_record_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "faydaID")]
    pub fayda_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// AssignedRecordsResponse
///
/// Envelope for `GET /api/doctors/patients`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AssignedRecordsResponse {
    #[serde(default)]
    pub data: Vec<AssignedRecord>,
}

// --- Hospital Administration ---

/// AdminDashboardStats
///
/// Output schema for the administrative statistics dashboard (`GET /api/admin/stats`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardStats {
    pub total_patients: i64,
    pub total_staff: i64,
    pub pending_lab_requests: i64,
    pub unassigned_triage: i64,
}

/// StaffMember
///
/// A staff record managed through the hospital-admin screens.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// NewStaffRequest
///
/// Input payload for creating a staff account (`POST /api/admin/staff`).
/// The password is forwarded to the auth layer and never persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewStaffRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub department: Option<String>,
    pub password: String,
}

/// UpdateStaffRequest
///
/// Partial update payload for `PUT /api/admin/staff/{id}`.
///
/// Uses `Option<T>` with `skip_serializing_if` so only the provided fields
/// travel in the JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// AdminRecordSummary
///
/// A row in the hospital-admin view-records table.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdminRecordSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "faydaID")]
    pub fayda_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
