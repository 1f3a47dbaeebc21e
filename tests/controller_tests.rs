use hms_portal::{
    AppConfig, CredentialState, CredentialStore, FetchError, GatewayState, MemoryCredentialStore,
    MockApiGateway,
    controllers::{
        doctor::AssignedRecordsController,
        hospital_admin::StaffManagementController,
        laboratorist::{LabFormController, LabQueueController},
        receptionist::PatientRegistryController,
        triage::{ProcessPatientController, UnassignedQueueController},
    },
    models::{
        AssignedRecord, LabRequest, LabResults, LabStatus, Patient, PatientSearchResponse,
        StaffAccount, StatusResponse, TriagePatientResponse, UnassignedPage, UnassignedPatient,
        UserIdentity,
    },
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

// --- Test Utilities ---

fn patient(fayda_id: &str) -> Patient {
    Patient {
        fayda_id: fayda_id.to_string(),
        first_name: "Abebe".to_string(),
        last_name: "Kebede".to_string(),
        date_of_birth: Utc::now(),
        gender: "Male".to_string(),
        contact_number: "0911000000".to_string(),
    }
}

fn lab_request(id: &str, status: LabStatus) -> LabRequest {
    LabRequest {
        id: id.to_string(),
        patient: None,
        test_type: "CBC".to_string(),
        request_date: Utc::now(),
        status,
        results: None,
    }
}

fn share(mock: MockApiGateway) -> (Arc<MockApiGateway>, GatewayState) {
    let mock = Arc::new(mock);
    (mock.clone(), mock.clone() as GatewayState)
}

// --- Receptionist: Patient Registry ---

#[tokio::test(start_paused = true)]
async fn test_registry_debounce_coalesces_keystrokes() {
    let (mock, gateway) = share(MockApiGateway {
        patients: PatientSearchResponse {
            success: true,
            message: None,
            patients: vec![patient("FYD-1")],
        },
        ..MockApiGateway::new()
    });
    let mut controller = PatientRegistryController::new(gateway, &AppConfig::default());

    // Three rapid keystrokes: only the last ticket survives its quiet period.
    let t1 = controller.set_query("abe").expect("ticket");
    let t2 = controller.set_query("abeb").expect("ticket");
    let t3 = controller.set_query("abebe").expect("ticket");

    assert!(!controller.run_search(t1).await);
    assert!(!controller.run_search(t2).await);
    assert!(controller.run_search(t3).await);

    // Exactly one fetch, for the final query.
    assert_eq!(mock.call_count(), 1);
    assert_eq!(
        mock.calls.lock().unwrap().as_slice(),
        &["search_patients:abebe".to_string()]
    );
    assert_eq!(controller.patients.value().map(|p| p.len()), Some(1));
}

#[tokio::test]
async fn test_registry_short_query_clears_without_fetch() {
    let (mock, gateway) = share(MockApiGateway::new());
    let mut controller = PatientRegistryController::new(gateway, &AppConfig::default());

    assert!(controller.set_query("ab").is_none());
    assert!(controller.patients.is_idle());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_registry_backend_rejection_is_local_error() {
    let (_, gateway) = share(MockApiGateway {
        patients: PatientSearchResponse {
            success: false,
            message: Some("index offline".to_string()),
            patients: vec![],
        },
        ..MockApiGateway::new()
    });
    let mut controller = PatientRegistryController::new(gateway, &AppConfig::default());
    let _ = controller.set_query("abebe");
    controller.search().await;

    assert_eq!(
        controller.patients.error(),
        Some(&FetchError::Rejected("index offline".to_string()))
    );
}

#[tokio::test]
async fn test_registry_unmount_discards_late_result() {
    // Scenario: the fetch resolves after the screen has unmounted. The spy
    // is the resource itself: the completion must be rejected and the state
    // untouched.
    let (_, gateway) = share(MockApiGateway::new());
    let mut controller = PatientRegistryController::new(gateway, &AppConfig::default());
    let _ = controller.set_query("abebe");

    let in_flight = controller.patients.begin();
    controller.unmount();

    let applied = controller
        .patients
        .complete(in_flight, Ok(vec![patient("FYD-9")]));
    assert!(!applied, "no state update may land after unmount");
    assert!(controller.patients.is_idle());
}

// --- Triage: Unassigned Queue ---

#[tokio::test(start_paused = true)]
async fn test_unassigned_pagination_bounds_and_refetch() {
    let (mock, gateway) = share(MockApiGateway {
        unassigned: UnassignedPage {
            patients: vec![UnassignedPatient {
                id: "rec-1".to_string(),
                fayda_id: "FYD-1".to_string(),
                first_name: "Sara".to_string(),
                last_name: "Tesfaye".to_string(),
                gender: "Female".to_string(),
                created_at: Utc::now(),
                urgency: None,
            }],
            total: 25,
            pages: 3,
        },
        ..MockApiGateway::new()
    });
    let mut controller = UnassignedQueueController::new(gateway, &AppConfig::default());

    // Initial mount load.
    controller.refresh().await;
    assert_eq!(controller.queue.value().map(|q| q.total), Some(25));

    // In-range page change refetches after the quiet period.
    let ticket = controller.set_page(2).expect("page 2 is in range");
    assert!(controller.run(ticket).await);
    assert_eq!(controller.page(), 2);

    // Out-of-range pages change nothing.
    assert!(controller.set_page(0).is_none());
    assert!(controller.set_page(4).is_none());
    assert_eq!(controller.page(), 2);

    let calls = mock.calls.lock().unwrap();
    assert_eq!(
        calls.as_slice(),
        &[
            "unassigned_patients:1:".to_string(),
            "unassigned_patients:2:".to_string(),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_unassigned_search_supersedes_pending_page_change() {
    let (mock, gateway) = share(MockApiGateway::new());
    let mut controller = UnassignedQueueController::new(gateway, &AppConfig::default());
    controller.refresh().await;

    // A keystroke lands inside the page change's quiet window; only one
    // fetch fires, carrying both the page and the search term.
    let paging = controller.set_page(1).expect("ticket");
    let typing = controller.set_search("sara");

    assert!(!controller.run(paging).await);
    assert!(controller.run(typing).await);

    let calls = mock.calls.lock().unwrap();
    assert_eq!(calls.len(), 2); // mount load + one coalesced refetch
    assert_eq!(calls[1], "unassigned_patients:1:sara");
}

// --- Triage: Process Patient ---

#[tokio::test]
async fn test_process_patient_loads_patient_and_doctors() {
    let (_, gateway) = share(MockApiGateway {
        triage_patient_result: TriagePatientResponse {
            success: true,
            data: Some(patient("FYD-7")),
        },
        doctors: hms_portal::models::TriageDoctorsResponse {
            success: true,
            doctors: vec![hms_portal::models::DoctorSummary {
                id: Uuid::from_u128(9),
                first_name: "Lia".to_string(),
                last_name: "Haile".to_string(),
                department: Some("Internal Medicine".to_string()),
            }],
        },
        ..MockApiGateway::new()
    });
    let mut controller = ProcessPatientController::new(gateway, "rec-7");
    controller.load().await;

    assert_eq!(
        controller.patient.value().map(|p| p.fayda_id.as_str()),
        Some("FYD-7")
    );
    assert_eq!(controller.doctors.value().map(|d| d.len()), Some(1));
}

#[tokio::test]
async fn test_process_patient_missing_record_is_terminal_not_found_state() {
    let (_, gateway) = share(MockApiGateway {
        triage_patient_result: TriagePatientResponse {
            success: false,
            data: None,
        },
        ..MockApiGateway::new()
    });
    let mut controller = ProcessPatientController::new(gateway, "rec-404");
    controller.load().await;

    assert_eq!(
        controller.patient.error(),
        Some(&FetchError::Rejected("Patient not found".to_string()))
    );
}

#[tokio::test]
async fn test_process_submit_requires_assigned_doctor() {
    let (mock, gateway) = share(MockApiGateway {
        process_result: StatusResponse {
            success: true,
            message: None,
        },
        ..MockApiGateway::new()
    });
    let mut controller = ProcessPatientController::new(gateway, "rec-7");

    // No doctor selected: nothing is sent.
    assert_eq!(controller.submit().await, None);
    assert_eq!(mock.call_count(), 0);

    controller.form.doctor_id = Some(Uuid::from_u128(9));
    controller.form.diagnosis = "Malaria, suspected".to_string();
    assert_eq!(controller.submit().await, Some("/triage/unassigned"));
    assert_eq!(
        mock.calls.lock().unwrap().as_slice(),
        &["process_triage:rec-7".to_string()]
    );
}

// --- Laboratory ---

#[tokio::test(start_paused = true)]
async fn test_lab_queue_defaults_to_pending_and_refilters() {
    let (mock, gateway) = share(MockApiGateway {
        lab_queue: vec![
            lab_request("lab-1", LabStatus::Pending),
            lab_request("lab-2", LabStatus::Completed),
        ],
        ..MockApiGateway::new()
    });
    let mut controller = LabQueueController::new(gateway, &AppConfig::default());
    assert_eq!(controller.status(), LabStatus::Pending);

    controller.refresh().await;
    assert_eq!(controller.requests.value().map(|r| r.len()), Some(1));

    let ticket = controller.set_status(LabStatus::Completed);
    assert!(controller.run(ticket).await);

    let calls = mock.calls.lock().unwrap();
    assert_eq!(
        calls.as_slice(),
        &[
            "lab_requests:Pending:".to_string(),
            "lab_requests:Completed:".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_lab_form_prefills_from_existing_results() {
    let mut existing = lab_request("lab-9", LabStatus::InProgress);
    existing.results = Some(LabResults {
        test_value: "5.4".to_string(),
        normal_range: "4.0-6.0".to_string(),
        interpretation: "Normal".to_string(),
        notes: String::new(),
    });
    let (_, gateway) = share(MockApiGateway {
        lab_queue: vec![existing],
        ..MockApiGateway::new()
    });

    let mut controller = LabFormController::new(gateway, "lab-9");
    controller.load().await;

    assert_eq!(controller.form.test_value, "5.4");
    assert_eq!(controller.form.status, LabStatus::InProgress);
}

#[tokio::test]
async fn test_lab_form_submit_navigates_back_to_queue() {
    let (_, gateway) = share(MockApiGateway {
        lab_queue: vec![lab_request("lab-9", LabStatus::Pending)],
        ..MockApiGateway::new()
    });
    let mut controller = LabFormController::new(gateway, "lab-9");
    controller.load().await;

    controller.form.test_value = "12.1".to_string();
    controller.form.status = LabStatus::Completed;

    assert_eq!(controller.submit().await, Some("/laboratorist/patientList"));
    assert!(!controller.submitting);
}

#[tokio::test]
async fn test_lab_form_missing_request_renders_not_found_state() {
    let (_, gateway) = share(MockApiGateway::new());
    let mut controller = LabFormController::new(gateway, "lab-404");
    controller.load().await;

    assert_eq!(controller.request.error(), Some(&FetchError::Status(404)));
}

// --- Doctor: Assigned Records ---

fn doctor_mock() -> MockApiGateway {
    MockApiGateway {
        identity: Some(UserIdentity {
            user_id: Uuid::from_u128(3),
            role: Some("Doctor".to_string()),
        }),
        staff_account_result: Some(StaffAccount {
            id: Uuid::from_u128(3),
            first_name: "Lia".to_string(),
            last_name: "Haile".to_string(),
            role: "Doctor".to_string(),
            department: None,
        }),
        assigned: vec![AssignedRecord {
            id: "rec-1".to_string(),
            medical_record_id: None,
            status: Some("Assigned".to_string()),
            fayda_id: "FYD-1".to_string(),
            first_name: "Abebe".to_string(),
            last_name: "Kebede".to_string(),
            gender: "Male".to_string(),
            age: Some(41),
            updated_at: None,
            condition: None,
        }],
        ..MockApiGateway::new()
    }
}

#[tokio::test]
async fn test_assigned_records_chain_loads_in_order() {
    let (mock, gateway) = share(doctor_mock());
    let credentials = Arc::new(MemoryCredentialStore::with_token("tok")) as CredentialState;
    let mut controller = AssignedRecordsController::new(gateway, credentials);

    assert_eq!(controller.load().await, None);
    assert_eq!(
        controller.doctor.value().map(|d| d.first_name.as_str()),
        Some("Lia")
    );
    assert_eq!(controller.records.value().map(|r| r.len()), Some(1));

    // The chain is dependent: identity first, then the account it names,
    // then the records.
    let calls = mock.calls.lock().unwrap();
    assert_eq!(calls[0], "fetch_identity");
    assert!(calls[1].starts_with("staff_account:"));
    assert_eq!(calls[2], "assigned_records");
}

#[tokio::test]
async fn test_assigned_records_auth_failure_clears_credential() {
    let (_, gateway) = share(MockApiGateway::failing(FetchError::Status(401)));
    let store = Arc::new(MemoryCredentialStore::with_token("dead-token"));
    let credentials = store.clone() as CredentialState;
    let mut controller = AssignedRecordsController::new(gateway, credentials);

    assert_eq!(controller.load().await, Some("/login"));
    assert_eq!(store.token(), None, "a dead token must not survive");
    assert!(controller.records.error().is_some());
}

#[tokio::test]
async fn test_assigned_records_transient_failure_keeps_credential() {
    let (_, gateway) = share(MockApiGateway::failing(FetchError::Network("down".into())));
    let store = Arc::new(MemoryCredentialStore::with_token("tok"));
    let credentials = store.clone() as CredentialState;
    let mut controller = AssignedRecordsController::new(gateway, credentials);

    // A network blip stays on the screen with a retry affordance.
    assert_eq!(controller.load().await, None);
    assert_eq!(store.token(), Some("tok".to_string()));
    assert_eq!(
        controller.records.error(),
        Some(&FetchError::Network("down".to_string()))
    );
}

#[tokio::test]
async fn test_assigned_records_client_side_filter() {
    let (_, gateway) = share(doctor_mock());
    let credentials = Arc::new(MemoryCredentialStore::with_token("tok")) as CredentialState;
    let mut controller = AssignedRecordsController::new(gateway, credentials);
    controller.load().await;

    controller.set_search("kebede");
    assert_eq!(controller.filtered_records().len(), 1);

    controller.set_search("nobody");
    assert!(controller.filtered_records().is_empty());
}

// --- Hospital Admin: Staff Management ---

#[tokio::test]
async fn test_staff_add_refreshes_list() {
    let (mock, gateway) = share(MockApiGateway::new());
    let mut controller = StaffManagementController::new(gateway, &AppConfig::default());

    let created = controller
        .add(hms_portal::models::NewStaffRequest {
            first_name: "Marta".to_string(),
            last_name: "Bekele".to_string(),
            email: "marta@hospital.example".to_string(),
            role: "LabTechnician".to_string(),
            department: Some("Laboratory".to_string()),
            password: "initial-secret".to_string(),
        })
        .await;

    assert!(created);
    let calls = mock.calls.lock().unwrap();
    assert_eq!(calls[0], "add_staff:marta@hospital.example");
    assert_eq!(calls[1], "staff_list:");
}
