// --- Module Structure ---

// Core application services and components.
pub mod config;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod models;
pub mod resource;
pub mod session;

// Module for routing segregation (public and per-role route sets).
pub mod routes;

// One controller per role-specific screen.
pub mod controllers;

use routes::{Params, RouteTable, Screen};
use session::Session;

// --- Public Re-exports ---

// Makes core types easily accessible to the binary entry point and tests.
pub use config::{AppConfig, Env};
pub use credentials::{CredentialState, CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::FetchError;
pub use gateway::{ApiGateway, GatewayState, HttpApiGateway, MockApiGateway};
pub use session::{Role, SessionState};

/// View
///
/// What one navigation produces for the host UI layer to render. `Loading`
/// is the boot placeholder shown while the session is still resolving;
/// `NotFound` is a normal terminal render state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading,
    Screen {
        screen: Screen,
        params: Params,
        sidebar: bool,
    },
    NotFound {
        sidebar: bool,
    },
}

/// App
///
/// The application shell. Owns the `Session` (it is the session's single
/// writer; everything else reads the settled role), shares the API gateway
/// and credential store with the controllers it creates, and turns requested
/// paths into `View`s through the role-gated route table.
///
/// Route visibility is recomputed from the current role on every `navigate`
/// call; there is no cached router to go stale when the role changes.
pub struct App {
    config: AppConfig,
    gateway: GatewayState,
    credentials: CredentialState,
    session: Session,
}

impl App {
    pub fn new(config: AppConfig, gateway: GatewayState, credentials: CredentialState) -> Self {
        Self {
            config,
            gateway,
            credentials,
            session: Session::new(),
        }
    }

    /// boot
    ///
    /// Resolves the session. This is the one call that gates the whole
    /// application tree: until it returns, `navigate` yields `View::Loading`
    /// for every path. Safe to call again; resolution is idempotent.
    pub async fn boot(&mut self) -> Option<Role> {
        self.session.resolve(self.gateway.as_ref()).await
    }

    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }

    pub fn is_resolving(&self) -> bool {
        self.session.is_resolving()
    }

    /// logout
    ///
    /// Clears the stored credential and settles the session to
    /// unauthenticated. The next `navigate` already sees only public routes.
    pub fn logout(&mut self) {
        self.credentials.clear();
        self.session.logout();
    }

    /// visible_routes
    ///
    /// The route table for the current role, recomputed on every call.
    pub fn visible_routes(&self) -> RouteTable {
        routes::visible_routes(self.session.role())
    }

    /// navigate
    ///
    /// Resolves a requested path against the currently visible route set.
    /// While the session is resolving, every path (deep links included)
    /// renders the loading placeholder so no screen can observe a stale or
    /// default role.
    pub fn navigate(&self, path: &str) -> View {
        if self.session.is_resolving() {
            return View::Loading;
        }

        let role = self.session.role();
        let sidebar = routes::sidebar_visible(role);
        match routes::visible_routes(role).resolve(path) {
            routes::RouteMatch::Screen { screen, params } => View::Screen {
                screen,
                params,
                sidebar,
            },
            routes::RouteMatch::NotFound => View::NotFound { sidebar },
        }
    }

    // --- Controller Factories ---

    // Screens receive their dependencies here instead of reaching for any
    // global: the shell is the single place that hands out the shared
    // gateway and credential store.

    pub fn patient_registry(&self) -> controllers::receptionist::PatientRegistryController {
        controllers::receptionist::PatientRegistryController::new(
            self.gateway.clone(),
            &self.config,
        )
    }

    pub fn registration(&self) -> controllers::receptionist::RegistrationController {
        controllers::receptionist::RegistrationController::new(self.gateway.clone())
    }

    pub fn unassigned_queue(&self) -> controllers::triage::UnassignedQueueController {
        controllers::triage::UnassignedQueueController::new(self.gateway.clone(), &self.config)
    }

    pub fn process_patient(&self, record_id: &str) -> controllers::triage::ProcessPatientController {
        controllers::triage::ProcessPatientController::new(self.gateway.clone(), record_id)
    }

    pub fn assigned_records(&self) -> controllers::doctor::AssignedRecordsController {
        controllers::doctor::AssignedRecordsController::new(
            self.gateway.clone(),
            self.credentials.clone(),
        )
    }

    pub fn lab_queue(&self) -> controllers::laboratorist::LabQueueController {
        controllers::laboratorist::LabQueueController::new(self.gateway.clone(), &self.config)
    }

    pub fn lab_form(&self, request_id: &str) -> controllers::laboratorist::LabFormController {
        controllers::laboratorist::LabFormController::new(self.gateway.clone(), request_id)
    }

    pub fn admin_dashboard(&self) -> controllers::hospital_admin::AdminDashboardController {
        controllers::hospital_admin::AdminDashboardController::new(self.gateway.clone())
    }

    pub fn staff_management(&self) -> controllers::hospital_admin::StaffManagementController {
        controllers::hospital_admin::StaffManagementController::new(
            self.gateway.clone(),
            &self.config,
        )
    }

    pub fn view_records(&self) -> controllers::hospital_admin::ViewRecordsController {
        controllers::hospital_admin::ViewRecordsController::new(self.gateway.clone())
    }
}
