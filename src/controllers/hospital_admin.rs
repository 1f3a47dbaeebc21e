use crate::{
    config::AppConfig,
    gateway::GatewayState,
    models::{
        AdminDashboardStats, AdminRecordSummary, NewStaffRequest, StaffMember, UpdateStaffRequest,
    },
    resource::{DebounceTicket, Debouncer, Resource},
};
use uuid::Uuid;

/// AdminDashboardController
///
/// [Hospital Admin Screen] Loads the headline counters for the dashboard.
pub struct AdminDashboardController {
    gateway: GatewayState,
    pub stats: Resource<AdminDashboardStats>,
}

impl AdminDashboardController {
    pub fn new(gateway: GatewayState) -> Self {
        Self {
            gateway,
            stats: Resource::new(),
        }
    }

    pub async fn load(&mut self) {
        let load = self.stats.begin();
        let outcome = self
            .gateway
            .admin_stats()
            .await
            .inspect_err(|e| tracing::error!("admin stats error: {}", e));
        self.stats.complete(load, outcome);
    }

    pub fn unmount(&mut self) {
        self.stats.cancel();
    }
}

/// StaffManagementController
///
/// [Hospital Admin Screen] Lists, creates and edits staff accounts. The
/// search box is debounced like every other list screen; add/edit refresh
/// the list on success so the table never shows stale rows.
pub struct StaffManagementController {
    gateway: GatewayState,
    debouncer: Debouncer,
    search: String,
    pub staff: Resource<Vec<StaffMember>>,
}

impl StaffManagementController {
    pub fn new(gateway: GatewayState, config: &AppConfig) -> Self {
        Self {
            gateway,
            debouncer: Debouncer::new(config.search_debounce),
            search: String::new(),
            staff: Resource::new(),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: &str) -> DebounceTicket {
        self.search = search.to_string();
        self.debouncer.input()
    }

    pub async fn run(&mut self, ticket: DebounceTicket) -> bool {
        if !ticket.settled().await {
            return false;
        }
        self.refresh().await;
        true
    }

    pub async fn refresh(&mut self) {
        let load = self.staff.begin();
        let outcome = self
            .gateway
            .staff_list(&self.search)
            .await
            .inspect_err(|e| tracing::error!("staff list error: {}", e));
        self.staff.complete(load, outcome);
    }

    /// add
    ///
    /// Creates a staff account and refreshes the list. Returns whether the
    /// creation succeeded.
    pub async fn add(&mut self, req: NewStaffRequest) -> bool {
        match self.gateway.add_staff(req).await {
            Ok(_) => {
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::error!("add staff error: {}", e);
                false
            }
        }
    }

    /// update
    ///
    /// Applies a partial edit to a staff account and refreshes the list.
    pub async fn update(&mut self, id: Uuid, req: UpdateStaffRequest) -> bool {
        match self.gateway.update_staff(id, req).await {
            Ok(_) => {
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::error!("update staff error: {}", e);
                false
            }
        }
    }

    pub fn unmount(&mut self) {
        self.staff.cancel();
    }
}

/// ViewRecordsController
///
/// [Hospital Admin Screen] Read-only listing of patient records for
/// oversight.
pub struct ViewRecordsController {
    gateway: GatewayState,
    pub records: Resource<Vec<AdminRecordSummary>>,
}

impl ViewRecordsController {
    pub fn new(gateway: GatewayState) -> Self {
        Self {
            gateway,
            records: Resource::new(),
        }
    }

    pub async fn load(&mut self) {
        let load = self.records.begin();
        let outcome = self
            .gateway
            .admin_records()
            .await
            .inspect_err(|e| tracing::error!("admin records error: {}", e));
        self.records.complete(load, outcome);
    }

    pub fn unmount(&mut self) {
        self.records.cancel();
    }
}
