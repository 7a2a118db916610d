//! Typed services for the backend's REST resources.
//!
//! Each service is a thin mapping of endpoints onto async functions. They
//! all share one `ApiClient`, so every call carries the session token and
//! every 401 tears the session down.

pub mod email_config;
pub mod notifications;
pub mod resource;
pub mod tickets;
pub mod users;

pub use email_config::EmailConfigService;
pub use notifications::NotificationService;
pub use resource::Resource;
pub use tickets::TicketService;
pub use users::UserService;

use crate::api::ApiClient;
use crate::models::{Agent, Category, Customer, Department, Role, SlaPolicy};

pub type AgentService = Resource<Agent>;
pub type CustomerService = Resource<Customer>;
pub type DepartmentService = Resource<Department>;
pub type RoleService = Resource<Role>;
pub type CategoryService = Resource<Category>;
pub type SlaService = Resource<SlaPolicy>;

/// Every service, bound to one shared client.
#[derive(Clone)]
pub struct Services {
    pub tickets: TicketService,
    pub agents: AgentService,
    pub customers: CustomerService,
    pub departments: DepartmentService,
    pub roles: RoleService,
    pub categories: CategoryService,
    pub users: UserService,
    pub sla: SlaService,
    pub email_config: EmailConfigService,
    pub notifications: NotificationService,
}

impl Services {
    pub fn new(api: &ApiClient) -> Self {
        Self {
            tickets: TicketService::new(api.clone()),
            agents: Resource::new(api.clone(), "/agents"),
            customers: Resource::new(api.clone(), "/customers"),
            departments: Resource::new(api.clone(), "/departments"),
            roles: Resource::new(api.clone(), "/roles"),
            categories: Resource::new(api.clone(), "/categories"),
            users: UserService::new(api.clone()),
            sla: Resource::new(api.clone(), "/sla"),
            email_config: EmailConfigService::new(api.clone()),
            notifications: NotificationService::new(api.clone()),
        }
    }
}
