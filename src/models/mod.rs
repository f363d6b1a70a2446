//! Entity DTOs exchanged with the backend.
//!
//! The pipeline never inspects these; call-sites serialize requests and
//! deserialize responses with them.

pub mod agent;
pub mod budget;
pub mod expense;
pub mod invoice;
pub mod marketplace;
pub mod organization;
pub mod resource;
pub mod resource_group;
pub mod settings;
pub mod subscription;
pub mod system;

pub use agent::{Agent, AgentMetrics, AgentStatus};
pub use budget::{
    Budget, BudgetCategory, BudgetOverview, CategoryAllocation, CategoryOverview,
    CreateBudgetRequest, UpdateBudgetRequest,
};
pub use expense::{CreateExpenseRequest, Expense, UpdateExpenseRequest};
pub use invoice::{
    CreateInvoiceRequest, CreateManualEntryRequest, Invoice, InvoiceFile, InvoiceMatch,
    InvoiceOverview, ManualEntry,
};
pub use marketplace::{InstallTemplateRequest, MarketplaceTemplate};
pub use organization::{
    CreateMemberRequest, Member, Organization, Role, UpdateMemberRequest, UpdateMemberRoleRequest,
    UpdateOrganizationRequest,
};
pub use resource::{
    CreateResourceRequest, DeployContainerRequest, ExecCommandRequest, ExecCommandResponse,
    PortMapping, Resource, ResourceAction, ResourceActionRequest, ResourceLogs, ResourceStatus,
    UpdateResourceRequest, VolumeMapping,
};
pub use resource_group::{CreateResourceGroupRequest, ResourceGroup, UpdateResourceGroupRequest};
pub use settings::{
    ChangeEmailRequest, ChangePasswordRequest, Profile, TwoFactorCode, TwoFactorSetup,
};
pub use subscription::{CreateSubscriptionRequest, Subscription, UpdateSubscriptionRequest};
pub use system::{SystemInfo, SystemMetrics, SystemMetricsEnvelope};
