//! Domain call-sites.
//!
//! # Data Flow
//! ```text
//! caller
//!     → XxxService method (build path + typed body)
//!     → CallSite (gateway + optional explicit token)
//!     → Gateway::dispatch (auth, 401 teardown)
//!     → failure::read_json / expect_success (decode or normalize)
//!     → typed DTO or NormalizedFailure
//! ```
//!
//! # Design Decisions
//! - Services never talk to the transport directly
//! - Identifiers are percent-encoded as single path segments
//! - A service built `with_token` ignores the session token for every call

pub mod agents;
pub mod budgets;
pub mod call_site;
pub mod expenses;
pub mod invoices;
pub mod marketplace;
pub mod organization;
pub mod resource_groups;
pub mod resources;
pub mod settings;
pub mod subscriptions;
pub mod system;

pub use agents::AgentService;
pub use budgets::BudgetService;
pub use call_site::CallSite;
pub use expenses::ExpenseService;
pub use invoices::InvoiceService;
pub use marketplace::MarketplaceService;
pub use organization::OrganizationService;
pub use resource_groups::ResourceGroupService;
pub use resources::ResourceService;
pub use settings::SettingsService;
pub use subscriptions::SubscriptionService;
pub use system::SystemService;
