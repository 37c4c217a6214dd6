//! Business logic services for the VENUS platform

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod inventory;
pub mod orders;
pub mod quotations;
pub mod warehouse;

pub use auth::AuthService;
pub use customers::CustomerService;
pub use dashboard::DashboardService;
pub use inventory::InventoryService;
pub use orders::OrderService;
pub use quotations::QuotationService;
pub use warehouse::WarehouseService;
