//! Per-category budget limits and their monthly usage.

pub mod service;
pub mod types;

pub use service::BudgetService;
pub use types::BudgetUsage;
