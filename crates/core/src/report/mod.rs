//! Monthly evolution report: income growth and expense breakdown.

pub mod service;
pub mod types;

pub use service::ReportService;
pub use types::{CategoryExpense, MonthlyReport};
