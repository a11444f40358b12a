//! Budget view types.

use lyvo_shared::types::BudgetLimitId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The usage of one budget limit in one month. Always derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetUsage {
    /// The limit definition.
    pub limit_id: BudgetLimitId,
    /// Category label.
    pub category: String,
    /// Monthly spending limit.
    pub monthly_limit: Decimal,
    /// Expenses in the category realized within the month.
    pub spent: Decimal,
    /// `spent / monthly_limit * 100`, clamped to 0..=100.
    pub percent_used: Decimal,
}
