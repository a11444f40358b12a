//! Report view types.

use lyvo_shared::types::MonthKey;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One category's slice of a month's expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryExpense {
    /// Category label.
    pub category: String,
    /// Total spent in the category within the month.
    pub amount: Decimal,
    /// The category's share of the month's total expense, in percent.
    pub share_percent: Decimal,
}

/// The evolution report for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// The month reported.
    pub month: MonthKey,
    /// Income realized within the month.
    pub realized_income: Decimal,
    /// Income realized in the month before.
    pub previous_month_income: Decimal,
    /// Month-over-month income growth in percent. `None` when the
    /// previous month had no income to compare against.
    pub income_growth_percent: Option<Decimal>,
    /// Expenses grouped by category, largest first.
    pub expense_breakdown: Vec<CategoryExpense>,
    /// Total expense realized within the month.
    pub total_expense: Decimal,
    /// Realized balance at the end of the month.
    pub final_balance: Decimal,
}
