//! Projection view types.

use lyvo_shared::types::{FixedBillId, ForecastId, MonthKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::ForecastKind;

/// A fixed bill as it appears in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillOccurrence {
    /// The bill definition.
    pub bill_id: FixedBillId,
    /// Bill name.
    pub name: String,
    /// Amount due this month.
    pub value: Decimal,
    /// Day of month the bill is due.
    pub due_day: u32,
    /// Category label.
    pub category: String,
    /// Whether this month's occurrence has been paid.
    pub is_paid: bool,
}

/// A forecast as it appears in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastOccurrence {
    /// The forecast definition.
    pub forecast_id: ForecastId,
    /// Description.
    pub description: String,
    /// Expected amount.
    pub value: Decimal,
    /// Expected income or expense.
    pub kind: ForecastKind,
    /// Whether this month's occurrence has been confirmed.
    pub is_confirmed: bool,
}

/// Realized and projected totals for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The month summarized.
    pub month: MonthKey,
    /// Income realized within the month.
    pub realized_income: Decimal,
    /// Expense realized within the month (card purchases at purchase date).
    pub realized_expense: Decimal,
    /// `opening_balance + realized_income - realized_expense`.
    pub realized_balance: Decimal,
    /// Pending expected income for the month.
    pub expected_income: Decimal,
    /// Unpaid bills, unpaid invoice residuals, and pending expected
    /// expenses for the month.
    pub expected_expense: Decimal,
    /// `realized_balance + expected_income - expected_expense`.
    pub projected_balance: Decimal,
}
