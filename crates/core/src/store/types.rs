//! Entity record types.

use chrono::NaiveDate;
use lyvo_shared::types::{
    BudgetLimitId, CreditCardId, FixedBillId, ForecastId, MonthKey, TransactionId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::recurrence::{RecurrenceOverrides, RecurrenceRule};

/// Transaction direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

/// Card attribution of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCharge {
    /// The card the purchase was made on.
    pub card_id: CreditCardId,
    /// Number of installments the purchase is split into (>= 1).
    pub installments: u32,
}

/// A realized income or expense record.
///
/// Owned exclusively by the ledger; only `date` and `value` may change
/// after creation, and only through an explicit edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Amount, always non-negative.
    pub value: Decimal,
    /// Category label (case-sensitive).
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// Purchase / receipt date.
    pub date: NaiveDate,
    /// Card attribution, when the expense originated on a credit card.
    pub card: Option<CardCharge>,
    /// Bumped on every mutation; used for optimistic concurrency checks.
    pub version: u64,
}

/// A fixed bill with a recurring due date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedBill {
    /// Unique identifier.
    pub id: FixedBillId,
    /// Display name (e.g. "Rent").
    pub name: String,
    /// Amount due each month.
    pub base_value: Decimal,
    /// Day of month the bill is due (1-31).
    pub due_day: u32,
    /// Category label.
    pub category: String,
    /// Recurrence rule (anchor month + recurring flag).
    pub recurrence: RecurrenceRule,
    /// Per-month overrides: paid months, exclusions, termination.
    pub overrides: RecurrenceOverrides,
    /// Bumped on every mutation.
    pub version: u64,
}

/// A credit card. Color/brand are presentation-only and not modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCard {
    /// Unique identifier.
    pub id: CreditCardId,
    /// Display name.
    pub name: String,
    /// Credit limit.
    pub limit: Decimal,
    /// Day of month the invoice is due (1-31).
    pub due_day: u32,
    /// Billing-cycle anchor: purchases on or after this day roll into the
    /// following month's invoice.
    pub best_purchase_day: u32,
    /// Bumped on every mutation.
    pub version: u64,
}

/// Forecast direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForecastKind {
    /// Income expected but not yet realized.
    ExpectedIncome,
    /// Expense expected but not yet realized.
    ExpectedExpense,
}

/// An expected income or expense that has not been realized yet.
///
/// Confirming a forecast for a month removes it from that month's
/// projected totals; it does not create a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    /// Unique identifier.
    pub id: ForecastId,
    /// Free-text description.
    pub description: String,
    /// Expected amount.
    pub value: Decimal,
    /// Expected income or expense.
    pub kind: ForecastKind,
    /// Recurrence rule (anchor month + recurring flag).
    pub recurrence: RecurrenceRule,
    /// Per-month overrides: confirmed months, exclusions, termination.
    pub overrides: RecurrenceOverrides,
    /// Bumped on every mutation.
    pub version: u64,
}

/// A monthly spending limit for one category. Spent is always derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLimit {
    /// Unique identifier.
    pub id: BudgetLimitId,
    /// Category label (case-sensitive match against transactions).
    pub category: String,
    /// Monthly spending limit.
    pub monthly_limit: Decimal,
    /// Bumped on every mutation.
    pub version: u64,
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Income or expense.
    pub kind: TransactionKind,
    /// Amount, must be non-negative.
    pub value: Decimal,
    /// Category label.
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// Purchase / receipt date.
    pub date: NaiveDate,
    /// Card attribution for credit purchases.
    pub card: Option<CardCharge>,
}

/// Input for creating a fixed bill.
#[derive(Debug, Clone)]
pub struct CreateFixedBillInput {
    /// Display name.
    pub name: String,
    /// Amount due each month.
    pub base_value: Decimal,
    /// Day of month the bill is due (1-31).
    pub due_day: u32,
    /// Category label.
    pub category: String,
    /// Whether the bill repeats every month.
    pub is_recurring: bool,
    /// The month the bill starts to apply.
    pub start_month: MonthKey,
}

/// Input for creating a credit card.
#[derive(Debug, Clone)]
pub struct CreateCreditCardInput {
    /// Display name.
    pub name: String,
    /// Credit limit.
    pub limit: Decimal,
    /// Day of month the invoice is due (1-31).
    pub due_day: u32,
    /// Billing-cycle anchor day (1-31).
    pub best_purchase_day: u32,
}

/// Input for creating a forecast.
#[derive(Debug, Clone)]
pub struct CreateForecastInput {
    /// Free-text description.
    pub description: String,
    /// Expected amount.
    pub value: Decimal,
    /// Expected income or expense.
    pub kind: ForecastKind,
    /// Whether the forecast repeats every month.
    pub is_recurring: bool,
    /// The month the forecast is anchored to.
    pub anchor_month: MonthKey,
}

/// Input for creating a budget limit.
#[derive(Debug, Clone)]
pub struct CreateBudgetLimitInput {
    /// Category label.
    pub category: String,
    /// Monthly spending limit.
    pub monthly_limit: Decimal,
}
