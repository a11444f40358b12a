//! Engine view types.

use lyvo_shared::types::MonthKey;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget::BudgetUsage;
use crate::invoice::CardInvoice;
use crate::projection::{BillOccurrence, ForecastOccurrence, MonthlySummary};

/// How a recurring definition is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeleteMode {
    /// Remove only the target month's occurrence.
    OnlyThis,
    /// Remove the target month and everything after it, preserving
    /// settled history before it.
    AllFuture,
}

/// A card's invoice for the viewed month, together with the card-level
/// credit figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInvoiceView {
    /// The derived invoice.
    pub invoice: CardInvoice,
    /// Card name.
    pub card_name: String,
    /// Card credit limit.
    pub card_limit: Decimal,
    /// Day of month the invoice is due.
    pub due_day: u32,
    /// `limit - total outstanding` across all months; may go negative
    /// when the card is overcharged.
    pub available_credit: Decimal,
    /// Share of the limit in use, clamped to 0..=100.
    pub utilization_percent: Decimal,
}

/// Everything the product shows for one month, recomputed from scratch
/// on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthView {
    /// The viewed month.
    pub month: MonthKey,
    /// Realized and projected totals.
    pub summary: MonthlySummary,
    /// Fixed bills due this month.
    pub bills: Vec<BillOccurrence>,
    /// Forecasts applying to this month.
    pub forecasts: Vec<ForecastOccurrence>,
    /// One invoice view per card.
    pub invoices: Vec<CardInvoiceView>,
    /// Budget usage per category limit.
    pub budgets: Vec<BudgetUsage>,
}
