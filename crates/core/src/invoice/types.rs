//! Invoice domain types.

use chrono::NaiveDate;
use lyvo_shared::types::{CreditCardId, MonthKey, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The stored payment state for one card-month.
///
/// Charges are always derived from transactions; only the paid total
/// and the balance carried in from the previous month are persisted.
/// `carried_in` is maintained by the payment propagation so projections
/// never observe a stale carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicePayments {
    /// Total amount paid against this month's invoice so far.
    pub paid_value: Decimal,
    /// Residual carried in from the previous month's invoice.
    pub carried_in: Decimal,
}

/// One installment of one purchase, as it lands on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// The originating transaction.
    pub transaction_id: TransactionId,
    /// Purchase description.
    pub description: String,
    /// Date the purchase was made.
    pub purchase_date: NaiveDate,
    /// 1-based installment index.
    pub installment: u32,
    /// Total number of installments of the purchase.
    pub total_installments: u32,
    /// This installment's share of the purchase value.
    pub amount: Decimal,
}

/// A derived card invoice for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInvoice {
    /// The card this invoice belongs to.
    pub card_id: CreditCardId,
    /// The invoice month.
    pub month: MonthKey,
    /// Residual carried in from the previous month's invoice.
    pub previous_balance: Decimal,
    /// Sum of installments landing in this month.
    pub new_charges: Decimal,
    /// `previous_balance + new_charges`.
    pub total: Decimal,
    /// Amount paid against this invoice so far.
    pub paid_value: Decimal,
    /// The installments making up `new_charges`.
    pub lines: Vec<InvoiceLine>,
}

impl CardInvoice {
    /// The amount still owed on this invoice.
    #[must_use]
    pub fn residual(&self) -> Decimal {
        (self.total - self.paid_value).max(Decimal::ZERO)
    }

    /// True when nothing is left owing.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.paid_value >= self.total
    }
}

/// The outcome of an invoice payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Amount actually applied (overpayment is clamped to the residual).
    pub applied: Decimal,
    /// Amount still owed on the invoice after the payment.
    pub residual: Decimal,
    /// The month the residual rolls into, when one remains.
    pub carried_to: Option<MonthKey>,
    /// True when the payment settled the invoice in full.
    pub fully_paid: bool,
}
