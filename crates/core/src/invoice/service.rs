//! Invoice derivation and payment application.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use lyvo_shared::types::{CreditCardId, MonthKey, round_currency};
use rust_decimal::Decimal;

use super::error::InvoiceError;
use super::types::{CardInvoice, InvoiceLine, PaymentReceipt};
use crate::store::{CreditCard, LedgerStore};

/// Invoice service.
///
/// Derivation is pure over the store. The only mutation is recording a
/// payment, which also recomputes the carried balances of every
/// following month that holds payment state, so a payment on month M is
/// a single atomic update of M and its downstream carries.
pub struct InvoiceService;

impl InvoiceService {
    /// The invoice month a purchase lands in.
    ///
    /// Purchases strictly before the card's best purchase day bill in
    /// the purchase month; purchases on or after it roll into the next
    /// month's invoice.
    #[must_use]
    pub fn billing_month(card: &CreditCard, purchase_date: NaiveDate) -> MonthKey {
        let month = MonthKey::from_date(purchase_date);
        if purchase_date.day() < card.best_purchase_day {
            month
        } else {
            month.next()
        }
    }

    /// Splits a purchase value into installment shares that sum exactly
    /// to the value.
    ///
    /// All shares but the last are the value divided by the count,
    /// rounded to the currency precision; the final share absorbs the
    /// rounding remainder.
    #[must_use]
    pub fn installment_shares(value: Decimal, count: u32, precision: u32) -> Vec<Decimal> {
        if count == 0 {
            return Vec::new();
        }
        let base = round_currency(value / Decimal::from(count), precision);
        let mut shares = vec![base; count as usize];
        if let Some(last) = shares.last_mut() {
            *last = value - base * Decimal::from(count - 1);
        }
        shares
    }

    /// Derives the invoice of a card for one month.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::CardNotFound` for an unknown card.
    pub fn invoice_for(
        store: &LedgerStore,
        card_id: CreditCardId,
        month: MonthKey,
        precision: u32,
    ) -> Result<CardInvoice, InvoiceError> {
        let card = store
            .card(card_id)
            .map_err(|_| InvoiceError::CardNotFound(card_id))?;

        let (new_charges, lines) = Self::charges_in(store, card, month, precision);
        let state = store
            .invoice_states(card_id)
            .and_then(|states| states.get(&month))
            .copied()
            .unwrap_or_default();

        Ok(CardInvoice {
            card_id,
            month,
            previous_balance: state.carried_in,
            new_charges,
            total: state.carried_in + new_charges,
            paid_value: state.paid_value,
            lines,
        })
    }

    /// Applies a payment to a card's invoice for one month.
    ///
    /// Overpayment is clamped to the outstanding amount. The residual
    /// left after the payment is written to the next month's state as
    /// its carried-in balance, and the recomputation chains through
    /// every later month that already holds payment state.
    ///
    /// # Errors
    ///
    /// Rejects non-positive amounts, unknown cards, and invoices with
    /// nothing outstanding.
    pub fn pay(
        store: &mut LedgerStore,
        card_id: CreditCardId,
        month: MonthKey,
        amount: Decimal,
        precision: u32,
    ) -> Result<PaymentReceipt, InvoiceError> {
        if amount <= Decimal::ZERO {
            return Err(InvoiceError::NonPositivePayment(amount));
        }

        let invoice = Self::invoice_for(store, card_id, month, precision)?;
        let outstanding = invoice.residual();
        if outstanding.is_zero() {
            return Err(InvoiceError::AlreadyPaid {
                card: card_id,
                month,
            });
        }
        let applied = amount.min(outstanding);

        store
            .invoice_states_mut(card_id)
            .map_err(|_| InvoiceError::CardNotFound(card_id))?
            .entry(month)
            .or_default()
            .paid_value += applied;
        Self::resync(store, card_id, precision)?;

        let residual = outstanding - applied;
        Ok(PaymentReceipt {
            applied,
            residual,
            carried_to: (residual > Decimal::ZERO).then(|| month.next()),
            fully_paid: residual.is_zero(),
        })
    }

    /// Recomputes the carried balances of a card's payment chain.
    ///
    /// Replays the chain from the earliest month holding payment state:
    /// every later month's carried-in balance becomes the residual of
    /// the month before it, and a residual left past the last month
    /// opens a fresh carried-in entry. Must run after any mutation that
    /// changes a card's charges or payments, so later months never
    /// observe a stale carry. A card without payment state is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::CardNotFound` for an unknown card.
    pub fn resync(
        store: &mut LedgerStore,
        card_id: CreditCardId,
        precision: u32,
    ) -> Result<(), InvoiceError> {
        let Some((first, last)) = store
            .invoice_states(card_id)
            .and_then(|states| Some((*states.keys().next()?, *states.keys().next_back()?)))
        else {
            return Ok(());
        };
        let charges = Self::charges_by_month(store, card_id, first, precision)?;
        let states = store
            .invoice_states_mut(card_id)
            .map_err(|_| InvoiceError::CardNotFound(card_id))?;

        let mut carried = Decimal::ZERO;
        let mut current = first;
        while current <= last {
            // A month with neither payment state nor an inbound carry
            // does not start a chain on its own.
            if carried > Decimal::ZERO || states.contains_key(&current) {
                let state = states.entry(current).or_default();
                state.carried_in = carried;
                let charged = charges.get(&current).copied().unwrap_or_default();
                carried = (carried + charged - state.paid_value).max(Decimal::ZERO);
            }
            current = current.next();
        }
        if carried > Decimal::ZERO {
            states.entry(current).or_default().carried_in = carried;
        }
        Ok(())
    }

    /// Total still owed on a card across every invoice month.
    ///
    /// Equal to everything ever charged minus everything ever paid, so
    /// carried balances are never double-counted.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::CardNotFound` for an unknown card.
    pub fn outstanding(
        store: &LedgerStore,
        card_id: CreditCardId,
        precision: u32,
    ) -> Result<Decimal, InvoiceError> {
        let card = store
            .card(card_id)
            .map_err(|_| InvoiceError::CardNotFound(card_id))?;

        let charged: Decimal = store
            .transactions_for_card(card.id)
            .filter_map(|tx| {
                let charge = tx.card?;
                Some(
                    Self::installment_shares(tx.value, charge.installments, precision)
                        .iter()
                        .sum::<Decimal>(),
                )
            })
            .sum();
        let paid: Decimal = store
            .invoice_states(card_id)
            .map_or(Decimal::ZERO, |states| {
                states.values().map(|s| s.paid_value).sum()
            });
        Ok((charged - paid).max(Decimal::ZERO))
    }

    /// New charges per invoice month over the carry chain's reach:
    /// from `from` through one past the last month holding state or
    /// installments.
    fn charges_by_month(
        store: &LedgerStore,
        card_id: CreditCardId,
        from: MonthKey,
        precision: u32,
    ) -> Result<BTreeMap<MonthKey, Decimal>, InvoiceError> {
        let card = store
            .card(card_id)
            .map_err(|_| InvoiceError::CardNotFound(card_id))?;

        let last_state = store
            .invoice_states(card_id)
            .and_then(|states| states.keys().next_back().copied());
        let last_billing = store
            .transactions_for_card(card_id)
            .filter_map(|tx| {
                let charge = tx.card?;
                Some(Self::billing_month(card, tx.date).add_months(charge.installments - 1))
            })
            .max();
        let mut last = from;
        for candidate in [last_state, last_billing].into_iter().flatten() {
            last = last.max(candidate);
        }
        last = last.next();

        let mut charges = BTreeMap::new();
        let mut current = from;
        while current <= last {
            let (total, _) = Self::charges_in(store, card, current, precision);
            charges.insert(current, total);
            current = current.next();
        }
        Ok(charges)
    }

    /// The installments of the card's purchases landing in `month`.
    fn charges_in(
        store: &LedgerStore,
        card: &CreditCard,
        month: MonthKey,
        precision: u32,
    ) -> (Decimal, Vec<InvoiceLine>) {
        let mut lines = Vec::new();
        for tx in store.transactions_for_card(card.id) {
            let Some(charge) = tx.card else { continue };
            let first = Self::billing_month(card, tx.date);
            let offset = month.months_since(first);
            if offset < 0 || offset.unsigned_abs() >= charge.installments {
                continue;
            }
            let index = offset.unsigned_abs();
            let shares = Self::installment_shares(tx.value, charge.installments, precision);
            let Some(amount) = shares.get(index as usize).copied() else {
                continue;
            };
            lines.push(InvoiceLine {
                transaction_id: tx.id,
                description: tx.description.clone(),
                purchase_date: tx.date,
                installment: index + 1,
                total_installments: charge.installments,
                amount,
            });
        }
        lines.sort_by(|a, b| {
            (a.purchase_date, a.installment, &a.description)
                .cmp(&(b.purchase_date, b.installment, &b.description))
        });
        let total = lines.iter().map(|l| l.amount).sum();
        (total, lines)
    }
}
