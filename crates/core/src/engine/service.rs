//! The ledger engine: mutations and the composed month view.

use chrono::NaiveDate;
use lyvo_shared::types::{
    BudgetLimitId, CreditCardId, FixedBillId, ForecastId, MonthKey, TransactionId,
};
use lyvo_shared::{AppResult, EngineConfig};
use rust_decimal::Decimal;
use tracing::debug;

use super::types::{CardInvoiceView, DeleteMode, MonthView};
use crate::budget::BudgetService;
use crate::invoice::{InvoiceService, PaymentReceipt};
use crate::projection::ProjectionService;
use crate::recurrence::{OccurrenceStatus, RecurrenceService};
use crate::store::{
    CreateBudgetLimitInput, CreateCreditCardInput, CreateFixedBillInput, CreateForecastInput,
    CreateTransactionInput, CreditCard, LedgerStore, Transaction,
};

/// The engine facade owning one user's ledger.
///
/// Mutations go through the store and the domain services, so every one
/// of them is atomic: an error means nothing changed. Views are
/// recomputed from scratch on every call.
#[derive(Debug, Clone)]
pub struct LedgerEngine {
    store: LedgerStore,
    config: EngineConfig,
}

impl LedgerEngine {
    /// Creates an engine over an empty store.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_store(LedgerStore::new(), config)
    }

    /// Creates an engine over an existing store, e.g. one loaded from a
    /// repository.
    #[must_use]
    pub fn with_store(store: LedgerStore, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Read access to the underlying store.
    #[must_use]
    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Consumes the engine, yielding the store for persistence.
    #[must_use]
    pub fn into_store(self) -> LedgerStore {
        self.store
    }

    fn precision(&self) -> u32 {
        self.config.currency_precision
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// Composes everything shown for one month.
    #[must_use]
    pub fn month_view(&self, month: MonthKey) -> MonthView {
        let precision = self.precision();
        let mut invoices: Vec<CardInvoiceView> = self
            .store
            .cards()
            .filter_map(|card| {
                let invoice =
                    InvoiceService::invoice_for(&self.store, card.id, month, precision).ok()?;
                let outstanding =
                    InvoiceService::outstanding(&self.store, card.id, precision).ok()?;
                Some(CardInvoiceView {
                    invoice,
                    card_name: card.name.clone(),
                    card_limit: card.limit,
                    due_day: card.due_day,
                    available_credit: card.limit - outstanding,
                    utilization_percent: BudgetService::percent_used(
                        outstanding,
                        card.limit,
                        precision,
                    ),
                })
            })
            .collect();
        invoices.sort_by(|a, b| a.card_name.cmp(&b.card_name));

        MonthView {
            month,
            summary: ProjectionService::summarize(
                &self.store,
                month,
                self.config.opening_balance,
                precision,
            ),
            bills: ProjectionService::bills_for(&self.store, month),
            forecasts: ProjectionService::forecasts_for(&self.store, month),
            invoices,
            budgets: BudgetService::usage_for(&self.store, month, precision),
        }
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// Records a realized transaction.
    ///
    /// # Errors
    ///
    /// Propagates store validation failures.
    pub fn add_transaction(&mut self, input: CreateTransactionInput) -> AppResult<TransactionId> {
        let id = self.store.add_transaction(input)?;
        debug!(%id, "transaction added");
        Ok(id)
    }

    /// Edits a transaction's date and value.
    ///
    /// A card-attributed edit changes the card's charges, so the card's
    /// carried balances are recomputed afterwards.
    ///
    /// # Errors
    ///
    /// Fails on unknown id, invalid value, or stale version.
    pub fn edit_transaction(
        &mut self,
        id: TransactionId,
        date: NaiveDate,
        value: Decimal,
        expected_version: Option<u64>,
    ) -> AppResult<()> {
        let precision = self.precision();
        let card = self.store.transaction(id)?.card;
        self.store
            .edit_transaction(id, date, value, expected_version)?;
        if let Some(charge) = card {
            InvoiceService::resync(&mut self.store, charge.card_id, precision)?;
        }
        debug!(%id, "transaction edited");
        Ok(())
    }

    /// Removes a transaction.
    ///
    /// Removing a card-attributed transaction also recomputes the
    /// card's carried balances.
    ///
    /// # Errors
    ///
    /// Fails on unknown id.
    pub fn remove_transaction(&mut self, id: TransactionId) -> AppResult<Transaction> {
        let precision = self.precision();
        let tx = self.store.remove_transaction(id)?;
        if let Some(charge) = tx.card {
            InvoiceService::resync(&mut self.store, charge.card_id, precision)?;
        }
        debug!(%id, "transaction removed");
        Ok(tx)
    }

    // ------------------------------------------------------------------
    // Fixed bills
    // ------------------------------------------------------------------

    /// Creates a fixed bill.
    ///
    /// # Errors
    ///
    /// Propagates store validation failures.
    pub fn add_fixed_bill(&mut self, input: CreateFixedBillInput) -> AppResult<FixedBillId> {
        let id = self.store.add_fixed_bill(input)?;
        debug!(%id, "fixed bill added");
        Ok(id)
    }

    /// Toggles the paid marker of a bill for one month, returning the
    /// new status.
    ///
    /// # Errors
    ///
    /// Fails when the bill is unknown or has no occurrence that month.
    pub fn toggle_bill_paid(
        &mut self,
        id: FixedBillId,
        month: MonthKey,
    ) -> AppResult<OccurrenceStatus> {
        let bill = self.store.bill_mut(id)?;
        let rule = bill.recurrence;
        let status = RecurrenceService::toggle_settled(&rule, &mut bill.overrides, month)?;
        bill.version += 1;
        debug!(%id, %month, ?status, "bill paid marker toggled");
        Ok(status)
    }

    /// Deletes a bill occurrence (ONLY_THIS) or the bill's future
    /// (ALL_FUTURE), preserving settled history before the cut.
    ///
    /// # Errors
    ///
    /// Fails when the bill is unknown, the month has no occurrence, or
    /// the deletion conflicts with an existing one.
    pub fn delete_fixed_bill(
        &mut self,
        id: FixedBillId,
        month: MonthKey,
        mode: DeleteMode,
    ) -> AppResult<()> {
        let bill = self.store.bill_mut(id)?;
        let rule = bill.recurrence;
        match mode {
            DeleteMode::OnlyThis => RecurrenceService::skip(&rule, &mut bill.overrides, month)?,
            DeleteMode::AllFuture => {
                RecurrenceService::terminate(&rule, &mut bill.overrides, month)?;
            }
        }
        bill.version += 1;
        debug!(%id, %month, ?mode, "fixed bill deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Forecasts
    // ------------------------------------------------------------------

    /// Creates a forecast.
    ///
    /// # Errors
    ///
    /// Propagates store validation failures.
    pub fn add_forecast(&mut self, input: CreateForecastInput) -> AppResult<ForecastId> {
        let id = self.store.add_forecast(input)?;
        debug!(%id, "forecast added");
        Ok(id)
    }

    /// Edits a forecast's description, value, and recurring flag.
    ///
    /// # Errors
    ///
    /// Fails on unknown id, invalid value, or stale version.
    pub fn edit_forecast(
        &mut self,
        id: ForecastId,
        description: String,
        value: Decimal,
        is_recurring: bool,
        expected_version: Option<u64>,
    ) -> AppResult<()> {
        self.store
            .edit_forecast(id, description, value, is_recurring, expected_version)?;
        debug!(%id, "forecast edited");
        Ok(())
    }

    /// Confirms a forecast for one month. Confirming an already
    /// confirmed occurrence is a no-op.
    ///
    /// # Errors
    ///
    /// Fails when the forecast is unknown or has no occurrence that
    /// month.
    pub fn confirm_forecast(&mut self, id: ForecastId, month: MonthKey) -> AppResult<()> {
        let forecast = self.store.forecast_mut(id)?;
        let rule = forecast.recurrence;
        RecurrenceService::settle(&rule, &mut forecast.overrides, month)?;
        forecast.version += 1;
        debug!(%id, %month, "forecast confirmed");
        Ok(())
    }

    /// Deletes a forecast occurrence (ONLY_THIS) or the forecast's
    /// future (ALL_FUTURE).
    ///
    /// # Errors
    ///
    /// Fails when the forecast is unknown, the month has no occurrence,
    /// or the deletion conflicts with an existing one.
    pub fn delete_forecast(
        &mut self,
        id: ForecastId,
        month: MonthKey,
        mode: DeleteMode,
    ) -> AppResult<()> {
        let forecast = self.store.forecast_mut(id)?;
        let rule = forecast.recurrence;
        match mode {
            DeleteMode::OnlyThis => {
                RecurrenceService::skip(&rule, &mut forecast.overrides, month)?;
            }
            DeleteMode::AllFuture => {
                RecurrenceService::terminate(&rule, &mut forecast.overrides, month)?;
            }
        }
        forecast.version += 1;
        debug!(%id, %month, ?mode, "forecast deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Credit cards and invoices
    // ------------------------------------------------------------------

    /// Registers a credit card.
    ///
    /// # Errors
    ///
    /// Propagates store validation failures.
    pub fn add_credit_card(&mut self, input: CreateCreditCardInput) -> AppResult<CreditCardId> {
        let id = self.store.add_credit_card(input)?;
        debug!(%id, "credit card added");
        Ok(id)
    }

    /// Removes a credit card together with its invoice payment state.
    /// The card's transactions remain as realized expense history.
    ///
    /// # Errors
    ///
    /// Fails on unknown id.
    pub fn remove_credit_card(&mut self, id: CreditCardId) -> AppResult<CreditCard> {
        let card = self.store.remove_credit_card(id)?;
        debug!(%id, "credit card removed");
        Ok(card)
    }

    /// Pays (part of) a card's invoice for one month.
    ///
    /// # Errors
    ///
    /// Rejects non-positive amounts, unknown cards, and invoices that
    /// are already settled.
    pub fn pay_invoice(
        &mut self,
        card: CreditCardId,
        month: MonthKey,
        amount: Decimal,
    ) -> AppResult<PaymentReceipt> {
        let precision = self.precision();
        let receipt = InvoiceService::pay(&mut self.store, card, month, amount, precision)?;
        debug!(
            %card, %month,
            applied = %receipt.applied,
            residual = %receipt.residual,
            "invoice payment applied"
        );
        Ok(receipt)
    }

    // ------------------------------------------------------------------
    // Budget limits
    // ------------------------------------------------------------------

    /// Creates a budget limit, or updates the existing limit of the
    /// same category.
    ///
    /// # Errors
    ///
    /// Propagates store validation failures.
    pub fn upsert_budget_limit(&mut self, input: CreateBudgetLimitInput) -> AppResult<BudgetLimitId> {
        let existing = self
            .store
            .budget_limits()
            .find(|l| l.category == input.category)
            .map(|l| l.id);
        let id = if let Some(id) = existing {
            self.store
                .edit_budget_limit(id, input.category, input.monthly_limit, None)?;
            id
        } else {
            self.store.add_budget_limit(input)?
        };
        debug!(%id, "budget limit upserted");
        Ok(id)
    }

    /// Removes a budget limit.
    ///
    /// # Errors
    ///
    /// Fails on unknown id.
    pub fn remove_budget_limit(&mut self, id: BudgetLimitId) -> AppResult<()> {
        self.store.remove_budget_limit(id)?;
        debug!(%id, "budget limit removed");
        Ok(())
    }
}
