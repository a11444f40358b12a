//! The entity store: canonical records and atomic mutations.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use lyvo_shared::types::{
    BudgetLimitId, CreditCardId, FixedBillId, ForecastId, MonthKey, TransactionId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::StoreError;
use super::types::{
    BudgetLimit, CreateBudgetLimitInput, CreateCreditCardInput, CreateFixedBillInput,
    CreateForecastInput, CreateTransactionInput, CreditCard, FixedBill, Forecast, Transaction,
};
use crate::invoice::InvoicePayments;
use crate::recurrence::{RecurrenceOverrides, RecurrenceRule};

/// The full entity set of one user.
///
/// All mutations validate first and only then touch state, so a returned
/// error always means the store is unchanged. `&mut self` serializes
/// writers in-process; the `version` counters on each entity let the
/// persistence boundary run optimistic checks across processes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerStore {
    transactions: HashMap<TransactionId, Transaction>,
    bills: HashMap<FixedBillId, FixedBill>,
    cards: HashMap<CreditCardId, CreditCard>,
    forecasts: HashMap<ForecastId, Forecast>,
    limits: HashMap<BudgetLimitId, BudgetLimit>,
    /// Per-card invoice payment state, keyed by invoice month.
    invoice_states: HashMap<CreditCardId, BTreeMap<MonthKey, InvoicePayments>>,
}

impl LedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// Adds a transaction.
    ///
    /// # Errors
    ///
    /// Rejects negative values, empty categories, zero installments, and
    /// card charges against unknown cards.
    pub fn add_transaction(
        &mut self,
        input: CreateTransactionInput,
    ) -> Result<TransactionId, StoreError> {
        check_amount(input.value)?;
        check_non_empty("category", &input.category)?;
        if let Some(charge) = input.card {
            if charge.installments < 1 {
                return Err(StoreError::InvalidInstallments(charge.installments));
            }
            if !self.cards.contains_key(&charge.card_id) {
                return Err(StoreError::CardNotFound(charge.card_id));
            }
        }

        let id = TransactionId::new();
        self.transactions.insert(
            id,
            Transaction {
                id,
                kind: input.kind,
                value: input.value,
                category: input.category,
                description: input.description,
                date: input.date,
                card: input.card,
                version: 1,
            },
        );
        Ok(id)
    }

    /// Looks up a transaction.
    pub fn transaction(&self, id: TransactionId) -> Result<&Transaction, StoreError> {
        self.transactions
            .get(&id)
            .ok_or(StoreError::TransactionNotFound(id))
    }

    /// Edits a transaction's date and value, the only fields that may
    /// change after creation.
    ///
    /// # Errors
    ///
    /// Fails on unknown id, negative value, or a stale `expected_version`.
    pub fn edit_transaction(
        &mut self,
        id: TransactionId,
        date: NaiveDate,
        value: Decimal,
        expected_version: Option<u64>,
    ) -> Result<(), StoreError> {
        check_amount(value)?;
        let tx = self
            .transactions
            .get_mut(&id)
            .ok_or(StoreError::TransactionNotFound(id))?;
        check_version(tx.version, expected_version)?;
        tx.date = date;
        tx.value = value;
        tx.version += 1;
        Ok(())
    }

    /// Removes a transaction, returning it.
    pub fn remove_transaction(&mut self, id: TransactionId) -> Result<Transaction, StoreError> {
        self.transactions
            .remove(&id)
            .ok_or(StoreError::TransactionNotFound(id))
    }

    /// All transactions, in no particular order.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.values()
    }

    /// Transactions dated within the given month.
    pub fn transactions_in(&self, month: MonthKey) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .values()
            .filter(move |t| MonthKey::from_date(t.date) == month)
    }

    /// Transactions charged to the given card.
    pub fn transactions_for_card(&self, card: CreditCardId) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .values()
            .filter(move |t| t.card.is_some_and(|c| c.card_id == card))
    }

    // ------------------------------------------------------------------
    // Fixed bills
    // ------------------------------------------------------------------

    /// Adds a fixed bill.
    pub fn add_fixed_bill(
        &mut self,
        input: CreateFixedBillInput,
    ) -> Result<FixedBillId, StoreError> {
        check_amount(input.base_value)?;
        check_non_empty("name", &input.name)?;
        check_non_empty("category", &input.category)?;
        check_day("due_day", input.due_day)?;

        let id = FixedBillId::new();
        let recurrence = if input.is_recurring {
            RecurrenceRule::monthly(input.start_month)
        } else {
            RecurrenceRule::once(input.start_month)
        };
        self.bills.insert(
            id,
            FixedBill {
                id,
                name: input.name,
                base_value: input.base_value,
                due_day: input.due_day,
                category: input.category,
                recurrence,
                overrides: RecurrenceOverrides::default(),
                version: 1,
            },
        );
        Ok(id)
    }

    /// Looks up a fixed bill.
    pub fn bill(&self, id: FixedBillId) -> Result<&FixedBill, StoreError> {
        self.bills.get(&id).ok_or(StoreError::BillNotFound(id))
    }

    pub(crate) fn bill_mut(&mut self, id: FixedBillId) -> Result<&mut FixedBill, StoreError> {
        self.bills.get_mut(&id).ok_or(StoreError::BillNotFound(id))
    }

    /// All fixed bills.
    pub fn bills(&self) -> impl Iterator<Item = &FixedBill> {
        self.bills.values()
    }

    // ------------------------------------------------------------------
    // Credit cards
    // ------------------------------------------------------------------

    /// Adds a credit card.
    pub fn add_credit_card(
        &mut self,
        input: CreateCreditCardInput,
    ) -> Result<CreditCardId, StoreError> {
        check_amount(input.limit)?;
        check_non_empty("name", &input.name)?;
        check_day("due_day", input.due_day)?;
        check_day("best_purchase_day", input.best_purchase_day)?;

        let id = CreditCardId::new();
        self.cards.insert(
            id,
            CreditCard {
                id,
                name: input.name,
                limit: input.limit,
                due_day: input.due_day,
                best_purchase_day: input.best_purchase_day,
                version: 1,
            },
        );
        Ok(id)
    }

    /// Looks up a credit card.
    pub fn card(&self, id: CreditCardId) -> Result<&CreditCard, StoreError> {
        self.cards.get(&id).ok_or(StoreError::CardNotFound(id))
    }

    /// All credit cards.
    pub fn cards(&self) -> impl Iterator<Item = &CreditCard> {
        self.cards.values()
    }

    /// Removes a card and its invoice payment state. The card's
    /// transactions remain as realized history.
    pub fn remove_credit_card(&mut self, id: CreditCardId) -> Result<CreditCard, StoreError> {
        let card = self
            .cards
            .remove(&id)
            .ok_or(StoreError::CardNotFound(id))?;
        self.invoice_states.remove(&id);
        Ok(card)
    }

    /// Invoice payment state for a card, keyed by invoice month.
    #[must_use]
    pub fn invoice_states(&self, card: CreditCardId) -> Option<&BTreeMap<MonthKey, InvoicePayments>> {
        self.invoice_states.get(&card)
    }

    pub(crate) fn invoice_states_mut(
        &mut self,
        card: CreditCardId,
    ) -> Result<&mut BTreeMap<MonthKey, InvoicePayments>, StoreError> {
        if !self.cards.contains_key(&card) {
            return Err(StoreError::CardNotFound(card));
        }
        Ok(self.invoice_states.entry(card).or_default())
    }

    // ------------------------------------------------------------------
    // Forecasts
    // ------------------------------------------------------------------

    /// Adds a forecast.
    pub fn add_forecast(&mut self, input: CreateForecastInput) -> Result<ForecastId, StoreError> {
        check_amount(input.value)?;
        check_non_empty("description", &input.description)?;

        let id = ForecastId::new();
        let recurrence = if input.is_recurring {
            RecurrenceRule::monthly(input.anchor_month)
        } else {
            RecurrenceRule::once(input.anchor_month)
        };
        self.forecasts.insert(
            id,
            Forecast {
                id,
                description: input.description,
                value: input.value,
                kind: input.kind,
                recurrence,
                overrides: RecurrenceOverrides::default(),
                version: 1,
            },
        );
        Ok(id)
    }

    /// Looks up a forecast.
    pub fn forecast(&self, id: ForecastId) -> Result<&Forecast, StoreError> {
        self.forecasts
            .get(&id)
            .ok_or(StoreError::ForecastNotFound(id))
    }

    pub(crate) fn forecast_mut(&mut self, id: ForecastId) -> Result<&mut Forecast, StoreError> {
        self.forecasts
            .get_mut(&id)
            .ok_or(StoreError::ForecastNotFound(id))
    }

    /// All forecasts.
    pub fn forecasts(&self) -> impl Iterator<Item = &Forecast> {
        self.forecasts.values()
    }

    /// Edits a forecast's description, value, and recurring flag.
    pub fn edit_forecast(
        &mut self,
        id: ForecastId,
        description: String,
        value: Decimal,
        is_recurring: bool,
        expected_version: Option<u64>,
    ) -> Result<(), StoreError> {
        check_amount(value)?;
        check_non_empty("description", &description)?;
        let forecast = self
            .forecasts
            .get_mut(&id)
            .ok_or(StoreError::ForecastNotFound(id))?;
        check_version(forecast.version, expected_version)?;
        forecast.description = description;
        forecast.value = value;
        forecast.recurrence.is_recurring = is_recurring;
        forecast.version += 1;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Budget limits
    // ------------------------------------------------------------------

    /// Adds a budget limit for a category.
    ///
    /// # Errors
    ///
    /// Rejects a duplicate category (at most one limit per category).
    pub fn add_budget_limit(
        &mut self,
        input: CreateBudgetLimitInput,
    ) -> Result<BudgetLimitId, StoreError> {
        check_amount(input.monthly_limit)?;
        check_non_empty("category", &input.category)?;
        if self.limits.values().any(|l| l.category == input.category) {
            return Err(StoreError::DuplicateCategory(input.category));
        }

        let id = BudgetLimitId::new();
        self.limits.insert(
            id,
            BudgetLimit {
                id,
                category: input.category,
                monthly_limit: input.monthly_limit,
                version: 1,
            },
        );
        Ok(id)
    }

    /// Edits a budget limit's category and monthly limit.
    pub fn edit_budget_limit(
        &mut self,
        id: BudgetLimitId,
        category: String,
        monthly_limit: Decimal,
        expected_version: Option<u64>,
    ) -> Result<(), StoreError> {
        check_amount(monthly_limit)?;
        check_non_empty("category", &category)?;
        if self
            .limits
            .values()
            .any(|l| l.id != id && l.category == category)
        {
            return Err(StoreError::DuplicateCategory(category));
        }
        let limit = self
            .limits
            .get_mut(&id)
            .ok_or(StoreError::BudgetLimitNotFound(id))?;
        check_version(limit.version, expected_version)?;
        limit.category = category;
        limit.monthly_limit = monthly_limit;
        limit.version += 1;
        Ok(())
    }

    /// Removes a budget limit.
    pub fn remove_budget_limit(&mut self, id: BudgetLimitId) -> Result<BudgetLimit, StoreError> {
        self.limits
            .remove(&id)
            .ok_or(StoreError::BudgetLimitNotFound(id))
    }

    /// All budget limits.
    pub fn budget_limits(&self) -> impl Iterator<Item = &BudgetLimit> {
        self.limits.values()
    }
}

fn check_amount(value: Decimal) -> Result<(), StoreError> {
    if value < Decimal::ZERO {
        return Err(StoreError::NegativeAmount(value));
    }
    Ok(())
}

fn check_day(field: &'static str, value: u32) -> Result<(), StoreError> {
    if !(1..=31).contains(&value) {
        return Err(StoreError::DayOutOfRange { field, value });
    }
    Ok(())
}

fn check_non_empty(field: &'static str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::EmptyField(field));
    }
    Ok(())
}

fn check_version(found: u64, expected: Option<u64>) -> Result<(), StoreError> {
    match expected {
        Some(expected) if expected != found => Err(StoreError::VersionMismatch { expected, found }),
        _ => Ok(()),
    }
}
