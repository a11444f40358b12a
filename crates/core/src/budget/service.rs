//! Budget usage derivation.

use lyvo_shared::types::{MonthKey, round_currency};
use rust_decimal::Decimal;

use super::types::BudgetUsage;
use crate::store::{LedgerStore, TransactionKind};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Budget service.
pub struct BudgetService;

impl BudgetService {
    /// Usage of every budget limit for a month, sorted by category.
    ///
    /// Categories match transactions case-sensitively. Card purchases
    /// count in their purchase month, like any other expense.
    #[must_use]
    pub fn usage_for(store: &LedgerStore, month: MonthKey, precision: u32) -> Vec<BudgetUsage> {
        let mut usages: Vec<BudgetUsage> = store
            .budget_limits()
            .map(|limit| {
                let spent: Decimal = store
                    .transactions_in(month)
                    .filter(|tx| {
                        tx.kind == TransactionKind::Expense && tx.category == limit.category
                    })
                    .map(|tx| tx.value)
                    .sum();
                BudgetUsage {
                    limit_id: limit.id,
                    category: limit.category.clone(),
                    monthly_limit: limit.monthly_limit,
                    spent,
                    percent_used: Self::percent_used(spent, limit.monthly_limit, precision),
                }
            })
            .collect();
        usages.sort_by(|a, b| a.category.cmp(&b.category));
        usages
    }

    /// Percentage of the limit consumed, clamped to 0..=100.
    ///
    /// A zero limit reports zero usage rather than dividing by zero.
    #[must_use]
    pub fn percent_used(spent: Decimal, limit: Decimal, precision: u32) -> Decimal {
        if limit <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let raw = spent / limit * HUNDRED;
        round_currency(raw.clamp(Decimal::ZERO, HUNDRED), precision)
    }
}
