//! Monthly report derivation.

use std::collections::BTreeMap;

use lyvo_shared::types::{MonthKey, round_currency};
use rust_decimal::Decimal;

use super::types::{CategoryExpense, MonthlyReport};
use crate::projection::ProjectionService;
use crate::store::{LedgerStore, TransactionKind};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Report service.
pub struct ReportService;

impl ReportService {
    /// Builds the evolution report for a month.
    #[must_use]
    pub fn monthly(
        store: &LedgerStore,
        month: MonthKey,
        opening_balance: Decimal,
        precision: u32,
    ) -> MonthlyReport {
        let summary = ProjectionService::summarize(store, month, opening_balance, precision);
        let previous_month_income = Self::income_in(store, month.prev());

        let income_growth_percent = if previous_month_income > Decimal::ZERO {
            let growth = (summary.realized_income - previous_month_income)
                / previous_month_income
                * HUNDRED;
            Some(round_currency(growth, precision))
        } else {
            None
        };

        let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();
        for tx in store.transactions_in(month) {
            if tx.kind == TransactionKind::Expense {
                *by_category.entry(tx.category.clone()).or_default() += tx.value;
            }
        }
        let total_expense: Decimal = by_category.values().copied().sum();
        let mut expense_breakdown: Vec<CategoryExpense> = by_category
            .into_iter()
            .map(|(category, amount)| {
                let share_percent = if total_expense > Decimal::ZERO {
                    round_currency(amount / total_expense * HUNDRED, precision)
                } else {
                    Decimal::ZERO
                };
                CategoryExpense {
                    category,
                    amount,
                    share_percent,
                }
            })
            .collect();
        expense_breakdown.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));

        MonthlyReport {
            month,
            realized_income: summary.realized_income,
            previous_month_income,
            income_growth_percent,
            expense_breakdown,
            total_expense,
            final_balance: summary.realized_balance,
        }
    }

    fn income_in(store: &LedgerStore, month: MonthKey) -> Decimal {
        store
            .transactions_in(month)
            .filter(|tx| tx.kind == TransactionKind::Income)
            .map(|tx| tx.value)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CreateTransactionInput;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    const PRECISION: u32 = 2;

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn add_tx(
        store: &mut LedgerStore,
        kind: TransactionKind,
        value: Decimal,
        category: &str,
        y: i32,
        m: u32,
    ) {
        store
            .add_transaction(CreateTransactionInput {
                kind,
                value,
                category: category.to_string(),
                description: "Lancamento".to_string(),
                date: NaiveDate::from_ymd_opt(y, m, 10).unwrap(),
                card: None,
            })
            .unwrap();
    }

    #[test]
    fn test_income_growth_against_previous_month() {
        let mut store = LedgerStore::new();
        add_tx(&mut store, TransactionKind::Income, dec!(2000), "Salario", 2024, 2);
        add_tx(&mut store, TransactionKind::Income, dec!(2500), "Salario", 2024, 3);

        let report = ReportService::monthly(&store, month("2024-03"), dec!(0), PRECISION);
        assert_eq!(report.previous_month_income, dec!(2000));
        assert_eq!(report.income_growth_percent, Some(dec!(25)));
    }

    #[test]
    fn test_growth_is_none_without_previous_income() {
        let mut store = LedgerStore::new();
        add_tx(&mut store, TransactionKind::Income, dec!(2500), "Salario", 2024, 3);

        let report = ReportService::monthly(&store, month("2024-03"), dec!(0), PRECISION);
        assert_eq!(report.income_growth_percent, None);
    }

    #[test]
    fn test_expense_breakdown_shares_and_order() {
        let mut store = LedgerStore::new();
        add_tx(&mut store, TransactionKind::Expense, dec!(300), "Mercado", 2024, 3);
        add_tx(&mut store, TransactionKind::Expense, dec!(100), "Lazer", 2024, 3);
        add_tx(&mut store, TransactionKind::Expense, dec!(100), "Lazer", 2024, 3);

        let report = ReportService::monthly(&store, month("2024-03"), dec!(0), PRECISION);
        assert_eq!(report.total_expense, dec!(500));
        assert_eq!(report.expense_breakdown.len(), 2);
        assert_eq!(report.expense_breakdown[0].category, "Mercado");
        assert_eq!(report.expense_breakdown[0].share_percent, dec!(60));
        assert_eq!(report.expense_breakdown[1].category, "Lazer");
        assert_eq!(report.expense_breakdown[1].amount, dec!(200));
        assert_eq!(report.expense_breakdown[1].share_percent, dec!(40));
    }

    #[test]
    fn test_final_balance_is_month_local() {
        let mut store = LedgerStore::new();
        add_tx(&mut store, TransactionKind::Income, dec!(1000), "Salario", 2024, 2);
        add_tx(&mut store, TransactionKind::Expense, dec!(400), "Mercado", 2024, 3);

        let report = ReportService::monthly(&store, month("2024-03"), dec!(100), PRECISION);
        assert_eq!(report.final_balance, dec!(-300));
    }
}
