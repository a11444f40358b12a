//! Property-based tests for monthly summaries.

use chrono::NaiveDate;
use lyvo_shared::types::MonthKey;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::ProjectionService;
use crate::store::{
    CreateForecastInput, CreateTransactionInput, ForecastKind, LedgerStore, TransactionKind,
};

const PRECISION: u32 = 2;

#[derive(Debug, Clone)]
struct TxCase {
    income: bool,
    cents: i64,
    day: u32,
}

fn tx_strategy() -> impl Strategy<Value = TxCase> {
    (any::<bool>(), 0i64..=1_000_000, 1u32..=28).prop_map(|(income, cents, day)| TxCase {
        income,
        cents,
        day,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The projected balance always equals the realized balance plus
    /// expected income minus expected expense, and the realized balance
    /// matches a direct sum over the transactions.
    #[test]
    fn prop_summary_is_consistent(
        txs in proptest::collection::vec(tx_strategy(), 0..20),
        opening_cents in -1_000_000i64..=1_000_000,
        income_forecast_cents in 0i64..=500_000,
        expense_forecast_cents in 0i64..=500_000,
    ) {
        let mut store = LedgerStore::new();
        let month: MonthKey = "2024-03".parse().unwrap();
        let mut expected_balance = Decimal::new(opening_cents, 2);

        for case in &txs {
            let value = Decimal::new(case.cents, 2);
            store
                .add_transaction(CreateTransactionInput {
                    kind: if case.income {
                        TransactionKind::Income
                    } else {
                        TransactionKind::Expense
                    },
                    value,
                    category: "Geral".to_string(),
                    description: "Lancamento".to_string(),
                    date: NaiveDate::from_ymd_opt(2024, 3, case.day).unwrap(),
                    card: None,
                })
                .unwrap();
            if case.income {
                expected_balance += value;
            } else {
                expected_balance -= value;
            }
        }

        if income_forecast_cents > 0 {
            store
                .add_forecast(CreateForecastInput {
                    description: "Entrada".to_string(),
                    value: Decimal::new(income_forecast_cents, 2),
                    kind: ForecastKind::ExpectedIncome,
                    is_recurring: false,
                    anchor_month: month,
                })
                .unwrap();
        }
        if expense_forecast_cents > 0 {
            store
                .add_forecast(CreateForecastInput {
                    description: "Saida".to_string(),
                    value: Decimal::new(expense_forecast_cents, 2),
                    kind: ForecastKind::ExpectedExpense,
                    is_recurring: false,
                    anchor_month: month,
                })
                .unwrap();
        }

        let summary = ProjectionService::summarize(
            &store,
            month,
            Decimal::new(opening_cents, 2),
            PRECISION,
        );
        prop_assert_eq!(summary.realized_balance, expected_balance);
        prop_assert_eq!(
            summary.projected_balance,
            summary.realized_balance + summary.expected_income - summary.expected_expense
        );
        prop_assert!(summary.expected_income >= Decimal::ZERO);
        prop_assert!(summary.expected_expense >= Decimal::ZERO);
    }
}
