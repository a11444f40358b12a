//! Monthly summary derivation.

use lyvo_shared::types::MonthKey;
use rust_decimal::Decimal;

use super::types::{BillOccurrence, ForecastOccurrence, MonthlySummary};
use crate::invoice::InvoiceService;
use crate::recurrence::RecurrenceService;
use crate::store::{ForecastKind, LedgerStore, TransactionKind};

/// Projection service.
pub struct ProjectionService;

impl ProjectionService {
    /// The fixed bills due in a month, sorted by due day then name.
    #[must_use]
    pub fn bills_for(store: &LedgerStore, month: MonthKey) -> Vec<BillOccurrence> {
        let mut occurrences: Vec<BillOccurrence> = store
            .bills()
            .filter_map(|bill| {
                let occ = RecurrenceService::resolve(&bill.recurrence, &bill.overrides, month)?;
                Some(BillOccurrence {
                    bill_id: bill.id,
                    name: bill.name.clone(),
                    value: bill.base_value,
                    due_day: bill.due_day,
                    category: bill.category.clone(),
                    is_paid: occ.status.is_settled(),
                })
            })
            .collect();
        occurrences.sort_by(|a, b| (a.due_day, &a.name).cmp(&(b.due_day, &b.name)));
        occurrences
    }

    /// The forecasts applying to a month, sorted by description.
    #[must_use]
    pub fn forecasts_for(store: &LedgerStore, month: MonthKey) -> Vec<ForecastOccurrence> {
        let mut occurrences: Vec<ForecastOccurrence> = store
            .forecasts()
            .filter_map(|forecast| {
                let occ =
                    RecurrenceService::resolve(&forecast.recurrence, &forecast.overrides, month)?;
                Some(ForecastOccurrence {
                    forecast_id: forecast.id,
                    description: forecast.description.clone(),
                    value: forecast.value,
                    kind: forecast.kind,
                    is_confirmed: occ.status.is_settled(),
                })
            })
            .collect();
        occurrences.sort_by(|a, b| a.description.cmp(&b.description));
        occurrences
    }

    /// Summarizes one month: realized totals, expected totals, and the
    /// projected balance.
    ///
    /// Every figure covers only the viewed month; cross-month carry is
    /// modeled solely through the opening balance and the invoice
    /// carried balances. Card purchases count in the month of their
    /// purchase date.
    #[must_use]
    pub fn summarize(
        store: &LedgerStore,
        month: MonthKey,
        opening_balance: Decimal,
        precision: u32,
    ) -> MonthlySummary {
        let mut realized_income = Decimal::ZERO;
        let mut realized_expense = Decimal::ZERO;
        for tx in store.transactions_in(month) {
            match tx.kind {
                TransactionKind::Income => realized_income += tx.value,
                TransactionKind::Expense => realized_expense += tx.value,
            }
        }
        let realized_balance = opening_balance + realized_income - realized_expense;

        let mut expected_income = Decimal::ZERO;
        let mut expected_expense = Decimal::ZERO;
        for forecast in Self::forecasts_for(store, month) {
            if forecast.is_confirmed {
                continue;
            }
            match forecast.kind {
                ForecastKind::ExpectedIncome => expected_income += forecast.value,
                ForecastKind::ExpectedExpense => expected_expense += forecast.value,
            }
        }
        for bill in Self::bills_for(store, month) {
            if !bill.is_paid {
                expected_expense += bill.value;
            }
        }
        for card in store.cards() {
            let residual = InvoiceService::invoice_for(store, card.id, month, precision)
                .map(|invoice| invoice.residual())
                .unwrap_or_default();
            expected_expense += residual;
        }

        MonthlySummary {
            month,
            realized_income,
            realized_expense,
            realized_balance,
            expected_income,
            expected_expense,
            projected_balance: realized_balance + expected_income - expected_expense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{
        CreateFixedBillInput, CreateForecastInput, CreateTransactionInput,
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    const PRECISION: u32 = 2;

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn add_tx(store: &mut LedgerStore, kind: TransactionKind, value: Decimal, day: u32) {
        store
            .add_transaction(CreateTransactionInput {
                kind,
                value,
                category: "Geral".to_string(),
                description: "Lancamento".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                card: None,
            })
            .unwrap();
    }

    #[test]
    fn test_empty_store_summary_is_opening_balance() {
        let store = LedgerStore::new();
        let summary = ProjectionService::summarize(&store, month("2024-03"), dec!(500), PRECISION);
        assert_eq!(summary.realized_balance, dec!(500));
        assert_eq!(summary.projected_balance, dec!(500));
        assert_eq!(summary.expected_expense, dec!(0));
    }

    #[test]
    fn test_realized_totals_cover_only_viewed_month() {
        let mut store = LedgerStore::new();
        add_tx(&mut store, TransactionKind::Income, dec!(3000), 1);
        add_tx(&mut store, TransactionKind::Expense, dec!(800), 10);
        store
            .add_transaction(CreateTransactionInput {
                kind: TransactionKind::Expense,
                value: dec!(100),
                category: "Geral".to_string(),
                description: "Mes anterior".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
                card: None,
            })
            .unwrap();

        let summary = ProjectionService::summarize(&store, month("2024-03"), dec!(0), PRECISION);
        assert_eq!(summary.realized_income, dec!(3000));
        assert_eq!(summary.realized_expense, dec!(800));
        // February's expense only reaches the balance through the
        // opening balance input, never implicitly.
        assert_eq!(summary.realized_balance, dec!(2200));
    }

    #[test]
    fn test_unpaid_bill_counts_as_expected_expense() {
        let mut store = LedgerStore::new();
        let bill = store
            .add_fixed_bill(CreateFixedBillInput {
                name: "Rent".to_string(),
                base_value: dec!(1500),
                due_day: 5,
                category: "Moradia".to_string(),
                is_recurring: true,
                start_month: month("2024-01"),
            })
            .unwrap();

        let before = ProjectionService::summarize(&store, month("2024-03"), dec!(0), PRECISION);
        assert_eq!(before.expected_expense, dec!(1500));
        assert_eq!(before.projected_balance, dec!(-1500));

        let b = store.bill_mut(bill).unwrap();
        let rule = b.recurrence;
        RecurrenceService::settle(&rule, &mut b.overrides, month("2024-03")).unwrap();

        let after = ProjectionService::summarize(&store, month("2024-03"), dec!(0), PRECISION);
        assert_eq!(after.expected_expense, dec!(0));
    }

    #[test]
    fn test_pending_forecasts_split_by_kind() {
        let mut store = LedgerStore::new();
        store
            .add_forecast(CreateForecastInput {
                description: "Freela".to_string(),
                value: dec!(800),
                kind: ForecastKind::ExpectedIncome,
                is_recurring: false,
                anchor_month: month("2024-03"),
            })
            .unwrap();
        store
            .add_forecast(CreateForecastInput {
                description: "IPVA".to_string(),
                value: dec!(400),
                kind: ForecastKind::ExpectedExpense,
                is_recurring: false,
                anchor_month: month("2024-03"),
            })
            .unwrap();

        let summary = ProjectionService::summarize(&store, month("2024-03"), dec!(100), PRECISION);
        assert_eq!(summary.expected_income, dec!(800));
        assert_eq!(summary.expected_expense, dec!(400));
        assert_eq!(summary.projected_balance, dec!(500));
    }

    #[test]
    fn test_bills_for_sorted_by_due_day() {
        let mut store = LedgerStore::new();
        for (name, due_day) in [("Internet", 20), ("Rent", 5)] {
            store
                .add_fixed_bill(CreateFixedBillInput {
                    name: name.to_string(),
                    base_value: dec!(100),
                    due_day,
                    category: "Contas".to_string(),
                    is_recurring: true,
                    start_month: month("2024-01"),
                })
                .unwrap();
        }

        let bills = ProjectionService::bills_for(&store, month("2024-03"));
        let names: Vec<&str> = bills.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Internet"]);
    }
}
