//! Property-based tests for installment splitting and payment carry.

use chrono::NaiveDate;
use lyvo_shared::types::MonthKey;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::InvoiceService;
use crate::store::{
    CardCharge, CreateCreditCardInput, CreateTransactionInput, LedgerStore, TransactionKind,
};

const PRECISION: u32 = 2;

fn cents_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=5_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn store_with_purchase(value: Decimal, installments: u32) -> (LedgerStore, lyvo_shared::types::CreditCardId) {
    let mut store = LedgerStore::new();
    let card = store
        .add_credit_card(CreateCreditCardInput {
            name: "Visa".to_string(),
            limit: Decimal::new(10_000_000, 2),
            due_day: 20,
            best_purchase_day: 10,
        })
        .unwrap();
    store
        .add_transaction(CreateTransactionInput {
            kind: TransactionKind::Expense,
            value,
            category: "Compras".to_string(),
            description: "Compra".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            card: Some(CardCharge {
                card_id: card,
                installments,
            }),
        })
        .unwrap();
    (store, card)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Installment shares always sum exactly to the purchase value and
    /// only the final share may differ from the others.
    #[test]
    fn prop_installment_shares_sum_exactly(
        value in cents_strategy(),
        count in 1u32..=48,
    ) {
        let shares = InvoiceService::installment_shares(value, count, PRECISION);
        prop_assert_eq!(shares.len(), count as usize);
        prop_assert_eq!(shares.iter().sum::<Decimal>(), value);
        if let Some((last, rest)) = shares.split_last() {
            for share in rest {
                prop_assert_eq!(share, rest.first().unwrap());
            }
            prop_assert!((*last - *rest.first().unwrap_or(last)).abs() < Decimal::ONE);
        }
    }

    /// Whatever sequence of partial payments is applied, the residual
    /// never goes negative, every carry lands on the next month's
    /// invoice, and the amounts applied plus the final outstanding
    /// always equal the purchase value.
    #[test]
    fn prop_payments_conserve_value(
        value in cents_strategy(),
        installments in 1u32..=12,
        payments in proptest::collection::vec(1i64..=1_000_000, 0..6),
    ) {
        let (mut store, card) = store_with_purchase(value, installments);

        let mut applied_total = Decimal::ZERO;
        let mut month: MonthKey = "2024-03".parse().unwrap();
        for cents in payments {
            let amount = Decimal::new(cents, 2);
            if let Ok(receipt) = InvoiceService::pay(&mut store, card, month, amount, PRECISION) {
                prop_assert!(receipt.applied <= amount);
                prop_assert!(receipt.residual >= Decimal::ZERO);
                applied_total += receipt.applied;

                let next = InvoiceService::invoice_for(&store, card, month.next(), PRECISION)
                    .unwrap();
                prop_assert_eq!(next.previous_balance, receipt.residual);
            }
            month = month.next();
        }

        let outstanding = InvoiceService::outstanding(&store, card, PRECISION).unwrap();
        prop_assert!(outstanding >= Decimal::ZERO);
        prop_assert_eq!(applied_total + outstanding, value);
    }

    /// A failed payment leaves every invoice unchanged.
    #[test]
    fn prop_failed_payment_is_atomic(
        value in cents_strategy(),
        installments in 1u32..=12,
    ) {
        let (mut store, card) = store_with_purchase(value, installments);
        let first: MonthKey = "2024-03".parse().unwrap();

        let before: Vec<_> = (0..installments)
            .map(|k| InvoiceService::invoice_for(&store, card, first.add_months(k), PRECISION).unwrap())
            .collect();

        prop_assert!(
            InvoiceService::pay(&mut store, card, first, Decimal::ZERO, PRECISION).is_err()
        );

        for invoice in before {
            let after =
                InvoiceService::invoice_for(&store, card, invoice.month, PRECISION).unwrap();
            prop_assert_eq!(after, invoice);
        }
    }
}
