//! In-memory repository backing tests and single-process setups.

use std::collections::HashMap;
use std::sync::Mutex;

use lyvo_shared::types::UserId;
use lyvo_shared::{AppError, AppResult};

use super::repository::LedgerRepository;
use crate::store::LedgerStore;

/// Keeps serialized ledgers in a mutex-guarded map.
///
/// Stores round-trip through JSON so the repository exercises the same
/// serialization path a real backend would.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    ledgers: Mutex<HashMap<UserId, String>>,
}

impl MemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerRepository for MemoryRepository {
    fn load(&self, user: UserId) -> AppResult<LedgerStore> {
        let ledgers = self
            .ledgers
            .lock()
            .map_err(|e| AppError::Persistence(format!("Repository lock poisoned: {e}")))?;
        match ledgers.get(&user) {
            Some(raw) => serde_json::from_str(raw)
                .map_err(|e| AppError::Persistence(format!("Corrupt ledger for {user}: {e}"))),
            None => Ok(LedgerStore::new()),
        }
    }

    fn save(&self, user: UserId, store: &LedgerStore) -> AppResult<()> {
        let raw = serde_json::to_string(store)
            .map_err(|e| AppError::Persistence(format!("Serialization failed: {e}")))?;
        let mut ledgers = self
            .ledgers
            .lock()
            .map_err(|e| AppError::Persistence(format!("Repository lock poisoned: {e}")))?;
        ledgers.insert(user, raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CreateFixedBillInput, CreateTransactionInput, TransactionKind};
    use chrono::NaiveDate;
    use lyvo_shared::types::MonthKey;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unknown_user_loads_empty_ledger() {
        let repo = MemoryRepository::new();
        let store = repo.load(UserId::new()).unwrap();
        assert_eq!(store.transactions().count(), 0);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let repo = MemoryRepository::new();
        let user = UserId::new();
        let month: MonthKey = "2024-03".parse().unwrap();

        let mut store = LedgerStore::new();
        store
            .add_transaction(CreateTransactionInput {
                kind: TransactionKind::Income,
                value: dec!(3000),
                category: "Salario".to_string(),
                description: "Pagamento".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                card: None,
            })
            .unwrap();
        store
            .add_fixed_bill(CreateFixedBillInput {
                name: "Rent".to_string(),
                base_value: dec!(1500),
                due_day: 5,
                category: "Moradia".to_string(),
                is_recurring: true,
                start_month: month,
            })
            .unwrap();

        repo.save(user, &store).unwrap();
        let loaded = repo.load(user).unwrap();
        assert_eq!(loaded.transactions().count(), 1);
        assert_eq!(loaded.bills().count(), 1);
        assert_eq!(loaded.bills().next().unwrap().base_value, dec!(1500));
    }

    #[test]
    fn test_users_are_isolated() {
        let repo = MemoryRepository::new();
        let alice = UserId::new();
        let bob = UserId::new();

        let mut store = LedgerStore::new();
        store
            .add_transaction(CreateTransactionInput {
                kind: TransactionKind::Expense,
                value: dec!(10),
                category: "Geral".to_string(),
                description: "Cafe".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                card: None,
            })
            .unwrap();
        repo.save(alice, &store).unwrap();

        assert_eq!(repo.load(bob).unwrap().transactions().count(), 0);
        assert_eq!(repo.load(alice).unwrap().transactions().count(), 1);
    }
}
