//! The repository contract.

use lyvo_shared::AppResult;
use lyvo_shared::types::UserId;

use crate::store::LedgerStore;

/// Loads and saves one user's whole ledger.
///
/// The engine mutates in memory and hands complete stores to the
/// repository, so a failed save never leaves a partially written
/// ledger behind. Backend failures surface as
/// `AppError::Persistence`.
pub trait LedgerRepository {
    /// Loads the user's ledger, or an empty one for a new user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Persistence` on backend failure.
    fn load(&self, user: UserId) -> AppResult<LedgerStore>;

    /// Saves the user's ledger, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Persistence` on backend failure.
    fn save(&self, user: UserId, store: &LedgerStore) -> AppResult<()>;
}
