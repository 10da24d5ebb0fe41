use async_trait::async_trait;
use crate::application::errors::StorageError;
use crate::domain::entities::{Account, TransferDirection};

/// Ledger trait - abstraction for the persistent per-user balance store.
///
/// Each call is a single round trip to storage; there is no in-memory cache,
/// so every read reflects the latest committed state.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// True if a record for `user_id` is present. No side effects.
    async fn exists(&self, user_id: i64) -> Result<bool, StorageError>;

    /// Inserts a new record. Fails with `StorageError::DuplicateAccount`
    /// if the id is already present.
    async fn create(&self, user_id: i64, wallet: i64, vault: i64) -> Result<(), StorageError>;

    /// Returns the stored record, or `None` if absent.
    async fn read(&self, user_id: i64) -> Result<Option<Account>, StorageError>;

    /// Replaces both fields of an existing record. No-op when the record
    /// does not exist; callers create before writing.
    async fn write(&self, user_id: i64, wallet: i64, vault: i64) -> Result<(), StorageError>;

    /// Moves `amount` between the two sub-balances as one guarded update:
    /// the debit side must hold at least `amount` or nothing changes.
    /// Returns whether a row was affected.
    async fn move_funds(
        &self,
        user_id: i64,
        amount: i64,
        direction: TransferDirection,
    ) -> Result<bool, StorageError>;
}
