//! Economy service - balance inquiry and transfers between wallet and vault

use std::sync::Arc;

use crate::application::errors::StorageError;
use crate::domain::entities::{Balance, TransferDirection, TransferOutcome};
use crate::domain::traits::Ledger;

/// Balances given to an account created on first inquiry.
#[derive(Debug, Clone, Copy)]
pub struct AccountDefaults {
    pub wallet: i64,
    pub vault: i64,
}

impl Default for AccountDefaults {
    fn default() -> Self {
        Self { wallet: 100, vault: 0 }
    }
}

/// Business logic over the ledger store.
///
/// Holds its ledger by injection and exposes balance inquiry and the two
/// transfer operations. Transfers go through the ledger's guarded update,
/// so net worth is conserved even when two commands race on one account.
pub struct EconomyService {
    ledger: Arc<dyn Ledger>,
    defaults: AccountDefaults,
}

impl EconomyService {
    pub fn new(ledger: Arc<dyn Ledger>, defaults: AccountDefaults) -> Self {
        Self { ledger, defaults }
    }

    /// Returns the account's balance triple, creating the account with the
    /// configured defaults on first inquiry.
    pub async fn get_balance(&self, user_id: i64) -> Result<Balance, StorageError> {
        if !self.ledger.exists(user_id).await? {
            self.ledger
                .create(user_id, self.defaults.wallet, self.defaults.vault)
                .await?;
            tracing::debug!(user_id, "created account with default balance");
            return Ok(Balance::new(self.defaults.wallet, self.defaults.vault));
        }

        let account = self
            .ledger
            .read(user_id)
            .await?
            .ok_or(StorageError::AccountNotFound(user_id))?;
        Ok(account.balance())
    }

    /// Moves `amount` from wallet to vault. Rejects without changing state
    /// when the wallet holds less than `amount`, returning the current
    /// balance so the caller can report available funds.
    pub async fn move_to_vault(
        &self,
        user_id: i64,
        amount: i64,
    ) -> Result<TransferOutcome, StorageError> {
        self.transfer(user_id, amount, TransferDirection::ToVault).await
    }

    /// Mirror of `move_to_vault`: vault to wallet, checking the vault side.
    pub async fn move_to_wallet(
        &self,
        user_id: i64,
        amount: i64,
    ) -> Result<TransferOutcome, StorageError> {
        self.transfer(user_id, amount, TransferDirection::ToWallet).await
    }

    /// Overwrites both fields of an account, creating it first if missing.
    pub async fn set_balance(
        &self,
        user_id: i64,
        wallet: i64,
        vault: i64,
    ) -> Result<(), StorageError> {
        self.get_balance(user_id).await?;
        self.ledger.write(user_id, wallet, vault).await
    }

    async fn transfer(
        &self,
        user_id: i64,
        amount: i64,
        direction: TransferDirection,
    ) -> Result<TransferOutcome, StorageError> {
        // First touch creates the account, as with a plain inquiry.
        self.get_balance(user_id).await?;

        if self.ledger.move_funds(user_id, amount, direction).await? {
            Ok(TransferOutcome::Completed)
        } else {
            let balance = self.get_balance(user_id).await?;
            Ok(TransferOutcome::Insufficient(balance))
        }
    }
}
