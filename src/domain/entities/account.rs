use serde::{Deserialize, Serialize};

/// A user's ledger record: the liquid wallet and the protected vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub user_id: i64,
    pub wallet: i64,
    pub vault: i64,
}

impl Account {
    pub fn new(user_id: i64, wallet: i64, vault: i64) -> Self {
        Self { user_id, wallet, vault }
    }

    /// Net worth is always derived, never persisted.
    pub fn net_worth(&self) -> i64 {
        self.wallet + self.vault
    }

    pub fn balance(&self) -> Balance {
        Balance::new(self.wallet, self.vault)
    }
}

/// Snapshot of an account's balances as returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub wallet: i64,
    pub vault: i64,
    pub net_worth: i64,
}

impl Balance {
    pub fn new(wallet: i64, vault: i64) -> Self {
        Self {
            wallet,
            vault,
            net_worth: wallet + vault,
        }
    }
}

/// Which way a transfer moves funds between the two sub-balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    /// Wallet to vault (deposit).
    ToVault,
    /// Vault to wallet (withdraw).
    ToWallet,
}

/// Result of a transfer attempt.
///
/// `Insufficient` carries the current, unchanged balance so the caller can
/// report available funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Completed,
    Insufficient(Balance),
}

impl TransferOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TransferOutcome::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_worth_is_derived() {
        let account = Account::new(42, 70, 30);
        assert_eq!(account.net_worth(), 100);
        assert_eq!(account.balance(), Balance::new(70, 30));
    }

    #[test]
    fn balance_sums_fields() {
        let b = Balance::new(100, 0);
        assert_eq!(b.net_worth, 100);
        assert_eq!(b.wallet + b.vault, b.net_worth);
    }
}
