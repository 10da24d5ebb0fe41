//! Sqlite-backed ledger store
//!
//! One table, one row per user: `money(id, wallet, vault)`. Every trait
//! call is a single statement against the connection; transfers use a
//! guarded UPDATE so the debit side can never go negative, even when two
//! commands race on the same account.

use std::path::Path;

use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::application::errors::StorageError;
use crate::domain::entities::{Account, TransferDirection};
use crate::domain::traits::Ledger;

pub struct SqliteLedger {
    conn: Mutex<Connection>,
}

impl SqliteLedger {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        Self::init_tables(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn init_tables(conn: &Connection) -> Result<(), StorageError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS money (
                id INTEGER PRIMARY KEY,
                wallet INTEGER NOT NULL,
                vault INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}

fn map_insert_error(err: rusqlite::Error, user_id: i64) -> StorageError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StorageError::DuplicateAccount(user_id)
        }
        _ => StorageError::Database(err),
    }
}

#[async_trait]
impl Ledger for SqliteLedger {
    async fn exists(&self, user_id: i64) -> Result<bool, StorageError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT 1 FROM money WHERE id = ?1")?;
        Ok(stmt.exists([user_id])?)
    }

    async fn create(&self, user_id: i64, wallet: i64, vault: i64) -> Result<(), StorageError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO money (id, wallet, vault) VALUES (?1, ?2, ?3)",
            rusqlite::params![user_id, wallet, vault],
        )
        .map_err(|e| map_insert_error(e, user_id))?;
        Ok(())
    }

    async fn read(&self, user_id: i64) -> Result<Option<Account>, StorageError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT id, wallet, vault FROM money WHERE id = ?1")?;

        let mut rows = stmt.query([user_id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Account {
                user_id: row.get(0)?,
                wallet: row.get(1)?,
                vault: row.get(2)?,
            }))
        } else {
            Ok(None)
        }
    }

    async fn write(&self, user_id: i64, wallet: i64, vault: i64) -> Result<(), StorageError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "UPDATE money SET wallet = ?1, vault = ?2 WHERE id = ?3",
            rusqlite::params![wallet, vault, user_id],
        )?;
        Ok(())
    }

    async fn move_funds(
        &self,
        user_id: i64,
        amount: i64,
        direction: TransferDirection,
    ) -> Result<bool, StorageError> {
        let sql = match direction {
            TransferDirection::ToVault => {
                "UPDATE money SET wallet = wallet - ?1, vault = vault + ?1
                 WHERE id = ?2 AND wallet >= ?1"
            }
            TransferDirection::ToWallet => {
                "UPDATE money SET wallet = wallet + ?1, vault = vault - ?1
                 WHERE id = ?2 AND vault >= ?1"
            }
        };

        let conn = self.conn.lock().await;
        let affected = conn.execute(sql, rusqlite::params![amount, user_id])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> SqliteLedger {
        SqliteLedger::new(":memory:").unwrap()
    }

    #[tokio::test]
    async fn create_then_read_round_trips() {
        let ledger = ledger();
        ledger.create(1, 100, 0).await.unwrap();
        assert!(ledger.exists(1).await.unwrap());
        let account = ledger.read(1).await.unwrap().unwrap();
        assert_eq!((account.wallet, account.vault), (100, 0));
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected() {
        let ledger = ledger();
        ledger.create(1, 100, 0).await.unwrap();
        assert!(matches!(
            ledger.create(1, 50, 50).await,
            Err(StorageError::DuplicateAccount(1))
        ));
    }

    #[tokio::test]
    async fn read_missing_returns_none() {
        let ledger = ledger();
        assert!(ledger.read(99).await.unwrap().is_none());
        assert!(!ledger.exists(99).await.unwrap());
    }

    #[tokio::test]
    async fn write_replaces_both_fields() {
        let ledger = ledger();
        ledger.create(1, 100, 0).await.unwrap();
        ledger.write(1, 10, 20).await.unwrap();
        let account = ledger.read(1).await.unwrap().unwrap();
        assert_eq!((account.wallet, account.vault), (10, 20));
    }

    #[tokio::test]
    async fn guarded_update_refuses_overdraft() {
        let ledger = ledger();
        ledger.create(1, 100, 0).await.unwrap();

        assert!(ledger.move_funds(1, 30, TransferDirection::ToVault).await.unwrap());
        assert!(!ledger.move_funds(1, 1000, TransferDirection::ToVault).await.unwrap());
        assert!(!ledger.move_funds(1, 31, TransferDirection::ToWallet).await.unwrap());

        let account = ledger.read(1).await.unwrap().unwrap();
        assert_eq!((account.wallet, account.vault), (70, 30));
    }

    #[tokio::test]
    async fn move_funds_against_missing_account_affects_nothing() {
        let ledger = ledger();
        assert!(!ledger.move_funds(5, 10, TransferDirection::ToVault).await.unwrap());
    }
}
