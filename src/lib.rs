//! vault-bot - a chat bot maintaining a per-user wallet/vault currency ledger.
//!
//! Layered domain / application / infrastructure: the economy service holds
//! business rules, the sqlite ledger holds state, adapters hold platforms.

pub mod domain;
pub mod application;
pub mod infrastructure;
