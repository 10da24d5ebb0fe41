//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Database: Sqlite-backed ledger store
//! - Adapters: Platform integrations

pub mod config;
pub mod database;
pub mod adapters;
