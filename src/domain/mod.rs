//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (Account, User, Message, Command)
//! - Traits: Abstractions for infrastructure (Bot, Ledger)

pub mod entities;
pub mod traits;
