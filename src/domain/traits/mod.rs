//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod ledger;

pub use bot::{Bot, BotInfo};
pub use ledger::Ledger;
