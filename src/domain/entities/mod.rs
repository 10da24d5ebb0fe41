//! Domain entities - Core business objects with no external dependencies

pub mod account;
pub mod user;
pub mod message;
pub mod command;

pub use account::{Account, Balance, TransferDirection, TransferOutcome};
pub use user::User;
pub use message::{Message, MessageType, Content};
pub use command::{Command, CommandRegistry};
