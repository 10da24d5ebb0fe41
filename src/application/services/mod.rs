//! Application services - Business logic orchestration

pub mod command_service;
pub mod economy_service;

pub use command_service::CommandService;
pub use economy_service::{AccountDefaults, EconomyService};
