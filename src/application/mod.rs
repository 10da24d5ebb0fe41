//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Business logic orchestration (economy, commands)
//! - Errors: Domain-specific errors
//! - Messaging: Message parsing

pub mod errors;
pub mod services;
pub mod messaging;
