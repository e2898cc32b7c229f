//! Domain layer - Core business objects and abstractions
//!
//! This layer contains:
//! - Entities: Debt records, commands and invocations
//! - Traits: Abstractions for infrastructure (Bot, Ledger)

pub mod entities;
pub mod traits;
