//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Ledger: HTTP client for the remote debt ledger
//! - Adapters: Platform integrations (Discord, console)

pub mod config;
pub mod ledger;
pub mod adapters;
