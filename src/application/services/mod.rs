//! Application services - Business logic orchestration

pub mod command_service;
pub mod debt_service;

pub use command_service::CommandService;
pub use debt_service::DebtService;
