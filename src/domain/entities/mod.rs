//! Domain entities - Core business objects

pub mod command;
pub mod debt;
pub mod invocation;

pub use command::{Command, CommandAction, CommandRegistry, Direction};
pub use debt::{DebtList, DebtRecord};
pub use invocation::CommandInvocation;
