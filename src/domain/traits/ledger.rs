use async_trait::async_trait;
use crate::domain::entities::DebtList;
use crate::application::errors::LedgerError;

/// Ledger trait - abstraction over the remote debt ledger
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Fetch every debt record
    async fn list_debts(&self) -> Result<DebtList, LedgerError>;

    /// Adjust one person's debt by a signed amount
    async fn adjust_debt(&self, name: &str, delta: i64) -> Result<(), LedgerError>;
}
