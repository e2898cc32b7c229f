use std::sync::Arc;

use crate::application::errors::LedgerError;
use crate::domain::entities::{DebtList, Direction};
use crate::domain::traits::Ledger;

/// Reply used when the ledger has no entries at all
pub const EMPTY_LEDGER_REPLY: &str = "No debts recorded.";

/// A pending change to one person's debt
#[derive(Debug, Clone, Copy)]
pub struct Adjustment<'a> {
    pub name: &'a str,
    pub direction: Direction,
}

/// Service for reading and adjusting debts on the ledger
pub struct DebtService {
    ledger: Arc<dyn Ledger>,
    unit: i64,
}

impl DebtService {
    pub fn new(ledger: Arc<dyn Ledger>, unit: i64) -> Self {
        Self { ledger, unit }
    }

    pub fn unit(&self) -> i64 {
        self.unit
    }

    /// Apply the optional adjustment, then read the ledger back.
    ///
    /// Without an adjustment the whole ledger is rendered. With one, only the
    /// adjusted name is reported, and `None` means the name was not in the list.
    pub async fn report(&self, adjustment: Option<Adjustment<'_>>) -> Result<Option<String>, LedgerError> {
        if let Some(adj) = adjustment {
            let delta = adj.direction.apply(self.unit);
            tracing::info!("Adjusting debt of {} by {}", adj.name, delta);
            self.ledger.adjust_debt(adj.name, delta).await?;
        }

        let debts = self.ledger.list_debts().await?;

        match adjustment {
            None => Ok(Some(format_debts(&debts))),
            Some(adj) => {
                let found = debts.find(adj.name).map(|d| d.to_string());
                if found.is_none() {
                    tracing::warn!("{} not in ledger after adjustment, not replying", adj.name);
                }
                Ok(found)
            }
        }
    }

    /// Add an arbitrary signed amount to one name and confirm it
    pub async fn add_amount(&self, name: &str, amount: i64) -> Result<String, LedgerError> {
        tracing::info!("Adding {} to debt of {}", amount, name);
        self.ledger.adjust_debt(name, amount).await?;
        Ok(format!("Added {} to {}", amount, name))
    }
}

/// One "<name> <amount>" line per record
pub fn format_debts(debts: &DebtList) -> String {
    if debts.is_empty() {
        return EMPTY_LEDGER_REPLY.to_string();
    }
    debts.iter().map(|d| format!("{}\n", d)).collect()
}
