//! Ledger HTTP client

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::application::errors::LedgerError;
use crate::domain::entities::DebtList;
use crate::domain::traits::Ledger;


/// Body of `GET /api/debt`
#[derive(Debug, Deserialize)]
struct DebtsResponse {
    debts: DebtList,
}

/// Client for the remote debt ledger
pub struct HttpLedgerClient {
    base: Url,
    client: Client,
}

impl HttpLedgerClient {
    pub fn new(base_url: &str) -> Result<Self, LedgerError> {
        let base = Url::parse(base_url)
            .map_err(|e| LedgerError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        if base.cannot_be_a_base() {
            return Err(LedgerError::InvalidUrl(format!("{} cannot carry a path", base_url)));
        }

        Ok(Self {
            base,
            client: Client::new(),
        })
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, LedgerError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| LedgerError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn debts_url(&self) -> Result<Url, LedgerError> {
        self.endpoint(&["api", "debt"])
    }

    fn adjust_url(&self, name: &str, delta: i64) -> Result<Url, LedgerError> {
        self.endpoint(&["api", "debt", name, &delta.to_string()])
    }
}

#[async_trait]
impl Ledger for HttpLedgerClient {
    async fn list_debts(&self) -> Result<DebtList, LedgerError> {
        let url = self.debts_url()?;
        tracing::debug!("GET {}", url);

        let response = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LedgerError::Transport(format!("Ledger API error: {}", response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        let data: DebtsResponse = serde_json::from_str(&body)
            .map_err(|e| LedgerError::Format(e.to_string()))?;

        tracing::debug!("Ledger returned {} debts", data.debts.len());
        Ok(data.debts)
    }

    async fn adjust_debt(&self, name: &str, delta: i64) -> Result<(), LedgerError> {
        let url = self.adjust_url(name, delta)?;
        tracing::debug!("POST {}", url);

        let response = self.client
            .post(url)
            .send()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        // Unknown names show up in the next list, not here
        if !response.status().is_success() {
            tracing::warn!("Ledger answered {} when adjusting {} by {}", response.status(), name, delta);
        }

        Ok(())
    }
}
