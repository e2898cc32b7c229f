//! Shared fakes for unit tests

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::{Arc, Mutex, Once};

use crate::application::errors::{BotError, LedgerError};
use crate::domain::entities::{DebtList, DebtRecord};
use crate::domain::traits::{Bot, Ledger};

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCall {
    List,
    Adjust(String, i64),
}

/// In-memory ledger; adjusting an unknown name is a no-op
#[derive(Default)]
pub struct FakeLedger {
    debts: Mutex<Vec<DebtRecord>>,
    calls: Mutex<Vec<LedgerCall>>,
    failure: Option<String>,
}

impl FakeLedger {
    pub fn with_debts(debts: &[(&str, i64)]) -> Self {
        Self {
            debts: Mutex::new(debts.iter().map(|(n, a)| DebtRecord::new(*n, *a)).collect()),
            ..Self::default()
        }
    }

    /// Every call fails with a transport error
    pub fn unreachable(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<LedgerCall> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), LedgerError> {
        match &self.failure {
            Some(reason) => Err(LedgerError::Transport(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Ledger for FakeLedger {
    async fn list_debts(&self) -> Result<DebtList, LedgerError> {
        self.calls.lock().unwrap().push(LedgerCall::List);
        self.check()?;
        Ok(DebtList::new(self.debts.lock().unwrap().clone()))
    }

    async fn adjust_debt(&self, name: &str, delta: i64) -> Result<(), LedgerError> {
        self.calls.lock().unwrap().push(LedgerCall::Adjust(name.to_string(), delta));
        self.check()?;
        if let Some(record) = self.debts.lock().unwrap().iter_mut().find(|d| d.name == name) {
            record.amount += delta;
        }
        Ok(())
    }
}

/// Bot that records what it would have sent
#[derive(Default)]
pub struct RecordingBot {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingBot {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), BotError> {
        if self.fail {
            return Err(BotError::Network("send failed".to_string()));
        }
        self.sent.lock().unwrap().push((chat_id.to_string(), text.to_string()));
        Ok(())
    }

    fn platform(&self) -> &str {
        "test"
    }
}

#[derive(Default)]
struct MockLedgerInner {
    debts: Vec<(String, i64)>,
    requests: Vec<String>,
    raw_list_body: Option<String>,
}

/// Shared state of a running mock ledger server
#[derive(Clone, Default)]
pub struct MockLedgerState {
    inner: Arc<Mutex<MockLedgerInner>>,
}

impl MockLedgerState {
    /// Requests seen so far, as "METHOD /path"
    pub fn requests(&self) -> Vec<String> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn amount(&self, name: &str) -> Option<i64> {
        self.inner.lock().unwrap().debts.iter().find(|(n, _)| n == name).map(|(_, a)| *a)
    }

    /// Serve this body verbatim from the list endpoint
    pub fn set_raw_list_body(&self, body: &str) {
        self.inner.lock().unwrap().raw_list_body = Some(body.to_string());
    }
}

/// Ledger HTTP service on an ephemeral local port
pub struct MockLedgerServer {
    pub base_url: String,
    pub state: MockLedgerState,
}

impl MockLedgerServer {
    pub async fn spawn(debts: &[(&str, i64)]) -> Self {
        let state = MockLedgerState::default();
        state.inner.lock().unwrap().debts = debts.iter().map(|(n, a)| (n.to_string(), *a)).collect();

        let app = Router::new()
            .route("/api/debt", get(list_debts))
            .route("/api/debt/:name/:amount", post(adjust_debt))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/", addr),
            state,
        }
    }
}

async fn list_debts(State(state): State<MockLedgerState>, uri: Uri) -> Response {
    let mut inner = state.inner.lock().unwrap();
    inner.requests.push(format!("GET {}", uri.path()));

    if let Some(body) = &inner.raw_list_body {
        return (StatusCode::OK, body.clone()).into_response();
    }

    // The real service sends amounts as strings
    let debts: Vec<serde_json::Value> = inner.debts.iter()
        .map(|(name, amount)| serde_json::json!({ "name": name, "amount": amount.to_string() }))
        .collect();
    Json(serde_json::json!({ "debts": debts })).into_response()
}

async fn adjust_debt(
    State(state): State<MockLedgerState>,
    uri: Uri,
    Path((name, amount)): Path<(String, i64)>,
) -> StatusCode {
    let mut inner = state.inner.lock().unwrap();
    inner.requests.push(format!("POST {}", uri.path()));

    match inner.debts.iter_mut().find(|(n, _)| *n == name) {
        Some((_, current)) => {
            *current += amount;
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

/// Base URL of a port nobody listens on
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}
