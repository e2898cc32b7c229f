//! Console adapter for development/testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use crate::application::errors::BotError;
use crate::application::messaging::MessageDispatcher;
use crate::domain::traits::Bot;

const CONSOLE_CHAT_ID: &str = "console";

/// Console bot adapter for local development
pub struct ConsoleAdapter;

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Read commands from stdin until EOF
    pub async fn run(self: Arc<Self>, dispatcher: Arc<MessageDispatcher>) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode), type commands and press enter");

        let pending = serve(self, &dispatcher, BufReader::new(tokio::io::stdin())).await?;
        for handle in pending {
            if let Err(e) = handle.await {
                tracing::error!("Console invocation task failed: {}", e);
            }
        }

        tracing::info!("Console closed");
        Ok(())
    }
}

/// Spawn one invocation task per command line, returning the tasks still running at EOF
async fn serve<R>(
    bot: Arc<dyn Bot>,
    dispatcher: &Arc<MessageDispatcher>,
    reader: R,
) -> Result<Vec<JoinHandle<()>>, BotError>
where
    R: AsyncBufRead + Unpin,
{
    let mut pending: Vec<JoinHandle<()>> = Vec::new();
    let mut lines = reader.lines();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| BotError::Internal(format!("Failed to read stdin: {}", e)))?
    {
        let Some(invocation) = dispatcher.parse(CONSOLE_CHAT_ID, line.trim()) else {
            continue;
        };
        pending.retain(|h| !h.is_finished());
        pending.push(dispatcher.spawn(bot.clone(), invocation.with_author("console")));
    }

    Ok(pending)
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<(), BotError> {
        println!("[BOT] {}", text.trim_end());
        Ok(())
    }

    fn platform(&self) -> &str {
        "console"
    }
}
