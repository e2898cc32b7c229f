use async_trait::async_trait;
use crate::application::errors::BotError;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Send a message to a chat
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), BotError>;

    /// Platform name, used in logs
    fn platform(&self) -> &str;
}
