//! Discord adapter

use async_trait::async_trait;
use serenity::all::{ChannelId, Context, EventHandler, GatewayIntents, Message, Ready};
use serenity::http::Http;
use serenity::Client;
use std::sync::Arc;

use crate::application::errors::BotError;
use crate::application::messaging::MessageDispatcher;
use crate::domain::traits::Bot;

/// Discord rejects messages longer than this many characters
pub const MESSAGE_LIMIT: usize = 2000;

/// Gateway event handler, hands every command off to its own task
struct Handler {
    dispatcher: Arc<MessageDispatcher>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let Some(invocation) = self.dispatcher.parse(msg.channel_id.to_string(), &msg.content) else {
            return;
        };
        let invocation = invocation.with_author(msg.author.name.clone());

        let replier: Arc<dyn Bot> = Arc::new(DiscordReplier::new(ctx.http.clone()));
        self.dispatcher.spawn(replier, invocation);
    }

    async fn ready(&self, _: Context, ready: Ready) {
        tracing::info!("{} has connected to Discord!", ready.user.name);
    }
}

/// Discord bot adapter
pub struct DiscordAdapter {
    token: String,
}

impl DiscordAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// Connect to the gateway and serve commands until the connection ends
    pub async fn run(&self, dispatcher: Arc<MessageDispatcher>) -> Result<(), BotError> {
        tracing::info!("Starting Discord adapter");

        let intents = GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let mut client = Client::builder(&self.token, intents)
            .event_handler(Handler { dispatcher })
            .await
            .map_err(|e| BotError::Network(format!("Failed to create Discord client: {}", e)))?;

        client.start()
            .await
            .map_err(|e| BotError::Network(format!("Discord client error: {}", e)))
    }
}

/// Sends replies through the Discord HTTP API
pub struct DiscordReplier {
    http: Arc<Http>,
}

impl DiscordReplier {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Bot for DiscordReplier {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), BotError> {
        let channel = parse_channel_id(chat_id)?;

        for chunk in split_message(text, MESSAGE_LIMIT) {
            channel.say(&self.http, chunk)
                .await
                .map_err(|e| BotError::Network(e.to_string()))?;
        }

        Ok(())
    }

    fn platform(&self) -> &str {
        "discord"
    }
}

fn parse_channel_id(chat_id: &str) -> Result<ChannelId, BotError> {
    match chat_id.parse::<u64>() {
        Ok(id) if id != 0 => Ok(ChannelId::new(id)),
        _ => Err(BotError::InvalidChannel(chat_id.to_string())),
    }
}

/// Split text into chunks of at most `limit` characters, preferring line breaks
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();

        if current_len + line_len > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len <= limit {
            current.push_str(line);
            current_len += line_len;
            continue;
        }

        // A single line longer than the limit gets cut mid-line
        for ch in line.chars() {
            if current_len == limit {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push(ch);
            current_len += 1;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
