//! Message dispatcher - Routes command invocations to handlers and replies

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::application::errors::CommandError;
use crate::application::services::CommandService;
use crate::domain::entities::CommandInvocation;
use crate::domain::traits::Bot;
use super::parser::MessageParser;

/// Message dispatcher - parses chat text, runs the command and sends the reply
pub struct MessageDispatcher {
    parser: MessageParser,
    commands: CommandService,
}

impl MessageDispatcher {
    pub fn new(commands: CommandService) -> Self {
        Self {
            parser: MessageParser::new(commands.prefix()),
            commands,
        }
    }

    /// Parse chat text into an invocation, `None` for ordinary chatter
    pub fn parse(&self, chat_id: impl Into<String>, text: &str) -> Option<CommandInvocation> {
        self.parser.parse(chat_id, text)
    }

    /// Run one invocation and turn the outcome into reply text.
    ///
    /// Errors never escape: usage problems and ledger failures become a
    /// reply, unknown commands and lookup misses produce none.
    pub async fn handle(&self, invocation: &CommandInvocation) -> Option<String> {
        match self.commands.execute(invocation).await {
            Ok(Some(reply)) => Some(reply),
            Ok(None) => {
                tracing::debug!("No reply for {}", invocation.name);
                None
            }
            Err(CommandError::NotFound(name)) => {
                tracing::debug!("Ignoring unknown command: {}", name);
                None
            }
            Err(CommandError::InvalidArgs(usage)) => {
                tracing::info!("Rejected {}: bad arguments", invocation.name);
                Some(usage)
            }
            Err(CommandError::Ledger(e)) => {
                tracing::error!("Ledger call for {} failed: {}", invocation.name, e);
                Some(format!("Error: {}", e))
            }
        }
    }

    /// Handle an invocation and send the reply to its channel
    pub async fn dispatch(&self, bot: &dyn Bot, invocation: CommandInvocation) {
        tracing::info!(
            "[{}] {} {} from {}",
            invocation.reply_target,
            invocation.name,
            invocation.argument.as_deref().unwrap_or(""),
            invocation.author.as_deref().unwrap_or("unknown"),
        );

        if let Some(reply) = self.handle(&invocation).await {
            if let Err(e) = bot.send_message(&invocation.reply_target, &reply).await {
                tracing::error!("Failed to send reply on {}: {}", bot.platform(), e);
            }
        }

        let elapsed = chrono::Utc::now() - invocation.received_at;
        tracing::debug!("Handled {} in {}ms", invocation.name, elapsed.num_milliseconds());
    }

    /// Run an invocation as its own task so a slow ledger call blocks nothing else
    pub fn spawn(self: &Arc<Self>, bot: Arc<dyn Bot>, invocation: CommandInvocation) -> JoinHandle<()> {
        let dispatcher = Arc::clone(self);
        let span = tracing::info_span!("invocation", id = %invocation.id);
        tokio::spawn(
            async move {
                dispatcher.dispatch(bot.as_ref(), invocation).await;
            }
            .instrument(span),
        )
    }
}
