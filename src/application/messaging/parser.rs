//! Message parser - Turns raw chat text into command invocations

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::domain::entities::CommandInvocation;

/// A double-quoted argument or a run of non-whitespace. An unclosed quote runs to the end of the line.
static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)"?|(\S+)"#).expect("token pattern is valid"));

/// Parses incoming messages into command invocations
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    /// Parse a text message, `None` if it is not a command
    pub fn parse(&self, chat_id: impl Into<String>, text: &str) -> Option<CommandInvocation> {
        let cmd_text = text.strip_prefix(self.command_prefix.as_str())?;

        // "! debts" is not a command
        if cmd_text.is_empty() || cmd_text.starts_with(char::is_whitespace) {
            return None;
        }

        let mut tokens = tokenize(cmd_text).into_iter();
        let name = tokens.next()?;
        let argument = tokens.next();

        Some(CommandInvocation::new(chat_id, name, argument).with_rest(tokens.collect()))
    }
}

fn tokenize(text: &str) -> Vec<String> {
    TOKEN.captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}
