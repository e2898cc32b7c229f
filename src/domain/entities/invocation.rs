use chrono::{DateTime, Utc};

/// A single command typed into a chat channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub id: String,
    pub name: String,
    pub argument: Option<String>,
    /// Tokens after the first argument
    pub rest: Vec<String>,
    /// Channel the reply goes to
    pub reply_target: String,
    pub author: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl CommandInvocation {
    pub fn new(reply_target: impl Into<String>, name: impl Into<String>, argument: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            argument,
            rest: Vec::new(),
            reply_target: reply_target.into(),
            author: None,
            received_at: Utc::now(),
        }
    }

    pub fn with_rest(mut self, rest: Vec<String>) -> Self {
        self.rest = rest;
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Argument, if present and not blank
    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref().filter(|a| !a.trim().is_empty())
    }

    pub fn second_argument(&self) -> Option<&str> {
        self.rest.first().map(String::as_str).filter(|a| !a.trim().is_empty())
    }
}
