use std::collections::BTreeMap;

/// Direction of a ledger adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    /// Signed delta for a given unit
    pub fn apply(self, unit: i64) -> i64 {
        match self {
            Direction::Increase => unit,
            Direction::Decrease => -unit,
        }
    }
}

/// What a command does when invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    /// Report the ledger, optionally after adjusting one name
    Debts { adjust: Option<Direction> },
    /// Add an arbitrary signed amount to one name
    AddAmount,
    Help,
}

/// Represents a bot command
#[derive(Debug, Clone)]
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub usage: Option<String>,
    pub action: CommandAction,
}

impl Command {
    pub fn new(name: impl Into<String>, action: CommandAction) -> Self {
        Self {
            name: name.into(),
            description: None,
            usage: None,
            action,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Whether the command takes a name argument
    pub fn requires_argument(&self) -> bool {
        matches!(self.action, CommandAction::Debts { adjust: Some(_) } | CommandAction::AddAmount)
    }

    pub fn matches(&self, input: &str) -> bool {
        self.name.to_lowercase() == input.to_lowercase()
    }
}

/// Command registry for managing available commands
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.name.clone(), command);
    }

    pub fn find(&self, input: &str) -> Option<&Command> {
        self.commands.values().find(|c| c.matches(input))
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }
}
