use crate::application::errors::CommandError;
use crate::application::services::debt_service::{Adjustment, DebtService};
use crate::domain::entities::{Command, CommandAction, CommandInvocation, CommandRegistry, Direction};

/// Service for managing and executing commands
pub struct CommandService {
    registry: CommandRegistry,
    prefix: String,
    description: String,
    debts: DebtService,
}

impl CommandService {
    pub fn new(prefix: impl Into<String>, description: impl Into<String>, debts: DebtService) -> Self {
        Self {
            registry: CommandRegistry::new(),
            prefix: prefix.into(),
            description: description.into(),
            debts,
        }
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    pub fn register_defaults(&mut self) {
        let prefix = self.prefix.clone();
        let unit = self.debts.unit();

        self.register(Command::new("debts", CommandAction::Debts { adjust: None })
            .with_description("Show everyone's debts")
            .with_usage(format!("{}debts", prefix)));

        self.register(Command::new("+debt", CommandAction::Debts { adjust: Some(Direction::Increase) })
            .with_description(format!("Add {} to a player's debt", unit))
            .with_usage(format!("{}+debt <name>", prefix)));

        self.register(Command::new("-debt", CommandAction::Debts { adjust: Some(Direction::Decrease) })
            .with_description(format!("Remove {} from a player's debt", unit))
            .with_usage(format!("{}-debt <name>", prefix)));

        self.register(Command::new("10k", CommandAction::AddAmount)
            .with_description("Add any amount to a player's debt, negative to pay back")
            .with_usage(format!("{}10k <name> <amount>", prefix)));

        self.register(Command::new("help", CommandAction::Help)
            .with_description("Show this message")
            .with_usage(format!("{}help [command]", prefix)));
    }

    pub async fn execute(&self, invocation: &CommandInvocation) -> Result<Option<String>, CommandError> {
        let cmd = self.registry.find(&invocation.name)
            .ok_or_else(|| CommandError::NotFound(invocation.name.clone()))?;

        match cmd.action {
            CommandAction::Help => Ok(Some(self.get_help(invocation.argument()))),
            CommandAction::Debts { adjust } => {
                let adjustment = match adjust {
                    None => None,
                    Some(direction) => {
                        let name = invocation.argument()
                            .ok_or_else(|| CommandError::InvalidArgs(self.usage(cmd)))?;
                        Some(Adjustment { name, direction })
                    }
                };
                Ok(self.debts.report(adjustment).await?)
            }
            CommandAction::AddAmount => {
                let (name, raw) = invocation.argument()
                    .zip(invocation.second_argument())
                    .ok_or_else(|| CommandError::InvalidArgs(self.usage(cmd)))?;
                let amount: i64 = raw.parse().map_err(|_| {
                    CommandError::InvalidArgs(format!("{} is not a whole number\n{}", raw, self.usage(cmd)))
                })?;
                Ok(Some(self.debts.add_amount(name, amount).await?))
            }
        }
    }

    fn usage(&self, cmd: &Command) -> String {
        match &cmd.usage {
            Some(usage) => format!("Usage: {}", usage),
            None => format!("Usage: {}{}", self.prefix, cmd.name),
        }
    }

    pub fn get_help(&self, command: Option<&str>) -> String {
        if let Some(name) = command {
            let name = name.strip_prefix(self.prefix.as_str()).unwrap_or(name);
            if let Some(cmd) = self.registry.find(name) {
                let mut help = format!("{}{} - {}", self.prefix, cmd.name, cmd.description.as_deref().unwrap_or("No description"));
                help.push_str(&format!("\n{}", self.usage(cmd)));
                return help;
            }
            return format!("Command {}{} not found", self.prefix, name);
        }

        // List all commands
        let mut help = format!("{}\n\nAvailable commands:\n", self.description);
        for cmd in self.registry.all() {
            help.push_str(&format!("  {}{} - {}\n", self.prefix, cmd.name, cmd.description.as_deref().unwrap_or("")));
        }
        help
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}
