use clap::{Parser, Subcommand};
use std::sync::Arc;

mod domain;
mod application;
mod infrastructure;
#[cfg(test)]
mod testutil;

use application::errors::{BotError, ConfigError};
use application::messaging::MessageDispatcher;
use application::services::{CommandService, DebtService};
use infrastructure::adapters::console::ConsoleAdapter;
use infrastructure::adapters::discord::DiscordAdapter;
use infrastructure::config::Config;
use infrastructure::ledger::HttpLedgerClient;

#[derive(Parser)]
#[command(name = "tenk-bot")]
#[command(about = "10k in die Gildenbank - Discord bot for the guild debt ledger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Read commands from stdin instead of connecting to Discord
    #[arg(long)]
    console: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot (default)
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_bot(&cli.config, cli.console),
        Commands::Version => {
            println!("tenk-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
    };

    if let Err(e) = result {
        if matches!(e, BotError::Config(ConfigError::MissingField(_))) {
            eprintln!("No token found");
        } else {
            eprintln!("{}", e);
        }
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run_bot(config_path: &str, console: bool) -> Result<(), BotError> {
    let config = Config::resolve(config_path)?;

    // Only Discord needs a token; check before doing anything else
    let token = if console {
        None
    } else {
        Some(config.require_discord_token()?.to_string())
    };

    tracing::info!("Starting {} against {}", config.bot.name, config.ledger.base_url);

    let ledger = HttpLedgerClient::new(&config.ledger.base_url)
        .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
    let debts = DebtService::new(Arc::new(ledger), config.ledger.unit);

    let mut commands = CommandService::new(&config.bot.prefix, &config.bot.description, debts);
    commands.register_defaults();
    let dispatcher = Arc::new(MessageDispatcher::new(commands));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;

    rt.block_on(async {
        match token {
            Some(token) => DiscordAdapter::new(token).run(dispatcher).await,
            None => Arc::new(ConsoleAdapter::new()).run(dispatcher).await,
        }
    })
}

fn init_config(path: &str) -> Result<(), BotError> {
    if std::path::Path::new(path).exists() {
        println!("{} already exists, not overwriting", path);
        return Ok(());
    }

    let yaml = Config::default().to_yaml()?;
    std::fs::write(path, yaml)
        .map_err(|e| BotError::Internal(format!("Failed to write {}: {}", path, e)))?;

    println!("Wrote default config to {}", path);
    println!("Set DISCORD_TOKEN or adapters.discord.token before running");
    Ok(())
}
