//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub ledger: LedgerConfig,
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LedgerConfig {
    pub base_url: String,
    /// Amount added or removed by +debt / -debt
    pub unit: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub discord: Option<DiscordConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DiscordConfig {
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "tenk-bot".to_string(),
                prefix: "!".to_string(),
                description: "10k in die Gildenbank".to_string(),
            },
            ledger: LedgerConfig {
                base_url: "https://true.torfstack.com/".to_string(),
                unit: 10_000,
            },
            adapters: AdaptersConfig {
                discord: Some(DiscordConfig { token: None }),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    /// Config file if it exists, defaults otherwise, then environment overrides
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay environment variables read through `var`
    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = var("DISCORD_TOKEN") {
            self.adapters.discord.get_or_insert_with(DiscordConfig::default).token = Some(token);
        }

        if let Some(prefix) = var("BOT_PREFIX") {
            self.bot.prefix = prefix;
        }

        if let Some(base_url) = var("LEDGER_BASE_URL") {
            self.ledger.base_url = base_url;
        }

        if let Some(unit) = var("LEDGER_UNIT") {
            self.ledger.unit = unit.trim().parse()
                .map_err(|_| ConfigError::InvalidValue(format!("LEDGER_UNIT must be an integer, got {:?}", unit)))?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::InvalidValue("bot.prefix must not be empty".to_string()));
        }

        if self.ledger.unit <= 0 {
            return Err(ConfigError::InvalidValue(format!("ledger.unit must be positive, got {}", self.ledger.unit)));
        }

        reqwest::Url::parse(&self.ledger.base_url)
            .map_err(|e| ConfigError::InvalidValue(format!("ledger.base-url {:?}: {}", self.ledger.base_url, e)))?;

        Ok(())
    }

    /// Discord token, if configured and non-empty
    pub fn discord_token(&self) -> Option<&str> {
        self.adapters.discord
            .as_ref()
            .and_then(|d| d.token.as_deref())
            .filter(|t| !t.trim().is_empty())
    }

    pub fn require_discord_token(&self) -> Result<&str, ConfigError> {
        self.discord_token()
            .ok_or_else(|| ConfigError::MissingField("DISCORD_TOKEN".to_string()))
    }
}
