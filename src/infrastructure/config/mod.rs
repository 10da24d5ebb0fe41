//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::application::services::economy_service::AccountDefaults;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub economy: EconomyConfig,
    pub owner: OwnerConfig,
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EconomyConfig {
    pub database_path: PathBuf,
    /// Wallet balance given to an account created on first inquiry.
    pub starting_wallet: i64,
    pub starting_vault: i64,
}

/// Owner configuration for privileged commands
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OwnerConfig {
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "vault-bot".to_string(),
                prefix: ".".to_string(),
            },
            economy: EconomyConfig {
                database_path: PathBuf::from("databases/money.db"),
                starting_wallet: 100,
                starting_vault: 0,
            },
            owner: OwnerConfig { user_id: None },
            adapters: AdaptersConfig {
                console: Some(ConsoleConfig { enabled: true }),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();

        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            config.bot.prefix = prefix;
        }

        if let Ok(owner) = std::env::var("OWNER_USER_ID") {
            match owner.parse() {
                Ok(id) => config.owner.user_id = Some(id),
                Err(_) => tracing::warn!("OWNER_USER_ID is not numeric, ignoring"),
            }
        }

        if let Ok(path) = std::env::var("VAULT_BOT_DB") {
            config.economy.database_path = PathBuf::from(path);
        }

        config
    }

    pub fn account_defaults(&self) -> AccountDefaults {
        AccountDefaults {
            wallet: self.economy.starting_wallet,
            vault: self.economy.starting_vault,
        }
    }
}
