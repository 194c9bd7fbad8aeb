//! Environment-backed configuration.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial creation with token, guild, storage path, and log level

use anyhow::{anyhow, Result};
use std::env;

/// Default path for the durable reminder file.
pub const DEFAULT_REMINDERS_PATH: &str = "reminders.json";

/// Runtime configuration loaded from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token. Required.
    pub discord_token: String,
    /// Guild to register commands against in development mode. When unset,
    /// commands are registered globally.
    pub discord_guild_id: Option<String>,
    /// Path of the JSON file holding the persisted reminder set.
    pub reminders_path: String,
    /// Default log filter for env_logger.
    pub log_level: String,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| anyhow!("DISCORD_TOKEN must be set in the environment or .env file"))?;

        let discord_guild_id = env::var("DISCORD_GUILD_ID").ok().filter(|v| !v.is_empty());

        let reminders_path =
            env::var("REMINDERS_PATH").unwrap_or_else(|_| DEFAULT_REMINDERS_PATH.to_string());

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            discord_token,
            discord_guild_id,
            reminders_path,
            log_level,
        })
    }
}
