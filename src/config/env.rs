//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `DRAGOMAN_DISCORD_TOKEN` - Discord bot token
//! - `DRAGOMAN_MONGO_URI` - MongoDB connection string
//! - `DRAGOMAN_MONGO_DATABASE` - MongoDB database name
//! - `DRAGOMAN_TRANSLATOR_API_KEY` - Translation API key
//! - `DRAGOMAN_TRANSLATOR_API_URL` - Translation API base URL

use std::env;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "DRAGOMAN";

/// Apply environment variable overrides to a config.
///
/// This allows sensitive values like tokens and API keys to be
/// provided via environment variables instead of the config file.
pub fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(token) = env::var(format!("{}_DISCORD_TOKEN", ENV_PREFIX)) {
        config.discord.token = token;
    }

    if let Ok(uri) = env::var(format!("{}_MONGO_URI", ENV_PREFIX)) {
        config.mongo.uri = uri;
    }
    if let Ok(database) = env::var(format!("{}_MONGO_DATABASE", ENV_PREFIX)) {
        config.mongo.database = Some(database);
    }

    if let Ok(api_key) = env::var(format!("{}_TRANSLATOR_API_KEY", ENV_PREFIX)) {
        config.translator.api_key = api_key;
    }
    if let Ok(api_url) = env::var(format!("{}_TRANSLATOR_API_URL", ENV_PREFIX)) {
        config.translator.api_url = Some(api_url);
    }

    config
}

/// Get the config file path from environment or use default.
///
/// Checks `DRAGOMAN_CONFIG` environment variable, otherwise returns "dragoman.conf".
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX)).unwrap_or_else(|_| "dragoman.conf".to_string())
}
