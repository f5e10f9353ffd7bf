//! Configuration validation.

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Validate a loaded configuration.
///
/// Checks that required credentials are present and that the translation
/// API URL is well-formed.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.discord.token.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            message: "discord.token must not be empty".to_string(),
        });
    }

    if config.mongo.uri.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            message: "mongo.uri must not be empty".to_string(),
        });
    }
    if !config.mongo.uri.starts_with("mongodb://") && !config.mongo.uri.starts_with("mongodb+srv://")
    {
        return Err(ConfigError::ValidationError {
            message: format!("mongo.uri must be a mongodb:// URI, got '{}'", config.mongo.uri),
        });
    }

    if config.translator.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            message: "translator.api_key must not be empty".to_string(),
        });
    }
    let url = config.translator.base_url();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::ValidationError {
            message: format!("translator.api_url must be an http(s) URL, got '{}'", url),
        });
    }

    Ok(())
}
