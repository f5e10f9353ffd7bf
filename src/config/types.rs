//! Configuration type definitions.

use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub discord: DiscordConfig,
    pub mongo: MongoConfig,
    pub translator: TranslatorConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    pub token: String,
}

/// MongoDB connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    /// Database name; collections `guilds` and `messages` live here.
    pub database: Option<String>,
}

/// Translation provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslatorConfig {
    pub api_key: String,
    /// Base URL of the translation API. Overridable for testing.
    pub api_url: Option<String>,
}

impl MongoConfig {
    pub fn database_name(&self) -> &str {
        self.database.as_deref().unwrap_or("dragoman")
    }
}

impl TranslatorConfig {
    pub fn base_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or("https://translation.googleapis.com")
    }
}
