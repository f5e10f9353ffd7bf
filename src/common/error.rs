//! Error types for the application.

use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Persistence errors for the topology and history stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Guild {guild_id} not found")]
    GuildNotFound { guild_id: String },

    #[error("Channel {channel_id} not found in guild {guild_id}")]
    ChannelNotFound {
        guild_id: String,
        channel_id: String,
    },

    #[error("Reference group not found for guild {guild_id}")]
    ReferenceGroupNotFound { guild_id: String },

    #[error("Guild {guild_id} already exists")]
    DuplicateGuild { guild_id: String },

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

/// Language detection / translation errors.
///
/// A provider answer of "no usable result" is not an error; `detect` and
/// `translate` return `Option` for that case. These variants cover the call
/// itself failing.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Translation API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Malformed translation API response: {message}")]
    MalformedResponse { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Chat-platform errors (channel creation, message posting).
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Failed to create channel '{name}': {source}")]
    ChannelCreateFailed {
        name: String,
        #[source]
        source: serenity::Error,
    },

    #[error("Failed to post to channel {channel_id}: {source}")]
    PostFailed {
        channel_id: String,
        #[source]
        source: serenity::Error,
    },

    #[error("Invalid platform id: {value}")]
    InvalidId { value: String },
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
