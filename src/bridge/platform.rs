//! Narrow interface to the chat platform.
//!
//! The bridge core only ever creates channel groups, creates text channels,
//! and posts messages. Everything serenity-specific lives behind this trait
//! in the `discord` module.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::common::error::PlatformError;

/// Commands the bridge issues back to the platform.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Create a channel group (Discord category). Returns the new group id.
    async fn create_channel_group(
        &self,
        guild_id: &str,
        name: &str,
    ) -> Result<String, PlatformError>;

    /// Create a text channel under a group. Returns the new channel id.
    async fn create_text_channel(
        &self,
        guild_id: &str,
        name: &str,
        parent_group_id: &str,
    ) -> Result<String, PlatformError>;

    async fn post_message(&self, channel_id: &str, content: &str) -> Result<(), PlatformError>;
}

/// One inbound chat message, already stripped of platform types.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Platform message id.
    pub id: String,
    pub guild_id: String,
    pub channel_id: String,
    pub author_name: String,
    /// Authored by this bot's own user.
    pub is_own: bool,
    /// Authored by any bot account.
    pub author_is_bot: bool,
    /// Mentions this bot's user.
    pub mentions_bot: bool,
    pub mentions_everyone: bool,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// The platform's current category/channel layout for one guild, used to
/// seed the topology when the bot joins.
#[derive(Debug, Clone)]
pub struct GuildSnapshot {
    pub id: String,
    pub name: String,
    pub categories: Vec<CategorySnapshot>,
    pub channels: Vec<TextChannelSnapshot>,
}

#[derive(Debug, Clone)]
pub struct CategorySnapshot {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct TextChannelSnapshot {
    pub id: String,
    pub name: String,
    /// Owning category, if any. Channels without one are not mirrored.
    pub parent_id: Option<String>,
}
