//! Discord implementation of the chat-platform interface.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::builder::CreateChannel;
use serenity::http::Http;
use serenity::model::channel::ChannelType;
use serenity::model::id::{ChannelId, GuildId};

use crate::bridge::platform::ChatPlatform;
use crate::common::error::PlatformError;

/// Chat platform backed by the Discord REST API.
pub struct DiscordGateway {
    http: Arc<Http>,
}

impl DiscordGateway {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

fn parse_id(value: &str) -> Result<u64, PlatformError> {
    value.parse::<u64>().map_err(|_| PlatformError::InvalidId {
        value: value.to_string(),
    })
}

#[async_trait]
impl ChatPlatform for DiscordGateway {
    async fn create_channel_group(
        &self,
        guild_id: &str,
        name: &str,
    ) -> Result<String, PlatformError> {
        let guild = GuildId::new(parse_id(guild_id)?);
        let builder = CreateChannel::new(name).kind(ChannelType::Category);
        let channel = guild
            .create_channel(&self.http, builder)
            .await
            .map_err(|e| PlatformError::ChannelCreateFailed {
                name: name.to_string(),
                source: e,
            })?;
        Ok(channel.id.to_string())
    }

    async fn create_text_channel(
        &self,
        guild_id: &str,
        name: &str,
        parent_group_id: &str,
    ) -> Result<String, PlatformError> {
        let guild = GuildId::new(parse_id(guild_id)?);
        let parent = ChannelId::new(parse_id(parent_group_id)?);
        let builder = CreateChannel::new(name)
            .kind(ChannelType::Text)
            .category(parent);
        let channel = guild
            .create_channel(&self.http, builder)
            .await
            .map_err(|e| PlatformError::ChannelCreateFailed {
                name: name.to_string(),
                source: e,
            })?;
        Ok(channel.id.to_string())
    }

    async fn post_message(&self, channel_id: &str, content: &str) -> Result<(), PlatformError> {
        let channel = ChannelId::new(parse_id(channel_id)?);
        channel
            .say(&self.http, content)
            .await
            .map_err(|e| PlatformError::PostFailed {
                channel_id: channel_id.to_string(),
                source: e,
            })?;
        Ok(())
    }
}
