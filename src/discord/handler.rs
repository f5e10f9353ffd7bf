//! Discord event handling.
//!
//! Converts serenity gateway events into the bridge's platform-neutral
//! types and invokes the router once per event.

use std::sync::Arc;

use serenity::async_trait;
use serenity::model::channel::ChannelType;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::guild::{Guild, UnavailableGuild};
use serenity::prelude::*;
use tracing::info;

use crate::bridge::platform::{CategorySnapshot, GuildSnapshot, InboundMessage, TextChannelSnapshot};
use crate::bridge::Router;

pub struct BridgeHandler {
    router: Arc<Router>,
}

impl BridgeHandler {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }
}

fn to_inbound(ctx: &Context, msg: &Message, guild_id: String) -> InboundMessage {
    let bot_id = ctx.cache.current_user().id;

    let author_name = msg
        .member
        .as_ref()
        .and_then(|m| m.nick.clone())
        .unwrap_or_else(|| msg.author.name.clone());

    InboundMessage {
        id: msg.id.to_string(),
        guild_id,
        channel_id: msg.channel_id.to_string(),
        author_name,
        is_own: msg.author.id == bot_id,
        author_is_bot: msg.author.bot,
        mentions_bot: msg.mentions.iter().any(|u| u.id == bot_id),
        mentions_everyone: msg.mention_everyone,
        content: msg.content.clone(),
        created_at: *msg.timestamp,
    }
}

/// Flatten a guild's channel map into a snapshot. Channels are ordered by
/// id (creation order) so seeding picks a stable reference group.
fn to_snapshot(guild: &Guild) -> GuildSnapshot {
    let mut categories = Vec::new();
    let mut channels = Vec::new();

    let mut sorted: Vec<_> = guild.channels.values().collect();
    sorted.sort_by_key(|c| c.id);

    for channel in sorted {
        match channel.kind {
            ChannelType::Category => categories.push(CategorySnapshot {
                id: channel.id.to_string(),
                name: channel.name.clone(),
            }),
            ChannelType::Text => channels.push(TextChannelSnapshot {
                id: channel.id.to_string(),
                name: channel.name.clone(),
                parent_id: channel.parent_id.map(|id| id.to_string()),
            }),
            _ => {}
        }
    }

    GuildSnapshot {
        id: guild.id.to_string(),
        name: guild.name.clone(),
        categories,
        channels,
    }
}

#[async_trait]
impl EventHandler for BridgeHandler {
    async fn message(&self, ctx: Context, msg: Message) {
        // Only guild messages participate in mirroring.
        let Some(guild_id) = msg.guild_id else {
            return;
        };
        if msg.content.trim().is_empty() {
            return;
        }

        let inbound = to_inbound(&ctx, &msg, guild_id.to_string());
        self.router.handle_message(&inbound).await;
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Discord bot connected as {}", ready.user.name);
    }

    async fn guild_create(&self, _ctx: Context, guild: Guild, is_new: Option<bool>) {
        // The gateway replays guild_create for every known guild at startup;
        // only genuine joins are seeded.
        if is_new != Some(true) {
            return;
        }
        let snapshot = to_snapshot(&guild);
        self.router.handle_guild_joined(&snapshot).await;
    }

    async fn guild_delete(&self, _ctx: Context, incomplete: UnavailableGuild, _full: Option<Guild>) {
        // An unavailable guild is an outage, not a removal.
        if incomplete.unavailable {
            return;
        }
        self.router.handle_guild_left(&incomplete.id.to_string()).await;
    }
}
