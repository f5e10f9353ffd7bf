//! Message routing.
//!
//! Every inbound event is classified exactly once: swallowed, treated as a
//! directed command, handed to the intro workflow, or fanned out. The
//! screening step is a pure function; everything stateful happens in the
//! dispatch.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::bridge::broadcast::Broadcaster;
use crate::bridge::intro::IntroWorkflow;
use crate::bridge::platform::{GuildSnapshot, InboundMessage};
use crate::bridge::seed;
use crate::common::error::Result;
use crate::oracle::LanguageOracle;
use crate::store::topology::TopologyStore;

/// Directive, in a message mentioning the bot, that designates the current
/// channel as the intro channel.
pub const SET_INTRO_DIRECTIVE: &str = "setIntro";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Authored by this bot or another bot; processing would loop.
    BotAuthor,
    EveryoneMention,
}

/// First, purely local routing decision for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Ignored(IgnoreReason),
    /// Mentions the bot directly; swallowed whether or not a directive
    /// matches, so mentioned messages never leak into fan-out.
    Command,
    /// Subject to the intro-or-fanout decision.
    Pass,
}

pub fn screen(msg: &InboundMessage) -> Screen {
    if msg.is_own || msg.author_is_bot {
        return Screen::Ignored(IgnoreReason::BotAuthor);
    }
    if msg.mentions_everyone {
        return Screen::Ignored(IgnoreReason::EveryoneMention);
    }
    if msg.mentions_bot {
        return Screen::Command;
    }
    Screen::Pass
}

pub struct Router {
    store: Arc<dyn TopologyStore>,
    oracle: Arc<dyn LanguageOracle>,
    intro: IntroWorkflow,
    broadcaster: Broadcaster,
}

impl Router {
    pub fn new(
        store: Arc<dyn TopologyStore>,
        oracle: Arc<dyn LanguageOracle>,
        intro: IntroWorkflow,
        broadcaster: Broadcaster,
    ) -> Self {
        Self {
            store,
            oracle,
            intro,
            broadcaster,
        }
    }

    /// Entry point for one inbound message. Errors are logged here and never
    /// re-enter routing for the same message.
    pub async fn handle_message(&self, msg: &InboundMessage) {
        if let Err(e) = self.dispatch(msg).await {
            error!(
                guild_id = %msg.guild_id,
                channel_id = %msg.channel_id,
                error = %e,
                "Message handling failed"
            );
        }
    }

    async fn dispatch(&self, msg: &InboundMessage) -> Result<()> {
        match screen(msg) {
            Screen::Ignored(reason) => {
                debug!(?reason, "Ignoring message");
                Ok(())
            }
            Screen::Command => self.handle_command(msg).await,
            Screen::Pass => {
                if self
                    .store
                    .is_in_intro_channel(&msg.guild_id, &msg.channel_id)
                    .await?
                {
                    self.intro.run(msg).await
                } else {
                    self.broadcaster.broadcast(msg).await
                }
            }
        }
    }

    async fn handle_command(&self, msg: &InboundMessage) -> Result<()> {
        if msg.content.contains(SET_INTRO_DIRECTIVE) {
            self.store
                .set_intro_channel(&msg.guild_id, &msg.channel_id)
                .await?;
            info!(
                guild_id = %msg.guild_id,
                channel_id = %msg.channel_id,
                "Intro channel designated"
            );
        } else {
            debug!("Unrecognized directive in mention, swallowed");
        }
        Ok(())
    }

    /// Seed the topology when the bot joins a guild.
    pub async fn handle_guild_joined(&self, snapshot: &GuildSnapshot) {
        info!(guild_id = %snapshot.id, name = %snapshot.name, "Joined guild");
        if let Err(e) = seed::seed_guild(self.store.as_ref(), self.oracle.as_ref(), snapshot).await
        {
            error!(guild_id = %snapshot.id, error = %e, "Guild seeding failed");
        }
    }

    /// Drop the topology when the bot is removed from a guild.
    pub async fn handle_guild_left(&self, guild_id: &str) {
        info!(guild_id, "Removed from guild");
        if let Err(e) = self.store.delete_guild(guild_id).await {
            error!(guild_id, error = %e, "Guild deletion failed");
        }
    }
}
