//! Translated fan-out of one message to its correspondent channels.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::bridge::platform::{ChatPlatform, InboundMessage};
use crate::common::error::{Result, StoreError};
use crate::oracle::LanguageOracle;
use crate::store::history::HistoryStore;
use crate::store::models::HistoryRecord;
use crate::store::topology::TopologyStore;

pub struct Broadcaster {
    store: Arc<dyn TopologyStore>,
    history: Arc<dyn HistoryStore>,
    oracle: Arc<dyn LanguageOracle>,
    platform: Arc<dyn ChatPlatform>,
}

/// Rebroadcast content: author attribution plus a from/to language label.
pub fn format_broadcast(author: &str, from: &str, to: &str, text: &str) -> String {
    format!("**{author}** ({from} → {to}): {text}")
}

impl Broadcaster {
    pub fn new(
        store: Arc<dyn TopologyStore>,
        history: Arc<dyn HistoryStore>,
        oracle: Arc<dyn LanguageOracle>,
        platform: Arc<dyn ChatPlatform>,
    ) -> Self {
        Self {
            store,
            history,
            oracle,
            platform,
        }
    }

    /// Translate and repost the message to every correspondent channel,
    /// then record it in history exactly once.
    ///
    /// Per-correspondent translation or post failures are isolated; the
    /// message may reach zero or more correspondents, but the history
    /// append happens regardless.
    pub async fn broadcast(&self, msg: &InboundMessage) -> Result<()> {
        let (origin, origin_language) =
            match self.store.find_channel(&msg.guild_id, &msg.channel_id).await {
                Ok(found) => found,
                Err(StoreError::ChannelNotFound { .. }) => {
                    // Not a mirrored topic channel; nothing to do.
                    debug!(channel_id = %msg.channel_id, "Message outside mirrored channels");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

        let correspondents = self
            .store
            .correspondents(&msg.guild_id, &msg.channel_id)
            .await?;

        for correspondent in &correspondents {
            let translated = match self
                .oracle
                .translate(&msg.content, &correspondent.language_code, &origin_language)
                .await
            {
                Ok(Some(translated)) => translated,
                Ok(None) => {
                    warn!(
                        channel = %correspondent.id,
                        to = %correspondent.language_code,
                        "Message not translatable for correspondent, skipping"
                    );
                    continue;
                }
                Err(e) => {
                    warn!(
                        channel = %correspondent.id,
                        to = %correspondent.language_code,
                        error = %e,
                        "Translation failed for correspondent, skipping"
                    );
                    continue;
                }
            };

            let content = format_broadcast(
                &msg.author_name,
                &origin_language,
                &correspondent.language_code,
                &translated,
            );
            if let Err(e) = self.platform.post_message(&correspondent.id, &content).await {
                warn!(channel = %correspondent.id, error = %e, "Post to correspondent failed");
            }
        }

        let record = HistoryRecord {
            id: msg.id.clone(),
            guild_id: msg.guild_id.clone(),
            channel_id: msg.channel_id.clone(),
            english_name: origin.english_name.clone(),
            language_code: origin_language,
            content: msg.content.clone(),
            created_on: msg.created_at,
        };
        self.history.append(&record).await?;

        Ok(())
    }
}
