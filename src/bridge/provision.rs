//! Language-group provisioning.
//!
//! Clones the reference group's channel set into a new language: creates a
//! platform category named in the target language, one translated channel
//! per reference channel, backfills recent history into each, then records
//! the group in the topology store.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::bridge::platform::ChatPlatform;
use crate::common::error::Result;
use crate::oracle::{names, LanguageOracle};
use crate::store::history::{HistoryStore, BACKFILL_WINDOW};
use crate::store::models::{Channel, LanguageGroup};
use crate::store::topology::TopologyStore;

/// Result of a provisioning attempt.
#[derive(Debug)]
pub enum ProvisionOutcome {
    Created(LanguageGroup),
    /// A group for this language already exists, or another provisioner is
    /// mid-flight for the same (guild, language).
    AlreadyExists,
}

pub struct Provisioner {
    store: Arc<dyn TopologyStore>,
    history: Arc<dyn HistoryStore>,
    oracle: Arc<dyn LanguageOracle>,
    platform: Arc<dyn ChatPlatform>,
    in_flight: Arc<Mutex<HashSet<(String, String)>>>,
}

impl Provisioner {
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
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Create a new language group for the guild by cloning the reference
    /// group, with historical backfill.
    ///
    /// Platform channel-creation failures abort the attempt; already-created
    /// channels are not rolled back. Per-record backfill failures are
    /// skipped. The conditional store append ensures at most one group per
    /// language survives a race; the loser's platform channels are orphaned.
    pub async fn provision(
        &self,
        guild_id: &str,
        language_code: &str,
    ) -> Result<ProvisionOutcome> {
        let Some(_guard) =
            InFlightGuard::try_acquire(&self.in_flight, guild_id, language_code)
        else {
            info!(guild_id, language_code, "Provisioning already in flight");
            return Ok(ProvisionOutcome::AlreadyExists);
        };

        let reference = self.store.reference_group(guild_id).await?;
        let group_name = names::native_name(language_code).to_string();
        let group_id = self
            .platform
            .create_channel_group(guild_id, &group_name)
            .await?;

        let mut channels = Vec::with_capacity(reference.channels.len());
        for reference_channel in &reference.channels {
            let channel_name = match self
                .oracle
                .translate(
                    &reference_channel.name,
                    language_code,
                    &reference.language_code,
                )
                .await?
            {
                Some(translated) => translated,
                None => {
                    warn!(
                        channel = %reference_channel.name,
                        language_code,
                        "Channel name not translatable, keeping original"
                    );
                    reference_channel.name.clone()
                }
            };

            let channel_id = self
                .platform
                .create_text_channel(guild_id, &channel_name, &group_id)
                .await?;

            self.backfill(
                guild_id,
                &channel_id,
                &reference_channel.english_name,
                language_code,
            )
            .await?;

            channels.push(Channel {
                id: channel_id,
                name: channel_name,
                language_code: language_code.to_string(),
                english_name: reference_channel.english_name.clone(),
            });
        }

        let group = LanguageGroup {
            id: group_id,
            name: group_name,
            language_code: language_code.to_string(),
            english_name: reference.english_name.clone(),
            channels,
        };

        if !self.store.append_group(guild_id, &group).await? {
            warn!(
                guild_id,
                language_code,
                "Lost provisioning race; platform channels are orphaned"
            );
            return Ok(ProvisionOutcome::AlreadyExists);
        }

        info!(
            guild_id,
            language_code,
            language = names::english_name(language_code),
            channels = group.channels.len(),
            "Provisioned language group"
        );
        Ok(ProvisionOutcome::Created(group))
    }

    /// Replay the recent history window for one logical channel into a
    /// freshly created channel, oldest-first.
    async fn backfill(
        &self,
        guild_id: &str,
        channel_id: &str,
        english_name: &str,
        language_code: &str,
    ) -> Result<()> {
        let records = self
            .history
            .recent(guild_id, english_name, BACKFILL_WINDOW)
            .await?;

        for record in records {
            let translated = match self
                .oracle
                .translate(&record.content, language_code, &record.language_code)
                .await
            {
                Ok(Some(translated)) => translated,
                Ok(None) => {
                    warn!(record_id = %record.id, "Backfill record not translatable, skipping");
                    continue;
                }
                Err(e) => {
                    warn!(record_id = %record.id, error = %e, "Backfill translation failed, skipping");
                    continue;
                }
            };

            if let Err(e) = self.platform.post_message(channel_id, &translated).await {
                warn!(record_id = %record.id, error = %e, "Backfill post failed, skipping");
            }
        }

        Ok(())
    }
}

/// Advisory per-(guild, language) lock; released on drop.
struct InFlightGuard {
    set: Arc<Mutex<HashSet<(String, String)>>>,
    key: (String, String),
}

impl InFlightGuard {
    fn try_acquire(
        set: &Arc<Mutex<HashSet<(String, String)>>>,
        guild_id: &str,
        language_code: &str,
    ) -> Option<Self> {
        let key = (guild_id.to_string(), language_code.to_string());
        let mut guard = set.lock().unwrap();
        if !guard.insert(key.clone()) {
            return None;
        }
        Some(Self {
            set: Arc::clone(set),
            key,
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set.lock().unwrap().remove(&self.key);
    }
}
