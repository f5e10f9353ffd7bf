//! In-memory store implementations for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::common::error::StoreError;
use crate::store::history::HistoryStore;
use crate::store::models::{Channel, Guild, HistoryRecord, LanguageGroup};
use crate::store::topology::TopologyStore;

/// Topology store backed by a mutex-guarded map, mirroring the semantics of
/// the Mongo implementation (conditional group push included).
#[derive(Default)]
pub struct MemoryTopologyStore {
    guilds: Mutex<HashMap<String, Guild>>,
}

impl MemoryTopologyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guild(guild: Guild) -> Self {
        let store = Self::new();
        store
            .guilds
            .lock()
            .unwrap()
            .insert(guild.id.clone(), guild);
        store
    }

    pub fn guild(&self, guild_id: &str) -> Option<Guild> {
        self.guilds.lock().unwrap().get(guild_id).cloned()
    }
}

#[async_trait]
impl TopologyStore for MemoryTopologyStore {
    async fn create_guild(&self, guild: &Guild) -> Result<(), StoreError> {
        let mut guilds = self.guilds.lock().unwrap();
        if guilds.contains_key(&guild.id) {
            return Err(StoreError::DuplicateGuild {
                guild_id: guild.id.clone(),
            });
        }
        guilds.insert(guild.id.clone(), guild.clone());
        Ok(())
    }

    async fn delete_guild(&self, guild_id: &str) -> Result<(), StoreError> {
        self.guilds.lock().unwrap().remove(guild_id);
        Ok(())
    }

    async fn set_intro_channel(&self, guild_id: &str, channel_id: &str) -> Result<(), StoreError> {
        if let Some(guild) = self.guilds.lock().unwrap().get_mut(guild_id) {
            guild.intro_channel_id = channel_id.to_string();
        }
        Ok(())
    }

    async fn is_in_intro_channel(
        &self,
        guild_id: &str,
        channel_id: &str,
    ) -> Result<bool, StoreError> {
        let guilds = self.guilds.lock().unwrap();
        let guild = guilds.get(guild_id).ok_or_else(|| StoreError::GuildNotFound {
            guild_id: guild_id.to_string(),
        })?;
        Ok(guild.intro_channel_id == channel_id)
    }

    async fn group_exists(&self, guild_id: &str, language_code: &str) -> Result<bool, StoreError> {
        let guilds = self.guilds.lock().unwrap();
        Ok(guilds
            .get(guild_id)
            .map(|g| g.group_for_language(language_code).is_some())
            .unwrap_or(false))
    }

    async fn reference_group(&self, guild_id: &str) -> Result<LanguageGroup, StoreError> {
        let guilds = self.guilds.lock().unwrap();
        let guild = guilds.get(guild_id).ok_or_else(|| StoreError::GuildNotFound {
            guild_id: guild_id.to_string(),
        })?;
        guild
            .reference_group()
            .cloned()
            .ok_or_else(|| StoreError::ReferenceGroupNotFound {
                guild_id: guild_id.to_string(),
            })
    }

    async fn append_group(
        &self,
        guild_id: &str,
        group: &LanguageGroup,
    ) -> Result<bool, StoreError> {
        let mut guilds = self.guilds.lock().unwrap();
        let guild = guilds
            .get_mut(guild_id)
            .ok_or_else(|| StoreError::GuildNotFound {
                guild_id: guild_id.to_string(),
            })?;
        if guild.group_for_language(&group.language_code).is_some() {
            return Ok(false);
        }
        guild.groups.push(group.clone());
        Ok(true)
    }

    async fn find_channel(
        &self,
        guild_id: &str,
        channel_id: &str,
    ) -> Result<(Channel, String), StoreError> {
        let guilds = self.guilds.lock().unwrap();
        let guild = guilds.get(guild_id).ok_or_else(|| StoreError::GuildNotFound {
            guild_id: guild_id.to_string(),
        })?;
        guild
            .find_channel(channel_id)
            .map(|c| (c.clone(), c.language_code.clone()))
            .ok_or_else(|| StoreError::ChannelNotFound {
                guild_id: guild_id.to_string(),
                channel_id: channel_id.to_string(),
            })
    }

    async fn correspondents(
        &self,
        guild_id: &str,
        origin_channel_id: &str,
    ) -> Result<Vec<Channel>, StoreError> {
        let guilds = self.guilds.lock().unwrap();
        let guild = guilds.get(guild_id).ok_or_else(|| StoreError::GuildNotFound {
            guild_id: guild_id.to_string(),
        })?;
        let origin = guild.find_channel(origin_channel_id).ok_or_else(|| {
            StoreError::ChannelNotFound {
                guild_id: guild_id.to_string(),
                channel_id: origin_channel_id.to_string(),
            }
        })?;
        let english_name = origin.english_name.clone();

        Ok(guild
            .groups
            .iter()
            .filter(|g| !g.channels.iter().any(|c| c.id == origin_channel_id))
            .flat_map(|g| g.channels.iter())
            .filter(|c| c.english_name == english_name)
            .cloned()
            .collect())
    }
}

/// History store backed by an append-only vec.
#[derive(Default)]
pub struct MemoryHistoryStore {
    records: Mutex<Vec<HistoryRecord>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<HistoryRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, record: &HistoryRecord) -> Result<(), StoreError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn recent(
        &self,
        guild_id: &str,
        english_name: &str,
        limit: i64,
    ) -> Result<Vec<HistoryRecord>, StoreError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.guild_id == guild_id && r.english_name == english_name)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: &str, english_name: &str, content: &str) -> HistoryRecord {
        HistoryRecord {
            id: id.to_string(),
            guild_id: "g1".to_string(),
            channel_id: "c1".to_string(),
            english_name: english_name.to_string(),
            language_code: "en".to_string(),
            content: content.to_string(),
            created_on: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_recent_preserves_insertion_order() {
        let store = MemoryHistoryStore::new();
        store.append(&record("m1", "chat", "first")).await.unwrap();
        store.append(&record("m2", "chat", "second")).await.unwrap();
        store.append(&record("m3", "other", "elsewhere")).await.unwrap();

        let window = store.recent("g1", "chat", 50).await.unwrap();
        let contents: Vec<_> = window.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_recent_bounded_by_limit() {
        let store = MemoryHistoryStore::new();
        for i in 0..5 {
            store
                .append(&record(&format!("m{i}"), "chat", &format!("msg {i}")))
                .await
                .unwrap();
        }

        let window = store.recent("g1", "chat", 3).await.unwrap();
        assert_eq!(window.len(), 3);
        assert_eq!(window[0].content, "msg 0");
    }

    #[tokio::test]
    async fn test_append_allows_duplicate_ids() {
        let store = MemoryHistoryStore::new();
        let r = record("m1", "chat", "hello");
        store.append(&r).await.unwrap();
        store.append(&r).await.unwrap();

        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_create_guild_rejects_duplicates() {
        let store = MemoryTopologyStore::new();
        let guild = Guild {
            id: "g1".to_string(),
            name: "Test".to_string(),
            intro_channel_id: "-1".to_string(),
            reference_group_id: "cat1".to_string(),
            groups: Vec::new(),
        };
        store.create_guild(&guild).await.unwrap();
        let err = store.create_guild(&guild).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateGuild { .. }));
    }

    #[tokio::test]
    async fn test_delete_guild_is_idempotent() {
        let store = MemoryTopologyStore::new();
        store.delete_guild("missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_is_in_intro_channel_unknown_guild() {
        let store = MemoryTopologyStore::new();
        let err = store.is_in_intro_channel("g1", "c1").await.unwrap_err();
        assert!(matches!(err, StoreError::GuildNotFound { .. }));
    }
}
