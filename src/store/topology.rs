//! Topology store: the durable guild -> language-group mapping.

use async_trait::async_trait;
use mongodb::bson::{doc, to_bson};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use tracing::debug;

use crate::common::error::StoreError;
use crate::store::models::{Channel, Guild, LanguageGroup};

/// Durable mapping from a guild to its language groups and channel
/// correspondences.
#[async_trait]
pub trait TopologyStore: Send + Sync {
    /// Insert a freshly seeded guild. Fails with `DuplicateGuild` if a
    /// document with the same id already exists.
    async fn create_guild(&self, guild: &Guild) -> Result<(), StoreError>;

    /// Remove a guild. Idempotent; absence is not an error.
    async fn delete_guild(&self, guild_id: &str) -> Result<(), StoreError>;

    async fn set_intro_channel(&self, guild_id: &str, channel_id: &str) -> Result<(), StoreError>;

    /// Whether `channel_id` is the guild's intro channel. Fails with
    /// `GuildNotFound` for unknown guilds.
    async fn is_in_intro_channel(
        &self,
        guild_id: &str,
        channel_id: &str,
    ) -> Result<bool, StoreError>;

    async fn group_exists(&self, guild_id: &str, language_code: &str) -> Result<bool, StoreError>;

    /// The group used as the template when provisioning a new language.
    async fn reference_group(&self, guild_id: &str) -> Result<LanguageGroup, StoreError>;

    /// Conditionally push a new group into the guild's collection.
    ///
    /// Returns `false` without modifying anything when a group for the same
    /// language already exists, so two racing provisioners cannot both
    /// record a group.
    async fn append_group(
        &self,
        guild_id: &str,
        group: &LanguageGroup,
    ) -> Result<bool, StoreError>;

    /// Resolve a channel by platform id, returning it with its language.
    async fn find_channel(
        &self,
        guild_id: &str,
        channel_id: &str,
    ) -> Result<(Channel, String), StoreError>;

    /// Every channel in every *other* group sharing the origin channel's
    /// `english_name`.
    async fn correspondents(
        &self,
        guild_id: &str,
        origin_channel_id: &str,
    ) -> Result<Vec<Channel>, StoreError>;
}

/// MongoDB-backed topology store over the `guilds` collection.
pub struct MongoTopologyStore {
    guilds: Collection<Guild>,
}

impl MongoTopologyStore {
    pub fn new(guilds: Collection<Guild>) -> Self {
        Self { guilds }
    }

    /// Ensure the unique index on the guild id exists. Run once at startup;
    /// `create_guild` relies on it to reject duplicates.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.guilds.create_index(index).await?;
        Ok(())
    }

    async fn fetch_guild(&self, guild_id: &str) -> Result<Guild, StoreError> {
        self.guilds
            .find_one(doc! { "id": guild_id })
            .await?
            .ok_or_else(|| StoreError::GuildNotFound {
                guild_id: guild_id.to_string(),
            })
    }
}

#[async_trait]
impl TopologyStore for MongoTopologyStore {
    async fn create_guild(&self, guild: &Guild) -> Result<(), StoreError> {
        match self.guilds.insert_one(guild).await {
            Ok(_) => {
                debug!(guild_id = %guild.id, "Guild topology stored");
                Ok(())
            }
            Err(e) if is_duplicate_key(&e) => Err(StoreError::DuplicateGuild {
                guild_id: guild.id.clone(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_guild(&self, guild_id: &str) -> Result<(), StoreError> {
        self.guilds.delete_one(doc! { "id": guild_id }).await?;
        Ok(())
    }

    async fn set_intro_channel(&self, guild_id: &str, channel_id: &str) -> Result<(), StoreError> {
        self.guilds
            .update_one(
                doc! { "id": guild_id },
                doc! { "$set": { "intro_channel_id": channel_id } },
            )
            .await?;
        Ok(())
    }

    async fn is_in_intro_channel(
        &self,
        guild_id: &str,
        channel_id: &str,
    ) -> Result<bool, StoreError> {
        let guild = self.fetch_guild(guild_id).await?;
        Ok(guild.intro_channel_id == channel_id)
    }

    async fn group_exists(&self, guild_id: &str, language_code: &str) -> Result<bool, StoreError> {
        let found = self
            .guilds
            .find_one(doc! { "id": guild_id, "groups.language_code": language_code })
            .await?;
        Ok(found.is_some())
    }

    async fn reference_group(&self, guild_id: &str) -> Result<LanguageGroup, StoreError> {
        let guild = self.fetch_guild(guild_id).await?;
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
        // Surface absent guilds as NotFound rather than a silent no-op.
        self.fetch_guild(guild_id).await?;

        let group_bson = to_bson(group).map_err(mongodb::error::Error::from)?;
        let result = self
            .guilds
            .update_one(
                doc! {
                    "id": guild_id,
                    "groups.language_code": { "$ne": &group.language_code },
                },
                doc! { "$push": { "groups": group_bson } },
            )
            .await?;
        Ok(result.matched_count == 1)
    }

    async fn find_channel(
        &self,
        guild_id: &str,
        channel_id: &str,
    ) -> Result<(Channel, String), StoreError> {
        let guild = self.fetch_guild(guild_id).await?;
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
        let guild = self.fetch_guild(guild_id).await?;
        let origin = guild.find_channel(origin_channel_id).ok_or_else(|| {
            StoreError::ChannelNotFound {
                guild_id: guild_id.to_string(),
                channel_id: origin_channel_id.to_string(),
            }
        })?;

        let english_name = origin.english_name.clone();
        let origin_group = guild
            .groups
            .iter()
            .find(|g| g.channels.iter().any(|c| c.id == origin_channel_id))
            .map(|g| g.id.clone());

        Ok(guild
            .groups
            .iter()
            .filter(|g| Some(&g.id) != origin_group.as_ref())
            .flat_map(|g| g.channels.iter())
            .filter(|c| c.english_name == english_name)
            .cloned()
            .collect())
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == 11000,
        _ => false,
    }
}
