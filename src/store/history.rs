//! History store: append-only log of fan-out messages.

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::Collection;

use crate::common::error::StoreError;
use crate::store::models::HistoryRecord;

/// Number of historical records replayed into a newly provisioned channel.
pub const BACKFILL_WINDOW: i64 = 50;

/// Append-only log of every message the broadcaster has fanned out,
/// queryable by logical channel identity.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Insert a record. Duplicates are allowed; identical messages may
    /// legitimately repeat.
    async fn append(&self, record: &HistoryRecord) -> Result<(), StoreError>;

    /// A bounded window of records for one logical channel, in insertion
    /// order ascending so backfill replays chronologically.
    async fn recent(
        &self,
        guild_id: &str,
        english_name: &str,
        limit: i64,
    ) -> Result<Vec<HistoryRecord>, StoreError>;
}

/// MongoDB-backed history store over the `messages` collection.
pub struct MongoHistoryStore {
    messages: Collection<HistoryRecord>,
}

impl MongoHistoryStore {
    pub fn new(messages: Collection<HistoryRecord>) -> Self {
        Self { messages }
    }
}

#[async_trait]
impl HistoryStore for MongoHistoryStore {
    async fn append(&self, record: &HistoryRecord) -> Result<(), StoreError> {
        self.messages.insert_one(record).await?;
        Ok(())
    }

    async fn recent(
        &self,
        guild_id: &str,
        english_name: &str,
        limit: i64,
    ) -> Result<Vec<HistoryRecord>, StoreError> {
        let cursor = self
            .messages
            .find(doc! { "guild_id": guild_id, "english_name": english_name })
            .sort(doc! { "created_on": 1, "_id": 1 })
            .limit(limit)
            .skip(0)
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
