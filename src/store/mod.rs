//! Persistence: topology and history stores over MongoDB.

pub mod history;
pub mod models;
pub mod topology;

#[cfg(test)]
pub mod memory;

use std::time::Duration;

use mongodb::options::ClientOptions;
use mongodb::Client;

use crate::common::error::StoreError;
use crate::config::MongoConfig;

pub use history::{HistoryStore, MongoHistoryStore, BACKFILL_WINDOW};
pub use models::{Channel, Guild, HistoryRecord, LanguageGroup, INTRO_CHANNEL_UNSET};
pub use topology::{MongoTopologyStore, TopologyStore};

/// Connect to MongoDB and build both stores.
///
/// Server selection is bounded so a dead database surfaces as a store
/// failure instead of hanging a workflow.
pub async fn connect(config: &MongoConfig) -> Result<(MongoTopologyStore, MongoHistoryStore), StoreError> {
    let mut options = ClientOptions::parse(&config.uri).await?;
    options.server_selection_timeout = Some(Duration::from_secs(10));
    options.app_name = Some("dragoman".to_string());

    let client = Client::with_options(options)?;
    let db = client.database(config.database_name());

    let topology = MongoTopologyStore::new(db.collection("guilds"));
    topology.ensure_indexes().await?;
    let history = MongoHistoryStore::new(db.collection("messages"));

    Ok((topology, history))
}
