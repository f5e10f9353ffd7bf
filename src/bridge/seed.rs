//! Guild topology seeding.
//!
//! When the bot joins a guild, the platform's current category/channel
//! layout is walked into a `Guild` document. The first category discovered
//! becomes the reference group; its literal names are what `english_name`
//! traces back to everywhere else.

use tracing::info;

use crate::bridge::platform::GuildSnapshot;
use crate::common::error::Result;
use crate::oracle::LanguageOracle;
use crate::store::models::{Channel, Guild, LanguageGroup, INTRO_CHANNEL_UNSET};
use crate::store::topology::TopologyStore;

/// Language assumed for category names the oracle cannot classify.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Walk the snapshot into a guild topology and persist it.
pub async fn seed_guild(
    store: &dyn TopologyStore,
    oracle: &dyn LanguageOracle,
    snapshot: &GuildSnapshot,
) -> Result<Guild> {
    let guild = build_topology(oracle, snapshot).await?;
    store.create_guild(&guild).await?;
    info!(
        guild_id = %guild.id,
        groups = guild.groups.len(),
        "Seeded guild topology"
    );
    Ok(guild)
}

/// Build the topology without persisting it.
///
/// Channels without a parent category are skipped; each category becomes a
/// group whose language is detected from its display name, defaulting to
/// `"en"` for undetectable names.
pub async fn build_topology(
    oracle: &dyn LanguageOracle,
    snapshot: &GuildSnapshot,
) -> Result<Guild> {
    let mut groups: Vec<LanguageGroup> = Vec::new();

    for channel in &snapshot.channels {
        let Some(parent_id) = channel.parent_id.as_deref() else {
            continue;
        };
        let Some(category) = snapshot.categories.iter().find(|c| c.id == parent_id) else {
            continue;
        };

        let group_idx = match groups.iter().position(|g| g.id == category.id) {
            Some(idx) => idx,
            None => {
                let language_code = match oracle.detect(&category.name).await? {
                    Some(detection) => detection.language_code,
                    None => DEFAULT_LANGUAGE.to_string(),
                };
                groups.push(LanguageGroup {
                    id: category.id.clone(),
                    name: category.name.clone(),
                    language_code,
                    english_name: category.name.clone(),
                    channels: Vec::new(),
                });
                groups.len() - 1
            }
        };

        let language_code = groups[group_idx].language_code.clone();
        groups[group_idx].channels.push(Channel {
            id: channel.id.clone(),
            name: channel.name.clone(),
            language_code,
            english_name: channel.name.clone(),
        });
    }

    let reference_group_id = groups.first().map(|g| g.id.clone()).unwrap_or_default();

    Ok(Guild {
        id: snapshot.id.clone(),
        name: snapshot.name.clone(),
        intro_channel_id: INTRO_CHANNEL_UNSET.to_string(),
        reference_group_id,
        groups,
    })
}
