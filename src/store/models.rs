//! Persistent data model.
//!
//! Documents live in two MongoDB collections: `guilds` (one document per
//! Discord guild, holding the full language-group topology) and `messages`
//! (append-only fan-out history).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel for a guild that has not designated an intro channel yet.
pub const INTRO_CHANNEL_UNSET: &str = "-1";

/// One Discord community and its full per-language channel topology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guild {
    /// Discord guild id.
    pub id: String,
    pub name: String,
    /// Channel watched for language-onboarding messages; `"-1"` when unset.
    pub intro_channel_id: String,
    /// Id of the group used as the template when provisioning new languages.
    ///
    /// Set at seed time to the first category discovered. This replaces the
    /// implicit "first group in the list" contract.
    pub reference_group_id: String,
    /// One group per language ever provisioned; language codes are unique.
    pub groups: Vec<LanguageGroup>,
}

impl Guild {
    pub fn has_intro_channel(&self) -> bool {
        self.intro_channel_id != INTRO_CHANNEL_UNSET
    }

    /// Look up a channel by platform id across all groups.
    pub fn find_channel(&self, channel_id: &str) -> Option<&Channel> {
        self.groups
            .iter()
            .flat_map(|g| g.channels.iter())
            .find(|c| c.id == channel_id)
    }

    pub fn group_for_language(&self, language_code: &str) -> Option<&LanguageGroup> {
        self.groups.iter().find(|g| g.language_code == language_code)
    }

    pub fn reference_group(&self) -> Option<&LanguageGroup> {
        self.groups.iter().find(|g| g.id == self.reference_group_id)
    }
}

/// A category of channels all serving one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageGroup {
    /// Discord category id.
    pub id: String,
    /// Display name (language-specific).
    pub name: String,
    pub language_code: String,
    /// The group's name in the reference group, kept so the group can be
    /// matched back to its origin.
    pub english_name: String,
    /// One channel per distinct topic; `english_name` is unique within.
    pub channels: Vec<Channel>,
}

/// One topic channel within a language group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// Discord channel id.
    pub id: String,
    /// Display name (language-specific).
    pub name: String,
    pub language_code: String,
    /// Logical identity key: the corresponding channel's name in the
    /// reference group. Channels in different groups sharing this name are
    /// correspondents.
    pub english_name: String,
}

/// One durable record per fan-out message ever broadcast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Discord message id of the origin message.
    pub id: String,
    pub guild_id: String,
    /// Origin channel id.
    pub channel_id: String,
    /// Logical identity of the origin channel.
    pub english_name: String,
    /// Language of the original text.
    pub language_code: String,
    /// Original (untranslated) text.
    pub content: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_on: DateTime<Utc>,
}
