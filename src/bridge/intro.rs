//! Language-onboarding workflow for the intro channel.
//!
//! The intro channel is the single chokepoint for group creation: a message
//! there is language-detected and answered with either an existing group, a
//! freshly provisioned one, or a fixed notice when detection is unreliable.

use std::sync::Arc;

use tracing::{info, warn};

use crate::bridge::platform::{ChatPlatform, InboundMessage};
use crate::bridge::provision::{ProvisionOutcome, Provisioner};
use crate::common::error::Result;
use crate::oracle::{names, LanguageOracle};
use crate::store::topology::TopologyStore;

/// Reply when detection yields no usable result. Never translated; there is
/// no language to translate it into.
pub const CANNOT_TRANSLATE_NOTICE: &str =
    "I'm not able to translate your message. Please send a longer message.";

pub fn already_exists_notice(language_code: &str) -> String {
    format!(
        "Detected language: {}. A channel already exists for your language.",
        names::native_name(language_code)
    )
}

pub fn created_notice(language_code: &str) -> String {
    format!(
        "Detected language: {}. A new channel has been created for you!",
        names::native_name(language_code)
    )
}

pub struct IntroWorkflow {
    store: Arc<dyn TopologyStore>,
    oracle: Arc<dyn LanguageOracle>,
    platform: Arc<dyn ChatPlatform>,
    provisioner: Arc<Provisioner>,
}

impl IntroWorkflow {
    pub fn new(
        store: Arc<dyn TopologyStore>,
        oracle: Arc<dyn LanguageOracle>,
        platform: Arc<dyn ChatPlatform>,
        provisioner: Arc<Provisioner>,
    ) -> Self {
        Self {
            store,
            oracle,
            platform,
            provisioner,
        }
    }

    pub async fn run(&self, msg: &InboundMessage) -> Result<()> {
        let detection = match self.oracle.detect(&msg.content).await {
            Ok(Some(detection)) => detection,
            Ok(None) => {
                self.platform
                    .post_message(&msg.channel_id, CANNOT_TRANSLATE_NOTICE)
                    .await?;
                return Ok(());
            }
            Err(e) => {
                warn!(error = %e, "Language detection failed for intro message");
                self.platform
                    .post_message(&msg.channel_id, CANNOT_TRANSLATE_NOTICE)
                    .await?;
                return Ok(());
            }
        };

        let language = detection.language_code;
        let reference_language = self
            .store
            .reference_group(&msg.guild_id)
            .await?
            .language_code;

        if self.store.group_exists(&msg.guild_id, &language).await? {
            let reply = self
                .localized(already_exists_notice(&language), &language, &reference_language)
                .await;
            self.platform.post_message(&msg.channel_id, &reply).await?;
            return Ok(());
        }

        info!(guild_id = %msg.guild_id, language, "Provisioning new language group from intro");
        let notice = match self.provisioner.provision(&msg.guild_id, &language).await? {
            ProvisionOutcome::Created(_) => created_notice(&language),
            ProvisionOutcome::AlreadyExists => already_exists_notice(&language),
        };
        let reply = self
            .localized(notice, &language, &reference_language)
            .await;
        self.platform.post_message(&msg.channel_id, &reply).await?;
        Ok(())
    }

    /// Translate a notice into the requester's language; reference-language
    /// requesters and translation failures get the untranslated text.
    async fn localized(&self, notice: String, to: &str, reference_language: &str) -> String {
        if to == reference_language {
            return notice;
        }
        match self.oracle.translate(&notice, to, reference_language).await {
            Ok(Some(translated)) => translated,
            Ok(None) => notice,
            Err(e) => {
                warn!(error = %e, "Notice translation failed, replying untranslated");
                notice
            }
        }
    }
}
