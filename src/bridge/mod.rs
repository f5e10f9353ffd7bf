//! Core bridging logic: routing, onboarding, provisioning, fan-out.

pub mod broadcast;
pub mod intro;
pub mod platform;
pub mod provision;
pub mod router;
pub mod seed;

pub use broadcast::Broadcaster;
pub use intro::IntroWorkflow;
pub use platform::{ChatPlatform, GuildSnapshot, InboundMessage};
pub use provision::{ProvisionOutcome, Provisioner};
pub use router::Router;
