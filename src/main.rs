//! Dragoman - translated channel mirroring for Discord
//!
//! A bot that mirrors a community's text conversations across per-language
//! channel categories: messages are detected, translated, and rebroadcast
//! into every sibling channel serving a different language, with history
//! backfilled when a new language category is provisioned.

mod bridge;
mod common;
mod config;
mod discord;
mod oracle;
mod store;

use std::sync::Arc;

use anyhow::Result;
use serenity::http::Http;
use serenity::prelude::*;
use tokio::signal;
use tracing::{error, info};

use bridge::{Broadcaster, IntroWorkflow, Provisioner, Router};
use config::env::get_config_path;
use discord::{BridgeHandler, DiscordGateway};
use oracle::GoogleTranslator;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Dragoman v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = get_config_path();
    info!("Loading configuration from {}...", config_path);

    let config = config::load_and_validate(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!("Please ensure {} exists and is properly formatted.", config_path);
        e
    })?;

    info!("Configuration loaded successfully");
    info!("  Mongo database: {}", config.mongo.database_name());
    info!("  Translator: {}", config.translator.base_url());

    // ============================================================
    // Wire up stores, oracle, and platform
    // ============================================================

    info!("Connecting to MongoDB...");
    let (topology, history) = store::connect(&config.mongo).await?;
    let topology: Arc<dyn store::TopologyStore> = Arc::new(topology);
    let history: Arc<dyn store::HistoryStore> = Arc::new(history);
    info!("Connected to MongoDB");

    let translator: Arc<dyn oracle::LanguageOracle> =
        Arc::new(GoogleTranslator::new(&config.translator)?);

    let http = Arc::new(Http::new(&config.discord.token));
    let platform: Arc<dyn bridge::ChatPlatform> = Arc::new(DiscordGateway::new(http));

    let provisioner = Arc::new(Provisioner::new(
        topology.clone(),
        history.clone(),
        translator.clone(),
        platform.clone(),
    ));
    let intro = IntroWorkflow::new(
        topology.clone(),
        translator.clone(),
        platform.clone(),
        provisioner,
    );
    let broadcaster = Broadcaster::new(
        topology.clone(),
        history,
        translator.clone(),
        platform,
    );
    let router = Arc::new(Router::new(topology, translator, intro, broadcaster));

    // ============================================================
    // Start Discord client
    // ============================================================

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord.token, intents)
        .event_handler(BridgeHandler::new(router))
        .await?;

    info!("Starting Discord client...");
    tokio::select! {
        result = client.start() => {
            if let Err(e) = result {
                error!("Discord client error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
            client.shard_manager.shutdown_all().await;
        }
    }

    info!("Exiting...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
