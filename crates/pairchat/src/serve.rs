// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pairchat serve` command implementation.
//!
//! Opens SQLite storage, restores the persisted state, connects the
//! Telegram channel and runs the bot loop until a shutdown signal arrives.

use std::sync::Arc;

use pairchat_bot::{BotLoop, Switchboard, shutdown};
use pairchat_config::model::PairchatConfig;
use pairchat_core::types::HealthStatus;
use pairchat_core::{ChannelAdapter, PairchatError, PluginAdapter, StorageAdapter, UserId};
use pairchat_moderation::AdminRoster;
use pairchat_storage::SqliteStorage;
use pairchat_telegram::TelegramChannel;
use tracing::{info, warn};

/// Runs the `pairchat serve` command.
pub async fn run_serve(config: PairchatConfig) -> Result<(), PairchatError> {
    init_tracing(&config.bot.log_level);

    info!(bot_name = config.bot.name.as_str(), "starting pairchat serve");

    // Initialize storage.
    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;
    let storage: Arc<dyn StorageAdapter + Send + Sync> = Arc::new(storage);

    let roster = AdminRoster::new(config.moderation.admins.iter().copied().map(UserId));
    let switchboard =
        Arc::new(Switchboard::load(storage, roster, config.moderation.max_reports).await?);

    if config.moderation.admins.is_empty() {
        warn!("no admins configured, moderation actions are unavailable");
    }
    if config.moderation.log_chat_id.is_none() {
        warn!("no moderation log chat configured, reports are only counted");
    }

    let mut channel = TelegramChannel::new(config.telegram.clone())?;
    channel.connect().await?;
    match channel.health_check().await {
        Ok(HealthStatus::Healthy) => info!("telegram channel healthy"),
        Ok(status) => warn!(?status, "telegram channel not fully healthy"),
        Err(e) => warn!(error = %e, "telegram health check failed"),
    }

    // Install signal handler.
    let cancel = shutdown::install_signal_handler();

    let mut bot = BotLoop::new(Box::new(channel), switchboard, config);
    bot.run(cancel).await?;

    log_heap_usage();
    info!("pairchat serve shutdown complete");
    Ok(())
}

#[cfg(not(target_env = "msvc"))]
fn log_heap_usage() {
    let _ = tikv_jemalloc_ctl::epoch::advance();
    let allocated = tikv_jemalloc_ctl::stats::allocated::read().unwrap_or(0);
    let resident = tikv_jemalloc_ctl::stats::resident::read().unwrap_or(0);
    info!(
        allocated_kb = allocated / 1024,
        resident_kb = resident / 1024,
        "heap usage at shutdown"
    );
}

#[cfg(target_env = "msvc")]
fn log_heap_usage() {}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

/// Our crates at the configured level, everything else at `warn`.
fn default_filter(log_level: &str) -> String {
    [
        "pairchat",
        "pairchat_bot",
        "pairchat_engine",
        "pairchat_moderation",
        "pairchat_storage",
        "pairchat_telegram",
    ]
    .iter()
    .map(|target| format!("{target}={log_level}"))
    .chain(std::iter::once("warn".to_string()))
    .collect::<Vec<_>>()
    .join(",")
}
