// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! Every struct uses `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of being ignored.

use serde::{Deserialize, Serialize};

/// Top-level Pairchat configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PairchatConfig {
    #[serde(default)]
    pub bot: BotConfig,

    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub moderation: ModerationConfig,

    #[serde(default)]
    pub registration: RegistrationConfig,
}

/// Bot identity and logging.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name used in logs and the `/info` text.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_bot_name() -> String {
    "pairchat".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Bot API token. Required by `serve`.
    #[serde(default)]
    pub bot_token: Option<String>,
}

/// SQLite storage.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL journal mode.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    "pairchat.db".to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Administrators, the moderation log chat and sanction defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModerationConfig {
    /// Telegram user IDs allowed to issue sanctions. Exempt from them too.
    #[serde(default)]
    pub admins: Vec<i64>,

    /// Chat that receives reports. Reports are only counted when unset.
    #[serde(default)]
    pub log_chat_id: Option<i64>,

    /// Report count at which a sanction record is opened for review.
    #[serde(default = "default_max_reports")]
    pub max_reports: u32,

    #[serde(default = "default_ban_minutes")]
    pub ban_minutes: u32,

    #[serde(default = "default_mute_minutes")]
    pub mute_minutes: u32,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            admins: Vec::new(),
            log_chat_id: None,
            max_reports: default_max_reports(),
            ban_minutes: default_ban_minutes(),
            mute_minutes: default_mute_minutes(),
        }
    }
}

fn default_max_reports() -> u32 {
    5
}

fn default_ban_minutes() -> u32 {
    24 * 60
}

fn default_mute_minutes() -> u32 {
    30
}

/// Age bounds offered during registration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrationConfig {
    #[serde(default = "default_min_age")]
    pub min_age: u8,

    #[serde(default = "default_max_age")]
    pub max_age: u8,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            min_age: default_min_age(),
            max_age: default_max_age(),
        }
    }
}

fn default_min_age() -> u8 {
    16
}

fn default_max_age() -> u8 {
    20
}
