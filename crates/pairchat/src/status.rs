// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pairchat status` command implementation.
//!
//! Reads the persisted state straight from the database and prints the
//! same numbers as `/stats`. The bot does not need to be running.

use std::path::Path;

use pairchat_bot::World;
use pairchat_config::model::PairchatConfig;
use pairchat_core::{PairchatError, StorageAdapter};
use pairchat_moderation::AdminRoster;
use pairchat_storage::SqliteStorage;
use serde::Serialize;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub database: String,
    pub users: usize,
    pub dialogs: usize,
    pub queued: usize,
}

/// Run the `pairchat status` command.
pub async fn run_status(config: &PairchatConfig, json: bool) -> Result<(), PairchatError> {
    let status = collect_status(config).await?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&status).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        print_status(&status);
    }
    Ok(())
}

/// Loads the snapshot and counts users, live dialogs and searchers.
pub async fn collect_status(config: &PairchatConfig) -> Result<StatusResponse, PairchatError> {
    let path = &config.storage.database_path;
    if path != ":memory:" && !Path::new(path).exists() {
        return Err(PairchatError::storage(format!(
            "no database at {path}, start the bot with `pairchat serve` first"
        )));
    }

    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;
    let snapshot = storage.load().await?;
    storage.close().await?;

    let stats = World::from_snapshot(
        &snapshot,
        AdminRoster::default(),
        config.moderation.max_reports,
    )
    .stats();
    Ok(StatusResponse {
        database: path.clone(),
        users: stats.users,
        dialogs: stats.dialogs,
        queued: stats.queued,
    })
}

fn print_status(status: &StatusResponse) {
    println!();
    println!("  pairchat status");
    println!("  {}", "-".repeat(35));
    println!("    Database:   {}", status.database);
    println!("    Users:      {}", status.users);
    println!("    In dialogs: {}", status.dialogs);
    println!("    Searching:  {}", status.queued);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairchat_core::UserId;
    use pairchat_core::types::{Gender, Profile, StateSnapshot};

    fn config_at(dir: &tempfile::TempDir) -> PairchatConfig {
        let mut config = PairchatConfig::default();
        config.storage.database_path = dir
            .path()
            .join("pairchat.db")
            .to_string_lossy()
            .into_owned();
        config
    }

    #[tokio::test]
    async fn counts_come_from_the_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_at(&dir);

        let mut snapshot = StateSnapshot::default();
        for id in 1..=4 {
            snapshot.profiles.insert(
                UserId(id),
                Profile {
                    gender: Gender::Female,
                    age: 18,
                },
            );
        }
        snapshot.dialogs.insert(UserId(1), UserId(2));
        snapshot.dialogs.insert(UserId(2), UserId(1));
        // One-directional link left over from a crash is not a dialog.
        snapshot.dialogs.insert(UserId(3), UserId(9));
        snapshot.queue.push(UserId(4));

        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await.unwrap();
        storage.flush(&snapshot).await.unwrap();
        storage.close().await.unwrap();

        let status = collect_status(&config).await.unwrap();
        assert_eq!(status.users, 4);
        assert_eq!(status.dialogs, 1);
        assert_eq!(status.queued, 1);
    }

    #[tokio::test]
    async fn missing_database_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_at(&dir);

        let err = collect_status(&config).await.unwrap_err();
        assert!(err.to_string().contains("no database"));
        assert!(!Path::new(&config.storage.database_path).exists());
    }

    #[test]
    fn status_response_serializes() {
        let resp = StatusResponse {
            database: "pairchat.db".to_string(),
            users: 10,
            dialogs: 3,
            queued: 1,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"users\":10"));
        assert!(json.contains("\"dialogs\":3"));
    }
}
