// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reload reconstructs everything a flush wrote.

use pairchat_config::model::StorageConfig;
use pairchat_core::types::{Gender, Profile, RatingTally, Sanction, SanctionRecord};
use pairchat_core::{StateSnapshot, StorageAdapter, UserId};
use pairchat_storage::SqliteStorage;

fn sample() -> StateSnapshot {
    let mut s = StateSnapshot::default();
    s.profiles.insert(
        UserId(1),
        Profile {
            gender: Gender::Female,
            age: 17,
        },
    );
    s.profiles.insert(
        UserId(2),
        Profile {
            gender: Gender::Male,
            age: 19,
        },
    );
    s.dialogs.insert(UserId(1), UserId(2));
    s.dialogs.insert(UserId(2), UserId(1));
    // Order is significant and not sorted.
    s.queue = vec![UserId(9), UserId(4), UserId(7)];
    s.blacklist.insert(UserId(4), vec![UserId(8), UserId(3)]);
    s.last_partners.insert(UserId(4), UserId(7));
    s.last_partners.insert(UserId(7), UserId(4));
    s.pending_ratings.insert(UserId(7), UserId(4));
    s.ratings.insert(UserId(4), RatingTally { total: 9, count: 2 });
    s.reports.insert(UserId(3), 5);
    s.sanctions.insert(UserId(3), SanctionRecord::default());
    s.sanctions.insert(
        UserId(8),
        SanctionRecord {
            ban: Some(Sanction {
                until: 1_700_086_400,
                issued_by: UserId(100),
                note: "1440 min".into(),
            }),
            mute: Some(Sanction {
                until: 0,
                issued_by: UserId(100),
                note: "indefinite".into(),
            }),
        },
    );
    s
}

async fn open(path: &std::path::Path) -> SqliteStorage {
    let storage = SqliteStorage::new(StorageConfig {
        database_path: path.display().to_string(),
        wal_mode: true,
    });
    storage.initialize().await.unwrap();
    storage
}

#[tokio::test]
async fn snapshot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.db");
    let snapshot = sample();

    let storage = open(&path).await;
    storage.flush(&snapshot).await.unwrap();
    storage.close().await.unwrap();
    drop(storage);

    let reopened = open(&path).await;
    assert_eq!(reopened.load().await.unwrap(), snapshot);
}

#[tokio::test]
async fn empty_sanction_record_is_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let storage = open(&dir.path().join("subjects.db")).await;
    storage.flush(&sample()).await.unwrap();

    let loaded = storage.load().await.unwrap();
    assert!(loaded.sanctions[&UserId(3)].is_empty());
}

#[tokio::test]
async fn queue_duplicates_round_trip_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let storage = open(&dir.path().join("dups.db")).await;
    let mut snapshot = StateSnapshot::default();
    snapshot.queue = vec![UserId(5), UserId(6), UserId(5)];
    storage.flush(&snapshot).await.unwrap();
    assert_eq!(storage.load().await.unwrap().queue, snapshot.queue);
}

#[tokio::test]
async fn one_directional_dialog_is_stored_as_is() {
    let dir = tempfile::tempdir().unwrap();
    let storage = open(&dir.path().join("stale.db")).await;
    let mut snapshot = StateSnapshot::default();
    snapshot.dialogs.insert(UserId(1), UserId(2));
    storage.flush(&snapshot).await.unwrap();

    let loaded = storage.load().await.unwrap();
    assert_eq!(loaded.dialogs.get(&UserId(1)), Some(&UserId(2)));
    assert_eq!(loaded.dialogs.get(&UserId(2)), None);
}
