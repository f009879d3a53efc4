// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use pairchat_bot::Switchboard;
use pairchat_core::types::{Gender, Profile};
use pairchat_core::{PairchatError, StateSnapshot, StorageAdapter, UserId};
use pairchat_engine::{SearchOutcome, UserState};
use pairchat_moderation::AdminRoster;
use pairchat_test_utils::MemoryStorage;

const A: UserId = UserId(1);
const B: UserId = UserId(2);

async fn switchboard(storage: &Arc<MemoryStorage>) -> Switchboard {
    let storage: Arc<dyn StorageAdapter + Send + Sync> = storage.clone();
    Switchboard::load(storage, AdminRoster::default(), 5)
        .await
        .unwrap()
}

#[tokio::test]
async fn transact_flushes_before_returning() {
    let storage = Arc::new(MemoryStorage::new());
    let board = switchboard(&storage).await;

    let outcome = board
        .transact(|w| w.lobby.search(A))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(outcome, SearchOutcome::Waiting);
    assert_eq!(storage.snapshot().await.queue, vec![A]);
    assert_eq!(storage.flush_count(), 1);
}

#[tokio::test]
async fn failed_flush_rolls_back() {
    let storage = Arc::new(MemoryStorage::new());
    let board = switchboard(&storage).await;
    board.transact(|w| w.lobby.search(A)).await.unwrap().unwrap();

    storage.set_fail_flush(true);
    let err = board.transact(|w| w.lobby.search(B)).await.unwrap_err();
    assert!(matches!(err, PairchatError::Storage { .. }));

    // Neither memory nor storage saw the pairing.
    assert_eq!(board.read(|w| w.lobby.state_of(A)).await, UserState::Searching);
    assert_eq!(board.read(|w| w.lobby.session_count()).await, 0);
    assert_eq!(storage.snapshot().await.queue, vec![A]);

    storage.set_fail_flush(false);
    let outcome = board.transact(|w| w.lobby.search(B)).await.unwrap().unwrap();
    assert_eq!(outcome, SearchOutcome::Matched(A));
}

#[tokio::test]
async fn try_transact_error_skips_flush() {
    let storage = Arc::new(MemoryStorage::new());
    let board = switchboard(&storage).await;

    let result: Result<(), _> = board
        .try_transact(|w| {
            w.moderation.profiles.set(
                A,
                Profile {
                    gender: Gender::Male,
                    age: 17,
                },
            );
            w.moderation.ratings.record(B, 9)?;
            Ok(())
        })
        .await;

    assert!(result.is_err());
    assert_eq!(storage.flush_count(), 0);
    assert!(board.read(|w| w.moderation.profiles.get(A)).await.is_none());
}

#[tokio::test]
async fn load_restores_persisted_state() {
    let mut snapshot = StateSnapshot::default();
    snapshot.dialogs.insert(A, B);
    snapshot.dialogs.insert(B, A);
    let storage = Arc::new(MemoryStorage::with_snapshot(snapshot));

    let board = switchboard(&storage).await;
    assert_eq!(board.read(|w| w.lobby.partner_of(A)).await, Some(B));
    assert_eq!(board.read(|w| w.stats().dialogs).await, 1);
}
