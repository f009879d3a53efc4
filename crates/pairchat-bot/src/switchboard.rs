// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-writer owner of the [`World`].
//!
//! Every mutation goes through [`Switchboard::transact`]: the world is
//! cloned, the change applied to the clone, the clone flushed to storage,
//! and only then swapped in. A failed flush leaves the last durable state
//! in place.

use std::sync::Arc;

use pairchat_core::{PairchatError, StorageAdapter};
use pairchat_moderation::AdminRoster;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::world::World;

pub struct Switchboard {
    world: Mutex<World>,
    storage: Arc<dyn StorageAdapter + Send + Sync>,
}

impl Switchboard {
    /// Loads the persisted state and takes ownership of it.
    pub async fn load(
        storage: Arc<dyn StorageAdapter + Send + Sync>,
        roster: AdminRoster,
        max_reports: u32,
    ) -> Result<Self, PairchatError> {
        let snapshot = storage.load().await?;
        let world = World::from_snapshot(&snapshot, roster, max_reports);
        let stats = world.stats();
        info!(
            users = stats.users,
            dialogs = stats.dialogs,
            queued = stats.queued,
            "state loaded"
        );
        Ok(Self {
            world: Mutex::new(world),
            storage,
        })
    }

    /// Runs a read-only query against the current state.
    pub async fn read<R>(&self, f: impl FnOnce(&World) -> R) -> R {
        let world = self.world.lock().await;
        f(&world)
    }

    /// Applies `f` and commits it durably.
    pub async fn transact<R>(&self, f: impl FnOnce(&mut World) -> R) -> Result<R, PairchatError> {
        self.try_transact(|world| Ok(f(world))).await
    }

    /// Like [`transact`](Self::transact), but an `Err` from `f` discards the
    /// change without touching storage.
    pub async fn try_transact<R>(
        &self,
        f: impl FnOnce(&mut World) -> Result<R, PairchatError>,
    ) -> Result<R, PairchatError> {
        let mut current = self.world.lock().await;
        let mut draft = current.clone();
        let out = f(&mut draft)?;

        if let Err(e) = self.storage.flush(&draft.snapshot()).await {
            error!(error = %e, "flush failed, change discarded");
            return Err(e);
        }
        *current = draft;
        Ok(out)
    }

    pub async fn close(&self) -> Result<(), PairchatError> {
        self.storage.close().await
    }
}
