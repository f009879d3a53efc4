// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory [`StorageAdapter`] with failure injection.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use pairchat_core::traits::adapter::PluginAdapter;
use pairchat_core::traits::storage::StorageAdapter;
use pairchat_core::types::{AdapterType, HealthStatus, StateSnapshot};
use pairchat_core::PairchatError;

/// Holds the last flushed snapshot. `set_fail_flush(true)` makes every
/// flush fail without touching the stored state.
#[derive(Default)]
pub struct MemoryStorage {
    state: Mutex<StateSnapshot>,
    fail_flush: AtomicBool,
    flushes: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already persisted state.
    pub fn with_snapshot(snapshot: StateSnapshot) -> Self {
        Self {
            state: Mutex::new(snapshot),
            ..Self::default()
        }
    }

    pub fn set_fail_flush(&self, fail: bool) {
        self.fail_flush.store(fail, Ordering::SeqCst);
    }

    /// The durable state.
    pub async fn snapshot(&self) -> StateSnapshot {
        self.state.lock().await.clone()
    }

    /// Number of successful flushes.
    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PluginAdapter for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, PairchatError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PairchatError> {
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for MemoryStorage {
    async fn initialize(&self) -> Result<(), PairchatError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), PairchatError> {
        Ok(())
    }

    async fn load(&self) -> Result<StateSnapshot, PairchatError> {
        Ok(self.snapshot().await)
    }

    async fn flush(&self, snapshot: &StateSnapshot) -> Result<(), PairchatError> {
        if self.fail_flush.load(Ordering::SeqCst) {
            return Err(PairchatError::storage("injected flush failure"));
        }
        *self.state.lock().await = snapshot.clone();
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairchat_core::UserId;

    #[tokio::test]
    async fn flush_then_load_returns_the_snapshot() {
        let storage = MemoryStorage::new();
        let snapshot = StateSnapshot {
            queue: vec![UserId(1), UserId(2)],
            ..StateSnapshot::default()
        };
        storage.flush(&snapshot).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), snapshot);
        assert_eq!(storage.flush_count(), 1);
    }

    #[tokio::test]
    async fn failed_flush_keeps_previous_state() {
        let storage = MemoryStorage::with_snapshot(StateSnapshot {
            queue: vec![UserId(1)],
            ..StateSnapshot::default()
        });
        storage.set_fail_flush(true);

        let err = storage.flush(&StateSnapshot::default()).await.unwrap_err();
        assert!(matches!(err, PairchatError::Storage { .. }));
        assert_eq!(storage.snapshot().await.queue, vec![UserId(1)]);
        assert_eq!(storage.flush_count(), 0);
    }
}
