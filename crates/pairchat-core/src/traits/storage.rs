// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends (SQLite, in-memory).

use async_trait::async_trait;

use crate::error::PairchatError;
use crate::traits::adapter::PluginAdapter;
use crate::types::StateSnapshot;

/// Adapter for storage and persistence backends.
///
/// The relay flushes a full [`StateSnapshot`] after every mutating action and
/// treats the action as complete only once `flush` has returned `Ok`.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), PairchatError>;

    /// Closes the storage backend, flushing pending writes and releasing connections.
    async fn close(&self) -> Result<(), PairchatError>;

    /// Reloads the last durably flushed state. Empty storage yields the default snapshot.
    async fn load(&self) -> Result<StateSnapshot, PairchatError>;

    /// Durably replaces the stored state with `snapshot`.
    async fn flush(&self, snapshot: &StateSnapshot) -> Result<(), PairchatError>;
}
