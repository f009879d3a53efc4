// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of [`StorageAdapter`].

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use pairchat_config::model::StorageConfig;
use pairchat_core::{
    AdapterType, HealthStatus, PairchatError, PluginAdapter, StateSnapshot, StorageAdapter,
};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed state store. The database is opened by
/// [`StorageAdapter::initialize`], not by [`SqliteStorage::new`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, PairchatError> {
        self.db.get().ok_or_else(|| {
            PairchatError::storage("storage not initialized, call initialize() first")
        })
    }

    async fn checkpoint(db: &Database) -> Result<(), PairchatError> {
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.query_row("PRAGMA wal_checkpoint(TRUNCATE);", [], |_| Ok(()))?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, PairchatError> {
        self.db()?
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PairchatError> {
        if let Some(db) = self.db.get() {
            Self::checkpoint(db).await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), PairchatError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db
            .set(db)
            .map_err(|_| PairchatError::storage("storage already initialized"))?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), PairchatError> {
        Self::checkpoint(self.db()?).await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    async fn load(&self) -> Result<StateSnapshot, PairchatError> {
        queries::snapshot::load(self.db()?).await
    }

    async fn flush(&self, snapshot: &StateSnapshot) -> Result<(), PairchatError> {
        queries::snapshot::flush(self.db()?, snapshot).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairchat_core::UserId;
    use tempfile::tempdir;

    fn make_config(path: &std::path::Path) -> StorageConfig {
        StorageConfig {
            database_path: path.display().to_string(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn adapter_metadata() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(make_config(&dir.path().join("meta.db")));
        assert_eq!(storage.name(), "sqlite");
        assert_eq!(storage.version(), semver::Version::new(0, 1, 0));
        assert_eq!(storage.adapter_type(), AdapterType::Storage);
    }

    #[tokio::test]
    async fn initialize_creates_file_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("init.db");
        let storage = SqliteStorage::new(make_config(&path));

        storage.initialize().await.unwrap();
        assert!(path.exists());
        assert!(storage.initialize().await.is_err());
    }

    #[tokio::test]
    async fn health_check_requires_initialize() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(make_config(&dir.path().join("health.db")));
        assert!(storage.health_check().await.is_err());
        storage.initialize().await.unwrap();
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn flush_before_initialize_fails() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(make_config(&dir.path().join("early.db")));
        let err = storage.flush(&StateSnapshot::default()).await.unwrap_err();
        assert!(matches!(err, PairchatError::Storage { .. }));
    }

    #[tokio::test]
    async fn fresh_database_loads_empty_snapshot() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(make_config(&dir.path().join("empty.db")));
        storage.initialize().await.unwrap();
        assert_eq!(storage.load().await.unwrap(), StateSnapshot::default());
    }

    #[tokio::test]
    async fn flush_replaces_previous_contents() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(make_config(&dir.path().join("replace.db")));
        storage.initialize().await.unwrap();

        let mut first = StateSnapshot::default();
        first.queue = vec![UserId(1), UserId(2)];
        storage.flush(&first).await.unwrap();

        let mut second = StateSnapshot::default();
        second.queue = vec![UserId(3)];
        storage.flush(&second).await.unwrap();

        assert_eq!(storage.load().await.unwrap().queue, vec![UserId(3)]);
        storage.shutdown().await.unwrap();
    }
}
