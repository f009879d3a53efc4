// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection setup.
//!
//! All statements run on tokio-rusqlite's single background thread, so the
//! one [`Database`] handle is also the only writer.

use pairchat_core::PairchatError;
use tracing::debug;

use crate::migrations;

pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (creating if needed) the database, applies PRAGMAs and migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, PairchatError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(PairchatError::storage)?;

        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                // journal_mode returns a row, so it cannot go through execute_batch.
                conn.query_row("PRAGMA journal_mode = WAL;", [], |_| Ok(()))?;
            }
            conn.execute_batch(
                "PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| -> Result<Result<(), PairchatError>, rusqlite::Error> {
            Ok(migrations::run_migrations(conn))
        })
        .await
        .map_err(map_tr_err)??;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }
}

pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> PairchatError {
    PairchatError::storage(e)
}
