// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for Pairchat.
//!
//! WAL-mode SQLite with embedded migrations behind tokio-rusqlite's single
//! background thread. The whole [`StateSnapshot`](pairchat_core::StateSnapshot)
//! is written in one transaction per flush.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
