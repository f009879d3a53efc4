// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Pairchat integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockChannel`] - Mock messaging channel with message injection and capture
//! - [`MemoryStorage`] - In-memory storage with flush failure injection
//! - [`TestHarness`] - A full bot loop wired to both

pub mod harness;
pub mod memory_storage;
pub mod mock_channel;

pub use harness::TestHarness;
pub use memory_storage::MemoryStorage;
pub use mock_channel::{EditedMessage, MockChannel};
