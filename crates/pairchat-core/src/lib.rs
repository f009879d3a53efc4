// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Pairchat, an anonymous chat-matchmaking relay.
//!
//! This crate provides the identifier newtypes, domain data types, error type
//! and adapter traits shared by every other crate in the workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PairchatError;
pub use types::{AdapterType, ChatId, HealthStatus, MessageId, StateSnapshot, UserId};

pub use traits::{ChannelAdapter, PluginAdapter, StorageAdapter};
