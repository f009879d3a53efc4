// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Pairchat.

use thiserror::Error;

/// The primary error type used across all Pairchat adapter traits and core operations.
#[derive(Debug, Error)]
pub enum PairchatError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    ///
    /// A failed flush surfaces here; callers must not report success to the user.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Channel adapter errors (connection failure, delivery failure, bad chat IDs).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A state transition whose preconditions do not hold (self-pairing,
    /// pairing an already paired user, out-of-range rating).
    #[error("invalid operation: {reason}")]
    InvalidOperation { reason: String },

    /// Requested adapter was not found.
    #[error("adapter not found: {adapter_type}/{name}")]
    AdapterNotFound { adapter_type: String, name: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PairchatError {
    /// Wraps any storage-layer error.
    pub fn storage(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Storage { source: err.into() }
    }

    /// Builds a channel error without an underlying source.
    pub fn channel(message: impl Into<String>) -> Self {
        Self::Channel {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error means the channel can no longer deliver inbound messages.
    pub fn is_channel_closed(&self) -> bool {
        matches!(self, Self::Channel { message, .. } if message.contains("closed"))
    }
}
