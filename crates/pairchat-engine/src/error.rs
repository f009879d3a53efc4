// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rejected state transitions.

use pairchat_core::{PairchatError, UserId};
use thiserror::Error;

/// A pairing request whose preconditions do not hold. Nothing is applied
/// when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("user {0} cannot be paired with themself")]
    SelfPairing(UserId),

    #[error("user {0} is already in a dialog")]
    AlreadyPaired(UserId),
}

impl From<MatchError> for PairchatError {
    fn from(err: MatchError) -> Self {
        PairchatError::InvalidOperation {
            reason: err.to_string(),
        }
    }
}
