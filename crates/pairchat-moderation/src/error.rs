// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use pairchat_core::{PairchatError, UserId};
use thiserror::Error;

/// Rejected moderation requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModerationError {
    #[error("rating must be between 1 and 5 stars, got {0}")]
    InvalidStars(u8),

    #[error("user {0} is not an administrator")]
    NotAdmin(UserId),

    #[error("administrator {0} cannot be sanctioned")]
    ProtectedTarget(UserId),
}

impl From<ModerationError> for PairchatError {
    fn from(err: ModerationError) -> Self {
        PairchatError::InvalidOperation {
            reason: err.to_string(),
        }
    }
}
