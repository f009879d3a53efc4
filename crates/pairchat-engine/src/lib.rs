// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Matchmaking and dialog-session engine.
//!
//! Users move `Idle -> Searching -> Paired -> Idle`. The [`Lobby`] facade owns
//! every structure involved and is the only mutation path; it performs no I/O
//! and is driven by a single writer.

pub mod blacklist;
pub mod error;
pub mod last_partner;
pub mod lobby;
pub mod matchmaker;
pub mod pending;
pub mod queue;
pub mod registry;

pub use blacklist::BlacklistIndex;
pub use error::MatchError;
pub use last_partner::LastPartnerTracker;
pub use lobby::{BlockOutcome, Lobby, NewSearchOutcome, RelayRoute, SearchOutcome};
pub use matchmaker::Matchmaker;
pub use pending::PendingRatings;
pub use queue::SearchQueue;
pub use registry::{LinkCheck, SessionRegistry, UserState};

#[cfg(test)]
mod tests {
    use super::*;
    use pairchat_core::{PairchatError, UserId};

    #[test]
    fn match_error_becomes_invalid_operation() {
        let err: PairchatError = MatchError::SelfPairing(UserId(9)).into();
        assert!(matches!(err, PairchatError::InvalidOperation { .. }));
        assert!(err.to_string().contains("themself"));
    }
}
