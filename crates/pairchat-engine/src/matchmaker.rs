// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! First-eligible pairing over the search queue.

use pairchat_core::UserId;
use tracing::debug;

use crate::blacklist::BlacklistIndex;
use crate::error::MatchError;
use crate::registry::{LinkCheck, SessionRegistry, UserState};
use crate::queue::SearchQueue;

/// Stateless pairing algorithm. FIFO: no scoring, only the blacklist filter.
pub struct Matchmaker;

impl Matchmaker {
    /// Pairs `user` with the earliest-enqueued eligible candidate.
    ///
    /// The queue is reconciled first. Candidates that are paired, not
    /// searching, or mutually excluded with `user` are skipped; a candidate
    /// with a stale link is healed and skipped. Returns `Ok(None)` and leaves
    /// `user` where it was when nobody qualifies.
    pub fn try_match(
        user: UserId,
        registry: &mut SessionRegistry,
        queue: &mut SearchQueue,
        blacklist: &BlacklistIndex,
    ) -> Result<Option<UserId>, MatchError> {
        if registry.is_paired(user) {
            return Err(MatchError::AlreadyPaired(user));
        }

        queue.reconcile(registry);

        let candidates: Vec<UserId> = queue.iter().collect();
        for candidate in candidates {
            if candidate == user {
                continue;
            }
            if !matches!(registry.check_link(candidate, queue), LinkCheck::Unlinked) {
                continue;
            }
            if registry.state_of(candidate) != UserState::Searching {
                continue;
            }
            if blacklist.mutually_excluded(user, candidate) {
                debug!(user = %user, candidate = %candidate, "skipped blacklisted candidate");
                continue;
            }

            registry.establish(user, candidate, queue)?;
            return Ok(Some(candidate));
        }

        Ok(None)
    }
}
