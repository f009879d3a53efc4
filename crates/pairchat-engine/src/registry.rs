// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authoritative map of live dialogs and per-user lifecycle state.
//!
//! Both directions of a dialog link are created and removed together by
//! [`SessionRegistry::establish`] and [`SessionRegistry::break_session`].
//! A link whose reciprocal entry is missing or points elsewhere is treated as
//! broken: reads that find one remove it instead of trusting it. Ending a
//! dialog through one whose reverse entry is missing still reports the
//! partner.

use std::collections::HashMap;

use pairchat_core::UserId;
use tracing::{debug, info, warn};

use crate::error::MatchError;
use crate::last_partner::LastPartnerTracker;
use crate::queue::SearchQueue;

/// Lifecycle tag kept in lock-step with registry and queue membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserState {
    #[default]
    Idle,
    Searching,
    Paired(UserId),
}

/// Result of inspecting a user's dialog link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkCheck {
    /// Verified reciprocal link.
    Linked(UserId),
    Unlinked,
    /// One-directional or self link. From [`SessionRegistry::check_link`] the
    /// entry has already been removed; from [`SessionRegistry::peek_link`] it
    /// still needs healing.
    Broken { stale_partner: UserId },
}

#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    links: HashMap<UserId, UserId>,
    states: HashMap<UserId, UserState>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the registry from persisted links without validating them.
    /// Users with a verified reciprocal link are tagged `Paired`; stale
    /// entries stay in place and are healed on first read.
    pub fn from_links(links: impl IntoIterator<Item = (UserId, UserId)>) -> Self {
        let mut registry = Self {
            links: links.into_iter().collect(),
            states: HashMap::new(),
        };
        let paired: Vec<(UserId, UserId)> = registry
            .links
            .iter()
            .filter(|(u, p)| u != p && registry.links.get(p) == Some(u))
            .map(|(u, p)| (*u, *p))
            .collect();
        for (user, partner) in paired {
            registry.states.insert(user, UserState::Paired(partner));
        }
        registry
    }

    /// Links `a` and `b`. Both are removed from `queue`. Nothing changes on error.
    pub fn establish(
        &mut self,
        a: UserId,
        b: UserId,
        queue: &mut SearchQueue,
    ) -> Result<(), MatchError> {
        if a == b {
            return Err(MatchError::SelfPairing(a));
        }
        if self.is_paired(a) {
            return Err(MatchError::AlreadyPaired(a));
        }
        if self.is_paired(b) {
            return Err(MatchError::AlreadyPaired(b));
        }

        queue.remove(a);
        queue.remove(b);
        self.links.insert(a, b);
        self.links.insert(b, a);
        self.states.insert(a, UserState::Paired(b));
        self.states.insert(b, UserState::Paired(a));
        info!(user = %a, partner = %b, "dialog established");
        Ok(())
    }

    /// Ends `user`'s dialog and returns the partner.
    ///
    /// Always leaves `user` idle and out of the queue, so a repeated call is
    /// a no-op returning `None`. A link whose reverse entry is missing still
    /// ends normally. Only a partner already linked to a third user is left
    /// alone, and then `None` is returned.
    pub fn break_session(
        &mut self,
        user: UserId,
        queue: &mut SearchQueue,
        tracker: &mut LastPartnerTracker,
    ) -> Option<UserId> {
        queue.remove(user);
        self.states.remove(&user);

        let partner = self.links.remove(&user)?;
        if partner == user {
            warn!(user = %user, "removed self-referencing dialog link");
            return None;
        }
        match self.links.get(&partner).copied() {
            Some(other) if other != user => {
                warn!(
                    user = %user,
                    stale_partner = %partner,
                    partner_of_partner = %other,
                    "removed dialog link to a user paired elsewhere"
                );
                return None;
            }
            Some(_) => {
                self.links.remove(&partner);
                self.states.remove(&partner);
                queue.remove(partner);
            }
            None => {
                warn!(user = %user, partner = %partner, "ending dialog with missing reverse link");
                if self.states.get(&partner) == Some(&UserState::Paired(user)) {
                    self.states.remove(&partner);
                }
            }
        }

        tracker.record(user, partner);
        info!(user = %user, partner = %partner, "dialog ended");
        Some(partner)
    }

    pub fn partner_of(&self, user: UserId) -> Option<UserId> {
        self.links.get(&user).copied()
    }

    /// Read-only link inspection.
    pub fn peek_link(&self, user: UserId) -> LinkCheck {
        match self.links.get(&user) {
            None => LinkCheck::Unlinked,
            Some(&partner) if partner != user && self.links.get(&partner) == Some(&user) => {
                LinkCheck::Linked(partner)
            }
            Some(&partner) => LinkCheck::Broken {
                stale_partner: partner,
            },
        }
    }

    /// Self-healing read: a broken link is removed, `user` is reset to idle
    /// and dropped from the queue.
    pub fn check_link(&mut self, user: UserId, queue: &mut SearchQueue) -> LinkCheck {
        let check = self.peek_link(user);
        match check {
            LinkCheck::Linked(_) => {}
            LinkCheck::Unlinked => {
                if matches!(self.state_of(user), UserState::Paired(_)) {
                    debug!(user = %user, "cleared paired tag without a link");
                    self.states.remove(&user);
                }
            }
            LinkCheck::Broken { stale_partner } => {
                self.links.remove(&user);
                self.states.remove(&user);
                queue.remove(user);
                warn!(user = %user, stale_partner = %stale_partner, "healed stale dialog link");
            }
        }
        check
    }

    /// True only for a verified reciprocal link.
    pub fn is_paired(&self, user: UserId) -> bool {
        matches!(self.peek_link(user), LinkCheck::Linked(_))
    }

    pub fn state_of(&self, user: UserId) -> UserState {
        self.states.get(&user).copied().unwrap_or_default()
    }

    pub(crate) fn mark_searching(&mut self, user: UserId) {
        self.states.insert(user, UserState::Searching);
    }

    /// Drops a `Searching` tag. Paired users keep theirs.
    pub(crate) fn mark_idle(&mut self, user: UserId) {
        if self.states.get(&user) == Some(&UserState::Searching) {
            self.states.remove(&user);
        }
    }

    /// Number of live dialogs (verified pairs).
    pub fn session_count(&self) -> usize {
        self.links
            .keys()
            .filter(|u| self.is_paired(**u))
            .count()
            / 2
    }

    /// Every stored link, stale ones included.
    pub fn links(&self) -> impl Iterator<Item = (UserId, UserId)> + '_ {
        self.links.iter().map(|(u, p)| (*u, *p))
    }
}
