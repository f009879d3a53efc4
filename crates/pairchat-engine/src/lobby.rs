// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The session engine facade.
//!
//! [`Lobby`] owns the registry, queue, blacklist and partner pointers, and is
//! the only way callers mutate them. Every cross-structure invariant is kept
//! here: symmetric links, no user both queued and paired, state tags matching
//! membership.

use pairchat_core::{StateSnapshot, UserId};
use tracing::debug;

use crate::blacklist::BlacklistIndex;
use crate::error::MatchError;
use crate::last_partner::LastPartnerTracker;
use crate::matchmaker::Matchmaker;
use crate::pending::PendingRatings;
use crate::queue::SearchQueue;
use crate::registry::{LinkCheck, SessionRegistry, UserState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The user is already in a dialog with this partner.
    AlreadyPaired(UserId),
    AlreadySearching,
    Matched(UserId),
    /// Queued, no eligible partner yet.
    Waiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSearchOutcome {
    /// Partner of the dialog that was ended first, if any.
    pub ended: Option<UserId>,
    pub search: SearchOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockOutcome {
    /// `false` when the peer was already blocked or is the user themself.
    pub added: bool,
    /// Set when blocking broke the live dialog with that peer.
    pub ended: Option<UserId>,
}

/// Where a message from a user should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayRoute {
    Deliver(UserId),
    NotPaired,
    /// A stale link was found. Nothing may be delivered to `stale_partner`.
    Healed { stale_partner: UserId },
}

#[derive(Debug, Clone, Default)]
pub struct Lobby {
    registry: SessionRegistry,
    queue: SearchQueue,
    blacklist: BlacklistIndex,
    last_partners: LastPartnerTracker,
    pending: PendingRatings,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues `user` and tries to pair them immediately.
    pub fn search(&mut self, user: UserId) -> Result<SearchOutcome, MatchError> {
        if let LinkCheck::Linked(partner) = self.registry.check_link(user, &mut self.queue) {
            return Ok(SearchOutcome::AlreadyPaired(partner));
        }
        if self.queue.contains(user) && self.registry.state_of(user) == UserState::Searching {
            return Ok(SearchOutcome::AlreadySearching);
        }

        self.queue.enqueue(user);
        self.registry.mark_searching(user);
        debug!(user = %user, queued = self.queue.len(), "user searching");

        let matched = Matchmaker::try_match(
            user,
            &mut self.registry,
            &mut self.queue,
            &self.blacklist,
        )?;
        Ok(match matched {
            Some(partner) => SearchOutcome::Matched(partner),
            None => SearchOutcome::Waiting,
        })
    }

    /// Ends the dialog or cancels the search. When a dialog actually ends,
    /// both sides owe each other a rating.
    pub fn end(&mut self, user: UserId) -> Option<UserId> {
        let partner =
            self.registry
                .break_session(user, &mut self.queue, &mut self.last_partners);
        if let Some(partner) = partner {
            self.pending.assign(user, partner);
        }
        partner
    }

    /// Drops `user` from the search queue without touching a dialog.
    /// Returns whether they were queued.
    pub fn withdraw(&mut self, user: UserId) -> bool {
        let queued = self.queue.remove(user);
        self.registry.mark_idle(user);
        if queued {
            debug!(user = %user, queued = self.queue.len(), "user withdrawn from search");
        }
        queued
    }

    /// End, reset, enqueue and match as one step.
    pub fn new_search(&mut self, user: UserId) -> Result<NewSearchOutcome, MatchError> {
        let ended = self.end(user);
        let search = self.search(user)?;
        Ok(NewSearchOutcome { ended, search })
    }

    /// Blocks `peer` for `user`, breaking their dialog if they are paired.
    pub fn block(&mut self, user: UserId, peer: UserId) -> BlockOutcome {
        let added = self.blacklist.block(user, peer);
        let ended = match self.registry.peek_link(user) {
            LinkCheck::Linked(partner) if partner == peer => self.end(user),
            _ => None,
        };
        BlockOutcome { added, ended }
    }

    pub fn unblock(&mut self, user: UserId, peer: UserId) -> bool {
        self.blacklist.unblock(user, peer)
    }

    /// Resolves the relay target, healing a stale link on the way.
    pub fn relay_route(&mut self, user: UserId) -> RelayRoute {
        route(self.registry.check_link(user, &mut self.queue))
    }

    /// Same as [`relay_route`](Self::relay_route) without healing.
    pub fn peek_relay_route(&self, user: UserId) -> RelayRoute {
        route(self.registry.peek_link(user))
    }

    pub fn take_pending_rating(&mut self, user: UserId) -> Option<UserId> {
        self.pending.take(user)
    }

    pub fn skip_rating(&mut self, user: UserId) -> bool {
        self.pending.skip(user)
    }

    pub fn pending_rating(&self, user: UserId) -> Option<UserId> {
        self.pending.peek(user)
    }

    /// Verified partner only.
    pub fn partner_of(&self, user: UserId) -> Option<UserId> {
        match self.registry.peek_link(user) {
            LinkCheck::Linked(partner) => Some(partner),
            _ => None,
        }
    }

    pub fn state_of(&self, user: UserId) -> UserState {
        self.registry.state_of(user)
    }

    pub fn last_partner(&self, user: UserId) -> Option<UserId> {
        self.last_partners.last_partner(user)
    }

    pub fn blacklist(&self) -> &BlacklistIndex {
        &self.blacklist
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn session_count(&self) -> usize {
        self.registry.session_count()
    }

    pub fn queued(&self) -> impl Iterator<Item = UserId> + '_ {
        self.queue.iter()
    }

    /// Rebuilds the engine from persisted state. Inconsistencies are kept
    /// as-is and healed lazily.
    pub fn restore(snapshot: &StateSnapshot) -> Self {
        let mut registry =
            SessionRegistry::from_links(snapshot.dialogs.iter().map(|(u, p)| (*u, *p)));
        let queue = SearchQueue::from_raw(snapshot.queue.clone());
        for user in queue.iter() {
            if !registry.is_paired(user) {
                registry.mark_searching(user);
            }
        }
        Self {
            registry,
            queue,
            blacklist: BlacklistIndex::from_lists(
                snapshot
                    .blacklist
                    .iter()
                    .map(|(u, peers)| (*u, peers.iter().copied())),
            ),
            last_partners: LastPartnerTracker::from_pairs(
                snapshot.last_partners.iter().map(|(u, p)| (*u, *p)),
            ),
            pending: PendingRatings::from_pairs(
                snapshot.pending_ratings.iter().map(|(u, p)| (*u, *p)),
            ),
        }
    }

    /// Writes the engine's part of the snapshot, replacing what was there.
    pub fn export(&self, snapshot: &mut StateSnapshot) {
        snapshot.dialogs = self.registry.links().collect();
        snapshot.queue = self.queue.iter().collect();
        snapshot.blacklist = self
            .blacklist
            .lists()
            .map(|(u, peers)| (u, peers.to_vec()))
            .collect();
        snapshot.last_partners = self.last_partners.pairs().collect();
        snapshot.pending_ratings = self.pending.pairs().collect();
    }
}

fn route(check: LinkCheck) -> RelayRoute {
    match check {
        LinkCheck::Linked(partner) => RelayRoute::Deliver(partner),
        LinkCheck::Unlinked => RelayRoute::NotPaired,
        LinkCheck::Broken { stale_partner } => RelayRoute::Healed { stale_partner },
    }
}
