// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user block lists and the symmetric exclusion predicate.

use std::collections::HashMap;

use pairchat_core::UserId;

/// Directed `blocker -> blocked` relation.
///
/// Entries keep insertion order so a user's list reads back the way it was
/// built. Duplicates are never stored.
#[derive(Debug, Clone, Default)]
pub struct BlacklistIndex {
    entries: HashMap<UserId, Vec<UserId>>,
}

impl BlacklistIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the index from persisted lists, dropping duplicate and self entries.
    pub fn from_lists<I, L>(lists: I) -> Self
    where
        I: IntoIterator<Item = (UserId, L)>,
        L: IntoIterator<Item = UserId>,
    {
        let mut index = Self::new();
        for (user, peers) in lists {
            for peer in peers {
                index.block(user, peer);
            }
        }
        index
    }

    /// Adds `peer` to `user`'s list. Returns `false` for self-blocks and
    /// peers that are already blocked.
    pub fn block(&mut self, user: UserId, peer: UserId) -> bool {
        if user == peer {
            return false;
        }
        let list = self.entries.entry(user).or_default();
        if list.contains(&peer) {
            return false;
        }
        list.push(peer);
        true
    }

    /// Removes `peer` from `user`'s list. Returns `true` iff an entry was removed.
    pub fn unblock(&mut self, user: UserId, peer: UserId) -> bool {
        let Some(list) = self.entries.get_mut(&user) else {
            return false;
        };
        let before = list.len();
        list.retain(|p| *p != peer);
        let removed = list.len() != before;
        if list.is_empty() {
            self.entries.remove(&user);
        }
        removed
    }

    /// Directed query: has `user` blocked `peer`?
    pub fn blocks(&self, user: UserId, peer: UserId) -> bool {
        self.entries
            .get(&user)
            .is_some_and(|list| list.contains(&peer))
    }

    /// True if either side blocks the other. The only predicate matchmaking consults.
    pub fn mutually_excluded(&self, a: UserId, b: UserId) -> bool {
        self.blocks(a, b) || self.blocks(b, a)
    }

    /// Peers blocked by `user`, oldest first.
    pub fn blocked_by(&self, user: UserId) -> &[UserId] {
        self.entries.get(&user).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All non-empty lists.
    pub fn lists(&self) -> impl Iterator<Item = (UserId, &[UserId])> {
        self.entries.iter().map(|(u, l)| (*u, l.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: UserId = UserId(1);
    const B: UserId = UserId(2);
    const C: UserId = UserId(3);

    #[test]
    fn block_is_deduplicated() {
        let mut bl = BlacklistIndex::new();
        assert!(bl.block(A, B));
        assert!(!bl.block(A, B));
        assert_eq!(bl.blocked_by(A), &[B]);
    }

    #[test]
    fn cannot_block_self() {
        let mut bl = BlacklistIndex::new();
        assert!(!bl.block(A, A));
        assert!(bl.blocked_by(A).is_empty());
    }

    #[test]
    fn unblock_reports_removal() {
        let mut bl = BlacklistIndex::new();
        bl.block(A, B);
        assert!(bl.unblock(A, B));
        assert!(!bl.unblock(A, B));
        assert!(!bl.unblock(C, A));
        assert!(!bl.blocks(A, B));
    }

    #[test]
    fn blocks_is_directed_but_exclusion_is_symmetric() {
        let mut bl = BlacklistIndex::new();
        bl.block(A, B);
        assert!(bl.blocks(A, B));
        assert!(!bl.blocks(B, A));
        assert!(bl.mutually_excluded(A, B));
        assert!(bl.mutually_excluded(B, A));
        assert!(!bl.mutually_excluded(A, C));
    }

    #[test]
    fn from_lists_cleans_persisted_garbage() {
        let bl = BlacklistIndex::from_lists(vec![(A, vec![B, B, A, C])]);
        assert_eq!(bl.blocked_by(A), &[B, C]);
    }

    #[test]
    fn list_keeps_insertion_order() {
        let mut bl = BlacklistIndex::new();
        bl.block(A, C);
        bl.block(A, B);
        assert_eq!(bl.blocked_by(A), &[C, B]);
    }
}
