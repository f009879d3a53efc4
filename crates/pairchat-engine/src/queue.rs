// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered set of users waiting for a partner.

use std::collections::HashSet;

use pairchat_core::UserId;
use tracing::debug;

use crate::registry::SessionRegistry;

/// FIFO search queue. Earliest-enqueued eligible user wins a match.
#[derive(Debug, Clone, Default)]
pub struct SearchQueue {
    order: Vec<UserId>,
}

impl SearchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a persisted order verbatim. Duplicates and paired users are
    /// left in place until the next [`reconcile`](Self::reconcile).
    pub fn from_raw(order: Vec<UserId>) -> Self {
        Self { order }
    }

    /// Appends `user` unless already present. Returns `true` if appended.
    pub fn enqueue(&mut self, user: UserId) -> bool {
        if self.contains(user) {
            return false;
        }
        self.order.push(user);
        true
    }

    /// Removes every occurrence of `user`. Returns `true` if any was removed.
    pub fn remove(&mut self, user: UserId) -> bool {
        let before = self.order.len();
        self.order.retain(|u| *u != user);
        self.order.len() != before
    }

    pub fn contains(&self, user: UserId) -> bool {
        self.order.contains(&user)
    }

    /// Drops users that are in a live session, then deduplicates keeping the
    /// first occurrence. Returns the number of entries removed.
    pub fn reconcile(&mut self, registry: &SessionRegistry) -> usize {
        let before = self.order.len();
        let mut seen = HashSet::with_capacity(before);
        self.order
            .retain(|u| !registry.is_paired(*u) && seen.insert(*u));
        let removed = before - self.order.len();
        if removed > 0 {
            debug!(removed, "reconciled search queue");
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = UserId> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(queue: &SearchQueue) -> Vec<i64> {
        queue.iter().map(|u| u.0).collect()
    }

    #[test]
    fn enqueue_deduplicates() {
        let mut q = SearchQueue::new();
        assert!(q.enqueue(UserId(1)));
        assert!(!q.enqueue(UserId(1)));
        assert!(q.enqueue(UserId(2)));
        assert_eq!(ids(&q), vec![1, 2]);
    }

    #[test]
    fn remove_drops_every_occurrence() {
        let mut q = SearchQueue::from_raw(vec![UserId(1), UserId(2), UserId(1)]);
        assert!(q.remove(UserId(1)));
        assert_eq!(ids(&q), vec![2]);
        assert!(!q.remove(UserId(1)));
    }

    #[test]
    fn reconcile_dedups_in_first_occurrence_order() {
        let registry = SessionRegistry::new();
        let mut q = SearchQueue::from_raw(vec![
            UserId(3),
            UserId(1),
            UserId(3),
            UserId(2),
            UserId(1),
        ]);
        assert_eq!(q.reconcile(&registry), 2);
        assert_eq!(ids(&q), vec![3, 1, 2]);
    }

    #[test]
    fn reconcile_drops_paired_users() {
        let registry =
            SessionRegistry::from_links(vec![(UserId(1), UserId(2)), (UserId(2), UserId(1))]);
        let mut q = SearchQueue::from_raw(vec![UserId(1), UserId(3), UserId(2)]);
        assert_eq!(q.reconcile(&registry), 2);
        assert_eq!(ids(&q), vec![3]);
    }

    #[test]
    fn reconcile_keeps_users_with_one_directional_links() {
        // Not actually paired: the stale link is healed on the next read.
        let registry = SessionRegistry::from_links(vec![(UserId(1), UserId(2))]);
        let mut q = SearchQueue::from_raw(vec![UserId(1)]);
        assert_eq!(q.reconcile(&registry), 0);
        assert!(q.contains(UserId(1)));
    }
}
