// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;

use pairchat_core::UserId;

/// One-shot "you owe a rating to" pointers, set when a dialog ends.
#[derive(Debug, Clone, Default)]
pub struct PendingRatings {
    owed: HashMap<UserId, UserId>,
}

impl PendingRatings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (UserId, UserId)>) -> Self {
        Self {
            owed: pairs.into_iter().collect(),
        }
    }

    /// Each side owes the other a rating.
    pub fn assign(&mut self, a: UserId, b: UserId) {
        self.owed.insert(a, b);
        self.owed.insert(b, a);
    }

    /// Consumes the pointer. A second call returns `None`.
    pub fn take(&mut self, user: UserId) -> Option<UserId> {
        self.owed.remove(&user)
    }

    pub fn skip(&mut self, user: UserId) -> bool {
        self.owed.remove(&user).is_some()
    }

    pub fn peek(&self, user: UserId) -> Option<UserId> {
        self.owed.get(&user).copied()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (UserId, UserId)> + '_ {
        self.owed.iter().map(|(u, p)| (*u, *p))
    }
}
