// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;

use pairchat_core::UserId;

/// Most recent ended-session peer per user.
///
/// Reads never clear the pointer, so report, blacklist and rate actions after
/// the same dialog all resolve the same partner.
#[derive(Debug, Clone, Default)]
pub struct LastPartnerTracker {
    last: HashMap<UserId, UserId>,
}

impl LastPartnerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (UserId, UserId)>) -> Self {
        Self {
            last: pairs.into_iter().collect(),
        }
    }

    /// Overwrites both directions.
    pub fn record(&mut self, a: UserId, b: UserId) {
        self.last.insert(a, b);
        self.last.insert(b, a);
    }

    pub fn last_partner(&self, user: UserId) -> Option<UserId> {
        self.last.get(&user).copied()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (UserId, UserId)> + '_ {
        self.last.iter().map(|(u, p)| (*u, *p))
    }
}
