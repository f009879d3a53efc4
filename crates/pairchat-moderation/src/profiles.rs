// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;

use pairchat_core::UserId;
use pairchat_core::types::Profile;

/// Registered profiles keyed by user.
#[derive(Debug, Clone, Default)]
pub struct Profiles {
    map: HashMap<UserId, Profile>,
}

impl Profiles {
    pub fn from_entries(entries: impl IntoIterator<Item = (UserId, Profile)>) -> Self {
        Self {
            map: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, user: UserId) -> Option<Profile> {
        self.map.get(&user).copied()
    }

    pub fn set(&mut self, user: UserId, profile: Profile) {
        self.map.insert(user, profile);
    }

    /// Returns `true` if a profile existed.
    pub fn delete(&mut self, user: UserId) -> bool {
        self.map.remove(&user).is_some()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.map.keys().copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = (UserId, Profile)> + '_ {
        self.map.iter().map(|(u, p)| (*u, *p))
    }
}
