// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ban and mute bookkeeping.

use std::collections::{HashMap, HashSet};

use pairchat_core::UserId;
use pairchat_core::types::{Sanction, SanctionKind, SanctionRecord};
use tracing::info;

/// Sanction records per user. Times are unix seconds supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct Sanctions {
    records: HashMap<UserId, SanctionRecord>,
}

impl Sanctions {
    pub fn from_records(records: impl IntoIterator<Item = (UserId, SanctionRecord)>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Replaces any sanction of the same kind. `minutes == 0` is indefinite.
    pub fn impose(
        &mut self,
        kind: SanctionKind,
        target: UserId,
        by: UserId,
        minutes: u32,
        note: impl Into<String>,
        now: i64,
    ) -> Sanction {
        let until = if minutes == 0 {
            0
        } else {
            now + i64::from(minutes) * 60
        };
        let sanction = Sanction {
            until,
            issued_by: by,
            note: note.into(),
        };
        *self.records.entry(target).or_default().slot_mut(kind) = Some(sanction.clone());
        info!(target = %target, by = %by, kind = %kind, until, "sanction imposed");
        sanction
    }

    /// Removes a sanction. An emptied record is dropped. Returns `true` if
    /// there was something to remove.
    pub fn lift(&mut self, kind: SanctionKind, target: UserId) -> bool {
        let Some(record) = self.records.get_mut(&target) else {
            return false;
        };
        if record.slot_mut(kind).take().is_none() {
            return false;
        }
        if record.is_empty() {
            self.records.remove(&target);
        }
        info!(target = %target, kind = %kind, "sanction lifted");
        true
    }

    pub fn active(&self, user: UserId, kind: SanctionKind, now: i64) -> Option<&Sanction> {
        self.records
            .get(&user)
            .and_then(|r| r.get(kind))
            .filter(|s| s.is_active_at(now))
    }

    pub fn is_sanctioned(&self, user: UserId, kind: SanctionKind, now: i64) -> bool {
        self.active(user, kind, now).is_some()
    }

    /// Creates an empty record if none exists.
    pub fn ensure_record(&mut self, user: UserId) {
        self.records.entry(user).or_default();
    }

    pub fn has_record(&self, user: UserId) -> bool {
        self.records.contains_key(&user)
    }

    pub fn records(&self) -> impl Iterator<Item = (UserId, &SanctionRecord)> {
        self.records.iter().map(|(u, r)| (*u, r))
    }
}

/// Users exempt from sanctions and allowed to issue them.
#[derive(Debug, Clone, Default)]
pub struct AdminRoster {
    admins: HashSet<UserId>,
}

impl AdminRoster {
    pub fn new(admins: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            admins: admins.into_iter().collect(),
        }
    }

    pub fn is_admin(&self, user: UserId) -> bool {
        self.admins.contains(&user)
    }

    pub fn len(&self) -> usize {
        self.admins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn timed_sanction_expires() {
        let mut s = Sanctions::default();
        let ban = s.impose(SanctionKind::Ban, UserId(5), UserId(1), 1440, "24h", NOW);
        assert_eq!(ban.until, NOW + 86_400);
        assert!(s.is_sanctioned(UserId(5), SanctionKind::Ban, NOW));
        assert!(!s.is_sanctioned(UserId(5), SanctionKind::Mute, NOW));
        assert!(!s.is_sanctioned(UserId(5), SanctionKind::Ban, NOW + 86_400));
    }

    #[test]
    fn zero_minutes_is_indefinite() {
        let mut s = Sanctions::default();
        s.impose(SanctionKind::Mute, UserId(5), UserId(1), 0, "", NOW);
        assert!(s.is_sanctioned(UserId(5), SanctionKind::Mute, i64::MAX));
    }

    #[test]
    fn lift_drops_empty_record() {
        let mut s = Sanctions::default();
        s.impose(SanctionKind::Ban, UserId(5), UserId(1), 10, "", NOW);
        s.impose(SanctionKind::Mute, UserId(5), UserId(1), 10, "", NOW);
        assert!(s.lift(SanctionKind::Ban, UserId(5)));
        assert!(s.has_record(UserId(5)));
        assert!(s.lift(SanctionKind::Mute, UserId(5)));
        assert!(!s.has_record(UserId(5)));
        assert!(!s.lift(SanctionKind::Mute, UserId(5)));
    }

    #[test]
    fn ensure_record_is_empty_and_harmless() {
        let mut s = Sanctions::default();
        s.ensure_record(UserId(9));
        assert!(s.has_record(UserId(9)));
        assert!(!s.is_sanctioned(UserId(9), SanctionKind::Ban, NOW));
    }

    #[test]
    fn roster_membership() {
        let roster = AdminRoster::new([UserId(1), UserId(2)]);
        assert!(roster.is_admin(UserId(2)));
        assert!(!roster.is_admin(UserId(3)));
        assert_eq!(roster.len(), 2);
    }
}
