// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Policy stores layered around the session engine: profiles, sanctions,
//! reports, ratings and the administrator roster.

pub mod error;
pub mod profiles;
pub mod ratings;
pub mod reports;
pub mod sanctions;

pub use error::ModerationError;
pub use profiles::Profiles;
pub use ratings::Ratings;
pub use reports::{ReportReason, Reports};
pub use sanctions::{AdminRoster, Sanctions};

use pairchat_core::types::{Sanction, SanctionKind};
use pairchat_core::{StateSnapshot, UserId};
use tracing::info;

/// Outcome of [`Moderation::file_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportFiled {
    pub count: u32,
    /// The count has reached the configured threshold.
    pub threshold_reached: bool,
}

/// All moderation state plus the fixed roster and report threshold.
#[derive(Debug, Clone)]
pub struct Moderation {
    pub profiles: Profiles,
    pub sanctions: Sanctions,
    pub reports: Reports,
    pub ratings: Ratings,
    roster: AdminRoster,
    max_reports: u32,
}

impl Moderation {
    pub fn new(roster: AdminRoster, max_reports: u32) -> Self {
        Self {
            profiles: Profiles::default(),
            sanctions: Sanctions::default(),
            reports: Reports::default(),
            ratings: Ratings::default(),
            roster,
            max_reports,
        }
    }

    pub fn restore(snapshot: &StateSnapshot, roster: AdminRoster, max_reports: u32) -> Self {
        Self {
            profiles: Profiles::from_entries(snapshot.profiles.iter().map(|(u, p)| (*u, *p))),
            sanctions: Sanctions::from_records(
                snapshot.sanctions.iter().map(|(u, r)| (*u, r.clone())),
            ),
            reports: Reports::from_counts(snapshot.reports.iter().map(|(u, c)| (*u, *c))),
            ratings: Ratings::from_tallies(snapshot.ratings.iter().map(|(u, t)| (*u, *t))),
            roster,
            max_reports,
        }
    }

    pub fn export(&self, snapshot: &mut StateSnapshot) {
        snapshot.profiles = self.profiles.entries().collect();
        snapshot.sanctions = self
            .sanctions
            .records()
            .map(|(u, r)| (u, r.clone()))
            .collect();
        snapshot.reports = self.reports.counts().collect();
        snapshot.ratings = self.ratings.tallies().collect();
    }

    pub fn is_admin(&self, user: UserId) -> bool {
        self.roster.is_admin(user)
    }

    pub fn max_reports(&self) -> u32 {
        self.max_reports
    }

    /// Active sanction of `kind` that applies to `user`. Admins are exempt.
    pub fn denies(&self, user: UserId, kind: SanctionKind, now: i64) -> bool {
        !self.is_admin(user) && self.sanctions.is_sanctioned(user, kind, now)
    }

    /// Counts a report. Reaching the threshold only makes sure a sanction
    /// record exists; it never bans.
    pub fn file_report(&mut self, target: UserId) -> ReportFiled {
        let count = self.reports.record_report(target);
        let threshold_reached = count >= self.max_reports;
        if threshold_reached {
            self.sanctions.ensure_record(target);
        }
        info!(target = %target, count, threshold_reached, "report filed");
        ReportFiled {
            count,
            threshold_reached,
        }
    }

    /// Sanctions `target` on behalf of admin `by`.
    pub fn sanction(
        &mut self,
        by: UserId,
        target: UserId,
        kind: SanctionKind,
        minutes: u32,
        now: i64,
    ) -> Result<Sanction, ModerationError> {
        if !self.is_admin(by) {
            return Err(ModerationError::NotAdmin(by));
        }
        if self.is_admin(target) {
            return Err(ModerationError::ProtectedTarget(target));
        }
        let note = if minutes == 0 {
            "indefinite".to_string()
        } else {
            format!("{minutes} min")
        };
        Ok(self.sanctions.impose(kind, target, by, minutes, note, now))
    }

    /// Lifts a sanction on behalf of admin `by`. Returns whether one was removed.
    pub fn pardon(
        &mut self,
        by: UserId,
        target: UserId,
        kind: SanctionKind,
    ) -> Result<bool, ModerationError> {
        if !self.is_admin(by) {
            return Err(ModerationError::NotAdmin(by));
        }
        Ok(self.sanctions.lift(kind, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairchat_core::types::{Gender, Profile};

    const ADMIN: UserId = UserId(1);
    const USER: UserId = UserId(2);
    const NOW: i64 = 1_700_000_000;

    fn moderation() -> Moderation {
        Moderation::new(AdminRoster::new([ADMIN]), 3)
    }

    #[test]
    fn threshold_ensures_record_without_banning() {
        let mut m = moderation();
        assert!(!m.file_report(USER).threshold_reached);
        assert!(!m.file_report(USER).threshold_reached);
        assert!(!m.sanctions.has_record(USER));

        let filed = m.file_report(USER);
        assert_eq!(filed.count, 3);
        assert!(filed.threshold_reached);
        assert!(m.sanctions.has_record(USER));
        assert!(!m.denies(USER, SanctionKind::Ban, NOW));
    }

    #[test]
    fn admins_bypass_sanctions() {
        let mut m = moderation();
        m.sanctions.impose(SanctionKind::Mute, ADMIN, ADMIN, 0, "", NOW);
        assert!(!m.denies(ADMIN, SanctionKind::Mute, NOW));
    }

    #[test]
    fn only_admins_sanction_and_admins_are_protected() {
        let mut m = moderation();
        assert_eq!(
            m.sanction(USER, UserId(3), SanctionKind::Ban, 10, NOW),
            Err(ModerationError::NotAdmin(USER))
        );
        assert_eq!(
            m.sanction(ADMIN, ADMIN, SanctionKind::Ban, 10, NOW),
            Err(ModerationError::ProtectedTarget(ADMIN))
        );

        let ban = m.sanction(ADMIN, USER, SanctionKind::Ban, 1440, NOW).unwrap();
        assert_eq!(ban.issued_by, ADMIN);
        assert!(m.denies(USER, SanctionKind::Ban, NOW));
        assert_eq!(m.pardon(ADMIN, USER, SanctionKind::Ban), Ok(true));
        assert_eq!(m.pardon(ADMIN, USER, SanctionKind::Ban), Ok(false));
    }

    #[test]
    fn export_restore_round_trip() {
        let mut m = moderation();
        m.profiles.set(
            USER,
            Profile {
                gender: Gender::Male,
                age: 17,
            },
        );
        m.file_report(USER);
        m.ratings.record(USER, 4).unwrap();
        m.sanction(ADMIN, USER, SanctionKind::Mute, 30, NOW).unwrap();

        let mut snapshot = StateSnapshot::default();
        m.export(&mut snapshot);
        let restored = Moderation::restore(&snapshot, AdminRoster::new([ADMIN]), 3);
        assert_eq!(restored.profiles.get(USER), m.profiles.get(USER));
        assert_eq!(restored.reports.count(USER), 1);
        assert_eq!(restored.ratings.average(USER), 4.0);
        assert!(restored.denies(USER, SanctionKind::Mute, NOW));
    }
}
