// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;

use pairchat_core::UserId;

/// Reason picked from the report keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportReason {
    Spam,
    Abuse,
    Adult,
    Other,
}

impl ReportReason {
    /// Parses the callback suffix (`spam`, `abuse`, `18`, `other`).
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "spam" => Some(Self::Spam),
            "abuse" => Some(Self::Abuse),
            "18" => Some(Self::Adult),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::Abuse => "abuse",
            Self::Adult => "18",
            Self::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::Abuse => "abuse",
            Self::Adult => "adult content",
            Self::Other => "other",
        }
    }
}

/// Report counts per reported user.
#[derive(Debug, Clone, Default)]
pub struct Reports {
    counts: HashMap<UserId, u32>,
}

impl Reports {
    pub fn from_counts(counts: impl IntoIterator<Item = (UserId, u32)>) -> Self {
        Self {
            counts: counts.into_iter().collect(),
        }
    }

    /// Increments and returns the new count.
    pub fn record_report(&mut self, target: UserId) -> u32 {
        let count = self.counts.entry(target).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn count(&self, user: UserId) -> u32 {
        self.counts.get(&user).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> impl Iterator<Item = (UserId, u32)> + '_ {
        self.counts.iter().map(|(u, c)| (*u, *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_count_up() {
        let mut r = Reports::default();
        assert_eq!(r.count(UserId(3)), 0);
        assert_eq!(r.record_report(UserId(3)), 1);
        assert_eq!(r.record_report(UserId(3)), 2);
        assert_eq!(r.count(UserId(3)), 2);
    }

    #[test]
    fn reason_keys() {
        assert_eq!(ReportReason::from_key("18"), Some(ReportReason::Adult));
        assert_eq!(ReportReason::Adult.key(), "18");
        assert_eq!(ReportReason::from_key("nope"), None);
    }
}
