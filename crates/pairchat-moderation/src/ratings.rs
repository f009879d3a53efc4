// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;

use pairchat_core::UserId;
use pairchat_core::types::RatingTally;

use crate::error::ModerationError;

/// Star ratings received per user.
#[derive(Debug, Clone, Default)]
pub struct Ratings {
    tallies: HashMap<UserId, RatingTally>,
}

impl Ratings {
    pub fn from_tallies(tallies: impl IntoIterator<Item = (UserId, RatingTally)>) -> Self {
        Self {
            tallies: tallies.into_iter().collect(),
        }
    }

    pub fn record(&mut self, user: UserId, stars: u8) -> Result<RatingTally, ModerationError> {
        if !(1..=5).contains(&stars) {
            return Err(ModerationError::InvalidStars(stars));
        }
        let tally = self.tallies.entry(user).or_default();
        tally.total = tally.total.saturating_add(u32::from(stars));
        tally.count = tally.count.saturating_add(1);
        Ok(*tally)
    }

    /// Mean rating rounded to one decimal, `0.0` when unrated.
    pub fn average(&self, user: UserId) -> f64 {
        match self.tallies.get(&user) {
            Some(t) if t.count > 0 => {
                (f64::from(t.total) / f64::from(t.count) * 10.0).round() / 10.0
            }
            _ => 0.0,
        }
    }

    pub fn count(&self, user: UserId) -> u32 {
        self.tallies.get(&user).map_or(0, |t| t.count)
    }

    pub fn tallies(&self) -> impl Iterator<Item = (UserId, RatingTally)> + '_ {
        self.tallies.iter().map(|(u, t)| (*u, *t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_average_rounds_to_one_decimal() {
        let mut r = Ratings::default();
        assert_eq!(r.average(UserId(1)), 0.0);
        r.record(UserId(1), 5).unwrap();
        r.record(UserId(1), 4).unwrap();
        r.record(UserId(1), 4).unwrap();
        assert_eq!(r.average(UserId(1)), 4.3);
        assert_eq!(r.count(UserId(1)), 3);
    }

    #[test]
    fn ratings_reject_out_of_range() {
        let mut r = Ratings::default();
        assert_eq!(r.record(UserId(1), 0), Err(ModerationError::InvalidStars(0)));
        assert_eq!(r.record(UserId(1), 6), Err(ModerationError::InvalidStars(6)));
        assert_eq!(r.count(UserId(1)), 0);
    }
}
