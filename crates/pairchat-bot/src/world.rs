// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The complete mutable state of the bot.

use pairchat_core::StateSnapshot;
use pairchat_engine::Lobby;
use pairchat_moderation::{AdminRoster, Moderation};

/// Session engine plus moderation stores. Cloned per transaction.
#[derive(Debug, Clone)]
pub struct World {
    pub lobby: Lobby,
    pub moderation: Moderation,
}

/// The numbers behind `/stats` and `pairchat status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub users: usize,
    pub dialogs: usize,
    pub queued: usize,
}

impl World {
    pub fn from_snapshot(snapshot: &StateSnapshot, roster: AdminRoster, max_reports: u32) -> Self {
        Self {
            lobby: Lobby::restore(snapshot),
            moderation: Moderation::restore(snapshot, roster, max_reports),
        }
    }

    pub fn snapshot(&self) -> StateSnapshot {
        let mut snapshot = StateSnapshot::default();
        self.lobby.export(&mut snapshot);
        self.moderation.export(&mut snapshot);
        snapshot
    }

    pub fn stats(&self) -> Stats {
        Stats {
            users: self.moderation.profiles.len(),
            dialogs: self.lobby.session_count(),
            queued: self.lobby.queue_len(),
        }
    }
}
