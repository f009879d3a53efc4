// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Pairchat crates.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Canonical user identifier.
///
/// Every component keys its state by this one type; platform IDs are
/// converted at the channel boundary and never stored as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(UserId)
    }
}

/// A delivery destination: a user's private chat or a group such as the moderation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl From<UserId> for ChatId {
    fn from(user: UserId) -> Self {
        ChatId(user.0)
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a message on the channel platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of an adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Storage,
}

// --- Domain types ---

/// Gender recorded in a user profile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Minimal profile a user registers before searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub gender: Gender,
    pub age: u8,
}

/// Kind of administrative restriction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SanctionKind {
    /// Denies searching and pairing.
    Ban,
    /// Denies message relay.
    Mute,
}

/// A single time-bounded restriction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sanction {
    /// Unix timestamp (seconds) when the sanction expires; `0` means indefinite.
    pub until: i64,
    /// Administrator who issued it.
    pub issued_by: UserId,
    pub note: String,
}

impl Sanction {
    /// Whether the sanction is in force at `now` (unix seconds).
    pub fn is_active_at(&self, now: i64) -> bool {
        self.until == 0 || self.until > now
    }
}

/// All sanctions held against one user. May exist while empty, which marks
/// the user as having crossed the report threshold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanctionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban: Option<Sanction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mute: Option<Sanction>,
}

impl SanctionRecord {
    pub fn get(&self, kind: SanctionKind) -> Option<&Sanction> {
        match kind {
            SanctionKind::Ban => self.ban.as_ref(),
            SanctionKind::Mute => self.mute.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, kind: SanctionKind) -> &mut Option<Sanction> {
        match kind {
            SanctionKind::Ban => &mut self.ban,
            SanctionKind::Mute => &mut self.mute,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ban.is_none() && self.mute.is_none()
    }
}

/// Running sum of star ratings received by a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingTally {
    pub total: u32,
    pub count: u32,
}

/// Everything that must survive a restart.
///
/// Storage adapters persist and reload this as a whole; the shape of the
/// on-disk representation is theirs to choose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub profiles: BTreeMap<UserId, Profile>,
    /// Dialog links, both directions present for a live session.
    pub dialogs: BTreeMap<UserId, UserId>,
    /// Search queue in insertion order.
    pub queue: Vec<UserId>,
    /// Blocker to blocked peers, in the order they were added.
    pub blacklist: BTreeMap<UserId, Vec<UserId>>,
    pub last_partners: BTreeMap<UserId, UserId>,
    pub pending_ratings: BTreeMap<UserId, UserId>,
    pub ratings: BTreeMap<UserId, RatingTally>,
    pub reports: BTreeMap<UserId, u32>,
    pub sanctions: BTreeMap<UserId, SanctionRecord>,
}

// --- Channel types ---

/// Content of an inbound message, already classified by the channel adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    /// Plain text (including reply-keyboard button presses).
    Text(String),
    /// A slash command such as `/start` or `/broadcast hello`.
    Command { name: String, args: String },
    /// An inline keyboard press.
    Callback {
        data: String,
        /// The message carrying the pressed keyboard, edited in place by replies.
        origin: Option<MessageRef>,
    },
    /// Photos, stickers, voice and anything else that can only be copied.
    Media { kind: String },
}

/// Locates a message already delivered to a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    pub chat: ChatId,
    pub message_id: String,
}

/// An inbound message received from a channel adapter.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Platform message ID, used to copy media to the partner.
    pub id: String,
    pub channel: String,
    pub sender: UserId,
    pub content: MessageContent,
    pub timestamp: String,
}

/// A keyboard button that reports `data` back when pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Keyboard attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Persistent reply keyboard whose buttons send their label as text.
    Reply(Vec<Vec<String>>),
    /// Inline keyboard attached to the message.
    Inline(Vec<Vec<Button>>),
}

/// What an outbound message carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundBody {
    Text(String),
    /// Copy an existing message from `from` (used to relay media anonymously).
    Copy { from: ChatId, message_id: String },
}

/// An outbound message to be sent via a channel adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub to: ChatId,
    pub body: OutboundBody,
    pub keyboard: Option<Keyboard>,
}

impl OutboundMessage {
    pub fn text(to: impl Into<ChatId>, text: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            body: OutboundBody::Text(text.into()),
            keyboard: None,
        }
    }

    pub fn copy(to: impl Into<ChatId>, from: impl Into<ChatId>, message_id: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            body: OutboundBody::Copy {
                from: from.into(),
                message_id: message_id.into(),
            },
            keyboard: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    /// Returns the text body, if this is a text message.
    pub fn text_body(&self) -> Option<&str> {
        match &self.body {
            OutboundBody::Text(t) => Some(t),
            OutboundBody::Copy { .. } => None,
        }
    }
}

/// Capabilities reported by a channel adapter.
#[derive(Debug, Clone)]
pub struct ChannelCapabilities {
    pub supports_edit: bool,
    pub supports_copy: bool,
    pub max_message_length: Option<usize>,
}
