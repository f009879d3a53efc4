// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification of Telegram updates into channel-agnostic messages.

use pairchat_core::types::{InboundMessage, MessageContent, MessageRef};
use pairchat_core::{ChatId, UserId};
use teloxide::prelude::*;
use teloxide::types::ChatKind;

pub const CHANNEL_NAME: &str = "telegram";

/// Private chats only; the bot ignores groups and channels.
pub fn is_dm(msg: &Message) -> bool {
    matches!(msg.chat.kind, ChatKind::Private(_))
}

/// Splits `/name@bot args` into `("name", "args")`.
pub fn parse_command(text: &str) -> Option<(String, String)> {
    let rest = text.strip_prefix('/')?;
    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim()),
        None => (rest, ""),
    };
    let name = head.split('@').next().unwrap_or(head);
    if name.is_empty() {
        return None;
    }
    Some((name.to_lowercase(), args.to_string()))
}

/// Text becomes `Text` or `Command`; anything else that can be copied is `Media`.
pub fn classify(msg: &Message) -> Option<MessageContent> {
    if let Some(text) = msg.text() {
        return Some(match parse_command(text) {
            Some((name, args)) => MessageContent::Command { name, args },
            None => MessageContent::Text(text.to_string()),
        });
    }

    let kind = if msg.photo().is_some() {
        "photo"
    } else if msg.sticker().is_some() {
        "sticker"
    } else if msg.voice().is_some() {
        "voice"
    } else if msg.video().is_some() {
        "video"
    } else if msg.video_note().is_some() {
        "video_note"
    } else if msg.animation().is_some() {
        "animation"
    } else if msg.audio().is_some() {
        "audio"
    } else if msg.document().is_some() {
        "document"
    } else {
        return None;
    };
    Some(MessageContent::Media {
        kind: kind.to_string(),
    })
}

fn user_id(user: &teloxide::types::User) -> UserId {
    UserId(user.id.0 as i64)
}

pub fn to_inbound_message(msg: &Message, content: MessageContent) -> Option<InboundMessage> {
    let sender = msg.from.as_ref().map(user_id)?;
    Some(InboundMessage {
        id: msg.id.0.to_string(),
        channel: CHANNEL_NAME.to_string(),
        sender,
        content,
        timestamp: msg.date.to_rfc3339(),
    })
}

/// Inline button presses. Queries without data are dropped.
pub fn callback_to_inbound(q: &CallbackQuery) -> Option<InboundMessage> {
    let data = q.data.clone()?;
    let origin = q.message.as_ref().map(|m| MessageRef {
        chat: ChatId(m.chat().id.0),
        message_id: m.id().0.to_string(),
    });
    Some(InboundMessage {
        id: origin
            .as_ref()
            .map(|o| o.message_id.clone())
            .unwrap_or_default(),
        channel: CHANNEL_NAME.to_string(),
        sender: user_id(&q.from),
        content: MessageContent::Callback { data, origin },
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
