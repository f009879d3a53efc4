// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use pairchat_core::types::{Button, Keyboard};
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, ReplyMarkup,
};

pub fn inline_markup(rows: &[Vec<Button>]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.data.clone()))
            .collect::<Vec<_>>()
    }))
}

pub fn reply_markup(keyboard: &Keyboard) -> ReplyMarkup {
    match keyboard {
        Keyboard::Reply(rows) => KeyboardMarkup::new(rows.iter().map(|row| {
            row.iter()
                .map(|label| KeyboardButton::new(label.clone()))
                .collect::<Vec<_>>()
        }))
        .resize_keyboard()
        .into(),
        Keyboard::Inline(rows) => inline_markup(rows).into(),
    }
}
