// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing flows, each an `impl BotLoop` block.

mod dialog;
mod menu;
mod moderation;
mod profile;
