// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for messaging platform integrations.

use async_trait::async_trait;

use crate::error::PairchatError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChannelCapabilities, ChatId, InboundMessage, Keyboard, MessageId, OutboundMessage};

/// Adapter for bidirectional messaging channel integrations.
///
/// From the relay's point of view delivery is best-effort: callers log
/// `send` failures and carry on.
#[async_trait]
pub trait ChannelAdapter: PluginAdapter {
    /// Returns the capabilities supported by this channel.
    fn capabilities(&self) -> ChannelCapabilities;

    /// Establishes a connection to the messaging platform.
    async fn connect(&mut self) -> Result<(), PairchatError>;

    /// Sends a message through the channel.
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, PairchatError>;

    /// Receives the next inbound message from the channel.
    async fn receive(&self) -> Result<InboundMessage, PairchatError>;

    /// Replaces the text (and inline keyboard) of a previously sent message.
    async fn edit_message(
        &self,
        chat: ChatId,
        message_id: &str,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), PairchatError> {
        let _ = (chat, message_id, text, keyboard);
        Err(PairchatError::channel(format!(
            "{} does not support editing messages",
            self.name()
        )))
    }
}
