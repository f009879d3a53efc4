// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete bot with a mock channel and in-memory
//! storage, and drives it one inbound message at a time.

use std::sync::Arc;

use pairchat_bot::{BotLoop, Switchboard};
use pairchat_config::model::PairchatConfig;
use pairchat_core::types::{
    ChatId, Gender, InboundMessage, MessageContent, MessageRef, OutboundMessage, StateSnapshot,
};
use pairchat_core::{PairchatError, StorageAdapter, UserId};
use pairchat_moderation::AdminRoster;

use crate::memory_storage::MemoryStorage;
use crate::mock_channel::MockChannel;

/// Message ID given to every keyboard message a test presses a button on.
pub const PRESSED_MESSAGE_ID: &str = "1";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    config: PairchatConfig,
    snapshot: StateSnapshot,
    channel: MockChannel,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            config: PairchatConfig::default(),
            snapshot: StateSnapshot::default(),
            channel: MockChannel::new(),
        }
    }

    pub fn with_admins(mut self, admins: impl IntoIterator<Item = i64>) -> Self {
        self.config.moderation.admins = admins.into_iter().collect();
        self
    }

    pub fn with_log_chat(mut self, chat: i64) -> Self {
        self.config.moderation.log_chat_id = Some(chat);
        self
    }

    pub fn with_max_reports(mut self, max_reports: u32) -> Self {
        self.config.moderation.max_reports = max_reports;
        self
    }

    /// Starts from an already persisted state.
    pub fn with_snapshot(mut self, snapshot: StateSnapshot) -> Self {
        self.snapshot = snapshot;
        self
    }

    /// Uses a channel that cannot edit messages.
    pub fn without_edit(mut self) -> Self {
        self.channel = MockChannel::without_edit();
        self
    }

    pub async fn build(self) -> Result<TestHarness, PairchatError> {
        let storage = Arc::new(MemoryStorage::with_snapshot(self.snapshot));
        let bot = start_bot(&self.config, &self.channel, &storage).await?;
        Ok(TestHarness {
            channel: self.channel,
            storage,
            config: self.config,
            bot,
        })
    }
}

async fn start_bot(
    config: &PairchatConfig,
    channel: &MockChannel,
    storage: &Arc<MemoryStorage>,
) -> Result<BotLoop, PairchatError> {
    let roster = AdminRoster::new(config.moderation.admins.iter().copied().map(UserId));
    let storage: Arc<dyn StorageAdapter + Send + Sync> = storage.clone();
    let switchboard = Switchboard::load(storage, roster, config.moderation.max_reports).await?;
    Ok(BotLoop::new(
        Box::new(channel.clone()),
        Arc::new(switchboard),
        config.clone(),
    ))
}

/// A complete bot wired to a [`MockChannel`] and a [`MemoryStorage`].
pub struct TestHarness {
    /// Shares its queues with the channel owned by the bot.
    pub channel: MockChannel,
    pub storage: Arc<MemoryStorage>,
    pub config: PairchatConfig,
    pub bot: BotLoop,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A harness with default configuration.
    pub async fn new() -> Result<Self, PairchatError> {
        Self::builder().build().await
    }

    /// Rebuilds the bot from what storage holds, as a process restart would.
    /// Registration in progress is lost.
    pub async fn restart(&mut self) -> Result<(), PairchatError> {
        self.bot = start_bot(&self.config, &self.channel, &self.storage).await?;
        Ok(())
    }

    async fn inbound(&mut self, sender: UserId, id: String, content: MessageContent) {
        self.bot
            .handle_inbound(InboundMessage {
                id,
                channel: "mock".to_string(),
                sender,
                content,
                timestamp: chrono::Utc::now().to_rfc3339(),
            })
            .await;
    }

    /// Plain text, including reply-keyboard labels.
    pub async fn send_text(&mut self, user: UserId, text: &str) {
        let id = uuid::Uuid::new_v4().to_string();
        self.inbound(user, id, MessageContent::Text(text.to_string()))
            .await;
    }

    pub async fn send_command(&mut self, user: UserId, name: &str, args: &str) {
        let id = uuid::Uuid::new_v4().to_string();
        let content = MessageContent::Command {
            name: name.to_string(),
            args: args.to_string(),
        };
        self.inbound(user, id, content).await;
    }

    /// A photo or other non-text message with the given platform ID.
    pub async fn send_media(&mut self, user: UserId, message_id: &str) {
        let content = MessageContent::Media {
            kind: "photo".to_string(),
        };
        self.inbound(user, message_id.to_string(), content).await;
    }

    /// Presses an inline button on a message in the user's own chat.
    pub async fn press(&mut self, user: UserId, data: &str) {
        self.press_in(user.into(), user, data).await;
    }

    /// Presses an inline button on a message in `chat`, e.g. the moderation log.
    pub async fn press_in(&mut self, chat: ChatId, user: UserId, data: &str) {
        let content = MessageContent::Callback {
            data: data.to_string(),
            origin: Some(MessageRef {
                chat,
                message_id: PRESSED_MESSAGE_ID.to_string(),
            }),
        };
        self.inbound(user, PRESSED_MESSAGE_ID.to_string(), content)
            .await;
    }

    /// Completes registration with the given gender and age.
    pub async fn register(&mut self, user: UserId, gender: Gender, age: u8) {
        self.press(user, &format!("gender_{gender}")).await;
        self.press(user, &format!("age_{age}")).await;
    }

    /// Text bodies sent to `user`, in order.
    pub async fn texts_to(&self, user: UserId) -> Vec<String> {
        self.channel
            .sent_to(user)
            .await
            .iter()
            .filter_map(|m| m.text_body().map(str::to_string))
            .collect()
    }

    pub async fn last_sent_to(&self, chat: impl Into<ChatId>) -> Option<OutboundMessage> {
        self.channel.sent_to(chat).await.pop()
    }

    pub async fn last_text_to(&self, user: UserId) -> Option<String> {
        self.texts_to(user).await.pop()
    }

    /// Text of the most recent edit in `chat`.
    pub async fn last_edit_in(&self, chat: impl Into<ChatId>) -> Option<String> {
        let chat = chat.into();
        self.channel
            .edits()
            .await
            .into_iter()
            .rev()
            .find(|e| e.chat == chat)
            .map(|e| e.text)
    }

    /// Forgets everything captured so far.
    pub async fn clear(&self) {
        self.channel.clear_sent().await;
    }

    /// The durable state.
    pub async fn persisted(&self) -> StateSnapshot {
        self.storage.snapshot().await
    }
}
