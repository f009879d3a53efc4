// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock channel adapter for deterministic testing.
//!
//! `MockChannel` implements `ChannelAdapter` with injectable inbound messages
//! and captured outbound messages and edits for assertion in tests. Clones
//! share the same queues, so a test can keep one while the bot owns another.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use pairchat_core::traits::adapter::PluginAdapter;
use pairchat_core::traits::channel::ChannelAdapter;
use pairchat_core::types::{
    AdapterType, ChannelCapabilities, ChatId, HealthStatus, InboundMessage, Keyboard, MessageId,
    OutboundMessage,
};
use pairchat_core::PairchatError;

/// An `edit_message` call captured by [`MockChannel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedMessage {
    pub chat: ChatId,
    pub message_id: String,
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

/// A mock messaging channel for testing.
///
/// - **inbound**: Messages injected via `inject_message()` are returned by `receive()`
/// - **sent**: Messages passed to `send()` are captured and retrievable via `sent_messages()`
/// - **edits**: Calls to `edit_message()` are captured via `edits()`
#[derive(Clone)]
pub struct MockChannel {
    inbound: Arc<Mutex<VecDeque<InboundMessage>>>,
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    edits: Arc<Mutex<Vec<EditedMessage>>>,
    unreachable: Arc<Mutex<HashSet<ChatId>>>,
    closed: Arc<AtomicBool>,
    notify: Arc<Notify>,
    supports_edit: bool,
}

impl MockChannel {
    /// Create a new mock channel with empty queues that supports edits.
    pub fn new() -> Self {
        Self {
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
            edits: Arc::new(Mutex::new(Vec::new())),
            unreachable: Arc::new(Mutex::new(HashSet::new())),
            closed: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
            supports_edit: true,
        }
    }

    /// A channel that cannot edit, so every reply is a new message.
    pub fn without_edit() -> Self {
        Self {
            supports_edit: false,
            ..Self::new()
        }
    }

    /// Inject an inbound message into the receive queue.
    pub async fn inject_message(&self, msg: InboundMessage) {
        self.inbound.lock().await.push_back(msg);
        self.notify.notify_one();
    }

    /// Makes `receive()` fail with a closed-channel error once the queue is drained.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    /// Every later `send()` to `chat` fails.
    pub async fn make_unreachable(&self, chat: impl Into<ChatId>) {
        self.unreachable.lock().await.insert(chat.into());
    }

    /// Get all messages that were sent through `send()`.
    pub async fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }

    /// Messages sent to one chat, in order.
    pub async fn sent_to(&self, chat: impl Into<ChatId>) -> Vec<OutboundMessage> {
        let chat = chat.into();
        self.sent
            .lock()
            .await
            .iter()
            .filter(|m| m.to == chat)
            .cloned()
            .collect()
    }

    /// Get all captured edits.
    pub async fn edits(&self) -> Vec<EditedMessage> {
        self.edits.lock().await.clone()
    }

    /// Get the count of sent messages.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Clear all sent messages and edits.
    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
        self.edits.lock().await.clear();
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockChannel {
    fn name(&self) -> &str {
        "mock-channel"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, PairchatError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PairchatError> {
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for MockChannel {
    fn capabilities(&self) -> ChannelCapabilities {
        ChannelCapabilities {
            supports_edit: self.supports_edit,
            supports_copy: true,
            max_message_length: None,
        }
    }

    async fn connect(&mut self) -> Result<(), PairchatError> {
        Ok(())
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, PairchatError> {
        if self.unreachable.lock().await.contains(&msg.to) {
            return Err(PairchatError::channel(format!("chat {} is unreachable", msg.to)));
        }
        let id = format!("mock-msg-{}", uuid::Uuid::new_v4());
        self.sent.lock().await.push(msg);
        Ok(MessageId(id))
    }

    async fn receive(&self) -> Result<InboundMessage, PairchatError> {
        loop {
            {
                let mut queue = self.inbound.lock().await;
                if let Some(msg) = queue.pop_front() {
                    return Ok(msg);
                }
            }
            if self.closed.load(Ordering::SeqCst) {
                return Err(PairchatError::channel("mock inbound channel closed"));
            }
            self.notify.notified().await;
        }
    }

    async fn edit_message(
        &self,
        chat: ChatId,
        message_id: &str,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), PairchatError> {
        if !self.supports_edit {
            return Err(PairchatError::channel("mock channel does not support edits"));
        }
        self.edits.lock().await.push(EditedMessage {
            chat,
            message_id: message_id.to_string(),
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairchat_core::UserId;
    use pairchat_core::types::MessageContent;

    fn make_inbound(text: &str) -> InboundMessage {
        InboundMessage {
            id: format!("test-{}", uuid::Uuid::new_v4()),
            channel: "mock".to_string(),
            sender: UserId(7),
            content: MessageContent::Text(text.to_string()),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[tokio::test]
    async fn receive_returns_injected_messages_in_order() {
        let channel = MockChannel::new();
        channel.inject_message(make_inbound("first")).await;
        channel.inject_message(make_inbound("second")).await;

        let first = channel.receive().await.unwrap();
        let second = channel.receive().await.unwrap();
        assert_eq!(first.content, MessageContent::Text("first".into()));
        assert_eq!(second.content, MessageContent::Text("second".into()));
    }

    #[tokio::test]
    async fn receive_waits_for_injection() {
        let channel = MockChannel::new();
        let injector = channel.clone();

        tokio::spawn(async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
            injector.inject_message(make_inbound("delayed")).await;
        });

        let received = tokio::time::timeout(tokio::time::Duration::from_secs(2), channel.receive())
            .await
            .expect("receive timed out")
            .unwrap();
        assert_eq!(received.content, MessageContent::Text("delayed".into()));
    }

    #[tokio::test]
    async fn closed_channel_errors_after_draining() {
        let channel = MockChannel::new();
        channel.inject_message(make_inbound("last")).await;
        channel.close();

        assert!(channel.receive().await.is_ok());
        let err = channel.receive().await.unwrap_err();
        assert!(err.is_channel_closed());
    }

    #[tokio::test]
    async fn send_captures_and_filters_by_chat() {
        let channel = MockChannel::new();
        let id = channel
            .send(OutboundMessage::text(UserId(1), "one"))
            .await
            .unwrap();
        assert!(id.0.starts_with("mock-msg-"));
        channel
            .send(OutboundMessage::text(UserId(2), "two"))
            .await
            .unwrap();

        assert_eq!(channel.sent_count().await, 2);
        let to_two = channel.sent_to(UserId(2)).await;
        assert_eq!(to_two.len(), 1);
        assert_eq!(to_two[0].text_body(), Some("two"));

        channel.clear_sent().await;
        assert_eq!(channel.sent_count().await, 0);
    }

    #[tokio::test]
    async fn unreachable_chats_fail() {
        let channel = MockChannel::new();
        channel.make_unreachable(UserId(3)).await;
        assert!(channel
            .send(OutboundMessage::text(UserId(3), "lost"))
            .await
            .is_err());
        assert_eq!(channel.sent_count().await, 0);
    }

    #[tokio::test]
    async fn edits_are_captured_when_supported() {
        let channel = MockChannel::new();
        channel
            .edit_message(ChatId(1), "10", "updated", None)
            .await
            .unwrap();
        assert_eq!(channel.edits().await[0].text, "updated");

        let plain = MockChannel::without_edit();
        assert!(!plain.capabilities().supports_edit);
        assert!(plain.edit_message(ChatId(1), "10", "x", None).await.is_err());
    }
}
