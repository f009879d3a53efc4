// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests of the complete bot loop.
//!
//! Messages are injected into a mock channel, the loop runs until the channel
//! closes, and the results are read back from the channel and from storage.

use std::sync::Arc;

use pairchat_bot::{BotLoop, Switchboard, texts};
use pairchat_config::model::PairchatConfig;
use pairchat_core::types::{InboundMessage, MessageContent, MessageRef};
use pairchat_core::{ChatId, StorageAdapter, UserId};
use pairchat_moderation::AdminRoster;
use pairchat_storage::SqliteStorage;
use pairchat_test_utils::{MockChannel, TestHarness};
use tokio_util::sync::CancellationToken;

const A: UserId = UserId(100);
const B: UserId = UserId(200);

fn inbound(sender: UserId, content: MessageContent) -> InboundMessage {
    InboundMessage {
        id: "1".to_string(),
        channel: "mock".to_string(),
        sender,
        content,
        timestamp: String::new(),
    }
}

fn text(sender: UserId, text: &str) -> InboundMessage {
    inbound(sender, MessageContent::Text(text.to_string()))
}

fn press(sender: UserId, data: &str) -> InboundMessage {
    inbound(
        sender,
        MessageContent::Callback {
            data: data.to_string(),
            origin: Some(MessageRef {
                chat: ChatId(sender.0),
                message_id: "1".to_string(),
            }),
        },
    )
}

/// Registration for both users, then both search.
fn conversation_start() -> Vec<InboundMessage> {
    vec![
        press(A, "gender_male"),
        press(A, "age_18"),
        press(B, "gender_female"),
        press(B, "age_19"),
        text(A, texts::BTN_SEARCH),
        text(B, texts::BTN_SEARCH),
    ]
}

async fn run_to_completion(bot: &mut BotLoop, channel: &MockChannel, messages: Vec<InboundMessage>) {
    for msg in messages {
        channel.inject_message(msg).await;
    }
    channel.close();
    bot.run(CancellationToken::new()).await.unwrap();
}

async fn sqlite_bot(config: &PairchatConfig, channel: &MockChannel) -> BotLoop {
    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await.unwrap();
    let storage: Arc<dyn StorageAdapter + Send + Sync> = Arc::new(storage);
    let switchboard = Switchboard::load(storage, AdminRoster::default(), 5)
        .await
        .unwrap();
    BotLoop::new(
        Box::new(channel.clone()),
        Arc::new(switchboard),
        config.clone(),
    )
}

#[tokio::test]
async fn loop_processes_messages_until_the_channel_closes() {
    let mut harness = TestHarness::new().await.unwrap();
    let mut messages = conversation_start();
    messages.push(text(A, "hi, who are you?"));
    messages.push(text(B, texts::BTN_END));

    run_to_completion(&mut harness.bot, &harness.channel, messages).await;

    assert!(
        harness
            .texts_to(B)
            .await
            .contains(&"hi, who are you?".to_string())
    );
    assert_eq!(harness.last_text_to(A).await.as_deref(), Some(texts::PARTNER_LEFT));

    let state = harness.persisted().await;
    assert_eq!(state.profiles.len(), 2);
    assert!(state.dialogs.is_empty());
    assert_eq!(state.last_partners.get(&A), Some(&B));
}

#[tokio::test]
async fn cancellation_stops_an_idle_loop() {
    let mut harness = TestHarness::new().await.unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    harness.bot.run(cancel).await.unwrap();
    assert_eq!(harness.channel.sent_count().await, 0);
}

#[tokio::test]
async fn dialogs_survive_a_restart_on_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = PairchatConfig::default();
    config.storage.database_path = dir
        .path()
        .join("pairchat.db")
        .to_string_lossy()
        .into_owned();

    let first = MockChannel::new();
    let mut bot = sqlite_bot(&config, &first).await;
    run_to_completion(&mut bot, &first, conversation_start()).await;
    assert_eq!(
        first.sent_to(B).await.last().and_then(|m| m.text_body().map(str::to_string)),
        Some(texts::MATCHED.to_string())
    );

    let second = MockChannel::new();
    let mut bot = sqlite_bot(&config, &second).await;
    bot.switchboard()
        .read(|w| {
            assert_eq!(w.lobby.partner_of(A), Some(B));
            assert_eq!(w.moderation.profiles.len(), 2);
        })
        .await;

    run_to_completion(&mut bot, &second, vec![text(B, "still there?")]).await;
    let relayed: Vec<String> = second
        .sent_to(A)
        .await
        .iter()
        .filter_map(|m| m.text_body().map(str::to_string))
        .collect();
    assert_eq!(relayed, vec!["still there?".to_string()]);
}
