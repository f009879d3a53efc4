// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for Pairchat.
//!
//! Long polling via teloxide. Private messages and inline button presses are
//! forwarded as [`InboundMessage`]s; outbound messages carry text or a copy of
//! an existing message plus an optional keyboard.

pub mod handler;
pub mod keyboard;

use async_trait::async_trait;
use pairchat_config::model::TelegramConfig;
use pairchat_core::error::PairchatError;
use pairchat_core::traits::{ChannelAdapter, PluginAdapter};
use pairchat_core::types::{
    AdapterType, ChannelCapabilities, ChatId, HealthStatus, InboundMessage, Keyboard, MessageId,
    OutboundBody, OutboundMessage,
};
use teloxide::prelude::*;
use teloxide::types::{ChatId as TgChatId, MessageId as TgMessageId};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Telegram adapter implementing [`ChannelAdapter`].
pub struct TelegramChannel {
    bot: Bot,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<InboundMessage>>,
    inbound_tx: mpsc::Sender<InboundMessage>,
    polling_handle: Option<tokio::task::JoinHandle<()>>,
}

impl TelegramChannel {
    /// Requires `config.bot_token`.
    pub fn new(config: TelegramConfig) -> Result<Self, PairchatError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            PairchatError::Config("telegram.bot_token is required to serve".into())
        })?;
        if token.trim().is_empty() {
            return Err(PairchatError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        let (inbound_tx, inbound_rx) = mpsc::channel(256);
        Ok(Self {
            bot: Bot::new(token),
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx,
            polling_handle: None,
        })
    }
}

fn send_error(action: &str, e: teloxide::RequestError) -> PairchatError {
    PairchatError::Channel {
        message: format!("failed to {action}: {e}"),
        source: Some(Box::new(e)),
    }
}

fn parse_message_id(message_id: &str) -> Result<TgMessageId, PairchatError> {
    message_id
        .parse::<i32>()
        .map(TgMessageId)
        .map_err(|e| PairchatError::channel(format!("invalid message_id `{message_id}`: {e}")))
}

#[async_trait]
impl PluginAdapter for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, PairchatError> {
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), PairchatError> {
        if let Some(handle) = &self.polling_handle {
            handle.abort();
        }
        debug!("Telegram channel shut down");
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for TelegramChannel {
    fn capabilities(&self) -> ChannelCapabilities {
        ChannelCapabilities {
            supports_edit: true,
            supports_copy: true,
            max_message_length: Some(4096),
        }
    }

    async fn connect(&mut self) -> Result<(), PairchatError> {
        if self.polling_handle.is_some() {
            return Ok(());
        }

        let bot = self.bot.clone();
        let msg_tx = self.inbound_tx.clone();
        let cb_tx = self.inbound_tx.clone();

        info!("starting Telegram long polling");

        let handle = tokio::spawn(async move {
            let messages = Update::filter_message().endpoint(move |msg: Message| {
                let tx = msg_tx.clone();
                async move {
                    if !handler::is_dm(&msg) {
                        debug!(chat_id = msg.chat.id.0, "ignoring non-DM message");
                        return respond(());
                    }
                    let Some(inbound) = handler::classify(&msg)
                        .and_then(|content| handler::to_inbound_message(&msg, content))
                    else {
                        debug!(msg_id = msg.id.0, "ignoring unsupported message");
                        return respond(());
                    };
                    if tx.send(inbound).await.is_err() {
                        warn!("inbound channel closed, dropping message");
                    }
                    respond(())
                }
            });

            let callbacks =
                Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
                    let tx = cb_tx.clone();
                    async move {
                        // Stop the client-side spinner whatever happens next.
                        if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
                            debug!(error = %e, "failed to answer callback query");
                        }
                        if let Some(inbound) = handler::callback_to_inbound(&q)
                            && tx.send(inbound).await.is_err()
                        {
                            warn!("inbound channel closed, dropping callback");
                        }
                        respond(())
                    }
                });

            Dispatcher::builder(bot, dptree::entry().branch(messages).branch(callbacks))
                .default_handler(|_| async {})
                .build()
                .dispatch()
                .await;
        });

        self.polling_handle = Some(handle);
        Ok(())
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, PairchatError> {
        let to = TgChatId(msg.to.0);
        let markup = msg.keyboard.as_ref().map(keyboard::reply_markup);

        let id = match msg.body {
            OutboundBody::Text(text) => {
                let mut request = self.bot.send_message(to, text);
                if let Some(markup) = markup {
                    request = request.reply_markup(markup);
                }
                request.await.map_err(|e| send_error("send message", e))?.id
            }
            OutboundBody::Copy { from, message_id } => {
                let mut request =
                    self.bot
                        .copy_message(to, TgChatId(from.0), parse_message_id(&message_id)?);
                if let Some(markup) = markup {
                    request = request.reply_markup(markup);
                }
                request.await.map_err(|e| send_error("copy message", e))?
            }
        };

        Ok(MessageId(id.0.to_string()))
    }

    async fn receive(&self) -> Result<InboundMessage, PairchatError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv()
            .await
            .ok_or_else(|| PairchatError::channel("Telegram inbound channel closed"))
    }

    async fn edit_message(
        &self,
        chat: ChatId,
        message_id: &str,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), PairchatError> {
        let msg_id = parse_message_id(message_id)?;
        let mut request = self.bot.edit_message_text(TgChatId(chat.0), msg_id, text);
        if let Some(Keyboard::Inline(rows)) = &keyboard {
            request = request.reply_markup(keyboard::inline_markup(rows));
        }
        match request.await {
            Ok(_) => Ok(()),
            Err(e) if e.to_string().contains("message is not modified") => Ok(()),
            Err(e) => Err(send_error("edit message", e)),
        }
    }
}
