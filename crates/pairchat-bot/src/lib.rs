// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bot loop and state ownership for Pairchat.
//!
//! The [`BotLoop`] is the central coordinator that:
//! - Receives messages and button presses from a channel adapter
//! - Routes them to the dialog, profile, menu and moderation flows
//! - Commits every state change through the [`Switchboard`]
//! - Notifies the other side of a dialog, best-effort
//! - Handles graceful shutdown

pub mod action;
mod flows;
pub mod shutdown;
pub mod switchboard;
pub mod texts;
pub mod world;

pub use switchboard::Switchboard;
pub use world::{Stats, World};

use std::collections::HashMap;
use std::sync::Arc;

use pairchat_config::model::PairchatConfig;
use pairchat_core::types::{
    Gender, InboundMessage, Keyboard, MessageContent, MessageRef, OutboundMessage,
};
use pairchat_core::{ChannelAdapter, PairchatError, UserId};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::action::{Action, ReplyButton};

/// Coordinates message flow between the channel and the switchboard.
pub struct BotLoop {
    channel: Box<dyn ChannelAdapter + Send + Sync>,
    switchboard: Arc<Switchboard>,
    config: PairchatConfig,
    /// Gender picked during registration, kept until the age is chosen.
    pending_gender: HashMap<UserId, Gender>,
}

impl BotLoop {
    pub fn new(
        channel: Box<dyn ChannelAdapter + Send + Sync>,
        switchboard: Arc<Switchboard>,
        config: PairchatConfig,
    ) -> Self {
        info!(bot_name = config.bot.name.as_str(), "bot loop initialized");
        Self {
            channel,
            switchboard,
            config,
            pending_gender: HashMap::new(),
        }
    }

    pub fn switchboard(&self) -> &Arc<Switchboard> {
        &self.switchboard
    }

    /// Runs until the token is cancelled or the channel closes, then closes storage.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<(), PairchatError> {
        info!("bot loop running");

        loop {
            tokio::select! {
                msg = self.channel.receive() => {
                    match msg {
                        Ok(inbound) => self.handle_inbound(inbound).await,
                        Err(e) => {
                            error!(error = %e, "channel receive error");
                            if e.is_channel_closed() {
                                break;
                            }
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping bot loop");
                    break;
                }
            }
        }

        if let Err(e) = self.channel.shutdown().await {
            warn!(error = %e, "channel shutdown failed");
        }
        self.switchboard.close().await?;
        info!("bot loop stopped");
        Ok(())
    }

    /// Handles one inbound message. Failures are logged and answered with a
    /// generic reply, so no state change is ever reported as done when it
    /// was not committed.
    pub async fn handle_inbound(&mut self, inbound: InboundMessage) {
        let sender = inbound.sender;
        if let Err(e) = self.dispatch(inbound).await {
            error!(user = %sender, error = %e, "failed to handle inbound message");
            self.deliver(OutboundMessage::text(sender, texts::FAILURE))
                .await;
        }
    }

    async fn dispatch(&mut self, inbound: InboundMessage) -> Result<(), PairchatError> {
        let user = inbound.sender;
        debug!(user = %user, channel = inbound.channel.as_str(), "handling inbound message");

        match &inbound.content {
            MessageContent::Command { name, args } => {
                self.handle_command(user, name, args).await
            }
            MessageContent::Callback { data, origin } => {
                match Action::parse(data) {
                    Some(action) => self.handle_action(user, action, origin.as_ref()).await,
                    None => {
                        debug!(user = %user, data = data.as_str(), "ignoring unknown callback");
                        Ok(())
                    }
                }
            }
            MessageContent::Text(text) => match ReplyButton::from_label(text) {
                Some(button) => self.handle_button(user, button).await,
                None => self.relay(&inbound).await,
            },
            MessageContent::Media { .. } => self.relay(&inbound).await,
        }
    }

    async fn handle_command(
        &mut self,
        user: UserId,
        name: &str,
        args: &str,
    ) -> Result<(), PairchatError> {
        match name {
            "start" => self.start(user).await,
            "menu" => {
                self.reply(user, None, texts::MENU, Some(texts::menu_keyboard()))
                    .await;
                Ok(())
            }
            "show_keyboard" => {
                self.reply(
                    user,
                    None,
                    texts::KEYBOARD_SHOWN,
                    Some(texts::main_keyboard()),
                )
                .await;
                Ok(())
            }
            "privacy" => {
                self.reply(user, None, texts::PRIVACY, None).await;
                Ok(())
            }
            "info" => {
                self.reply(user, None, texts::INFO, None).await;
                Ok(())
            }
            "blacklist" => self.show_blacklist(user, None).await,
            "stats" => self.stats(user).await,
            "broadcast" => self.broadcast(user, args).await,
            other => {
                debug!(user = %user, command = other, "ignoring unknown command");
                Ok(())
            }
        }
    }

    async fn handle_button(&mut self, user: UserId, button: ReplyButton) -> Result<(), PairchatError> {
        match button {
            ReplyButton::Search => self.search(user).await,
            ReplyButton::NewSearch => self.new_search(user).await,
            ReplyButton::End => self.end(user).await,
            ReplyButton::Profile => self.show_profile(user).await,
            ReplyButton::Report => self.report_start(user).await,
        }
    }

    async fn handle_action(
        &mut self,
        user: UserId,
        action: Action,
        origin: Option<&MessageRef>,
    ) -> Result<(), PairchatError> {
        match action {
            Action::Menu(menu) => self.menu_action(user, menu, origin).await,
            Action::Gender(gender) => self.select_gender(user, gender, origin).await,
            Action::Age(age) => self.select_age(user, age, origin).await,
            Action::Blacklist(bl) => self.blacklist_action(user, bl, origin).await,
            Action::Report(reason) => self.report_reason(user, reason, origin).await,
            Action::Admin { op, target } => self.admin_action(user, op, target, origin).await,
            Action::Post(post) => self.post_action(user, post, origin).await,
            Action::Rate(stars) => self.rate(user, stars, origin).await,
            Action::RateSkip => self.skip_rating(user, origin).await,
        }
    }

    /// Sends a message, logging instead of failing when delivery does not work.
    async fn deliver(&self, msg: OutboundMessage) -> bool {
        let to = msg.to;
        match self.channel.send(msg).await {
            Ok(_) => true,
            Err(e) => {
                warn!(chat = %to, error = %e, "failed to deliver message");
                false
            }
        }
    }

    /// Answers `user`. When the reply comes from a button press on a channel
    /// that can edit, the message holding the button is edited in place.
    async fn reply(
        &self,
        user: UserId,
        origin: Option<&MessageRef>,
        text: impl Into<String>,
        keyboard: Option<Keyboard>,
    ) {
        let text = text.into();
        let editable = !matches!(keyboard, Some(Keyboard::Reply(_)));
        if let Some(origin) = origin
            && editable
            && self.channel.capabilities().supports_edit
        {
            if let Err(e) = self
                .channel
                .edit_message(origin.chat, &origin.message_id, &text, keyboard)
                .await
            {
                warn!(user = %user, error = %e, "failed to edit message");
            }
            return;
        }

        let mut msg = OutboundMessage::text(user, text);
        msg.keyboard = keyboard;
        self.deliver(msg).await;
    }

    /// Tells `partner` that the dialog is over and asks for a rating.
    async fn notify_partner_left(&self, partner: UserId) {
        self.deliver(
            OutboundMessage::text(partner, texts::PARTNER_LEFT)
                .with_keyboard(texts::rating_keyboard()),
        )
        .await;
    }
}

/// Current unix time in seconds.
fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
