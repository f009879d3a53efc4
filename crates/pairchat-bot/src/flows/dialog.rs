// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Searching, pairing, ending and relaying.

use pairchat_core::types::{InboundMessage, MessageContent, OutboundMessage, SanctionKind};
use pairchat_core::{PairchatError, UserId};
use pairchat_engine::{RelayRoute, SearchOutcome};
use tracing::{debug, info};

use crate::flows::profile::profile_card;
use crate::{BotLoop, now, texts};

impl BotLoop {
    /// `/start`: drops any dialog or search, then shows the profile or registration.
    pub(crate) async fn start(&mut self, user: UserId) -> Result<(), PairchatError> {
        self.pending_gender.remove(&user);
        let (ended, card) = self
            .switchboard
            .transact(|w| (w.lobby.end(user), profile_card(w, user)))
            .await?;
        if let Some(partner) = ended {
            self.notify_partner_left(partner).await;
        }

        match card {
            Some(card) => {
                self.reply(
                    user,
                    None,
                    texts::own_profile(&card),
                    Some(texts::start_keyboard()),
                )
                .await
            }
            None => {
                self.reply(user, None, texts::WELCOME, Some(texts::gender_keyboard()))
                    .await
            }
        }
        Ok(())
    }

    pub(crate) async fn search(&mut self, user: UserId) -> Result<(), PairchatError> {
        self.pending_gender.remove(&user);
        if !self.may_search(user).await {
            return Ok(());
        }
        let outcome = self
            .switchboard
            .try_transact(|w| Ok(w.lobby.search(user)?))
            .await?;
        self.announce_search(user, outcome).await;
        Ok(())
    }

    /// Ends the current dialog, if any, and searches again in one step.
    pub(crate) async fn new_search(&mut self, user: UserId) -> Result<(), PairchatError> {
        self.pending_gender.remove(&user);
        if !self.may_search(user).await {
            return Ok(());
        }
        let outcome = self
            .switchboard
            .try_transact(|w| Ok(w.lobby.new_search(user)?))
            .await?;
        if let Some(partner) = outcome.ended {
            self.notify_partner_left(partner).await;
        }
        self.reply(user, None, texts::NEW_SEARCH, Some(texts::main_keyboard()))
            .await;
        self.announce_search(user, outcome.search).await;
        Ok(())
    }

    pub(crate) async fn end(&mut self, user: UserId) -> Result<(), PairchatError> {
        let ended = self.switchboard.transact(|w| w.lobby.end(user)).await?;
        match ended {
            Some(partner) => {
                self.notify_partner_left(partner).await;
                self.reply(
                    user,
                    None,
                    texts::DIALOG_ENDED,
                    Some(texts::post_dialog_keyboard()),
                )
                .await;
            }
            None => {
                self.reply(user, None, texts::LEFT_CHAT, Some(texts::main_keyboard()))
                    .await
            }
        }
        Ok(())
    }

    /// Forwards a message to the partner: text is resent, anything else copied.
    pub(crate) async fn relay(&mut self, inbound: &InboundMessage) -> Result<(), PairchatError> {
        let user = inbound.sender;
        let (muted, route) = self
            .switchboard
            .read(|w| {
                (
                    w.moderation.denies(user, SanctionKind::Mute, now()),
                    w.lobby.peek_relay_route(user),
                )
            })
            .await;

        if muted {
            self.reply(user, None, texts::MUTED, None).await;
            return Ok(());
        }

        match route {
            RelayRoute::Deliver(partner) => {
                let msg = match &inbound.content {
                    MessageContent::Text(text) => OutboundMessage::text(partner, text.clone()),
                    _ if self.channel.capabilities().supports_copy => {
                        OutboundMessage::copy(partner, user, inbound.id.clone())
                    }
                    _ => {
                        debug!(user = %user, "channel cannot copy media, dropping");
                        return Ok(());
                    }
                };
                self.deliver(msg).await;
            }
            RelayRoute::NotPaired => {
                debug!(user = %user, "not in a dialog, nothing to relay");
            }
            RelayRoute::Healed { .. } => {
                // The stale partner must not receive anything.
                let route = self
                    .switchboard
                    .transact(|w| w.lobby.relay_route(user))
                    .await?;
                debug!(user = %user, ?route, "stale dialog cleaned up before relay");
            }
        }
        Ok(())
    }

    /// Ban check plus registration check. Replies and returns `false` when denied.
    async fn may_search(&self, user: UserId) -> bool {
        let (banned, registered) = self
            .switchboard
            .read(|w| {
                (
                    w.moderation.denies(user, SanctionKind::Ban, now()),
                    w.moderation.profiles.get(user).is_some(),
                )
            })
            .await;
        if banned {
            self.reply(user, None, texts::BANNED, Some(texts::main_keyboard()))
                .await;
            return false;
        }
        if !registered {
            self.reply(user, None, texts::NO_PROFILE, Some(texts::gender_keyboard()))
                .await;
            return false;
        }
        true
    }

    async fn announce_search(&self, user: UserId, outcome: SearchOutcome) {
        let text = match outcome {
            SearchOutcome::AlreadyPaired(_) => texts::ALREADY_IN_DIALOG,
            SearchOutcome::AlreadySearching => texts::ALREADY_SEARCHING,
            SearchOutcome::Waiting => texts::SEARCHING,
            SearchOutcome::Matched(partner) => {
                info!(user = %user, partner = %partner, "users matched");
                self.deliver(
                    OutboundMessage::text(partner, texts::PARTNER_FOUND)
                        .with_keyboard(texts::main_keyboard()),
                )
                .await;
                texts::MATCHED
            }
        };
        self.reply(user, None, text, Some(texts::main_keyboard()))
            .await;
    }
}
