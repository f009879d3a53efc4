// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Menu panel, blacklist panel and the post-dialog panel.

use pairchat_core::types::{MessageRef, OutboundMessage};
use pairchat_core::{PairchatError, UserId};
use tracing::info;

use crate::action::{BlacklistAction, MenuAction, PostAction};
use crate::{BotLoop, World, texts};

/// The current partner and whether `user` has blocked them.
fn partner_toggle(world: &World, user: UserId) -> Option<(UserId, bool)> {
    let partner = world.lobby.partner_of(user)?;
    Some((partner, world.lobby.blacklist().blocks(user, partner)))
}

impl BotLoop {
    pub(crate) async fn menu_action(
        &mut self,
        user: UserId,
        menu: MenuAction,
        origin: Option<&MessageRef>,
    ) -> Result<(), PairchatError> {
        match menu {
            MenuAction::ShowKeyboard => {
                self.reply(user, origin, texts::KEYBOARD_SHOWN, None).await;
                self.deliver(
                    OutboundMessage::text(user, texts::MAIN_MENU)
                        .with_keyboard(texts::main_keyboard()),
                )
                .await;
            }
            MenuAction::Search => {
                self.reply(user, origin, texts::PRESS_SEARCH, None).await;
                self.deliver(
                    OutboundMessage::text(user, texts::PRESS_SEARCH)
                        .with_keyboard(texts::main_keyboard()),
                )
                .await;
            }
            MenuAction::Blacklist => return self.show_blacklist(user, origin).await,
            MenuAction::Privacy => self.reply(user, origin, texts::PRIVACY, None).await,
            MenuAction::Info => self.reply(user, origin, texts::INFO, None).await,
            MenuAction::ResetProfile => return self.reset_profile(user, origin).await,
        }
        Ok(())
    }

    pub(crate) async fn show_blacklist(
        &mut self,
        user: UserId,
        origin: Option<&MessageRef>,
    ) -> Result<(), PairchatError> {
        let (count, toggle) = self
            .switchboard
            .read(|w| {
                (
                    w.lobby.blacklist().blocked_by(user).len(),
                    partner_toggle(w, user),
                )
            })
            .await;
        self.reply(
            user,
            origin,
            texts::blacklist_summary(count),
            Some(texts::blacklist_keyboard(toggle)),
        )
        .await;
        Ok(())
    }

    pub(crate) async fn blacklist_action(
        &mut self,
        user: UserId,
        action: BlacklistAction,
        origin: Option<&MessageRef>,
    ) -> Result<(), PairchatError> {
        match action {
            BlacklistAction::Close => self.reply(user, origin, texts::CLOSED, None).await,
            BlacklistAction::Back => return self.show_blacklist(user, origin).await,
            BlacklistAction::List => {
                let (blocked, toggle) = self
                    .switchboard
                    .read(|w| {
                        (
                            w.lobby.blacklist().blocked_by(user).to_vec(),
                            partner_toggle(w, user),
                        )
                    })
                    .await;
                if blocked.is_empty() {
                    self.reply(
                        user,
                        origin,
                        texts::BLACKLIST_EMPTY,
                        Some(texts::blacklist_keyboard(toggle)),
                    )
                    .await;
                } else {
                    let shown = &blocked[..blocked.len().min(texts::BLACKLIST_PAGE)];
                    self.reply(
                        user,
                        origin,
                        texts::blacklist_listing(&blocked),
                        Some(texts::blacklist_list_keyboard(shown)),
                    )
                    .await;
                }
            }
            BlacklistAction::Add(peer) => {
                let (outcome, toggle) = self
                    .switchboard
                    .transact(|w| (w.lobby.block(user, peer), partner_toggle(w, user)))
                    .await?;
                if let Some(partner) = outcome.ended {
                    self.notify_partner_left(partner).await;
                }
                let text = if outcome.added {
                    texts::BLACKLIST_ADDED
                } else {
                    texts::BLACKLIST_ALREADY
                };
                self.reply(user, origin, text, Some(texts::blacklist_keyboard(toggle)))
                    .await;
            }
            BlacklistAction::Remove(peer) => {
                let (removed, toggle) = self
                    .switchboard
                    .transact(|w| (w.lobby.unblock(user, peer), partner_toggle(w, user)))
                    .await?;
                let text = if removed {
                    texts::BLACKLIST_REMOVED
                } else {
                    texts::BLACKLIST_MISSING
                };
                self.reply(user, origin, text, Some(texts::blacklist_keyboard(toggle)))
                    .await;
            }
        }
        Ok(())
    }

    /// Buttons under "dialog ended". All of them act on the last partner.
    pub(crate) async fn post_action(
        &mut self,
        user: UserId,
        post: PostAction,
        origin: Option<&MessageRef>,
    ) -> Result<(), PairchatError> {
        if post == PostAction::NewSearch {
            self.reply(user, origin, texts::NEW_SEARCH, None).await;
            return self.search(user).await;
        }

        let Some(partner) = self
            .switchboard
            .read(|w| w.lobby.last_partner(user))
            .await
        else {
            self.reply(user, origin, texts::NO_LAST_PARTNER, None).await;
            return Ok(());
        };

        match post {
            PostAction::Rate => {
                self.reply(user, origin, texts::RATE_PARTNER, Some(texts::rating_keyboard()))
                    .await
            }
            PostAction::Report => {
                self.reply(
                    user,
                    origin,
                    texts::PICK_REPORT_REASON,
                    Some(texts::report_keyboard()),
                )
                .await
            }
            PostAction::Blacklist => {
                let outcome = self
                    .switchboard
                    .transact(|w| w.lobby.block(user, partner))
                    .await?;
                if let Some(ended) = outcome.ended {
                    self.notify_partner_left(ended).await;
                }
                let text = if outcome.added {
                    texts::BLACKLIST_ADDED
                } else {
                    texts::BLACKLIST_ALREADY
                };
                self.reply(user, origin, text, None).await;
            }
            PostAction::PartnerProfile => {
                let view = self
                    .switchboard
                    .read(|w| {
                        w.moderation.profiles.get(partner).map(|profile| {
                            texts::partner_profile(
                                partner,
                                profile,
                                w.moderation.reports.count(partner),
                                w.lobby.blacklist().blocks(user, partner),
                            )
                        })
                    })
                    .await;
                let text = view.unwrap_or_else(|| texts::PARTNER_PROFILE_MISSING.to_string());
                self.reply(user, origin, text, None).await;
            }
            PostAction::NewSearch => {}
        }
        Ok(())
    }

    /// Rates the peer this user owes a rating to. The pointer is one-shot.
    pub(crate) async fn rate(
        &mut self,
        user: UserId,
        stars: u8,
        origin: Option<&MessageRef>,
    ) -> Result<(), PairchatError> {
        let owed = self
            .switchboard
            .read(|w| w.lobby.pending_rating(user))
            .await;
        if owed.is_none() {
            self.reply(user, origin, texts::NO_RATING_TARGET, None).await;
            return Ok(());
        }

        let rated = self
            .switchboard
            .try_transact(|w| {
                let Some(partner) = w.lobby.take_pending_rating(user) else {
                    return Ok(None);
                };
                w.moderation.ratings.record(partner, stars)?;
                Ok(Some(partner))
            })
            .await?;
        match rated {
            Some(partner) => {
                info!(user = %user, partner = %partner, stars, "partner rated");
                self.reply(user, origin, texts::rated(stars), None).await;
            }
            None => self.reply(user, origin, texts::NO_RATING_TARGET, None).await,
        }
        Ok(())
    }

    pub(crate) async fn skip_rating(
        &mut self,
        user: UserId,
        origin: Option<&MessageRef>,
    ) -> Result<(), PairchatError> {
        self.switchboard
            .transact(|w| w.lobby.skip_rating(user))
            .await?;
        self.reply(user, origin, texts::RATING_SKIPPED, None).await;
        Ok(())
    }
}
