// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reports, admin actions and admin commands.

use pairchat_core::types::{MessageRef, OutboundMessage, SanctionKind};
use pairchat_core::{ChatId, PairchatError, UserId};
use pairchat_moderation::ReportReason;
use tracing::{debug, info};

use crate::action::AdminOp;
use crate::{BotLoop, now, texts};

impl BotLoop {
    /// Reply-keyboard "Report": only during a dialog.
    pub(crate) async fn report_start(&mut self, user: UserId) -> Result<(), PairchatError> {
        let in_dialog = self
            .switchboard
            .read(|w| w.lobby.partner_of(user).is_some())
            .await;
        if in_dialog {
            self.reply(
                user,
                None,
                texts::PICK_REPORT_REASON,
                Some(texts::report_keyboard()),
            )
            .await;
        } else {
            self.reply(
                user,
                None,
                texts::REPORT_ONLY_IN_DIALOG,
                Some(texts::main_keyboard()),
            )
            .await;
        }
        Ok(())
    }

    /// Files a report against the current partner, or the last one.
    pub(crate) async fn report_reason(
        &mut self,
        user: UserId,
        reason: ReportReason,
        origin: Option<&MessageRef>,
    ) -> Result<(), PairchatError> {
        let target = self
            .switchboard
            .read(|w| w.lobby.partner_of(user).or(w.lobby.last_partner(user)))
            .await;
        let Some(target) = target else {
            self.reply(user, origin, texts::NO_REPORT_TARGET, None).await;
            return Ok(());
        };

        let filed = self
            .switchboard
            .transact(|w| w.moderation.file_report(target))
            .await?;
        info!(
            reporter = %user,
            target = %target,
            reason = reason.key(),
            count = filed.count,
            "report received"
        );

        if let Some(log_chat) = self.config.moderation.log_chat_id {
            self.deliver(
                OutboundMessage::text(
                    ChatId(log_chat),
                    texts::report_log(user, target, reason, filed.count),
                )
                .with_keyboard(texts::admin_keyboard(target)),
            )
            .await;
        }

        self.reply(user, origin, texts::REPORT_SENT, None).await;
        Ok(())
    }

    pub(crate) async fn admin_action(
        &mut self,
        user: UserId,
        op: AdminOp,
        target: UserId,
        origin: Option<&MessageRef>,
    ) -> Result<(), PairchatError> {
        let (is_admin, target_protected) = self
            .switchboard
            .read(|w| (w.moderation.is_admin(user), w.moderation.is_admin(target)))
            .await;
        if !is_admin {
            self.reply(user, origin, texts::NO_ACCESS, None).await;
            return Ok(());
        }

        let keyboard = Some(texts::admin_keyboard(target));
        match op {
            AdminOp::Profile => {
                let view = self
                    .switchboard
                    .read(|w| {
                        let at = now();
                        w.moderation.profiles.get(target).map(|profile| {
                            texts::admin_profile(
                                target,
                                profile,
                                w.moderation.reports.count(target),
                                w.moderation.sanctions.is_sanctioned(target, SanctionKind::Ban, at),
                                w.moderation.sanctions.is_sanctioned(target, SanctionKind::Mute, at),
                            )
                        })
                    })
                    .await;
                match view {
                    Some(text) => self.reply(user, origin, text, keyboard).await,
                    None => {
                        self.reply(user, origin, texts::ADMIN_PROFILE_MISSING, None)
                            .await
                    }
                }
            }
            AdminOp::Ban | AdminOp::Mute => {
                if target_protected {
                    self.reply(user, origin, texts::CANNOT_SANCTION_ADMIN, None)
                        .await;
                    return Ok(());
                }
                let (kind, minutes) = match op {
                    AdminOp::Ban => (SanctionKind::Ban, self.config.moderation.ban_minutes),
                    _ => (SanctionKind::Mute, self.config.moderation.mute_minutes),
                };
                self.switchboard
                    .try_transact(|w| {
                        w.moderation.sanction(user, target, kind, minutes, now())?;
                        if kind == SanctionKind::Ban {
                            w.lobby.withdraw(target);
                        }
                        Ok(())
                    })
                    .await?;
                let text = match kind {
                    SanctionKind::Ban => texts::banned_for(minutes),
                    SanctionKind::Mute => texts::muted_for(minutes),
                };
                self.reply(user, origin, text, keyboard).await;
            }
            AdminOp::Unban | AdminOp::Unmute => {
                let kind = if op == AdminOp::Unban {
                    SanctionKind::Ban
                } else {
                    SanctionKind::Mute
                };
                let lifted = self
                    .switchboard
                    .try_transact(|w| Ok(w.moderation.pardon(user, target, kind)?))
                    .await?;
                let text = match (lifted, kind) {
                    (false, _) => texts::NOTHING_TO_LIFT,
                    (true, SanctionKind::Ban) => texts::UNBANNED,
                    (true, SanctionKind::Mute) => texts::UNMUTED,
                };
                info!(admin = %user, target = %target, kind = %kind, lifted, "sanction lift requested");
                self.reply(user, origin, text, keyboard).await;
            }
        }
        Ok(())
    }

    /// `/stats`, admins only. Others get no answer.
    pub(crate) async fn stats(&mut self, user: UserId) -> Result<(), PairchatError> {
        let (is_admin, stats) = self
            .switchboard
            .read(|w| (w.moderation.is_admin(user), w.stats()))
            .await;
        if !is_admin {
            debug!(user = %user, "ignoring /stats from non-admin");
            return Ok(());
        }
        self.reply(
            user,
            None,
            texts::stats(stats.users, stats.dialogs, stats.queued),
            None,
        )
        .await;
        Ok(())
    }

    /// `/broadcast <text>` to every registered user, admins only.
    pub(crate) async fn broadcast(&mut self, user: UserId, text: &str) -> Result<(), PairchatError> {
        let (is_admin, recipients) = self
            .switchboard
            .read(|w| {
                (
                    w.moderation.is_admin(user),
                    w.moderation.profiles.ids().collect::<Vec<_>>(),
                )
            })
            .await;
        if !is_admin {
            debug!(user = %user, "ignoring /broadcast from non-admin");
            return Ok(());
        }
        if text.is_empty() {
            self.reply(user, None, texts::BROADCAST_EMPTY, None).await;
            return Ok(());
        }

        let mut sent = 0;
        for recipient in recipients {
            if self.deliver(OutboundMessage::text(recipient, text)).await {
                sent += 1;
            }
        }
        info!(admin = %user, sent, "broadcast finished");
        self.reply(user, None, texts::broadcast_sent(sent), None).await;
        Ok(())
    }
}
