// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registration and the profile view.

use pairchat_core::types::{Gender, MessageRef, OutboundMessage, Profile};
use pairchat_core::{PairchatError, UserId};
use tracing::{debug, info};

use crate::texts::{self, ProfileCard};
use crate::{BotLoop, World};

/// Everything the own-profile view shows, or `None` if `user` is unregistered.
pub(crate) fn profile_card(world: &World, user: UserId) -> Option<ProfileCard> {
    let profile = world.moderation.profiles.get(user)?;
    Some(ProfileCard {
        user,
        profile,
        average: world.moderation.ratings.average(user),
        ratings: world.moderation.ratings.count(user),
        blacklisted: world.lobby.blacklist().blocked_by(user).len(),
        reports: world.moderation.reports.count(user),
    })
}

impl BotLoop {
    pub(crate) async fn show_profile(&mut self, user: UserId) -> Result<(), PairchatError> {
        match self.switchboard.read(|w| profile_card(w, user)).await {
            Some(card) => {
                self.reply(
                    user,
                    None,
                    texts::own_profile(&card),
                    Some(texts::main_keyboard()),
                )
                .await
            }
            None => {
                self.reply(user, None, texts::NO_PROFILE, Some(texts::gender_keyboard()))
                    .await
            }
        }
        Ok(())
    }

    pub(crate) async fn select_gender(
        &mut self,
        user: UserId,
        gender: Gender,
        origin: Option<&MessageRef>,
    ) -> Result<(), PairchatError> {
        self.pending_gender.insert(user, gender);
        let ages = self.config.registration.min_age..=self.config.registration.max_age;
        self.reply(user, origin, texts::PICK_AGE, Some(texts::age_keyboard(ages)))
            .await;
        Ok(())
    }

    /// Stores the profile. Without a gender picked first, registration restarts.
    pub(crate) async fn select_age(
        &mut self,
        user: UserId,
        age: u8,
        origin: Option<&MessageRef>,
    ) -> Result<(), PairchatError> {
        let allowed = self.config.registration.min_age..=self.config.registration.max_age;
        if !allowed.contains(&age) {
            debug!(user = %user, age, "age outside the allowed range");
            self.reply(user, origin, texts::PICK_AGE, Some(texts::age_keyboard(allowed)))
                .await;
            return Ok(());
        }
        let Some(gender) = self.pending_gender.get(&user).copied() else {
            self.reply(user, origin, texts::WELCOME, Some(texts::gender_keyboard()))
                .await;
            return Ok(());
        };

        let profile = Profile { gender, age };
        self.switchboard
            .transact(|w| w.moderation.profiles.set(user, profile))
            .await?;
        self.pending_gender.remove(&user);
        info!(user = %user, "profile created");

        self.reply(user, origin, texts::PROFILE_CREATED, None).await;
        self.deliver(OutboundMessage::text(user, texts::READY).with_keyboard(texts::main_keyboard()))
            .await;
        Ok(())
    }

    pub(crate) async fn reset_profile(
        &mut self,
        user: UserId,
        origin: Option<&MessageRef>,
    ) -> Result<(), PairchatError> {
        self.switchboard
            .transact(|w| w.moderation.profiles.delete(user))
            .await?;
        self.pending_gender.remove(&user);
        self.reply(user, origin, texts::PROFILE_RESET, Some(texts::gender_keyboard()))
            .await;
        Ok(())
    }
}
