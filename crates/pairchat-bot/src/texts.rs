// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing strings and keyboards.

use std::ops::RangeInclusive;

use pairchat_core::UserId;
use pairchat_core::types::{Button, Gender, Keyboard, Profile};
use pairchat_moderation::ReportReason;

pub const BTN_SEARCH: &str = "🔍 Search";
pub const BTN_NEW_SEARCH: &str = "🔄 New search";
pub const BTN_END: &str = "🚫 End";
pub const BTN_PROFILE: &str = "👤 Profile";
pub const BTN_REPORT: &str = "🚨 Report";

pub const WELCOME: &str = "👋 Welcome!\n\nFirst, pick your gender 👇";
pub const NO_PROFILE: &str = "👤 No profile yet.\n\nLet's create one 👇";
pub const PICK_AGE: &str = "🎂 Pick your age:";
pub const PROFILE_CREATED: &str = "✅ Profile created!";
pub const READY: &str = "All set 🎉\n\nUse the buttons below 👇";
pub const PROFILE_RESET: &str = "📝 Profile deleted.\n\nLet's create a new one. Pick your gender:";

pub const BANNED: &str = "⛔ Access restricted.\n\nYou are temporarily banned.";
pub const MUTED: &str = "🔇 You are muted.";
pub const ALREADY_IN_DIALOG: &str = "⚠️ You are already in a dialog.";
pub const ALREADY_SEARCHING: &str = "🔎 Search is already running.\n\nPlease wait…";
pub const SEARCHING: &str = "🔍 Looking for a partner…\n\nThis may take a few seconds ⏳";
pub const MATCHED: &str = "✨ Partner found!\n\nYou can start chatting 💬";
pub const PARTNER_FOUND: &str = "✨ Partner found!\n\nYou can write a message 💬";
pub const NEW_SEARCH: &str = "🔄 Starting a new search…";
pub const PARTNER_LEFT: &str = "❌ Your partner ended the dialog.\n\nRate your partner 👇";
pub const DIALOG_ENDED: &str = "⛔ Dialog ended.\n\nWhat next?";
pub const LEFT_CHAT: &str = "⛔ Dialog ended.\n\nYou left the chat.";
pub const PRESS_SEARCH: &str = "Press «🔍 Search» below 👇";

pub const REPORT_ONLY_IN_DIALOG: &str = "⚠️ Reports can only be sent during a dialog.\n\n\
     Or end the dialog and press «🚨 Report» in the panel.";
pub const PICK_REPORT_REASON: &str = "🚨 Pick a reason for the report:";
pub const NO_REPORT_TARGET: &str = "ℹ️ No partner to report.";
pub const REPORT_SENT: &str = "✅ Report sent. Thank you!";

pub const NO_LAST_PARTNER: &str = "ℹ️ No data about your last partner.";
pub const PARTNER_PROFILE_MISSING: &str = "ℹ️ Your partner's profile was not found.";
pub const RATE_PARTNER: &str = "⭐ Rate your partner:";
pub const RATING_SKIPPED: &str = "✅ Rating skipped.";
pub const NO_RATING_TARGET: &str = "ℹ️ There is no partner to rate.";

pub const BLACKLIST_ADDED: &str = "✅ Added to your blacklist.";
pub const BLACKLIST_ALREADY: &str = "ℹ️ Already in your blacklist.";
pub const BLACKLIST_REMOVED: &str = "✅ Removed from your blacklist.";
pub const BLACKLIST_MISSING: &str = "ℹ️ Not in your blacklist.";
pub const BLACKLIST_EMPTY: &str = "📋 Your blacklist is empty.";
pub const BLACKLIST_TITLE: &str = "⛔ Blacklist";
pub const CLOSED: &str = "✅ Closed.";

pub const MENU: &str = "📋 Main menu\n\nPick an option 👇";
pub const KEYBOARD_SHOWN: &str = "⌨️ Keyboard shown";
pub const MAIN_MENU: &str = "⬇️ Main menu";
pub const PRIVACY: &str = "🔒 Privacy policy\n\n\
     • Messages are never stored\n\
     • Your partner stays anonymous\n\
     • Reports are reviewed by moderators";
pub const INFO: &str = "📖 Rules\n\n\
     • No insults\n\
     • No spam\n\
     • Violations lead to a mute or ban";

pub const NO_ACCESS: &str = "⛔ No access.";
pub const CANNOT_SANCTION_ADMIN: &str = "⚠️ Admins, including yourself, cannot be sanctioned.";
pub const ADMIN_PROFILE_MISSING: &str = "Profile not found.";
pub const UNBANNED: &str = "🔓 Ban lifted.";
pub const UNMUTED: &str = "🔊 Mute lifted.";
pub const NOTHING_TO_LIFT: &str = "ℹ️ There was nothing to lift.";
pub const BROADCAST_EMPTY: &str = "❌ Write the text after /broadcast";

pub const FAILURE: &str = "⚠️ Something went wrong, please try again.";

/// How many blocked users the list view shows.
pub const BLACKLIST_PAGE: usize = 10;

pub fn main_keyboard() -> Keyboard {
    Keyboard::Reply(vec![
        vec![BTN_SEARCH.into(), BTN_NEW_SEARCH.into()],
        vec![BTN_END.into()],
        vec![BTN_PROFILE.into(), BTN_REPORT.into()],
    ])
}

pub fn menu_keyboard() -> Keyboard {
    Keyboard::Inline(vec![
        vec![Button::new("⌨️ Show buttons", "menu_show_keyboard")],
        vec![Button::new("🚫 Blacklist", "menu_blacklist")],
        vec![Button::new("🔒 Privacy", "menu_privacy")],
        vec![Button::new("📖 Info", "menu_info")],
    ])
}

pub fn start_keyboard() -> Keyboard {
    Keyboard::Inline(vec![
        vec![Button::new("🔍 Search", "menu_search")],
        vec![Button::new("📝 Create profile again", "menu_reset_profile")],
    ])
}

pub fn gender_keyboard() -> Keyboard {
    Keyboard::Inline(vec![vec![
        Button::new("♂️ Male", "gender_male"),
        Button::new("♀️ Female", "gender_female"),
    ]])
}

pub fn age_keyboard(ages: RangeInclusive<u8>) -> Keyboard {
    let buttons: Vec<Button> = ages
        .map(|age| Button::new(age.to_string(), format!("age_{age}")))
        .collect();
    Keyboard::Inline(buttons.chunks(5).map(<[Button]>::to_vec).collect())
}

pub fn post_dialog_keyboard() -> Keyboard {
    Keyboard::Inline(vec![
        vec![Button::new("⭐ Rate partner", "post_rate")],
        vec![Button::new("🚨 Report", "post_report")],
        vec![Button::new("🚫 Add to blacklist", "post_blacklist")],
        vec![Button::new("👤 Partner profile", "post_partner_profile")],
        vec![Button::new("🔄 New search", "post_newsearch")],
    ])
}

pub fn rating_keyboard() -> Keyboard {
    let star = |n: usize| Button::new("⭐".repeat(n), format!("rate_{n}"));
    Keyboard::Inline(vec![
        vec![star(1), star(2), star(3)],
        vec![star(4), star(5)],
        vec![Button::new("❌ Skip", "rate_skip")],
    ])
}

pub fn report_keyboard() -> Keyboard {
    Keyboard::Inline(vec![
        vec![Button::new("🧨 Spam", "report_spam")],
        vec![Button::new("🤬 Abuse", "report_abuse")],
        vec![Button::new("🔞 Adult content", "report_18")],
        vec![Button::new("🚫 Other", "report_other")],
    ])
}

pub fn admin_keyboard(target: UserId) -> Keyboard {
    Keyboard::Inline(vec![
        vec![
            Button::new("🚫 Ban", format!("admin_ban24_{target}")),
            Button::new("🔓 Unban", format!("admin_unban_{target}")),
        ],
        vec![
            Button::new("🔇 Mute", format!("admin_mute30_{target}")),
            Button::new("🔊 Unmute", format!("admin_unmute_{target}")),
        ],
        vec![Button::new("👤 Profile", format!("admin_profile_{target}"))],
    ])
}

/// Add/remove for the current partner (if any), then list and close.
pub fn blacklist_keyboard(partner: Option<(UserId, bool)>) -> Keyboard {
    let mut rows = Vec::new();
    match partner {
        Some((peer, true)) => rows.push(vec![Button::new(
            "✅ Remove partner from blacklist",
            format!("bl_rm_{peer}"),
        )]),
        Some((peer, false)) => rows.push(vec![Button::new(
            "⛔ Add partner to blacklist",
            format!("bl_add_{peer}"),
        )]),
        None => {}
    }
    rows.push(vec![Button::new("📋 Show my blacklist", "bl_list")]);
    rows.push(vec![Button::new("❌ Close", "bl_close")]);
    Keyboard::Inline(rows)
}

pub fn blacklist_list_keyboard(shown: &[UserId]) -> Keyboard {
    let mut rows: Vec<Vec<Button>> = shown
        .iter()
        .map(|id| vec![Button::new(format!("❌ Remove {id}"), format!("bl_rm_{id}"))])
        .collect();
    rows.push(vec![Button::new("⬅️ Back", "bl_back")]);
    Keyboard::Inline(rows)
}

pub fn blacklist_summary(count: usize) -> String {
    format!(
        "{BLACKLIST_TITLE}\n\nBlocked users: {count}.\n\n\
         • People in your blacklist will never be matched with you again.\n\
         • Use the buttons below to manage it."
    )
}

pub fn blacklist_listing(all: &[UserId]) -> String {
    let mut text = String::from("📋 Your blacklist:\n");
    for id in all.iter().take(BLACKLIST_PAGE) {
        text.push_str(&format!("\n• {id}"));
    }
    if all.len() > BLACKLIST_PAGE {
        text.push_str(&format!("\n\n…and {} more.", all.len() - BLACKLIST_PAGE));
    }
    text
}

pub fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "♂️ Male",
        Gender::Female => "♀️ Female",
    }
}

/// Renders an average as stars, e.g. `⭐⭐⭐✨☆ (3.5)`.
pub fn rating_stars(average: f64) -> String {
    if average <= 0.0 {
        return "No ratings yet".to_string();
    }
    let full = average.trunc() as usize;
    let half = usize::from(average - average.trunc() >= 0.5);
    let empty = 5usize.saturating_sub(full + half);
    format!(
        "{}{}{} ({average})",
        "⭐".repeat(full),
        "✨".repeat(half),
        "☆".repeat(empty)
    )
}

/// Figures shown on a user's own profile.
pub struct ProfileCard {
    pub user: UserId,
    pub profile: Profile,
    pub average: f64,
    pub ratings: u32,
    pub blacklisted: usize,
    pub reports: u32,
}

pub fn own_profile(card: &ProfileCard) -> String {
    format!(
        "👤 YOUR PROFILE\n\n\
         🆔 ID: {}\n\
         🧑 Gender: {}\n\
         🎂 Age: {}\n\n\
         ⭐ Rating: {} ({} ratings)\n\
         🚫 Blacklisted: {}\n\
         🚨 Reports against you: {}",
        card.user,
        gender_label(card.profile.gender),
        card.profile.age,
        rating_stars(card.average),
        card.ratings,
        card.blacklisted,
        card.reports,
    )
}

pub fn partner_profile(partner: UserId, profile: Profile, reports: u32, blocked: bool) -> String {
    format!(
        "👤 PARTNER PROFILE\n\n\
         🆔 ID: {partner}\n\
         🧑 Gender: {}\n\
         🎂 Age: {}\n\n\
         🚨 Reports: {reports}\n\
         🚫 In your blacklist: {}",
        gender_label(profile.gender),
        profile.age,
        yes_no(blocked),
    )
}

pub fn admin_profile(target: UserId, profile: Profile, reports: u32, banned: bool, muted: bool) -> String {
    format!(
        "👤 Profile\n\n\
         ID: {target}\n\
         Gender: {}\n\
         Age: {}\n\
         Reports: {reports}\n\
         Ban: {}\n\
         Mute: {}",
        gender_label(profile.gender),
        profile.age,
        yes_no(banned),
        yes_no(muted),
    )
}

pub fn report_log(reporter: UserId, target: UserId, reason: ReportReason, count: u32) -> String {
    format!(
        "🚨 Report\n\n\
         From: {reporter}\n\
         Against: {target}\n\
         Reason: {}\n\
         Reports against user: {count}",
        reason.label()
    )
}

pub fn rated(stars: u8) -> String {
    format!(
        "✅ Thanks for rating!\n\nYou gave {}",
        "⭐".repeat(usize::from(stars))
    )
}

pub fn banned_for(minutes: u32) -> String {
    format!("🚫 Banned for {}.", duration(minutes))
}

pub fn muted_for(minutes: u32) -> String {
    format!("🔇 Muted for {}.", duration(minutes))
}

pub fn stats(users: usize, dialogs: usize, queued: usize) -> String {
    format!("👥 Users: {users}\n💬 In dialogs: {dialogs}\n🔍 Searching: {queued}")
}

pub fn broadcast_sent(count: usize) -> String {
    format!("✅ Broadcast sent ({count} users)")
}

fn duration(minutes: u32) -> String {
    if minutes % 60 == 0 {
        format!("{} h", minutes / 60)
    } else {
        format!("{minutes} min")
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_render_halves_and_empty() {
        assert_eq!(rating_stars(0.0), "No ratings yet");
        assert_eq!(rating_stars(3.5), "⭐⭐⭐✨☆ (3.5)");
        assert_eq!(rating_stars(5.0), "⭐⭐⭐⭐⭐ (5)");
    }

    #[test]
    fn age_keyboard_wraps_rows_of_five() {
        let Keyboard::Inline(rows) = age_keyboard(16..=22) else {
            panic!("expected inline keyboard");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 5);
        assert_eq!(rows[1][1].data, "age_22");
    }

    #[test]
    fn blacklist_keyboard_offers_the_right_toggle() {
        let Keyboard::Inline(rows) = blacklist_keyboard(Some((UserId(5), true))) else {
            panic!("expected inline keyboard");
        };
        assert_eq!(rows[0][0].data, "bl_rm_5");
        let Keyboard::Inline(rows) = blacklist_keyboard(None) else {
            panic!("expected inline keyboard");
        };
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn listing_truncates_after_a_page() {
        let ids: Vec<UserId> = (1..=12).map(UserId).collect();
        let text = blacklist_listing(&ids);
        assert!(text.contains("• 10"));
        assert!(!text.contains("• 11"));
        assert!(text.ends_with("…and 2 more."));
    }

    #[test]
    fn durations_prefer_hours() {
        assert_eq!(banned_for(1440), "🚫 Banned for 24 h.");
        assert_eq!(muted_for(30), "🔇 Muted for 30 min.");
    }
}
