// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing of inline-button payloads and reply-keyboard labels.

use pairchat_core::UserId;
use pairchat_core::types::Gender;
use pairchat_moderation::ReportReason;

use crate::texts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ShowKeyboard,
    Blacklist,
    Privacy,
    Info,
    Search,
    ResetProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlacklistAction {
    Add(UserId),
    Remove(UserId),
    List,
    Back,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOp {
    Ban,
    Unban,
    Mute,
    Unmute,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    Rate,
    Report,
    Blacklist,
    PartnerProfile,
    NewSearch,
}

/// A decoded inline keyboard press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Menu(MenuAction),
    Gender(Gender),
    Age(u8),
    Blacklist(BlacklistAction),
    Report(ReportReason),
    Admin { op: AdminOp, target: UserId },
    Post(PostAction),
    /// Stars in `1..=5`.
    Rate(u8),
    RateSkip,
}

impl Action {
    /// Returns `None` for anything unrecognised, including out-of-range numbers.
    pub fn parse(data: &str) -> Option<Self> {
        if let Some(rest) = data.strip_prefix("menu_") {
            let menu = match rest {
                "show_keyboard" => MenuAction::ShowKeyboard,
                "blacklist" => MenuAction::Blacklist,
                "privacy" => MenuAction::Privacy,
                "info" => MenuAction::Info,
                "search" => MenuAction::Search,
                "reset_profile" => MenuAction::ResetProfile,
                _ => return None,
            };
            return Some(Self::Menu(menu));
        }
        if let Some(rest) = data.strip_prefix("gender_") {
            return rest.parse::<Gender>().ok().map(Self::Gender);
        }
        if let Some(rest) = data.strip_prefix("age_") {
            return rest.parse::<u8>().ok().map(Self::Age);
        }
        if let Some(rest) = data.strip_prefix("bl_") {
            let action = match rest {
                "list" => BlacklistAction::List,
                "back" => BlacklistAction::Back,
                "close" => BlacklistAction::Close,
                _ => {
                    if let Some(id) = rest.strip_prefix("add_") {
                        BlacklistAction::Add(id.parse().ok()?)
                    } else if let Some(id) = rest.strip_prefix("rm_") {
                        BlacklistAction::Remove(id.parse().ok()?)
                    } else {
                        return None;
                    }
                }
            };
            return Some(Self::Blacklist(action));
        }
        if let Some(rest) = data.strip_prefix("report_") {
            return ReportReason::from_key(rest).map(Self::Report);
        }
        if let Some(rest) = data.strip_prefix("admin_") {
            const OPS: [(&str, AdminOp); 5] = [
                ("ban24_", AdminOp::Ban),
                ("unban_", AdminOp::Unban),
                ("mute30_", AdminOp::Mute),
                ("unmute_", AdminOp::Unmute),
                ("profile_", AdminOp::Profile),
            ];
            return OPS.iter().find_map(|(prefix, op)| {
                let target = rest.strip_prefix(prefix)?.parse().ok()?;
                Some(Self::Admin { op: *op, target })
            });
        }
        if let Some(rest) = data.strip_prefix("post_") {
            let post = match rest {
                "rate" => PostAction::Rate,
                "report" => PostAction::Report,
                "blacklist" => PostAction::Blacklist,
                "partner_profile" => PostAction::PartnerProfile,
                "newsearch" => PostAction::NewSearch,
                _ => return None,
            };
            return Some(Self::Post(post));
        }
        if let Some(rest) = data.strip_prefix("rate_") {
            if rest == "skip" {
                return Some(Self::RateSkip);
            }
            return rest
                .parse::<u8>()
                .ok()
                .filter(|stars| (1..=5).contains(stars))
                .map(Self::Rate);
        }
        None
    }
}

/// Persistent reply-keyboard buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyButton {
    Search,
    NewSearch,
    End,
    Profile,
    Report,
}

impl ReplyButton {
    pub fn from_label(text: &str) -> Option<Self> {
        match text.trim() {
            texts::BTN_SEARCH => Some(Self::Search),
            texts::BTN_NEW_SEARCH => Some(Self::NewSearch),
            texts::BTN_END => Some(Self::End),
            texts::BTN_PROFILE => Some(Self::Profile),
            texts::BTN_REPORT => Some(Self::Report),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_and_registration() {
        assert_eq!(
            Action::parse("menu_reset_profile"),
            Some(Action::Menu(MenuAction::ResetProfile))
        );
        assert_eq!(
            Action::parse("gender_female"),
            Some(Action::Gender(Gender::Female))
        );
        assert_eq!(Action::parse("age_18"), Some(Action::Age(18)));
        assert_eq!(Action::parse("gender_other"), None);
        assert_eq!(Action::parse("menu_unknown"), None);
    }

    #[test]
    fn parses_blacklist_actions() {
        assert_eq!(
            Action::parse("bl_add_42"),
            Some(Action::Blacklist(BlacklistAction::Add(UserId(42))))
        );
        assert_eq!(
            Action::parse("bl_rm_-7"),
            Some(Action::Blacklist(BlacklistAction::Remove(UserId(-7))))
        );
        assert_eq!(
            Action::parse("bl_close"),
            Some(Action::Blacklist(BlacklistAction::Close))
        );
        assert_eq!(Action::parse("bl_add_x"), None);
    }

    #[test]
    fn parses_admin_actions() {
        assert_eq!(
            Action::parse("admin_ban24_9"),
            Some(Action::Admin {
                op: AdminOp::Ban,
                target: UserId(9)
            })
        );
        assert_eq!(
            Action::parse("admin_unmute_9"),
            Some(Action::Admin {
                op: AdminOp::Unmute,
                target: UserId(9)
            })
        );
        assert_eq!(Action::parse("admin_kick_9"), None);
    }

    #[test]
    fn parses_reports_posts_and_ratings() {
        assert_eq!(
            Action::parse("report_18"),
            Some(Action::Report(ReportReason::Adult))
        );
        assert_eq!(
            Action::parse("post_partner_profile"),
            Some(Action::Post(PostAction::PartnerProfile))
        );
        assert_eq!(Action::parse("rate_5"), Some(Action::Rate(5)));
        assert_eq!(Action::parse("rate_skip"), Some(Action::RateSkip));
        assert_eq!(Action::parse("rate_0"), None);
        assert_eq!(Action::parse("rate_6"), None);
    }

    #[test]
    fn reply_buttons_match_their_labels() {
        assert_eq!(
            ReplyButton::from_label(texts::BTN_SEARCH),
            Some(ReplyButton::Search)
        );
        assert_eq!(ReplyButton::from_label("🚫 End"), Some(ReplyButton::End));
        assert_eq!(ReplyButton::from_label("hello"), None);
    }
}
