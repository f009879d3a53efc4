// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order: `/etc/pairchat/pairchat.toml`, then
//! `~/.config/pairchat/pairchat.toml`, then `./pairchat.toml`, then
//! `PAIRCHAT_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PairchatConfig;

pub(crate) const SYSTEM_CONFIG: &str = "/etc/pairchat/pairchat.toml";
pub(crate) const LOCAL_CONFIG: &str = "pairchat.toml";

/// Loads from the standard hierarchy. Later sources override earlier ones.
pub fn load_config() -> Result<PairchatConfig, figment::Error> {
    build_figment().extract()
}

/// Loads from a TOML string over the compiled defaults, ignoring env vars.
pub fn load_config_from_str(toml_content: &str) -> Result<PairchatConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PairchatConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Loads one explicit file plus env overrides (`--config`).
pub fn load_config_from_path(path: &Path) -> Result<PairchatConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PairchatConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PairchatConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

pub(crate) fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("pairchat").join("pairchat.toml"))
}

const SECTIONS: &[&str] = &["bot", "telegram", "storage", "moderation", "registration"];

/// Maps `PAIRCHAT_<SECTION>_<KEY>` onto `section.key`.
///
/// `Env::split("_")` would turn `PAIRCHAT_TELEGRAM_BOT_TOKEN` into
/// `telegram.bot.token`, so only the leading section name is split off.
fn env_provider() -> Env {
    Env::prefixed("PAIRCHAT_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    SECTIONS
        .iter()
        .find_map(|section| {
            key.strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|rest| format!("{section}.{rest}"))
        })
        .unwrap_or_else(|| key.to_string())
}
