// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks serde cannot express. All errors are collected.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::PairchatConfig;

pub fn validate_config(config: &PairchatConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::validation(
            "storage.database_path must not be empty",
        ));
    }

    let reg = &config.registration;
    if reg.min_age > reg.max_age {
        errors.push(ConfigError::validation(format!(
            "registration.min_age ({}) must not exceed registration.max_age ({})",
            reg.min_age, reg.max_age
        )));
    }

    let moderation = &config.moderation;
    if moderation.max_reports == 0 {
        errors.push(ConfigError::validation(
            "moderation.max_reports must be at least 1",
        ));
    }
    for (key, minutes) in [
        ("ban_minutes", moderation.ban_minutes),
        ("mute_minutes", moderation.mute_minutes),
    ] {
        if minutes == 0 {
            errors.push(ConfigError::validation(format!(
                "moderation.{key} must be positive"
            )));
        }
    }

    let mut seen = HashSet::new();
    for admin in &moderation.admins {
        if !seen.insert(admin) {
            errors.push(ConfigError::validation(format!(
                "duplicate admin id `{admin}` in moderation.admins"
            )));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &PairchatConfig) -> Vec<String> {
        match validate_config(config) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn defaults_validate() {
        assert!(validate_config(&PairchatConfig::default()).is_ok());
    }

    #[test]
    fn inverted_age_range_fails() {
        let mut config = PairchatConfig::default();
        config.registration.min_age = 30;
        assert!(messages(&config).iter().any(|m| m.contains("min_age")));
    }

    #[test]
    fn zero_thresholds_fail() {
        let mut config = PairchatConfig::default();
        config.moderation.max_reports = 0;
        config.moderation.mute_minutes = 0;
        let msgs = messages(&config);
        assert_eq!(msgs.len(), 2);
        assert!(msgs.iter().any(|m| m.contains("max_reports")));
        assert!(msgs.iter().any(|m| m.contains("mute_minutes")));
    }

    #[test]
    fn duplicate_admins_fail() {
        let mut config = PairchatConfig::default();
        config.moderation.admins = vec![1, 2, 1];
        assert!(messages(&config).iter().any(|m| m.contains("duplicate admin")));
    }

    #[test]
    fn empty_database_path_fails() {
        let mut config = PairchatConfig::default();
        config.storage.database_path = "  ".into();
        assert!(messages(&config).iter().any(|m| m.contains("database_path")));
    }
}
