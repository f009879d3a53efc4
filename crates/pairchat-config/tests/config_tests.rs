// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the configuration system.

use pairchat_config::diagnostic::ConfigError;
use pairchat_config::model::PairchatConfig;
use pairchat_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};
use serial_test::serial;

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[bot]
name = "night-chat"
log_level = "debug"

[telegram]
bot_token = "123:ABC"

[storage]
database_path = "/tmp/pairchat-test.db"
wal_mode = false

[moderation]
admins = [11, 22]
log_chat_id = -100123
max_reports = 3
ban_minutes = 60
mute_minutes = 5

[registration]
min_age = 18
max_age = 25
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.bot.name, "night-chat");
    assert_eq!(config.bot.log_level, "debug");
    assert_eq!(config.telegram.bot_token.as_deref(), Some("123:ABC"));
    assert_eq!(config.storage.database_path, "/tmp/pairchat-test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.moderation.admins, vec![11, 22]);
    assert_eq!(config.moderation.log_chat_id, Some(-100123));
    assert_eq!(config.moderation.max_reports, 3);
    assert_eq!(config.moderation.ban_minutes, 60);
    assert_eq!(config.moderation.mute_minutes, 5);
    assert_eq!(config.registration.min_age, 18);
    assert_eq!(config.registration.max_age, 25);
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.bot.name, "pairchat");
    assert_eq!(config.bot.log_level, "info");
    assert!(config.telegram.bot_token.is_none());
    assert_eq!(config.storage.database_path, "pairchat.db");
    assert!(config.storage.wal_mode);
    assert!(config.moderation.admins.is_empty());
    assert!(config.moderation.log_chat_id.is_none());
    assert_eq!(config.moderation.max_reports, 5);
    assert_eq!(config.moderation.ban_minutes, 1440);
    assert_eq!(config.moderation.mute_minutes, 30);
    assert_eq!(config.registration.min_age, 16);
    assert_eq!(config.registration.max_age, 20);
}

#[test]
fn unknown_top_level_section_is_rejected() {
    let err = load_config_from_str("[agent]\nname = \"x\"\n").expect_err("unknown section");
    assert!(err.to_string().contains("agent"));
}

#[test]
fn dotted_override_reaches_nested_key() {
    use figment::{Figment, providers::Serialized};

    let config: PairchatConfig = Figment::new()
        .merge(Serialized::defaults(PairchatConfig::default()))
        .merge(("telegram.bot_token", "from-env"))
        .merge(("moderation.max_reports", 9))
        .extract()
        .expect("dotted keys should merge");
    assert_eq!(config.telegram.bot_token.as_deref(), Some("from-env"));
    assert_eq!(config.moderation.max_reports, 9);
}

#[test]
fn unknown_key_suggests_correction() {
    let toml = r#"
[moderation]
max_reprts = 3
"#;
    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "max_reprts"
                && suggestion.as_deref() == Some("max_reports")
                && valid_keys.contains("log_chat_id")
        })
    });
    assert!(found, "expected UnknownKey with suggestion, got: {errors:?}");
}

#[test]
fn invalid_type_is_reported() {
    let toml = r#"
[registration]
min_age = "sixteen"
"#;
    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("min_age"))),
        "got: {errors:?}"
    );
}

#[test]
fn validation_errors_surface_through_loader() {
    let toml = r#"
[registration]
min_age = 21
max_age = 18

[moderation]
admins = [5, 5]
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 2, "got: {errors:?}");
    assert!(errors.iter().all(|e| matches!(e, ConfigError::Validation { .. })));
}

#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "admns".to_string(),
        suggestion: Some("admins".to_string()),
        valid_keys: "admins, log_chat_id".to_string(),
        span: None,
        src: None,
    };
    assert!(error.code().is_some());
    let help = error.help().map(|h| h.to_string()).unwrap_or_default();
    assert!(help.contains("did you mean `admins`"));

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render");
    assert!(buf.contains("admns"));
}

#[test]
#[serial]
fn env_overrides_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pairchat.toml");
    std::fs::write(&path, "[telegram]\nbot_token = \"from-file\"\n").unwrap();

    // SAFETY: env mutation is serialized across tests in this file.
    unsafe { std::env::set_var("PAIRCHAT_TELEGRAM_BOT_TOKEN", "from-env") };
    let result = load_and_validate_path(&path);
    unsafe { std::env::remove_var("PAIRCHAT_TELEGRAM_BOT_TOKEN") };

    let config = result.expect("should load");
    assert_eq!(config.telegram.bot_token.as_deref(), Some("from-env"));
}

#[test]
#[serial]
fn explicit_file_errors_point_into_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pairchat.toml");
    std::fs::write(&path, "[bot]\nnaem = \"x\"\n").unwrap();

    let errors = load_and_validate_path(&path).expect_err("should reject typo");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, .. }
            if key == "naem" && suggestion.as_deref() == Some("name"))
    });
    assert!(found, "got: {errors:?}");
}
