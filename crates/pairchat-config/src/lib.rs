// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for Pairchat.
//!
//! TOML files in the usual locations plus `PAIRCHAT_*` environment
//! overrides, strict key checking, and miette rendering of every problem
//! found.
//!
//! ```no_run
//! let config = pairchat_config::load_and_validate().expect("config errors");
//! println!("database: {}", config.storage.database_path);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::PairchatConfig;

/// Loads the standard hierarchy and validates the result.
pub fn load_and_validate() -> Result<PairchatConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Loads an explicit file (with env overrides) and validates the result.
pub fn load_and_validate_path(path: &Path) -> Result<PairchatConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        read_source(path).into_iter().collect()
    })
}

/// Loads a TOML string and validates the result.
pub fn load_and_validate_str(toml_content: &str) -> Result<PairchatConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

#[allow(clippy::result_large_err)]
fn finish(
    loaded: Result<PairchatConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<PairchatConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

fn read_source(path: &Path) -> Option<(String, String)> {
    std::fs::read_to_string(path)
        .ok()
        .map(|content| (path.display().to_string(), content))
}

/// File contents for span resolution, in lookup order.
fn collect_toml_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join(loader::LOCAL_CONFIG))
        .unwrap_or_else(|_| loader::LOCAL_CONFIG.into());
    [
        Some(Path::new(loader::SYSTEM_CONFIG).to_path_buf()),
        loader::user_config_path(),
        Some(local),
    ]
    .into_iter()
    .flatten()
    .filter_map(|p| read_source(&p))
    .collect()
}
