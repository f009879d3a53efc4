// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pairchat - anonymous one-to-one chat matchmaking.
//!
//! This is the binary entry point for the Pairchat bot.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pairchat_config::{ConfigError, PairchatConfig};

/// Pairchat - anonymous one-to-one chat matchmaking.
#[derive(Parser, Debug)]
#[command(name = "pairchat", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the bot.
    Serve,
    /// Show users, dialogs and the search queue from the database.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<PairchatConfig, Vec<ConfigError>> {
    match path {
        Some(path) => pairchat_config::load_and_validate_path(path),
        None => pairchat_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            pairchat_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Status { json }) => status::run_status(&config, json).await,
        None => {
            println!("pairchat: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["pairchat", "status", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Status { json: true })));

        let cli = Cli::try_parse_from(["pairchat", "--config", "/tmp/p.toml", "serve"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/p.toml")));
        assert!(matches!(cli.command, Some(Commands::Serve)));

        assert!(Cli::try_parse_from(["pairchat", "shell"]).is_err());
    }

    #[test]
    fn explicit_config_path_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairchat.toml");
        std::fs::write(&path, "[bot]\nname = \"night-owl\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.bot.name, "night-owl");
    }
}
