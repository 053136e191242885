//! Rabot - A chat bot module for RetroAchievements profiles.
//!
//! This is the main entry point for rabot, a module plugged behind a chat
//! bridge that answers commands about RetroAchievements.org profiles.
//!
//! # Overview
//!
//! Users ask for their newest achievement, recently played games, online
//! status, points, awards or progress in their current game. A user can
//! register their RetroAchievements username once with `set`, later commands
//! then fall back to it when no username is given.
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! retroachievements:
//!   api_key: "your-api-key"
//!
//! server:
//!   address: "0.0.0.0:8080"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the `RABOT_` prefix:
//!
//! ```bash
//! export RABOT_RETROACHIEVEMENTS__API_KEY="your-api-key"
//! export RABOT_SERVER__ADDRESS="127.0.0.1:8080"
//! ```
//!
//! # Usage
//!
//! ```bash
//! rabot --config config.yaml --data ./rabot-data
//! ```
//!
//! # Bot Commands
//!
//! - `set <user>` - Register your RetroAchievements username
//! - `achievement [user]` - Newest achievement
//! - `last [user]` - Recently played games
//! - `current [user]` - Online status and rich presence
//! - `points [user]` - Points and rank
//! - `awards [user]` - Beaten, completed and mastered games
//! - `game [user]` - Progress in the current game
//!
//! Every command can be abbreviated by one letter: `s`, `a`, `l`, `c`, `p`, `w` and `g`.
//!
//! # Architecture
//!
//! - [`bot`] - HTTP endpoints of the chat bridge
//! - [`clock`] - Time source of the online status
//! - [`commands`] - Command parsing, user resolution and response formatting
//! - [`config`] - YAML configuration with environment variable overrides
//! - [`ra`] - RetroAchievements API client
//! - [`users`] - Persistence of the registered usernames
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod bot;
mod clock;
mod commands;
mod config;
mod ra;
mod users;

/// Command-line arguments of rabot.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// Values can be overridden with `RABOT_` environment variables, e.g.
    /// `RABOT_RETROACHIEVEMENTS__API_KEY`.
    #[arg(short, long)]
    config: String,

    /// Path to the directory for storing persistent data.
    ///
    /// This directory will contain `users.json`, the usernames registered by each nick.
    #[arg(short, long)]
    data: String,
}

#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting rabot {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    let bot = match Bot::new(config, args).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {:#}", e);
            return;
        }
    };

    if let Err(e) = bot.start().await {
        error!("Bot stopped: {:#}", e);
    }
}
