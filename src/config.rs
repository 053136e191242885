//! Configuration file structures for the rabot module.
//!
//! The configuration is read from a YAML file and can be overridden with
//! environment variables prefixed with `RABOT_`. Nested keys are separated by
//! a double underscore, e.g. `RABOT_RETROACHIEVEMENTS__API_KEY`.
//!
//! # Configuration File Format
//!
//! ```yaml
//! retroachievements:
//!   # Base URL of the RetroAchievements web API
//!   url: "https://retroachievements.org/API"
//!   # Web API key, sent with every request
//!   api_key: "your-api-key"
//!   # Window in minutes used to look up recent achievements
//!   achievement_window: 720
//!   # Number of games listed by the `last` command
//!   recent_games: 5
//!
//! server:
//!   # Address the message endpoint listens on
//!   address: "0.0.0.0:8080"
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Prefix of the environment variables overriding the configuration file.
const ENV_PREFIX: &str = "RABOT_";

/// Root configuration structure.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// RetroAchievements API configuration
    pub retroachievements: RetroAchievements,
    /// HTTP server configuration
    #[serde(default)]
    pub server: Server,
}

/// RetroAchievements web API configuration.
#[derive(Deserialize, Debug, Clone)]
pub struct RetroAchievements {
    /// Base URL of the web API, without trailing slash.
    #[serde(default = "default_url")]
    pub url: String,

    /// Web API key.
    ///
    /// Found in the settings page of a RetroAchievements account.
    pub api_key: String,

    /// Window in minutes used to look up the most recent achievements.
    #[serde(default = "default_achievement_window")]
    pub achievement_window: u64,

    /// Number of games returned by the recently played games lookup.
    #[serde(default = "default_recent_games")]
    pub recent_games: u64,
}

/// HTTP server configuration.
#[derive(Deserialize, Debug, Clone)]
pub struct Server {
    /// Socket address the server binds to.
    #[serde(default = "default_address")]
    pub address: String,
}

impl Default for Server {
    fn default() -> Self {
        Server {
            address: default_address(),
        }
    }
}

fn default_url() -> String {
    "https://retroachievements.org/API".to_owned()
}

fn default_achievement_window() -> u64 {
    12 * 60
}

fn default_recent_games() -> u64 {
    5
}

fn default_address() -> String {
    "0.0.0.0:8080".to_owned()
}

impl Config {
    /// Loads the configuration from a YAML file, merged with `RABOT_` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or a required value (the API key)
    /// is missing from both the file and the environment.
    pub fn load(path: &str) -> Result<Self, figment::Error> {
        let mut config: Config = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        // Endpoints are appended with a leading slash
        while config.retroachievements.url.ends_with('/') {
            config.retroachievements.url.pop();
        }

        Ok(config)
    }
}
