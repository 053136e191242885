//! HTTP client for the RetroAchievements web API.
//!
//! This module provides the [`RaRequester`] struct for querying the
//! RetroAchievements web API. Every request carries the API key in the `y`
//! query parameter and the target username in `u`.

use log::{debug, info};
use mockall::automock;
use reqwest::{Client, Error};
use serde::de::DeserializeOwned;

use crate::{
    config::RetroAchievements,
    ra::response_structs::{Achievement, Awards, Game, GameProgress, UserSummary},
};

/// HTTP client for requesting data from the RetroAchievements web API.
///
/// # Examples
///
/// ```no_run
/// let requester = RaRequester::new(&config.retroachievements);
/// let achievements = requester.get_recent_achievements("user").await.unwrap();
/// println!("Achievements: {:?}", achievements);
/// ```
pub struct RaRequester {
    /// Base url of the web API
    url: String,
    /// Web API key
    api_key: String,
    /// Window in minutes of the recent achievements lookup
    achievement_window: u64,
    /// Number of games of the recently played games lookup
    recent_games: u64,
    /// HTTP client
    client: Client,
}

/// Trait for making requests to the RetroAchievements web API.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait Requester {
    /// Fetches the achievements unlocked by a user in the configured window, newest first.
    async fn get_recent_achievements(&self, user: &str) -> Result<Vec<Achievement>, Error>;
    /// Fetches the games recently played by a user.
    async fn get_recently_played_games(&self, user: &str) -> Result<Vec<Game>, Error>;
    /// Fetches the summary of a user, including the last played game and points.
    async fn get_user_summary(&self, user: &str) -> Result<UserSummary, Error>;
    /// Fetches the award counters of a user.
    async fn get_user_awards(&self, user: &str) -> Result<Awards, Error>;
    /// Fetches a game and the progress of a user in it.
    async fn get_game_progress(&self, user: &str, game_id: u64) -> Result<GameProgress, Error>;
}

impl RaRequester {
    /// Create a new [RaRequester].
    ///
    /// # Arguments
    ///
    /// * `config` - The RetroAchievements section of the configuration.
    pub fn new(config: &RetroAchievements) -> Self {
        let client = reqwest::Client::new();
        RaRequester {
            url: config.url.to_owned(),
            api_key: config.api_key.to_owned(),
            achievement_window: config.achievement_window,
            recent_games: config.recent_games,
            client,
        }
    }

    /// Requests `{url}/{endpoint}` with the API key and `params`, decoding the JSON body.
    async fn request<T: DeserializeOwned + std::fmt::Debug>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = format!("{}/{}", &self.url, endpoint);
        debug!("request {} with {:?}", &url, params);

        let response: T = self
            .client
            .get(&url)
            .query(&[("y", &self.api_key)])
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("response from {} -> {:?}", &url, &response);

        Ok(response)
    }
}

impl Requester for RaRequester {
    /// Request `API_GetUserRecentAchievements.php?u={user}&m={minutes}`.
    ///
    /// This api call returns a json array of achievements, newest first:
    /// ```
    /// [
    ///   { Title: "title", Description: "description.", Points: 5, GameTitle: "game",
    ///     GameID: 1, ConsoleName: "console", HardcoreMode: 1 }
    /// ]
    /// ```
    async fn get_recent_achievements(&self, user: &str) -> Result<Vec<Achievement>, Error> {
        info!("request recent achievements of {}", user);
        self.request(
            "API_GetUserRecentAchievements.php",
            &[
                ("u", user.to_owned()),
                ("m", self.achievement_window.to_string()),
            ],
        )
        .await
    }

    /// Request `API_GetUserRecentlyPlayedGames.php?u={user}&c={count}`.
    async fn get_recently_played_games(&self, user: &str) -> Result<Vec<Game>, Error> {
        info!("request recently played games of {}", user);
        self.request(
            "API_GetUserRecentlyPlayedGames.php",
            &[
                ("u", user.to_owned()),
                ("c", self.recent_games.to_string()),
            ],
        )
        .await
    }

    /// Request `API_GetUserSummary.php?u={user}&g=1&a=0`.
    ///
    /// Only the last played game is needed, recent achievements are skipped.
    async fn get_user_summary(&self, user: &str) -> Result<UserSummary, Error> {
        info!("request summary of {}", user);
        self.request(
            "API_GetUserSummary.php",
            &[
                ("u", user.to_owned()),
                ("g", "1".to_owned()),
                ("a", "0".to_owned()),
            ],
        )
        .await
    }

    /// Request `API_GetUserAwards.php?u={user}`.
    async fn get_user_awards(&self, user: &str) -> Result<Awards, Error> {
        info!("request awards of {}", user);
        self.request("API_GetUserAwards.php", &[("u", user.to_owned())])
            .await
    }

    /// Request `API_GetGameInfoAndUserProgress.php?u={user}&g={game_id}&a=1`.
    ///
    /// `a=1` adds the highest award of the user to the response.
    async fn get_game_progress(&self, user: &str, game_id: u64) -> Result<GameProgress, Error> {
        info!("request progress of {} in game {}", user, game_id);
        self.request(
            "API_GetGameInfoAndUserProgress.php",
            &[
                ("u", user.to_owned()),
                ("g", game_id.to_string()),
                ("a", "1".to_owned()),
            ],
        )
        .await
    }
}
