//! Last command handler.
//!
//! Lists the games a user played recently, each title in its own colour.

use log::debug;
use reqwest::Error;

use crate::{
    commands::irc_response::{format_last_games, format_no_games},
    ra::Requester,
};

/// Returns the recently played games of `user`.
pub async fn handle_last<R: Requester>(requester: &R, user: &str) -> Result<String, Error> {
    debug!("handling last command for {}", user);

    let games = requester.get_recently_played_games(user).await?;

    if games.is_empty() {
        return Ok(format_no_games(user));
    }

    Ok(format_last_games(user, &games))
}
