//! Game command handler.
//!
//! Shows the progress of a user in the game of their newest achievement. This
//! takes two requests: the recent achievements give the game id, then the game
//! progress is requested for that id. The game may change between the two
//! requests, in which case the progress of the previous game is shown.

use log::debug;
use reqwest::Error;

use crate::{
    commands::irc_response::{format_game_progress, format_no_recent_game},
    ra::Requester,
};

/// Returns the progress of `user` in their current game.
pub async fn handle_game<R: Requester>(requester: &R, user: &str) -> Result<String, Error> {
    debug!("handling game command for {}", user);

    let achievements = requester.get_recent_achievements(user).await?;

    let Some(achievement) = achievements.first() else {
        return Ok(format_no_recent_game(user));
    };

    debug!("current game of {} is {}", user, achievement.game_id);

    let progress = requester
        .get_game_progress(user, achievement.game_id)
        .await?;

    Ok(format_game_progress(user, &progress))
}
