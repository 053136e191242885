//! Achievement command handler.
//!
//! Shows the newest achievement unlocked by a user in the configured window.

use log::debug;
use reqwest::Error;

use crate::{
    commands::irc_response::{format_newest_achievement, format_no_achievements},
    ra::Requester,
};

/// Returns the newest achievement of `user`.
pub async fn handle_achievement<R: Requester>(requester: &R, user: &str) -> Result<String, Error> {
    debug!("handling achievement command for {}", user);

    let achievements = requester.get_recent_achievements(user).await?;

    let result = match achievements.first() {
        Some(achievement) => format_newest_achievement(user, achievement),
        None => format_no_achievements(user),
    };

    debug!("achievement command result {}", result);

    Ok(result)
}
