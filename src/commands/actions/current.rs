//! Current command handler.
//!
//! Shows whether a user is online and, if so, what they are playing.
//! Presence is derived from the last activity, see [`UserSummary::is_online`](crate::ra::UserSummary::is_online).

use log::debug;
use reqwest::Error;

use crate::{
    clock::Clock,
    commands::irc_response::{format_status, format_user_not_found},
    ra::Requester,
};

/// Returns the online status of `user` at the time given by `clock`.
pub async fn handle_current<R: Requester>(
    requester: &R,
    clock: &dyn Clock,
    user: &str,
) -> Result<String, Error> {
    debug!("handling current command for {}", user);

    let summary = requester.get_user_summary(user).await?;

    if !summary.exists() {
        return Ok(format_user_not_found(user));
    }

    Ok(format_status(user, &summary, clock.now()))
}
