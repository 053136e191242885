//! Set command handler.
//!
//! Registers the RetroAchievements username of the nick issuing the command,
//! so later commands can omit it.

use log::debug;

use crate::{
    commands::irc_response::{format_user_set, format_username_needed},
    users::UserStore,
};

/// Registers `user` as the username of `nick`.
///
/// Returns "Error: username needed" without touching the store when no username is given.
///
/// # Errors
///
/// Returns an error if the store fails to persist the username.
pub async fn handle_set<S: UserStore>(
    store: &S,
    nick: &str,
    user: Option<&str>,
) -> anyhow::Result<String> {
    debug!("handling set command for {}", nick);

    let Some(user) = user.filter(|user| !user.is_empty()) else {
        return Ok(format_username_needed());
    };

    store.set_user(nick, user).await?;

    Ok(format_user_set(nick, user))
}
