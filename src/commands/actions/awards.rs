//! Awards command handler.
//!
//! Shows the beaten, completed and mastered counters of a user. A user
//! without any award still gets a line full of zeros.

use log::debug;
use reqwest::Error;

use crate::{commands::irc_response::format_awards, ra::Requester};

/// Returns the award counters of `user`.
pub async fn handle_awards<R: Requester>(requester: &R, user: &str) -> Result<String, Error> {
    debug!("handling awards command for {}", user);

    let awards = requester.get_user_awards(user).await?;

    Ok(format_awards(user, &awards))
}
