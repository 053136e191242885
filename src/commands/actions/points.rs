//! Points command handler.

use log::debug;
use reqwest::Error;

use crate::{
    commands::irc_response::{format_points, format_user_not_found},
    ra::Requester,
};

/// Returns the points and rank of `user`.
pub async fn handle_points<R: Requester>(requester: &R, user: &str) -> Result<String, Error> {
    debug!("handling points command for {}", user);

    let summary = requester.get_user_summary(user).await?;

    if !summary.exists() {
        return Ok(format_user_not_found(user));
    }

    Ok(format_points(user, &summary))
}
