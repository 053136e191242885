//! Command parsing.
//!
//! This module converts the text following the bot keyword into a structured
//! [`Command`]. The first word selects the command, either by its full name
//! or by its one letter abbreviation, and the optional second word is a
//! RetroAchievements username.

use log::debug;
use reqwest::Error;

use crate::{
    clock::Clock,
    commands::actions::{
        handle_achievement, handle_awards, handle_current, handle_game, handle_last,
        handle_points,
    },
    ra::Requester,
};

/// Represents a parsed bot command.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Register the username of the nick
    ///
    /// # Fields
    ///
    /// * `Option<String>` - Username to register
    Set(Option<String>),
    /// Look up RetroAchievements data
    ///
    /// # Fields
    ///
    /// * `Query` - Kind of lookup
    /// * `Option<String>` - Username to look up, the registered one when absent
    Query(Query, Option<String>),
    /// Unknown or missing command
    Help,
}

/// The read commands, all looking up data of a single user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Newest achievement
    Achievement,
    /// Recently played games
    Last,
    /// Online status
    Current,
    /// Points and rank
    Points,
    /// Award counters
    Awards,
    /// Progress in the current game
    Game,
}

impl Command {
    /// Parses the text following the bot keyword.
    ///
    /// Words after the username are ignored. Anything that is not a known
    /// command, including an empty text, parses as [`Command::Help`].
    ///
    /// # Examples
    ///
    /// ```
    /// assert_eq!(
    ///     Command::parse("a retrouser"),
    ///     Command::Query(Query::Achievement, Some("retrouser".to_string()))
    /// );
    /// ```
    pub fn parse(text: &str) -> Self {
        let mut words = text.split_whitespace();
        let name = words.next().unwrap_or_default();
        let user = words.next().map(str::to_owned);

        let command = match name {
            "s" | "set" => Command::Set(user),
            "a" | "achievement" => Command::Query(Query::Achievement, user),
            "l" | "last" => Command::Query(Query::Last, user),
            "c" | "current" => Command::Query(Query::Current, user),
            "p" | "points" => Command::Query(Query::Points, user),
            "w" | "awards" => Command::Query(Query::Awards, user),
            "g" | "game" => Command::Query(Query::Game, user),
            _ => Command::Help,
        };

        debug!("parsed command {:?} from {:?}", command, text);

        command
    }
}

impl Query {
    /// Runs the lookup for `user` and renders its result.
    ///
    /// `user` must not be empty.
    pub async fn run<R: Requester>(
        &self,
        requester: &R,
        clock: &dyn Clock,
        user: &str,
    ) -> Result<String, Error> {
        match self {
            Query::Achievement => handle_achievement(requester, user).await,
            Query::Last => handle_last(requester, user).await,
            Query::Current => handle_current(requester, clock, user).await,
            Query::Points => handle_points(requester, user).await,
            Query::Awards => handle_awards(requester, user).await,
            Query::Game => handle_game(requester, user).await,
        }
    }
}
