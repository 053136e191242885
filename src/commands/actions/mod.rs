//! Command action handlers.
//!
//! Individual handler functions for each bot command. Each read handler
//! receives the requester and an already resolved username, queries the
//! RetroAchievements API and renders the result with the
//! [`irc_response`](crate::commands::irc_response) formatters.
//!
//! # Available Handlers
//!
//! - [`handle_set`] - Register the username of a nick
//! - [`handle_achievement`] - Newest achievement of a user
//! - [`handle_last`] - Recently played games of a user
//! - [`handle_current`] - Online status of a user
//! - [`handle_points`] - Points and rank of a user
//! - [`handle_awards`] - Award counters of a user
//! - [`handle_game`] - Progress of a user in their current game
//!
//! # Outcomes
//!
//! Missing data (no achievements, unknown user) is rendered as a sentence and
//! returned as a success. Only request, decoding and store failures are errors.

mod achievement;
mod awards;
mod current;
mod game;
mod last;
mod points;
mod set;

pub use crate::commands::actions::{
    achievement::handle_achievement, awards::handle_awards, current::handle_current,
    game::handle_game, last::handle_last, points::handle_points, set::handle_set,
};
