//! Mapping between chat nicks and RetroAchievements usernames.
//!
//! Users register their RetroAchievements username once with the `set`
//! command, then every other command falls back to it when no username is
//! given. One username is kept per nick and the last registration wins.

mod user_store;

#[cfg(test)]
pub use crate::users::user_store::MockUserStore;
pub use crate::users::user_store::{JsonUserStore, UserStore};
