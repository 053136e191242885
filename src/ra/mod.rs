//! RetroAchievements web API integration.
//!
//! # Modules
//!
//! - `requester` - HTTP client for the RetroAchievements web API
//! - `response_structs` - Data structures of the API responses
//!
//! # Endpoints
//!
//! | Endpoint | Used by |
//! |----------|---------|
//! | `API_GetUserRecentAchievements.php` | `achievement`, `game` |
//! | `API_GetUserRecentlyPlayedGames.php` | `last` |
//! | `API_GetUserSummary.php` | `current`, `points` |
//! | `API_GetUserAwards.php` | `awards` |
//! | `API_GetGameInfoAndUserProgress.php` | `game` |

mod requester;
mod response_structs;

#[cfg(test)]
pub use crate::ra::requester::MockRequester;
pub use crate::ra::requester::{RaRequester, Requester};
pub use crate::ra::response_structs::{Achievement, Awards, Game, GameProgress, UserSummary};
#[cfg(test)]
pub use crate::ra::response_structs::{LAST_PLAYED_FORMAT, ProgressAchievement, RecentlyPlayed};
