//! Response structures for RetroAchievements API endpoints.
//!
//! This module contains structures for deserializing JSON responses from
//! the RetroAchievements web API. The API is loose with its types: numbers
//! may come back as `null` for unranked or unknown users, and empty maps are
//! sometimes encoded as empty arrays. The helpers below absorb those quirks
//! so the rest of the bot only sees plain values.

use std::{collections::HashMap, fmt};

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer};

/// Format of the `LastPlayed` timestamps returned by the API (UTC).
pub const LAST_PLAYED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A user counts as online while their last activity is younger than this.
const ONLINE_WINDOW_SECONDS: i64 = 180;

/// Deserializes `null` into the default value of `T`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes a JSON object keyed by id, accepting the `[]` the API sends
/// instead of `{}` when a game has no achievements.
fn map_or_empty_list<'de, D, T>(deserializer: D) -> Result<HashMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapOrList<T> {
        Map(HashMap<String, T>),
        List(Vec<T>),
    }

    Ok(match Option::<MapOrList<T>>::deserialize(deserializer)? {
        Some(MapOrList::Map(map)) => map,
        Some(MapOrList::List(list)) => list
            .into_iter()
            .enumerate()
            .map(|(index, value)| (index.to_string(), value))
            .collect(),
        None => HashMap::new(),
    })
}

/// An achievement from `API_GetUserRecentAchievements.php`.
///
/// Entries are returned newest first.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Achievement {
    /// Achievement title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Achievement description, usually ending with a period.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Point value of the achievement.
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: u64,
    /// Title of the game owning the achievement.
    #[serde(default, deserialize_with = "null_as_default")]
    pub game_title: String,
    /// Console of the game owning the achievement.
    #[serde(default, deserialize_with = "null_as_default")]
    pub console_name: String,
    /// `1` when the achievement was unlocked in hardcore mode, `0` otherwise.
    #[serde(default, deserialize_with = "null_as_default")]
    pub hardcore_mode: u8,
    /// Identifier of the game owning the achievement.
    #[serde(rename = "GameID", default, deserialize_with = "null_as_default")]
    pub game_id: u64,
}

impl Achievement {
    /// Whether the achievement was unlocked in hardcore mode.
    pub fn is_hardcore(&self) -> bool {
        self.hardcore_mode == 1
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "title={}, game_id={}, game={}, points={}, hardcore={}",
            self.title, self.game_id, self.game_title, self.points, self.hardcore_mode
        )
    }
}

/// A game from `API_GetUserRecentlyPlayedGames.php`.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Game {
    /// Game title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

/// A recently played game embedded in the user summary.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct RecentlyPlayed {
    /// Game title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Last activity in the game, formatted as [`LAST_PLAYED_FORMAT`].
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_played: String,
}

/// User summary from `API_GetUserSummary.php`.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct UserSummary {
    /// Numeric user id, `0` when the user does not exist.
    #[serde(rename = "ID", default, deserialize_with = "null_as_default")]
    pub id: u64,
    /// Most recently played games, newest first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub recently_played: Vec<RecentlyPlayed>,
    /// Rich presence of the last played game.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rich_presence_msg: String,
    /// Hardcore points.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_points: u64,
    /// Softcore points.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_softcore_points: u64,
    /// Weighted ("true") hardcore points.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_true_points: u64,
    /// Site rank, `0` when unranked.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rank: u64,
    /// Number of ranked users.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_ranked: u64,
}

impl UserSummary {
    /// Whether the API knows this user.
    pub fn exists(&self) -> bool {
        self.id != 0
    }

    /// The most recently played game, if any.
    pub fn last_game(&self) -> Option<&RecentlyPlayed> {
        self.recently_played.first()
    }

    /// Last activity timestamp of the most recently played game.
    ///
    /// Returns `None` when no game was played or the timestamp is unparsable.
    pub fn last_played(&self) -> Option<DateTime<Utc>> {
        let game = self.last_game()?;
        NaiveDateTime::parse_from_str(&game.last_played, LAST_PLAYED_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Whether the user was active in the last three minutes relative to `now`.
    pub fn is_online(&self, now: DateTime<Utc>) -> bool {
        match self.last_played() {
            Some(last_played) => now < last_played + TimeDelta::seconds(ONLINE_WINDOW_SECONDS),
            None => false,
        }
    }
}

impl fmt::Display for UserSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id={}, recently_played={}, points={}, rank={}/{}",
            self.id,
            self.recently_played.len(),
            self.total_points,
            self.rank,
            self.total_ranked
        )
    }
}

/// Award counters from `API_GetUserAwards.php`.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Awards {
    #[serde(default, deserialize_with = "null_as_default")]
    pub beaten_hardcore_awards_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub beaten_softcore_awards_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completion_awards_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mastery_awards_count: u64,
}

/// An achievement entry of [`GameProgress`].
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ProgressAchievement {
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: u64,
    /// Unlock date in any mode, empty when not earned.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_earned: String,
}

impl ProgressAchievement {
    pub fn is_earned(&self) -> bool {
        !self.date_earned.is_empty()
    }
}

/// Game information and user progress from `API_GetGameInfoAndUserProgress.php`.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct GameProgress {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub console_name: String,
    /// Total number of achievements in the game.
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_achievements: u64,
    /// Achievements unlocked in any mode.
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_awarded_to_user: u64,
    /// Achievements unlocked in hardcore mode.
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_awarded_to_user_hardcore: u64,
    /// Completion in any mode, e.g. `"45.00%"`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_completion: String,
    /// Hardcore completion, e.g. `"40.00%"`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_completion_hardcore: String,
    /// Achievements of the game keyed by achievement id.
    #[serde(default, deserialize_with = "map_or_empty_list")]
    pub achievements: HashMap<String, ProgressAchievement>,
    /// Highest award obtained by the user for this game.
    #[serde(default)]
    pub highest_award_kind: Option<String>,
}

impl GameProgress {
    /// Earned and possible points rendered as `earned/possible`.
    pub fn points_awarded(&self) -> String {
        let (earned, possible) =
            self.achievements
                .values()
                .fold((0, 0), |(earned, possible), achievement| {
                    let earned = match achievement.is_earned() {
                        true => earned + achievement.points,
                        false => earned,
                    };
                    (earned, possible + achievement.points)
                });

        format!("{}/{}", earned, possible)
    }

    /// Human readable name of the highest award, `None` for unknown kinds.
    pub fn highest_award(&self) -> Option<&'static str> {
        match self.highest_award_kind.as_deref()? {
            "beaten-softcore" => Some("Beaten"),
            "beaten-hardcore" => Some("Beaten [Hardcore]"),
            "completed" => Some("Completed"),
            "mastered" => Some("Mastered"),
            _ => None,
        }
    }
}

impl fmt::Display for GameProgress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "title={}, console={}, achievements={}, award={:?}",
            self.title, self.console_name, self.num_achievements, self.highest_award_kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_last_played(last_played: &str) -> UserSummary {
        UserSummary {
            id: 1,
            recently_played: vec![RecentlyPlayed {
                title: "game 1".to_string(),
                last_played: last_played.to_string(),
            }],
            ..Default::default()
        }
    }

    fn at(timestamp: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(timestamp, LAST_PLAYED_FORMAT)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_achievement_deserialization() {
        let json = r#"{
            "Date": "2024-08-31 16:58:00",
            "HardcoreMode": 1,
            "AchievementID": 42,
            "Title": "title 1",
            "Description": "description 1.",
            "Points": 5,
            "GameTitle": "game 1",
            "GameID": 1234,
            "ConsoleName": "console 1"
        }"#;

        let achievement: Achievement = serde_json::from_str(json).unwrap();

        assert_eq!(achievement.title, "title 1");
        assert_eq!(achievement.description, "description 1.");
        assert_eq!(achievement.points, 5);
        assert_eq!(achievement.game_title, "game 1");
        assert_eq!(achievement.console_name, "console 1");
        assert_eq!(achievement.game_id, 1234);
        assert!(achievement.is_hardcore());
    }

    #[test]
    fn test_user_summary_unknown_user() {
        let summary: UserSummary = serde_json::from_str(r#"{"ID": null, "Rank": null}"#).unwrap();
        assert!(!summary.exists());
        assert_eq!(summary.rank, 0);

        let summary: UserSummary = serde_json::from_str("{}").unwrap();
        assert!(!summary.exists());
    }

    #[test]
    fn test_user_summary_deserialization() {
        let json = r#"{
            "ID": 99,
            "User": "user",
            "RecentlyPlayed": [
                {"GameID": 1, "Title": "game 1", "ConsoleName": "console 1", "LastPlayed": "2024-08-31 17:00:00"}
            ],
            "RichPresenceMsg": "Titlescreen",
            "TotalPoints": 1000,
            "TotalSoftcorePoints": 20,
            "TotalTruePoints": 3000,
            "Rank": 500,
            "TotalRanked": 80000
        }"#;

        let summary: UserSummary = serde_json::from_str(json).unwrap();

        assert!(summary.exists());
        assert_eq!(summary.last_game().unwrap().title, "game 1");
        assert_eq!(summary.rich_presence_msg, "Titlescreen");
        assert_eq!(summary.total_true_points, 3000);
        assert_eq!(summary.total_ranked, 80000);
        assert_eq!(summary.last_played(), Some(at("2024-08-31 17:00:00")));
    }

    #[test]
    fn test_is_online_boundary() {
        let summary = summary_last_played("2024-08-31 17:00:00");

        assert!(summary.is_online(at("2024-08-31 17:00:00")));
        assert!(summary.is_online(at("2024-08-31 17:02:59")));
        assert!(!summary.is_online(at("2024-08-31 17:03:00")));
        assert!(!summary.is_online(at("2024-08-31 17:03:01")));
    }

    #[test]
    fn test_is_online_without_games() {
        let summary = UserSummary {
            id: 1,
            ..Default::default()
        };
        assert!(!summary.is_online(at("2024-08-31 17:00:00")));
    }

    #[test]
    fn test_is_online_unparsable_timestamp() {
        let summary = summary_last_played("yesterday");
        assert!(!summary.is_online(at("2024-08-31 17:00:00")));
    }

    #[test]
    fn test_points_awarded() {
        let mut achievements = HashMap::new();
        achievements.insert(
            "1".to_string(),
            ProgressAchievement {
                points: 5,
                date_earned: "2024-08-31 17:00:00".to_string(),
            },
        );
        for id in 2..5 {
            achievements.insert(
                id.to_string(),
                ProgressAchievement {
                    points: 100,
                    date_earned: String::new(),
                },
            );
        }

        let progress = GameProgress {
            achievements,
            ..Default::default()
        };

        assert_eq!(progress.points_awarded(), "5/305");
    }

    #[test]
    fn test_points_awarded_without_achievements() {
        assert_eq!(GameProgress::default().points_awarded(), "0/0");
    }

    #[test]
    fn test_game_progress_achievements_as_empty_list() {
        let json = r#"{"Title": "game", "ConsoleName": "console", "Achievements": [], "HighestAwardKind": null}"#;
        let progress: GameProgress = serde_json::from_str(json).unwrap();

        assert!(progress.achievements.is_empty());
        assert_eq!(progress.highest_award(), None);
    }

    #[test]
    fn test_game_progress_deserialization() {
        let json = r#"{
            "ID": 1234,
            "Title": "game 1",
            "ConsoleName": "console 1",
            "NumAchievements": 3,
            "NumAwardedToUser": 2,
            "NumAwardedToUserHardcore": 1,
            "UserCompletion": "66.67%",
            "UserCompletionHardcore": "33.33%",
            "HighestAwardKind": "beaten-hardcore",
            "Achievements": {
                "1": {"ID": 1, "Points": 5, "DateEarned": "2024-08-31 17:00:00", "DateEarnedHardcore": "2024-08-31 17:00:00"},
                "2": {"ID": 2, "Points": 10, "DateEarned": "2024-08-31 17:05:00"},
                "3": {"ID": 3, "Points": 25}
            }
        }"#;

        let progress: GameProgress = serde_json::from_str(json).unwrap();

        assert_eq!(progress.achievements.len(), 3);
        assert_eq!(progress.points_awarded(), "15/40");
        assert_eq!(progress.highest_award(), Some("Beaten [Hardcore]"));
    }

    #[test]
    fn test_highest_award_vocabulary() {
        let award = |kind: &str| GameProgress {
            highest_award_kind: Some(kind.to_string()),
            ..Default::default()
        };

        assert_eq!(award("beaten-softcore").highest_award(), Some("Beaten"));
        assert_eq!(award("completed").highest_award(), Some("Completed"));
        assert_eq!(award("mastered").highest_award(), Some("Mastered"));
        assert_eq!(award("participated").highest_award(), None);
    }
}
