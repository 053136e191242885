//! IRC response formatters for bot commands.
//!
//! Responses are single lines where each logical field is wrapped in a colour
//! marker such as `{green}text{clear}`. The chat bridge replaces the markers
//! with the IRC colour codes. Fields are joined with [`SEPARATOR`].

use std::fmt;

use chrono::{DateTime, Utc};

use crate::ra::{Achievement, Awards, Game, GameProgress, UserSummary};

/// Separator between the fields of a response.
pub const SEPARATOR: &str = " | ";

/// Colours understood by the chat bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    Green,
    Red,
    Blue,
    Orange,
    Magenta,
    Cyan,
    Yellow,
}

impl Colour {
    fn name(&self) -> &'static str {
        match self {
            Colour::Green => "green",
            Colour::Red => "red",
            Colour::Blue => "blue",
            Colour::Orange => "orange",
            Colour::Magenta => "magenta",
            Colour::Cyan => "cyan",
            Colour::Yellow => "yellow",
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Colours cycled through by [`colour_list`].
const PALETTE: [Colour; 7] = [
    Colour::Green,
    Colour::Red,
    Colour::Blue,
    Colour::Orange,
    Colour::Magenta,
    Colour::Cyan,
    Colour::Yellow,
];

/// Wraps `text` in the `colour` marker.
///
/// # Examples
///
/// ```
/// assert_eq!(colour_string("Online", Colour::Green), "{green}Online{clear}");
/// ```
pub fn colour_string(text: &str, colour: Colour) -> String {
    format!("{{{}}}{}{{clear}}", colour, text)
}

/// Wraps each item in a colour of the palette, cycling by position.
///
/// The eighth item reuses the colour of the first one.
pub fn colour_list<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .zip(PALETTE.iter().cycle())
        .map(|(item, colour)| colour_string(item.as_ref(), *colour))
        .collect()
}

/// Usage message listing the commands by their abbreviation.
pub fn format_help() -> String {
    "one of [s]et, [a]chievement, [l]ast, [c]urrent, [p]oints, a[w]ards or [g]ame must be passed as a command".to_owned()
}

/// Message returned when no username is given nor registered.
pub fn format_username_needed() -> String {
    "Error: username needed".to_owned()
}

/// Confirmation of the `set` command.
pub fn format_user_set(nick: &str, user: &str) -> String {
    format!("set {}'s user to {}", nick, user)
}

/// Message sent back by the transport when a lookup fails.
pub fn format_lookup_error() -> String {
    colour_string("Error when looking up retroachievements data", Colour::Red)
}

/// Formats an achievement as `title (description) | game (console) | N points`.
///
/// The trailing period of the description is dropped and hardcore unlocks are
/// suffixed with ` [Hardcore]`.
pub fn format_achievement(achievement: &Achievement) -> String {
    let description = achievement
        .description
        .strip_suffix('.')
        .unwrap_or(&achievement.description);

    let fields = [
        colour_string(
            &format!("{} ({})", achievement.title, description),
            Colour::Cyan,
        ),
        colour_string(
            &format!("{} ({})", achievement.game_title, achievement.console_name),
            Colour::Magenta,
        ),
        colour_string(&format!("{} points", achievement.points), Colour::Green),
    ];

    let mut out = fields.join(SEPARATOR);
    if achievement.is_hardcore() {
        out += &colour_string(" [Hardcore]", Colour::Yellow);
    }

    out
}

pub fn format_newest_achievement(user: &str, achievement: &Achievement) -> String {
    format!(
        "{}'s newest retroachievement: {}",
        user,
        format_achievement(achievement)
    )
}

pub fn format_no_achievements(user: &str) -> String {
    format!("No recent achievements found for user {}", user)
}

/// Formats the recently played games as a comma separated, colour cycled list.
pub fn format_last_games(user: &str, games: &[Game]) -> String {
    let titles: Vec<&str> = games.iter().map(|game| game.title.as_str()).collect();

    format!(
        "{}'s last played retro games: {}",
        user,
        colour_list(&titles).join(", ")
    )
}

pub fn format_no_games(user: &str) -> String {
    format!("No played games found for user {}", user)
}

pub fn format_user_not_found(user: &str) -> String {
    format!("User {} not found", user)
}

/// Formats the online status of a user at `now`.
///
/// Online users get the last played game and its rich presence.
pub fn format_status(user: &str, summary: &UserSummary, now: DateTime<Utc>) -> String {
    let game = match summary.last_game() {
        Some(game) if summary.is_online(now) => game,
        _ => return [user.to_owned(), colour_string("Offline", Colour::Red)].join(SEPARATOR),
    };

    [
        user.to_owned(),
        colour_string("Online", Colour::Green),
        colour_string(&game.title, Colour::Magenta),
        colour_string(&summary.rich_presence_msg, Colour::Yellow),
    ]
    .join(SEPARATOR)
}

pub fn format_points(user: &str, summary: &UserSummary) -> String {
    [
        user.to_owned(),
        colour_string(
            &format!(
                "Points: {} ({})",
                summary.total_points, summary.total_true_points
            ),
            Colour::Green,
        ),
        colour_string(
            &format!("Relaxed: {}", summary.total_softcore_points),
            Colour::Cyan,
        ),
        colour_string(
            &format!("Rank: {}/{}", summary.rank, summary.total_ranked),
            Colour::Magenta,
        ),
    ]
    .join(SEPARATOR)
}

pub fn format_awards(user: &str, awards: &Awards) -> String {
    [
        user.to_owned(),
        colour_string(
            &format!(
                "Beaten: {} (Relaxed: {})",
                awards.beaten_hardcore_awards_count, awards.beaten_softcore_awards_count
            ),
            Colour::Yellow,
        ),
        colour_string(
            &format!("Completed: {}", awards.completion_awards_count),
            Colour::Cyan,
        ),
        colour_string(
            &format!("Mastered: {}", awards.mastery_awards_count),
            Colour::Green,
        ),
    ]
    .join(SEPARATOR)
}

/// Formats the progress of a user in a game.
///
/// Relaxed completion and achievement counts are only shown when they differ
/// from the hardcore ones. The highest award is appended when known.
pub fn format_game_progress(user: &str, progress: &GameProgress) -> String {
    let mut completion = format!("Completion: {}", progress.user_completion_hardcore);
    if progress.user_completion != progress.user_completion_hardcore {
        completion += &format!(" (Relaxed: {})", progress.user_completion);
    }

    let mut achievements = format!(
        "Achievements: {}/{}",
        progress.num_awarded_to_user_hardcore, progress.num_achievements
    );
    if progress.num_awarded_to_user != progress.num_awarded_to_user_hardcore {
        achievements += &format!(" (Relaxed: {})", progress.num_awarded_to_user);
    }

    let mut fields = vec![
        user.to_owned(),
        colour_string(
            &format!("{} ({})", progress.title, progress.console_name),
            Colour::Cyan,
        ),
        colour_string(&completion, Colour::Green),
        colour_string(&achievements, Colour::Magenta),
        colour_string(
            &format!("Points: {}", progress.points_awarded()),
            Colour::Yellow,
        ),
    ];

    if let Some(award) = progress.highest_award() {
        fields.push(colour_string(award, Colour::Orange));
    }

    fields.join(SEPARATOR)
}

pub fn format_no_recent_game(user: &str) -> String {
    format!("No recent played games found for user {}", user)
}
