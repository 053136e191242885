//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, the entry point for
//! processing bot commands. It parses the command text, resolves which
//! RetroAchievements user the command is about and routes the command to its
//! handler.
//!
//! # Flow
//!
//! ```text
//! args + nick → Command::parse() → resolve_user() → Query::run() → response
//! ```

use log::debug;

use crate::{
    clock::Clock,
    commands::{
        actions::handle_set,
        command::{Command, Query},
        irc_response::{format_help, format_username_needed},
    },
    ra::Requester,
    users::UserStore,
};

/// Outcome of resolving the user a command is about.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Username to look up, never empty
    User(String),
    /// No username given and none registered for the nick
    Missing,
}

/// Command orchestrator for parsing and executing bot commands.
///
/// Commands are independent: the only state shared between them is the user
/// store, and each command performs at most one store operation.
///
/// # Supported Commands
///
/// - `[s]et <user>` - Register the username of the nick
/// - `[a]chievement [user]` - Newest achievement
/// - `[l]ast [user]` - Recently played games
/// - `[c]urrent [user]` - Online status
/// - `[p]oints [user]` - Points and rank
/// - `a[w]ards [user]` - Award counters
/// - `[g]ame [user]` - Progress in the current game
pub struct Commander<R: Requester, S: UserStore> {
    /// RetroAchievements API client
    requester: R,
    /// Registered usernames
    store: S,
    /// Time source of the online status
    clock: Box<dyn Clock>,
}

impl<R: Requester, S: UserStore> Commander<R, S> {
    pub fn new(requester: R, store: S, clock: Box<dyn Clock>) -> Self {
        Commander {
            requester,
            store,
            clock,
        }
    }

    /// Executes the command `text` issued by `nick` and returns the response.
    ///
    /// "No data" outcomes such as an unknown user or a missing username are
    /// successful responses.
    ///
    /// # Errors
    ///
    /// Returns an error if a request, the decoding of a response or the user
    /// store fails. No response text is produced in that case.
    pub async fn execute(&self, nick: &str, text: &str) -> anyhow::Result<String> {
        let result = match Command::parse(text) {
            Command::Set(user) => handle_set(&self.store, nick, user.as_deref()).await?,
            Command::Query(query, user) => self.run_query(query, nick, user.as_deref()).await?,
            Command::Help => format_help(),
        };

        debug!("command {:?} from {} -> {}", text, nick, result);

        Ok(result)
    }

    async fn run_query(
        &self,
        query: Query,
        nick: &str,
        user: Option<&str>,
    ) -> anyhow::Result<String> {
        match self.resolve_user(nick, user).await? {
            Resolution::User(user) => Ok(query
                .run(&self.requester, self.clock.as_ref(), &user)
                .await?),
            Resolution::Missing => Ok(format_username_needed()),
        }
    }

    /// Resolves the user a command is about.
    ///
    /// A non-empty `user` argument wins without looking at the store. Otherwise
    /// the username registered for `nick` is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lookup fails.
    pub async fn resolve_user(&self, nick: &str, user: Option<&str>) -> anyhow::Result<Resolution> {
        if let Some(user) = user.filter(|user| !user.is_empty()) {
            return Ok(Resolution::User(user.to_owned()));
        }

        let resolution = match self.store.get_user(nick).await? {
            Some(user) if !user.is_empty() => Resolution::User(user),
            _ => Resolution::Missing,
        };

        debug!("resolved user of {} -> {:?}", nick, resolution);

        Ok(resolution)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use tempfile::TempDir;

    use crate::{
        clock::{FixedClock, SystemClock},
        ra::{Achievement, Awards, MockRequester, UserSummary},
        users::{JsonUserStore, MockUserStore},
    };

    use super::*;

    fn create_commander<S: UserStore>(
        requester: MockRequester,
        store: S,
    ) -> Commander<MockRequester, S> {
        Commander::new(
            requester,
            store,
            Box::new(FixedClock::at("2024-08-31 17:01:00")),
        )
    }

    #[tokio::test]
    async fn test_set_then_resolve() {
        let dir = TempDir::new().unwrap();
        let store = JsonUserStore::open(dir.path().join("users.json"))
            .await
            .unwrap();
        let commander = create_commander(MockRequester::new(), store);

        let result = commander.execute("alice", "set retrouser").await.unwrap();
        assert_eq!(result, "set alice's user to retrouser");

        let resolution = commander.resolve_user("alice", None).await.unwrap();
        assert_eq!(resolution, Resolution::User("retrouser".to_string()));

        let resolution = commander.resolve_user("bob", None).await.unwrap();
        assert_eq!(resolution, Resolution::Missing);
    }

    #[tokio::test]
    async fn test_set_without_user() {
        let commander = create_commander(MockRequester::new(), MockUserStore::new());

        let result = commander.execute("alice", "s").await.unwrap();

        assert_eq!(result, "Error: username needed");
    }

    #[tokio::test]
    async fn test_argument_skips_store() {
        let mut store = MockUserStore::new();
        store.expect_get_user().times(0);

        let mut requester = MockRequester::new();
        requester
            .expect_get_user_awards()
            .with(eq("explicit"))
            .times(1)
            .returning(|_| Ok(Awards::default()));

        let commander = create_commander(requester, store);
        let result = commander.execute("alice", "w explicit").await.unwrap();

        assert!(result.starts_with("explicit | "));
    }

    #[tokio::test]
    async fn test_stored_user_is_used() {
        let mut store = MockUserStore::new();
        store
            .expect_get_user()
            .with(eq("alice"))
            .times(1)
            .returning(|_| Ok(Some("retrouser".to_string())));

        let mut requester = MockRequester::new();
        requester
            .expect_get_recent_achievements()
            .with(eq("retrouser"))
            .times(1)
            .returning(|_| Ok(vec![]));

        let commander = create_commander(requester, store);
        let result = commander.execute("alice", "achievement").await.unwrap();

        assert_eq!(result, "No recent achievements found for user retrouser");
    }

    #[tokio::test]
    async fn test_missing_user_makes_no_request() {
        let mut store = MockUserStore::new();
        store
            .expect_get_user()
            .times(1)
            .returning(|_| Ok(None));

        let mut requester = MockRequester::new();
        requester.expect_get_user_summary().times(0);

        let commander = create_commander(requester, store);
        let result = commander.execute("alice", "points").await.unwrap();

        assert_eq!(result, "Error: username needed");
    }

    #[tokio::test]
    async fn test_empty_stored_user_is_missing() {
        let mut store = MockUserStore::new();
        store
            .expect_get_user()
            .times(1)
            .returning(|_| Ok(Some(String::new())));

        let commander = create_commander(MockRequester::new(), store);
        let resolution = commander.resolve_user("alice", None).await.unwrap();

        assert_eq!(resolution, Resolution::Missing);
    }

    #[tokio::test]
    async fn test_store_failure_is_an_error() {
        let mut store = MockUserStore::new();
        store
            .expect_get_user()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("store unavailable")));

        let commander = create_commander(MockRequester::new(), store);

        assert!(commander.execute("alice", "last").await.is_err());
    }

    #[tokio::test]
    async fn test_current_without_recently_played() {
        let mut requester = MockRequester::new();
        requester.expect_get_user_summary().times(1).returning(|_| {
            Ok(UserSummary {
                id: 1,
                ..Default::default()
            })
        });

        let commander = create_commander(requester, MockUserStore::new());
        let result = commander.execute("alice", "current user").await.unwrap();

        assert_eq!(result, "user | {red}Offline{clear}");
    }

    #[tokio::test]
    async fn test_game_without_recent_achievements() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_recent_achievements()
            .times(1)
            .returning(|_| Ok(Vec::<Achievement>::new()));
        requester.expect_get_game_progress().times(0);

        let commander = create_commander(requester, MockUserStore::new());
        let result = commander.execute("alice", "game user").await.unwrap();

        assert_eq!(result, "No recent played games found for user user");
    }

    #[tokio::test]
    async fn test_unknown_command_returns_help() {
        let commander = Commander::new(
            MockRequester::new(),
            MockUserStore::new(),
            Box::new(SystemClock),
        );

        let result = commander.execute("alice", "dance").await.unwrap();

        assert_eq!(
            result,
            "one of [s]et, [a]chievement, [l]ast, [c]urrent, [p]oints, a[w]ards or [g]ame must be passed as a command"
        );
    }
}
