//! Persistence of the nick to RetroAchievements username mapping.
//!
//! This module provides the [`JsonUserStore`] that keeps the mapping in memory
//! and persists it to a JSON file on every change, so the mapping survives bot
//! restarts.

use std::{collections::HashMap, path::PathBuf};

use anyhow::Context;
use log::{debug, info, warn};
use mockall::automock;
use tokio::{fs, sync::Mutex};

/// Storage of the username registered by each nick.
///
/// This trait abstracts the persistence for easier testing with mocks.
#[automock]
pub trait UserStore {
    /// Returns the username registered for `nick`, if any.
    async fn get_user(&self, nick: &str) -> anyhow::Result<Option<String>>;
    /// Registers `user` as the username of `nick`, replacing any previous one.
    async fn set_user(&self, nick: &str, user: &str) -> anyhow::Result<()>;
}

/// [`UserStore`] persisted as a JSON object `{ "nick": "username" }`.
///
/// Every call holds the same lock, so a `set_user` and a later `get_user` for
/// the same nick are never interleaved. Writes go to a temporary file which is
/// then renamed over the store, so the file on disk is always complete.
///
/// # Examples
///
/// ```no_run
/// let store = JsonUserStore::open("users.json").await?;
/// store.set_user("alice", "retrouser").await?;
/// assert_eq!(store.get_user("alice").await?, Some("retrouser".to_string()));
/// ```
pub struct JsonUserStore {
    /// Path to the JSON file where users are stored.
    path: PathBuf,
    /// Users indexed by nick
    users: Mutex<HashMap<String, String>>,
}

impl JsonUserStore {
    /// Opens the store at `path`.
    ///
    /// A missing file starts an empty store, it is created on the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or deserialized.
    pub async fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();

        let users = match fs::try_exists(&path).await {
            Ok(true) => {
                let serialized_users = fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("failed to read users from {}", path.display()))?;
                let users: HashMap<String, String> = serde_json::from_str(&serialized_users)
                    .with_context(|| {
                        format!("failed to deserialize users from {}", path.display())
                    })?;
                info!("loaded {} users from {}", users.len(), path.display());
                users
            }
            _ => {
                warn!(
                    "no persisted users found at {}, starting with an empty store",
                    path.display()
                );
                HashMap::new()
            }
        };

        Ok(JsonUserStore {
            path,
            users: Mutex::new(users),
        })
    }

    /// Writes `users` to a temporary file and moves it over the store file.
    async fn persist(&self, users: &HashMap<String, String>) -> anyhow::Result<()> {
        let serialized_users = serde_json::to_string_pretty(users)?;

        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        fs::write(&tmp_path, serialized_users)
            .await
            .with_context(|| format!("failed to write users to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("failed to move users to {}", self.path.display()))?;

        Ok(())
    }
}

impl UserStore for JsonUserStore {
    async fn get_user(&self, nick: &str) -> anyhow::Result<Option<String>> {
        let users = self.users.lock().await;
        let user = users.get(nick).cloned();

        debug!("user of {} -> {:?}", nick, user);

        Ok(user)
    }

    async fn set_user(&self, nick: &str, user: &str) -> anyhow::Result<()> {
        let mut users = self.users.lock().await;

        // The in-memory map only changes once the write succeeded
        let mut updated_users = users.clone();
        updated_users.insert(nick.to_owned(), user.to_owned());
        self.persist(&updated_users).await?;
        *users = updated_users;

        info!("set user of {} to {}", nick, user);

        Ok(())
    }
}
