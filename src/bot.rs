//! Bot module exposing the commands to the chat bridge.
//!
//! The chat bridge forwards every message addressed to this module as a JSON
//! envelope on `POST /message` and relays the `msg` field of the answer back to
//! the chat. `GET /help` describes the module.
//!
//! # Message Flow
//!
//! ```text
//! Chat bridge → POST /message → Commander::execute(nick, args) → msg → Chat bridge
//! ```
//!
//! Failed lookups are answered with a generic error message and a
//! `500 Internal Server Error` status, the details only go to the logs.

use std::{path::Path, sync::Arc};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::{
    Args,
    clock::SystemClock,
    commands::{Commander, format_lookup_error},
    config::Config,
    ra::RaRequester,
    users::JsonUserStore,
};

/// Name of the module, as known by the chat bridge.
pub const MODULE_NAME: &str = "retroachievements";

/// Description returned by `GET /help`.
pub const MODULE_HELP: &str = "get players last achievements from retroachievements";

/// Name of the file storing the registered users, inside the data directory.
const USERS_FILE: &str = "users.json";

/// Commander wired to the RetroAchievements API and the JSON user store.
type BotCommander = Commander<RaRequester, JsonUserStore>;

/// Message envelope exchanged with the chat bridge.
///
/// Only `nick` and `args` are read, `msg` is replaced by the response and the
/// other fields are sent back untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// Module the message is addressed to
    #[serde(default)]
    pub module: String,
    /// Message text, the response on the way back
    #[serde(default)]
    pub msg: String,
    /// Nick of the sender
    #[serde(default)]
    pub nick: String,
    /// Channel or user the answer goes to
    #[serde(default)]
    pub dest: String,
    /// Bot keyword that triggered the module
    #[serde(default)]
    pub command: String,
    /// Text following the keyword
    #[serde(default)]
    pub args: String,
}

/// Main bot structure serving the chat bridge.
pub struct Bot {
    /// Command parser and executor, shared by all requests
    commander: Arc<BotCommander>,
    /// Address the HTTP server binds to
    address: String,
}

impl Bot {
    /// Creates the bot, opening the user store in the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the user store exists but cannot be loaded.
    pub async fn new(config: Config, args: Args) -> anyhow::Result<Self> {
        let users_path = Path::new(&args.data).join(USERS_FILE);
        let store = JsonUserStore::open(&users_path)
            .await
            .with_context(|| format!("failed to open user store {}", users_path.display()))?;

        let requester = RaRequester::new(&config.retroachievements);
        let commander = Commander::new(requester, store, Box::new(SystemClock));

        Ok(Bot {
            commander: Arc::new(commander),
            address: config.server.address,
        })
    }

    /// Serves the chat bridge until the process is terminated.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server stops.
    pub async fn start(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.address)
            .await
            .with_context(|| format!("failed to bind {}", self.address))?;

        info!("listening on {}", self.address);

        axum::serve(listener, create_router(self.commander)).await?;

        Ok(())
    }
}

/// Creates the routes of the chat bridge.
fn create_router(commander: Arc<BotCommander>) -> Router {
    Router::new()
        .route("/message", post(handle_message))
        .route("/help", get(handle_help))
        .with_state(commander)
}

async fn handle_message(
    State(commander): State<Arc<BotCommander>>,
    Json(mut message): Json<Message>,
) -> (StatusCode, Json<Message>) {
    info!("command {:?} from {}", message.args, message.nick);

    match commander.execute(&message.nick, &message.args).await {
        Ok(response) => {
            message.msg = response;
            (StatusCode::OK, Json(message))
        }
        Err(e) => {
            error!(
                "failed to handle command {:?} from {}: {:#}",
                message.args, message.nick, e
            );
            message.msg = format_lookup_error();
            (StatusCode::INTERNAL_SERVER_ERROR, Json(message))
        }
    }
}

async fn handle_help() -> Json<Message> {
    Json(Message {
        module: MODULE_NAME.to_owned(),
        msg: MODULE_HELP.to_owned(),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::Request,
    };
    use mockito::Matcher;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::config::RetroAchievements;

    use super::*;

    async fn create_test_router(url: &str, dir: &TempDir) -> Router {
        let requester = RaRequester::new(&RetroAchievements {
            url: url.to_owned(),
            api_key: "key".to_owned(),
            achievement_window: 720,
            recent_games: 5,
        });
        let store = JsonUserStore::open(dir.path().join(USERS_FILE))
            .await
            .unwrap();

        create_router(Arc::new(Commander::new(
            requester,
            store,
            Box::new(SystemClock),
        )))
    }

    async fn send_message(router: &Router, nick: &str, args: &str) -> (StatusCode, Message) {
        let message = Message {
            module: MODULE_NAME.to_owned(),
            nick: nick.to_owned(),
            dest: "#retro".to_owned(),
            command: ".ra".to_owned(),
            args: args.to_owned(),
            ..Default::default()
        };

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/message")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&message).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_help() {
        let dir = TempDir::new().unwrap();
        let router = create_test_router("http://localhost", &dir).await;

        let response = router
            .oneshot(Request::builder().uri("/help").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let message: Message = serde_json::from_slice(&body).unwrap();
        assert_eq!(message.module, "retroachievements");
        assert_eq!(
            message.msg,
            "get players last achievements from retroachievements"
        );
    }

    #[tokio::test]
    async fn test_set_then_lookup_registered_user() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/API_GetUserRecentlyPlayedGames.php")
            .match_query(Matcher::UrlEncoded("u".to_owned(), "retrouser".to_owned()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"Title": "Game 1"}, {"Title": "Game 2"}]"#)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let router = create_test_router(&server.url(), &dir).await;

        let (status, message) = send_message(&router, "alice", "set retrouser").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(message.msg, "set alice's user to retrouser");

        let (status, message) = send_message(&router, "alice", "l").await;
        mock.assert_async().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            message.msg,
            "retrouser's last played retro games: {green}Game 1{clear}, {red}Game 2{clear}"
        );
        assert_eq!(message.nick, "alice");
        assert_eq!(message.dest, "#retro");
    }

    #[tokio::test]
    async fn test_username_needed() {
        let dir = TempDir::new().unwrap();
        let router = create_test_router("http://localhost", &dir).await;

        let (status, message) = send_message(&router, "alice", "points").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(message.msg, "Error: username needed");
    }

    #[tokio::test]
    async fn test_upstream_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/API_GetUserAwards.php")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let router = create_test_router(&server.url(), &dir).await;

        let (status, message) = send_message(&router, "alice", "awards user").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            message.msg,
            "{red}Error when looking up retroachievements data{clear}"
        );
    }

    #[test]
    fn test_message_missing_fields_default() {
        let message: Message = serde_json::from_str(r#"{"nick": "alice"}"#).unwrap();

        assert_eq!(message.nick, "alice");
        assert_eq!(message.args, "");
        assert_eq!(message.msg, "");
    }
}
