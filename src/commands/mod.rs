//! Bot command parsing and response formatting.
//!
//! This module provides the complete command processing pipeline of the bot,
//! letting chat users look up RetroAchievements profiles.
//!
//! # Overview
//!
//! 1. **Parsing** - Converting the message arguments into a [`command::Command`]
//! 2. **Resolution** - Choosing the RetroAchievements user: the argument, or
//!    the username registered for the nick
//! 3. **Execution** - Querying the RetroAchievements API through the matching
//!    action handler
//! 4. **Response** - Rendering the result as a single IRC line with colour markers
//!
//! # Architecture
//!
//! ```text
//! args + nick
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: execute()
//! └─────────────┘
//!      │
//!      ├── Command::Set ───────────────► handle_set ──► UserStore
//!      │
//!      ├── Command::Query ──► resolve_user() ──► Query::run()
//!      │                                            │
//!      │                                            ▼
//!      │                               ┌─────────────────────┐
//!      │                               │ Action Handlers     │
//!      │                               │  - handle_achievement│
//!      │                               │  - handle_last      │
//!      │                               │  - handle_current   │
//!      │                               │  - handle_points    │
//!      │                               │  - handle_awards    │
//!      │                               │  - handle_game      │
//!      │                               └─────────────────────┘
//!      │                                            │
//!      └── Command::Help ──► usage                  ▼
//!                                          irc_response formatters
//! ```
//!
//! ## Available Commands
//!
//! | Command | Arguments | Description |
//! |---------|-----------|-------------|
//! | `s`, `set` | `<user>` | Register your RetroAchievements username |
//! | `a`, `achievement` | `[user]` | Newest achievement |
//! | `l`, `last` | `[user]` | Recently played games |
//! | `c`, `current` | `[user]` | Online status and rich presence |
//! | `p`, `points` | `[user]` | Points and rank |
//! | `w`, `awards` | `[user]` | Beaten, completed and mastered games |
//! | `g`, `game` | `[user]` | Progress in the current game |
//!
//! # Error Handling
//!
//! The module distinguishes between two outcome categories:
//!
//! - **Renderable outcomes**: no recent data, unknown user, missing username.
//!   These are normal responses.
//! - **Failures**: request, decoding or store errors. These are returned as
//!   errors without any response text, the transport answers with a generic
//!   error message.
//!
//! # Module Organization
//!
//! - [`commander`] - Main orchestrator resolving users and executing commands
//! - [`command`] - Command enum definitions and parsing logic
//! - [`actions`] - Individual command handler implementations
//! - [`irc_response`] - Colour markers and response formatting

mod actions;
mod command;
mod commander;
mod irc_response;

pub use crate::commands::commander::Commander;
pub use crate::commands::irc_response::format_lookup_error;
