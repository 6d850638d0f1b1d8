//! Palaver is a terminal-first chat client for hosted chat-completion
//! deployments that are addressed by URL path and authenticated with a static
//! `api-key` header.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns runtime state: the session transcript, environment
//!   configuration, and the turn-handling logic that appends user and
//!   assistant messages.
//! - [`api`] defines the chat-completion wire payloads and the client that
//!   performs one request per turn.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`commands`] implements slash-command parsing used by the chat loop.
//! - [`utils`] holds transcript logging, scroll math, and URL construction.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which dispatches into [`ui::chat_loop`] for
//! interactive sessions.

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
