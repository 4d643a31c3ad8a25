//! NeX-Bot is a terminal chat client for Groq and other OpenAI-compatible
//! completion APIs.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the session state, credential and settings persistence,
//!   the model catalog, transcript export, and the completion client.
//! - [`commands`] implements slash-command parsing and execution for the
//!   interactive chat.
//! - [`ui`] runs the line-oriented chat loop.
//! - [`api`] defines the chat completion wire payloads.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
