//! Terminal front-end for interactive chat sessions.
//!
//! [`chat_loop`] reads lines, dispatches slash commands to
//! [`crate::commands`], and forwards everything else to the session
//! controller in [`crate::core::session`].

pub mod chat_loop;
