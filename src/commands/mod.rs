//! Slash commands understood by the interactive chat.

mod handlers;
mod registry;

pub use registry::{all_commands, find_command, Command, CommandInvocation};

use crate::core::app::App;

#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    ProcessAsMessage(String),
    Quit,
}

/// Route one line of input: `/name args` runs a command, anything else is a
/// message for the model.
pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();

    let Some(rest) = trimmed.strip_prefix('/') else {
        return CommandResult::ProcessAsMessage(input.to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    match registry::find_command(command_name) {
        Some(command) => {
            (command.handler)(app, CommandInvocation { args })
        }
        None => {
            app.notify(format!(
                "Unknown command: /{command_name}. Type /help for a list."
            ));
            CommandResult::Continue
        }
    }
}
