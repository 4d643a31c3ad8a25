use super::CommandResult;
use crate::core::app::App;

pub type CommandHandler = fn(&mut App, CommandInvocation<'_>) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub usage: &'static str,
    pub help: &'static str,
    pub handler: CommandHandler,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    pub args: &'a str,
}

impl<'a> CommandInvocation<'a> {
    pub fn has_args(&self) -> bool {
        !self.args.is_empty()
    }
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        usage: "/help",
        help: "Show available commands.",
        handler: super::handlers::handle_help,
    },
    Command {
        name: "model",
        usage: "/model [id]",
        help: "List the available models, or switch to one.",
        handler: super::handlers::handle_model,
    },
    Command {
        name: "new",
        usage: "/new",
        help: "Archive the current chat, export it, and start over.",
        handler: super::handlers::handle_new,
    },
    Command {
        name: "export",
        usage: "/export [dir]",
        help: "Save the current chat to a text file.",
        handler: super::handlers::handle_export,
    },
    Command {
        name: "history",
        usage: "/history",
        help: "Show the previous (archived) chat.",
        handler: super::handlers::handle_history,
    },
    Command {
        name: "whoami",
        usage: "/whoami",
        help: "Show the configured username.",
        handler: super::handlers::handle_whoami,
    },
    Command {
        name: "auth",
        usage: "/auth <username> <api-key>",
        help: "Save a username and API key.",
        handler: super::handlers::handle_auth,
    },
    Command {
        name: "quit",
        usage: "/quit",
        help: "Leave the chat.",
        handler: super::handlers::handle_quit,
    },
];
