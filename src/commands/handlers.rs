use std::path::PathBuf;

use super::registry::CommandInvocation;
use super::{all_commands, CommandResult};
use crate::core::app::App;
use crate::core::export::ExportedTranscript;
use crate::core::message::Message;
use crate::core::models::MODELS;
use crate::utils::text::truncate_words;

const USERNAME_WORD_LIMIT: usize = 10;

pub(super) fn handle_help(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    let mut help = String::from("Commands:");
    for command in all_commands() {
        help.push_str(&format!("\n  {:<28} {}", command.usage, command.help));
    }
    app.notify(help);
    CommandResult::Continue
}

pub(super) fn handle_model(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    if !invocation.has_args() {
        let current = app.controller.selected_model();
        let mut listing = String::from("Models:");
        for model in MODELS {
            let marker = if Some(*model) == current { "*" } else { " " };
            listing.push_str(&format!("\n {marker} {model}"));
        }
        app.notify(listing);
        return CommandResult::Continue;
    }

    match app.controller.select_model(invocation.args) {
        Ok(model) => app.notify(format!("Model set to {model}")),
        Err(err) => app.notify(format!("❌ {err}. Type /model to list models.")),
    }
    CommandResult::Continue
}

pub(super) fn handle_new(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    if app.controller.session().transcript().is_empty() {
        app.controller.start_new_chat();
        app.notify("Started a new chat.");
        return CommandResult::Continue;
    }

    // The chat is only archived once its export is safely on disk.
    let export = app.controller.export_transcript();
    let dir = app.export_dir.clone();
    if !write_export(app, &export, dir) {
        app.notify("Chat kept; fix the export problem and try /new again.");
        return CommandResult::Continue;
    }

    let archived = app.controller.start_new_chat();
    app.notify(format!(
        "Started a new chat. {} message(s) moved to /history.",
        archived.len()
    ));
    CommandResult::Continue
}

pub(super) fn handle_export(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    if app.controller.session().transcript().is_empty() {
        app.notify("Nothing to export - the chat is empty.");
        return CommandResult::Continue;
    }

    let dir = if invocation.has_args() {
        PathBuf::from(invocation.args)
    } else {
        app.export_dir.clone()
    };
    let export = app.controller.export_transcript();
    write_export(app, &export, dir);
    CommandResult::Continue
}

pub(super) fn handle_history(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    let archived = app.controller.session().archived_transcript();
    if archived.is_empty() {
        app.notify("No previous chat history.");
        return CommandResult::Continue;
    }

    let lines: Vec<String> = archived.iter().map(Message::labelled).collect();
    app.notify(format!("Previous Chat History\n{}", lines.join("\n")));
    CommandResult::Continue
}

pub(super) fn handle_whoami(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    let username = app.controller.session().user_identity();
    let notice = if username.is_empty() {
        "No username configured. Use /auth <username> <api-key>.".to_string()
    } else {
        format!("Username: {}", truncate_words(username, USERNAME_WORD_LIMIT))
    };
    app.notify(notice);
    CommandResult::Continue
}

pub(super) fn handle_auth(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    // The key is the last word so usernames may contain spaces.
    let Some((username, api_key)) = invocation.args.rsplit_once(char::is_whitespace) else {
        app.notify("Usage: /auth <username> <api-key>");
        return CommandResult::Continue;
    };

    match app.controller.submit_credential(username, api_key) {
        Ok(()) => app.notify("Details saved."),
        Err(err) => app.notify(format!("❌ {err}")),
    }
    CommandResult::Continue
}

pub(super) fn handle_quit(_app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::Quit
}

fn write_export(app: &mut App, export: &ExportedTranscript, dir: PathBuf) -> bool {
    match export.write_to(&dir) {
        Ok(path) => {
            app.notify(format!("Chat history saved to {}", path.display()));
            true
        }
        Err(err) => {
            app.notify(format!("❌ Export failed: {err}"));
            false
        }
    }
}
