//! Command-line interface parsing and handling
//!
//! This module parses arguments, performs start-up (logging, settings,
//! credential loading), and dispatches to the chat loop or a subcommand.

pub mod auth;
pub mod model_list;
pub mod say;
pub mod settings;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::app::App;
use crate::core::completion::HttpCompletionClient;
use crate::core::config::Config;
use crate::core::credentials::{Credential, CredentialStore};
use crate::core::models;
use crate::core::session::SessionController;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging;

#[derive(Parser)]
#[command(name = "nexbot", version)]
#[command(about = "A terminal chat front-end for Groq and other OpenAI-compatible APIs")]
#[command(
    long_about = "NeX-Bot is a line-oriented terminal chat client. Pick a model, type a \
message, and the reply is printed below it.\n\n\
Getting started:\n\
  nexbot auth       Save your username and API key\n\
  nexbot            Start chatting\n\n\
Commands inside the chat:\n\
  /help             List commands\n\
  /model [id]       List models or switch model\n\
  /new              Archive and export the chat, then start over\n\
  /export [dir]     Save the chat to chat_history_<timestamp>.txt\n\
  /history          Show the previous chat\n\
  /quit             Leave"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to start with (see `nexbot models`)
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Credential file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub credentials: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Save a username and API key
    Auth {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        api_key: Option<String>,
    },
    /// List selectable models
    Models,
    /// Send a single message and print the reply
    Say {
        #[arg(trailing_var_arg = true, required = true)]
        prompt: Vec<String>,
    },
    /// Set a configuration value (default-model, base-url, export-dir)
    Set {
        key: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset a configuration value
    Unset { key: String },
    /// Show the current configuration
    Config,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.log.as_deref())?;

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => fail(&err.to_string()),
    };

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Models => {
            model_list::print_models(models::resolve_default(config.default_model.as_deref()));
            Ok(())
        }
        Commands::Set { key, value } => settings::run_set(config, &key, &value.join(" ")),
        Commands::Unset { key } => settings::run_unset(config, &key),
        Commands::Config => {
            config.print_all();
            Ok(())
        }
        Commands::Auth { username, api_key } => {
            let store = credential_store(args.credentials)?;
            let mut controller = build_controller(&config, store, None)?;
            auth::run_auth(&mut controller, username, api_key)
        }
        Commands::Say { prompt } => {
            let store = credential_store(args.credentials)?;
            let credential = load_credential(&store).unwrap_or_else(|msg| fail(&msg));
            let controller = build_controller(&config, store, args.model.as_deref())?
                .with_credential(credential);
            say::run_say(controller, &prompt.join(" ")).await
        }
        Commands::Chat => {
            let store = credential_store(args.credentials)?;
            let credential = load_credential(&store).unwrap_or_else(|msg| fail(&msg));
            let controller = build_controller(&config, store, args.model.as_deref())?
                .with_credential(credential);
            run_chat(App::new(controller, config.export_dir())).await
        }
    }
}

fn credential_store(path: Option<PathBuf>) -> Result<CredentialStore, Box<dyn Error>> {
    match path {
        Some(path) => Ok(CredentialStore::new(path)),
        None => Ok(CredentialStore::default_location()?),
    }
}

/// Load the stored credential. A missing or malformed file halts start-up
/// until it is fixed, so the error carries a hint for the user.
pub fn load_credential(store: &CredentialStore) -> Result<Credential, String> {
    store.load().map_err(|err| {
        format!("{err}\n💡 Run 'nexbot auth' to save your username and API key.")
    })
}

/// Resolve the starting model (an explicit `--model` must be in the catalog)
/// and wire the HTTP client into a controller.
pub fn build_controller(
    config: &Config,
    store: CredentialStore,
    requested_model: Option<&str>,
) -> Result<SessionController, Box<dyn Error>> {
    let model = match requested_model {
        Some(id) => models::find_model(id).ok_or_else(|| {
            format!("Unknown model: {id}. Run 'nexbot models' to list available models.")
        })?,
        None => models::resolve_default(config.default_model.as_deref()),
    };

    let client = HttpCompletionClient::new(config.base_url());
    Ok(SessionController::new(store, Box::new(client), model))
}

fn fail(message: &str) -> ! {
    eprintln!("❌ {message}");
    std::process::exit(1);
}
