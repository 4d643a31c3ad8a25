//! Conversation state and the controller that mediates between user input
//! and the remote completion capability.

use std::error::Error as StdError;
use std::fmt;

use crate::api::ChatMessage;
use crate::core::completion::{CompletionClient, CompletionError};
use crate::core::credentials::{Credential, CredentialError, CredentialStore};
use crate::core::export::{self, ExportedTranscript};
use crate::core::message::Message;
use crate::core::models;

/// Prepended to every outgoing request; never stored in the transcript.
pub const SYSTEM_PREAMBLE: &str = "You are a helpful assistant";

/// Speaker tag stored in front of every assistant reply.
pub const ASSISTANT_TAG: &str = "NeX";

#[derive(Debug)]
pub enum SessionError {
    EmptyUsername,
    EmptyMessage,
    NoCredential,
    NoModelSelected,
    UnknownModel(String),
    CredentialSave(CredentialError),
    Remote(CompletionError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptyUsername => write!(f, "Username cannot be empty."),
            SessionError::EmptyMessage => write!(f, "Message cannot be empty."),
            SessionError::NoCredential => {
                write!(f, "No username and API key configured. Submit your details first.")
            }
            SessionError::NoModelSelected => write!(f, "No model selected."),
            SessionError::UnknownModel(id) => write!(f, "Unknown model: {id}"),
            SessionError::CredentialSave(err) => write!(f, "{err}"),
            SessionError::Remote(err) => write!(f, "{err}"),
        }
    }
}

impl StdError for SessionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            SessionError::CredentialSave(err) => Some(err),
            SessionError::Remote(err) => Some(err),
            _ => None,
        }
    }
}

/// Everything one running conversation owns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_identity: String,
    selected_model: Option<String>,
    transcript: Vec<Message>,
    archived_transcript: Vec<Message>,
}

impl Session {
    pub fn new(user_identity: impl Into<String>, selected_model: impl Into<String>) -> Self {
        Self {
            user_identity: user_identity.into(),
            selected_model: Some(selected_model.into()),
            ..Default::default()
        }
    }

    pub fn user_identity(&self) -> &str {
        &self.user_identity
    }

    pub fn selected_model(&self) -> Option<&str> {
        self.selected_model.as_deref()
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn archived_transcript(&self) -> &[Message] {
        &self.archived_transcript
    }

    #[cfg(test)]
    pub(crate) fn restore_transcript(&mut self, transcript: Vec<Message>) {
        self.transcript = transcript;
    }

    /// Move the whole transcript into the archive, replacing whatever was
    /// archived before, and return a copy of it.
    fn archive(&mut self) -> Vec<Message> {
        let archived = std::mem::take(&mut self.transcript);
        self.archived_transcript = archived.clone();
        archived
    }
}

pub struct SessionController {
    session: Session,
    credential: Option<Credential>,
    store: CredentialStore,
    client: Box<dyn CompletionClient>,
}

impl SessionController {
    pub fn new(
        store: CredentialStore,
        client: Box<dyn CompletionClient>,
        selected_model: &str,
    ) -> Self {
        Self {
            session: Session::new(String::new(), selected_model),
            credential: None,
            store,
            client,
        }
    }

    /// Adopt a credential that was loaded from the store at start-up.
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.session.user_identity = credential.user_identity.clone();
        self.credential = Some(credential);
        self
    }

    /// Replace the session wholesale; used when restoring state in tests.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn credential_configured(&self) -> bool {
        self.credential
            .as_ref()
            .is_some_and(Credential::is_usable)
    }

    pub fn selected_model(&self) -> Option<&str> {
        self.session.selected_model()
    }

    /// Validate and persist a credential. The stored credential only changes
    /// when the write succeeds.
    pub fn submit_credential(
        &mut self,
        user_identity: &str,
        api_key: &str,
    ) -> Result<(), SessionError> {
        let user_identity = user_identity.trim();
        if user_identity.is_empty() {
            return Err(SessionError::EmptyUsername);
        }

        let credential = Credential::new(user_identity, api_key.trim());
        self.store
            .save(&credential)
            .map_err(SessionError::CredentialSave)?;

        self.session.user_identity = credential.user_identity.clone();
        self.credential = Some(credential);
        Ok(())
    }

    /// Select a model from the catalog. Unknown identifiers leave the current
    /// selection untouched.
    pub fn select_model(&mut self, id: &str) -> Result<&'static str, SessionError> {
        let model =
            models::find_model(id).ok_or_else(|| SessionError::UnknownModel(id.to_string()))?;
        tracing::debug!(model, "model selected");
        self.session.selected_model = Some(model.to_string());
        Ok(model)
    }

    /// Send `text` and return the assistant's reply as stored.
    ///
    /// Turns are stored tagged with their speaker: `"<username>: <text>"` for
    /// the user and `"NeX: <reply>"` for the assistant. The user message is
    /// appended before the remote call and stays in the transcript when the
    /// call fails; the assistant message is appended only on success.
    pub async fn send_message(&mut self, text: &str) -> Result<String, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        let credential = self
            .credential
            .as_ref()
            .filter(|credential| credential.is_usable())
            .ok_or(SessionError::NoCredential)?;
        let model = self
            .session
            .selected_model
            .as_deref()
            .ok_or(SessionError::NoModelSelected)?;

        self.session
            .transcript
            .push(Message::user(format!("{}: {text}", credential.user_identity)));

        let preamble = Message::system(SYSTEM_PREAMBLE);
        let request: Vec<ChatMessage> = std::iter::once(&preamble)
            .chain(self.session.transcript.iter())
            .map(ChatMessage::from)
            .collect();

        match self.client.complete(credential, model, &request).await {
            Ok(reply) => {
                let reply = format!("{ASSISTANT_TAG}: {reply}");
                self.session.transcript.push(Message::assistant(reply.clone()));
                Ok(reply)
            }
            Err(err) => {
                tracing::warn!(error = %err, "completion failed");
                Err(SessionError::Remote(err))
            }
        }
    }

    /// Archive the current transcript and start over with an empty one.
    pub fn start_new_chat(&mut self) -> Vec<Message> {
        let archived = self.session.archive();
        tracing::info!(messages = archived.len(), "started new chat");
        archived
    }

    pub fn export_transcript(&self) -> ExportedTranscript {
        export::export_transcript(&self.session.transcript)
    }
}

#[cfg(test)]
mod tests;
