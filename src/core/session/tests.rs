use super::*;
use crate::core::message::Role;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

type RecordedCall = (String, Vec<ChatMessage>);

/// Completion client that replays scripted outcomes and records requests.
#[derive(Default, Clone)]
struct ScriptedClient {
    outcomes: Arc<Mutex<VecDeque<Result<String, CompletionError>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl ScriptedClient {
    fn replying(replies: &[&str]) -> Self {
        let client = Self::default();
        for reply in replies {
            client.push(Ok(reply.to_string()));
        }
        client
    }

    fn push(&self, outcome: Result<String, CompletionError>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(
        &self,
        credential: &Credential,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CompletionError> {
        assert!(credential.is_configured(), "client called without a key");
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(CompletionError::EmptyResponse))
    }
}

fn failing_status() -> CompletionError {
    CompletionError::Status {
        status: 500,
        detail: "internal server error".to_string(),
    }
}

struct Fixture {
    _dir: TempDir,
    store: CredentialStore,
    client: ScriptedClient,
}

impl Fixture {
    fn new(client: ScriptedClient) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let store = CredentialStore::new(dir.path().join("config.json"));
        Self {
            _dir: dir,
            store,
            client,
        }
    }

    fn controller(&self) -> SessionController {
        SessionController::new(
            self.store.clone(),
            Box::new(self.client.clone()),
            models::default_model(),
        )
    }

    fn configured_controller(&self) -> SessionController {
        self.controller()
            .with_credential(Credential::new("ada", "gsk_test"))
    }
}

#[tokio::test]
async fn submitted_credential_is_persisted_and_used() {
    let fixture = Fixture::new(ScriptedClient::replying(&["hello"]));
    let mut controller = fixture.controller();
    assert!(!controller.credential_configured());

    controller
        .submit_credential("ada", "gsk_test")
        .expect("submit should succeed");

    assert!(controller.credential_configured());
    assert_eq!(controller.session().user_identity(), "ada");
    assert_eq!(
        fixture.store.load().expect("stored"),
        Credential::new("ada", "gsk_test")
    );

    let reply = controller.send_message("hi").await.expect("send");
    assert_eq!(reply, "NeX: hello");
}

#[test]
fn empty_username_is_rejected_without_touching_store() {
    let fixture = Fixture::new(ScriptedClient::default());
    fixture
        .store
        .save(&Credential::new("grace", "old-key"))
        .expect("seed store");
    let mut controller = fixture
        .controller()
        .with_credential(Credential::new("grace", "old-key"));

    for username in ["", "   "] {
        let err = controller
            .submit_credential(username, "new-key")
            .expect_err("empty username must fail");
        assert!(matches!(err, SessionError::EmptyUsername));
    }

    assert_eq!(controller.session().user_identity(), "grace");
    assert_eq!(
        fixture.store.load().expect("stored"),
        Credential::new("grace", "old-key")
    );
}

#[test]
fn failed_save_keeps_previous_credential() {
    let dir = TempDir::new().expect("temp dir");
    // A directory where the credential file should be makes the rename fail.
    let path = dir.path().join("config.json");
    fs::create_dir_all(path.join("occupied")).expect("blocker");

    let mut controller = SessionController::new(
        CredentialStore::new(path),
        Box::new(ScriptedClient::default()),
        models::default_model(),
    );

    let err = controller
        .submit_credential("ada", "gsk_test")
        .expect_err("save should fail");
    assert!(matches!(err, SessionError::CredentialSave(_)));
    assert!(!controller.credential_configured());
    assert_eq!(controller.session().user_identity(), "");
}

#[tokio::test]
async fn empty_api_key_is_stored_but_not_usable() {
    let fixture = Fixture::new(ScriptedClient::replying(&["unused"]));
    let mut controller = fixture.controller();

    controller
        .submit_credential("ada", "")
        .expect("empty key is stored");
    assert!(!controller.credential_configured());

    let err = controller.send_message("hi").await.expect_err("no key");
    assert!(matches!(err, SessionError::NoCredential));
    assert!(controller.session().transcript().is_empty());
    assert!(fixture.client.calls().is_empty());
}

#[tokio::test]
async fn credential_without_username_cannot_send() {
    let fixture = Fixture::new(ScriptedClient::replying(&["unused"]));
    let mut controller = fixture.controller().with_credential(Credential::new("", "k"));
    assert!(!controller.credential_configured());

    let err = controller.send_message("hi").await.expect_err("no username");
    assert!(matches!(err, SessionError::NoCredential));
    assert!(controller.session().transcript().is_empty());
    assert!(fixture.client.calls().is_empty());
}

#[tokio::test]
async fn send_message_appends_user_and_assistant_in_order() {
    let fixture = Fixture::new(ScriptedClient::replying(&["hello", "again"]));
    let mut controller = fixture.configured_controller();

    controller.send_message("hi").await.expect("first");
    controller.send_message("more").await.expect("second");

    assert_eq!(
        controller.session().transcript(),
        &[
            Message::user("ada: hi"),
            Message::assistant("NeX: hello"),
            Message::user("ada: more"),
            Message::assistant("NeX: again"),
        ]
    );

    let calls = fixture.client.calls();
    assert_eq!(calls.len(), 2);
    let (model, messages) = &calls[1];
    assert_eq!(model, models::default_model());
    assert_eq!(messages[0].role, "system");
    assert_eq!(messages[0].content, SYSTEM_PREAMBLE);
    let roles: Vec<_> = messages.iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, ["system", "user", "assistant", "user"]);
    assert_eq!(messages[2].content, "NeX: hello");
    assert_eq!(messages[3].content, "ada: more");
}

#[tokio::test]
async fn remote_failure_keeps_only_the_user_message() {
    let client = ScriptedClient::default();
    client.push(Err(failing_status()));
    let fixture = Fixture::new(client);
    let mut controller = fixture.configured_controller();

    let err = controller.send_message("hi").await.expect_err("remote fails");

    assert!(matches!(err, SessionError::Remote(_)));
    assert_eq!(controller.session().transcript(), &[Message::user("ada: hi")]);
}

#[tokio::test]
async fn empty_text_is_rejected_before_any_state_change() {
    let fixture = Fixture::new(ScriptedClient::replying(&["unused"]));
    let mut controller = fixture.configured_controller();

    let err = controller.send_message("  \n").await.expect_err("empty");
    assert!(matches!(err, SessionError::EmptyMessage));
    assert!(controller.session().transcript().is_empty());
    assert!(fixture.client.calls().is_empty());
}

#[tokio::test]
async fn missing_model_is_reported() {
    let fixture = Fixture::new(ScriptedClient::replying(&["unused"]));
    let mut controller = fixture
        .configured_controller()
        .with_session(Session::default());

    let err = controller.send_message("hi").await.expect_err("no model");
    assert!(matches!(err, SessionError::NoModelSelected));
    assert!(controller.session().transcript().is_empty());
}

#[tokio::test]
async fn start_new_chat_archives_the_whole_transcript() {
    let fixture = Fixture::new(ScriptedClient::replying(&["hello"]));
    let mut controller = fixture.configured_controller();
    controller.send_message("hi").await.expect("send");
    let before = controller.session().transcript().to_vec();

    let archived = controller.start_new_chat();

    assert_eq!(archived, before);
    assert_eq!(controller.session().archived_transcript(), before.as_slice());
    assert!(controller.session().transcript().is_empty());

    let again = controller.start_new_chat();
    assert!(again.is_empty());
    assert!(controller.session().transcript().is_empty());
    assert!(controller.session().archived_transcript().is_empty());
}

#[test]
fn unknown_model_is_rejected_and_selection_kept() {
    let fixture = Fixture::new(ScriptedClient::default());
    let mut controller = fixture.controller();
    controller.select_model("gemma2-9b-it").expect("known model");

    let err = controller
        .select_model("gpt-4o")
        .expect_err("unknown model");

    assert!(matches!(err, SessionError::UnknownModel(ref id) if id == "gpt-4o"));
    assert_eq!(controller.selected_model(), Some("gemma2-9b-it"));
}

#[tokio::test]
async fn export_reflects_current_transcript_without_mutation() {
    let fixture = Fixture::new(ScriptedClient::replying(&["hello"]));
    let mut controller = fixture.configured_controller();
    controller.send_message("hi").await.expect("send");

    let export = controller.export_transcript();

    assert_eq!(export.text, "User: ada: hi\nAssistant: NeX: hello");
    assert!(export.filename.starts_with("chat_history_"));
    assert_eq!(controller.session().transcript().len(), 2);
    assert!(controller
        .session()
        .transcript()
        .iter()
        .all(|m| m.role != Role::System));
}
