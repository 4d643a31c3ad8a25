use std::path::PathBuf;

use crate::core::session::SessionController;

/// State shared by the chat loop and the slash commands: the controller plus
/// where exports go and the notices queued for display.
pub struct App {
    pub controller: SessionController,
    pub export_dir: PathBuf,
    notices: Vec<String>,
}

impl App {
    pub fn new(controller: SessionController, export_dir: PathBuf) -> Self {
        Self {
            controller,
            export_dir,
            notices: Vec::new(),
        }
    }

    /// Queue a line for the user.
    pub fn notify(&mut self, notice: impl Into<String>) {
        self.notices.push(notice.into());
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }
}
