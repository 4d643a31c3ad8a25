//! TUI-less "say" command

use std::error::Error;

use crate::core::session::SessionController;

pub async fn run_say(
    mut controller: SessionController,
    prompt: &str,
) -> Result<(), Box<dyn Error>> {
    match controller.send_message(prompt).await {
        Ok(reply) => {
            println!("{reply}");
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ Error: {err}");
            std::process::exit(1);
        }
    }
}
