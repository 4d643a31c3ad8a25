//! Credential submission from the command line.

use std::error::Error;
use std::io::{self, BufRead, Write};

use crate::core::session::SessionController;

pub fn run_auth(
    controller: &mut SessionController,
    username: Option<String>,
    api_key: Option<String>,
) -> Result<(), Box<dyn Error>> {
    println!("🔐 NeX-Bot Set-up");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let username = match username {
        Some(username) => username,
        None => prompt(&mut input, &mut stdout, "Enter Username: ")?,
    };
    let api_key = match api_key {
        Some(api_key) => api_key,
        None => prompt(&mut input, &mut stdout, "Enter API Key: ")?,
    };

    match controller.submit_credential(&username, &api_key) {
        Ok(()) => {
            println!("✅ Details saved.");
            if api_key.trim().is_empty() {
                println!("⚠️  No API key was given; chatting needs one.");
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    }
}

/// Print `label`, then read one line with its line ending removed.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<String> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
