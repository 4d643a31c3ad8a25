//! Line-oriented interactive chat.

use std::error::Error;
use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::commands::{process_input, CommandResult};
use crate::core::app::App;

const TITLE: &str = "NeX-Bot";

/// Run the chat against the process's stdin and stdout.
pub async fn run_chat(mut app: App) -> Result<(), Box<dyn Error>> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    run_loop(&mut app, stdin, &mut stdout).await?;
    Ok(())
}

/// Drive the chat until `/quit` or end of input.
pub async fn run_loop<R, W>(app: &mut App, input: R, output: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    print_banner(app, output)?;
    let mut lines = input.lines();

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(output)?;
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let result = process_input(app, &line);
        flush_notices(app, output)?;

        match result {
            CommandResult::Continue => {}
            CommandResult::Quit => break,
            CommandResult::ProcessAsMessage(text) => {
                match app.controller.send_message(&text).await {
                    Ok(reply) => writeln!(output, "Assistant: {reply}")?,
                    Err(err) => writeln!(output, "❌ {err}")?,
                }
            }
        }
    }

    Ok(())
}

fn print_banner<W: Write>(app: &App, output: &mut W) -> io::Result<()> {
    writeln!(output, "{TITLE}")?;
    if let Some(model) = app.controller.selected_model() {
        writeln!(output, "Model: {model}")?;
    }
    writeln!(output, "Type /help for commands, /quit to leave.")?;
    Ok(())
}

fn flush_notices<W: Write>(app: &mut App, output: &mut W) -> io::Result<()> {
    for notice in app.take_notices() {
        writeln!(output, "{notice}")?;
    }
    Ok(())
}
