//! Commands read from stdin on a separate thread.

use std::io::BufRead;
use std::sync::mpsc;

use nearwatch_core::Kind;

/// Commands that can be sent from the input thread
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Spawn(Kind),
    Status,
    Quit,
    Help,
    Unknown(String),
}

pub fn parse_command(input: &str) -> Command {
    match input.trim().to_lowercase().as_str() {
        "b" | "bot" => Command::Spawn(Kind::Bot),
        "i" | "item" => Command::Spawn(Kind::Item),
        "s" | "status" => Command::Status,
        "q" | "quit" | "exit" => Command::Quit,
        "help" | "h" | "?" => Command::Help,
        other => Command::Unknown(other.to_string()),
    }
}

/// Forward parsed stdin lines until quit, EOF, or the receiver hangs up.
pub fn input_thread(reader: impl BufRead, tx: mpsc::Sender<Command>) {
    for line in reader.lines() {
        let Ok(line) = line else {
            break;
        };
        let cmd = parse_command(&line);
        let is_quit = matches!(cmd, Command::Quit);
        if tx.send(cmd).is_err() || is_quit {
            break;
        }
    }
}
