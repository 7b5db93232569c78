use crate::Message;
use std::io::{self, BufRead};
use std::sync::mpsc::Sender;
use std::thread;
use word_scramble::GameEvent;

/// What one line of player input asks for.
#[derive(Debug, PartialEq)]
pub enum Command {
    Event(GameEvent),
    ListPacks,
    Help,
    Quit,
}

/// Parses a line typed by the player. Lines starting with `/` are commands; anything else is the
/// new guess text.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.trim_start().strip_prefix('/') else {
        return Command::Event(GameEvent::guess_updated(line));
    };
    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command, ""),
    };
    match name.to_ascii_lowercase().as_str() {
        "pack" if !argument.is_empty() => Command::Event(GameEvent::pack_selected(argument)),
        "pack" | "packs" => Command::ListPacks,
        "start" => Command::Event(GameEvent::StartGame),
        "skip" => Command::Event(GameEvent::SkipWord),
        "end" => Command::Event(GameEvent::EndGame),
        "quit" | "exit" => Command::Quit,
        _ => Command::Help,
    }
}

/// Forwards each line of standard input to `sender`, followed by [`Message::Eof`].
pub fn spawn_stdin_reader(sender: Sender<Message>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if sender.send(Message::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    log::error!("Failed to read input: {}", err);
                    break;
                }
            }
        }
        let _ = sender.send(Message::Eof);
    });
}
