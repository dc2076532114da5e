//! Parsing of the lines typed at the prompt.

use std::io::{self, BufRead};

use rps_core::{Difficulty, Move, ParseError};

/// One raw line read from the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    Text(String),
    /// A line that is not valid UTF-8, with its length in bytes.
    Undecodable(usize),
}

/// Read the next line, or `None` at end of input.
///
/// Bad bytes only spoil their own line; reading continues after it.
pub fn read_input_line(input: &mut impl BufRead) -> io::Result<Option<InputLine>> {
    let mut bytes = Vec::new();
    if input.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(None);
    }
    let line = match String::from_utf8(bytes) {
        Ok(text) => InputLine::Text(text),
        Err(e) => InputLine::Undecodable(e.as_bytes().len()),
    };
    Ok(Some(line))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(Move),
    SetDifficulty(Difficulty),
    Score,
    Help,
    Quit,
}

pub const HELP: &str = "\
moves:      rock | paper | scissors   (or r | p | s)
difficulty: difficulty easy|normal|hard
other:      score, help, quit";

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => Command::Quit,
        "help" | "?" => Command::Help,
        "score" => Command::Score,
        "difficulty" | "level" => {
            let level = words.next().unwrap_or_default();
            Command::SetDifficulty(level.parse()?)
        }
        _ => Command::Play(head.parse()?),
    };
    Ok(Some(command))
}
