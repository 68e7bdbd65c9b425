use gomoku::{Coordinate, CoordinateError};
use std::fmt;

/// A line of user input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UserCommand {
    /// Play at a cell.
    Move(Coordinate),
    /// Redraw the board.
    Board,
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing was typed.
    Empty,
    /// Looked like a move but isn't a cell on the board.
    InvalidCoordinate(String, CoordinateError),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Type a cell such as 'C4', or 'help'"),
            Self::InvalidCoordinate(input, e) => {
                write!(f, "'{input}' is not a cell on the board ({e})")
            }
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{cmd}'. Type 'help' to see available commands"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

pub const HELP: &str = "\
Commands:
  A0..J9     play at a cell (row letter, then column digit)
  board      redraw the board
  help       show this message
  quit       leave the match";

/// Parse a line of user input.
///
/// Cells are case-insensitive; they're sent to the server in canonical
/// uppercase form.
///
/// # Examples
///
/// ```
/// use gomoku_client::commands::{UserCommand, parse_command};
///
/// assert!(matches!(parse_command("c4"), Ok(UserCommand::Move(_))));
/// assert_eq!(parse_command(" quit "), Ok(UserCommand::Quit));
/// assert!(parse_command("K1").is_err());
/// ```
pub fn parse_command(input: &str) -> Result<UserCommand, ParseError> {
    let trimmed = input.trim();

    match trimmed.to_ascii_lowercase().as_str() {
        "" => return Err(ParseError::Empty),
        "board" | "b" => return Ok(UserCommand::Board),
        "help" | "h" | "?" => return Ok(UserCommand::Help),
        "quit" | "q" | "exit" => return Ok(UserCommand::Quit),
        _ => {}
    }

    // Anything two characters long is meant as a cell.
    if trimmed.chars().count() == 2 {
        let upper = trimmed.to_ascii_uppercase();
        return upper
            .parse()
            .map(UserCommand::Move)
            .map_err(|e| ParseError::InvalidCoordinate(trimmed.to_string(), e));
    }

    Err(ParseError::UnrecognizedCommand(trimmed.to_string()))
}
