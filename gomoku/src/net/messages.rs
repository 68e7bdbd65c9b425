use serde::{Deserialize, Serialize};
use std::fmt;

use super::super::game::entities::{Coordinate, Symbol};

/// Every command name the protocol knows about, in either direction.
///
/// The serialized names are the ones clients see on the wire.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CommandKind {
    /// Server greeting right after the match is formed.
    #[serde(rename = "YOU_ARE_CONNECTED")]
    ConnectedAck,
    /// Carries the symbol the client should watch for, i.e. the opponent's.
    #[serde(rename = "YOUR_BOARD_SYMBOL")]
    SymbolAssigned,
    #[serde(rename = "START_THE_GAME")]
    StartGame,
    #[serde(rename = "WAIT_FOR_YOUR_TURN")]
    WaitYourTurn,
    /// The client must answer with a [`CommandKind::SubmitMove`].
    #[serde(rename = "NEW_MOVE")]
    RequestMove,
    /// The submitted move was malformed or occupied; the client must answer
    /// with another [`CommandKind::SubmitMove`].
    #[serde(rename = "INCORRECT_MOVE")]
    MoveRejected,
    #[serde(rename = "NEXT_PLAYER_TURN")]
    TurnEnded,
    #[serde(rename = "ANOTHER_PLAYER_COORDINATES")]
    OpponentCoordinates,
    #[serde(rename = "YOU_WON")]
    YouWon,
    #[serde(rename = "YOU_LOST")]
    YouLost,
    /// The only command a client may send.
    #[serde(rename = "MY_MOVE")]
    SubmitMove,
}

impl CommandKind {
    /// Whether clients are allowed to send this kind.
    #[must_use]
    pub const fn is_inbound(self) -> bool {
        matches!(self, Self::SubmitMove)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::ConnectedAck => "connected-ack",
            Self::SymbolAssigned => "symbol-assigned",
            Self::StartGame => "start-game",
            Self::WaitYourTurn => "wait-your-turn",
            Self::RequestMove => "request-move",
            Self::MoveRejected => "move-rejected",
            Self::TurnEnded => "turn-ended",
            Self::OpponentCoordinates => "opponent-coordinates",
            Self::YouWon => "you-won",
            Self::YouLost => "you-lost",
            Self::SubmitMove => "submit-move",
        };
        write!(f, "{repr}")
    }
}

/// A decoded protocol message: a command kind plus its ordered string
/// arguments.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Command {
    #[serde(rename = "command")]
    pub kind: CommandKind,
    #[serde(rename = "additionalValues", default)]
    pub args: Vec<String>,
}

impl Command {
    /// A command without arguments.
    #[must_use]
    pub const fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_arg(kind: CommandKind, arg: impl Into<String>) -> Self {
        Self {
            kind,
            args: vec![arg.into()],
        }
    }

    #[must_use]
    pub fn symbol_assigned(symbol: Symbol) -> Self {
        Self::with_arg(CommandKind::SymbolAssigned, symbol.to_string())
    }

    #[must_use]
    pub fn opponent_coordinates(coord: Coordinate) -> Self {
        Self::with_arg(CommandKind::OpponentCoordinates, coord.to_string())
    }

    #[must_use]
    pub fn submit_move(text: impl Into<String>) -> Self {
        Self::with_arg(CommandKind::SubmitMove, text)
    }

    /// The first argument, if any.
    #[must_use]
    pub fn arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.args.as_slice() {
            [] => write!(f, "{}", self.kind),
            args => write!(f, "{} {}", self.kind, args.join(" ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_submit_move_is_inbound() {
        let kinds = [
            CommandKind::ConnectedAck,
            CommandKind::SymbolAssigned,
            CommandKind::StartGame,
            CommandKind::WaitYourTurn,
            CommandKind::RequestMove,
            CommandKind::MoveRejected,
            CommandKind::TurnEnded,
            CommandKind::OpponentCoordinates,
            CommandKind::YouWon,
            CommandKind::YouLost,
        ];
        assert!(kinds.iter().all(|kind| !kind.is_inbound()));
        assert!(CommandKind::SubmitMove.is_inbound());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_string(&Command::symbol_assigned(Symbol::O)).unwrap();
        assert_eq!(json, r#"{"command":"YOUR_BOARD_SYMBOL","additionalValues":["O"]}"#);

        let json = serde_json::to_string(&Command::new(CommandKind::RequestMove)).unwrap();
        assert_eq!(json, r#"{"command":"NEW_MOVE","additionalValues":[]}"#);
    }

    #[test]
    fn test_missing_args_default_to_empty() {
        let cmd: Command = serde_json::from_str(r#"{"command":"MY_MOVE"}"#).unwrap();
        assert_eq!(cmd.kind, CommandKind::SubmitMove);
        assert!(cmd.arg().is_none());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(serde_json::from_str::<Command>(r#"{"command":"CHEAT","additionalValues":[]}"#).is_err());
    }

    #[test]
    fn test_display() {
        let coord = "C5".parse().unwrap();
        assert_eq!(Command::opponent_coordinates(coord).to_string(), "opponent-coordinates C5");
        assert_eq!(Command::new(CommandKind::YouWon).to_string(), "you-won");
    }
}
