use thiserror::Error;

use crate::{
    game::BoardError,
    net::{port::PortError, protocol::ProtocolError},
};

/// Reasons a player actor stops before its match is decided.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Port(#[from] PortError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("board rejected the move: {0}")]
    Board(#[from] BoardError),
    #[error("opponent left the match")]
    RelayClosed,
    #[error("connection setup failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("turn token closed")]
    TurnTokenClosed,
}

pub type SessionResult<T> = Result<T, SessionError>;
