//! # Gomoku
//!
//! A two-player Gomoku match server on a 10x10 board where three in a row
//! wins.
//!
//! Every match runs as two concurrent player actors, one per client. Every
//! message exchanged with a client is legalized by a per-match protocol
//! state machine before it reaches the wire.
//!
//! ## Core Modules
//!
//! - [`game`]: Board, coordinates, symbols and victory detection
//! - [`net`]: Wire codec, protocol state machine, ports, listener and client
//! - [`session`]: Player actors and the synchronization they share
//!
//! ## Example
//!
//! ```
//! use gomoku::{Board, Coordinate, Symbol};
//!
//! let mut board = Board::new();
//! for cell in ["A0", "A1", "A2"] {
//!     board.place(cell.parse::<Coordinate>().unwrap(), Symbol::X).unwrap();
//! }
//! assert!(board.check_victory("A2".parse().unwrap()));
//! ```

/// Networking components for client-server communication.
pub mod net;
pub use net::{client::Client, messages, server, utils};

/// Core game logic and entities.
pub mod game;
pub use game::{
    Board, BoardError,
    constants::{self, BOARD_SIZE, WIN_LENGTH},
    entities::{self, Coordinate, CoordinateError, Symbol},
};

/// Match sessions and player actors.
pub mod session;
pub use session::{MatchSession, SessionError};
