//! Gomoku game rules - board state and win detection.
//!
//! This module provides the match-independent game pieces:
//! - Fixed board dimensions and winning run length
//! - Board symbols and coordinates with their wire text form
//! - The board itself with monotonic occupancy and victory checks

// Submodules
pub mod board;
pub mod constants;
pub mod entities;

pub use board::{Board, BoardError};
pub use entities::{Coordinate, CoordinateError, Symbol};
