//! Internal modules for the Gomoku terminal client.
//!
//! This library provides command parsing and board rendering used by the
//! gomoku_client binary.

pub mod board_view;
pub mod commands;
