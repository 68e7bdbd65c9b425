//! Networking layer for client-server communication.
//!
//! This module provides the line-delimited JSON wire protocol, the protocol
//! state machine every message passes through, and the TCP plumbing that
//! pairs connections into matches.

/// Async client for connecting to a Gomoku server.
pub mod client;

/// Wire codec error types.
pub mod errors;

/// Command types for the client-server protocol.
pub mod messages;

/// Per-player communication ports.
pub mod port;

/// Protocol phase table and per-match phase registry.
pub mod protocol;

/// TCP accept loop pairing connections into matches.
pub mod server;

/// Utilities for line-delimited JSON framing.
pub mod utils;
