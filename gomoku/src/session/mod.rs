//! Match sessions with a two-task actor model.
//!
//! Each match runs two [`PlayerActor`]s in separate Tokio tasks. They never
//! talk directly. They share:
//! - a [`TurnToken`] (single FIFO permit) so turns strictly alternate
//! - a [`MoveRelay`] that hands the last placed move to the opponent
//! - a [`GameOverFlag`] and a first-turn flag
//! - a two-party barrier for the handshake
//! - the board, behind a mutex
//!
//! [`MatchSession`] allocates all of it, registers the match with the
//! protocol registry and spawns the actors.

pub mod actor;
pub mod errors;
pub mod manager;
pub mod sync;

pub use actor::{ActorOutcome, FIRST_MOVER, PlayerActor};
pub use errors::{SessionError, SessionResult};
pub use manager::{MatchHandles, MatchSession};
pub use sync::{GameOverFlag, MoveRelay, RelayEnd, SharedMatch, TurnToken};
