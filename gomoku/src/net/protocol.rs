//! Protocol finite state machine shared by both players of a match.
//!
//! Each live match owns exactly one [`MatchPhase`], kept in a
//! [`ProtocolRegistry`] under the match's [`MatchId`]. Every outbound command
//! is checked against the phase table below and may advance the phase;
//! inbound commands are only checked.
//!
//! ```text
//! Start            connected-ack, symbol-assigned (stay), start-game -> FirstPlayerReady
//! FirstPlayerReady start-game -> AwaitingTurnEnd
//! AwaitingTurnEnd  wait-your-turn, opponent-coordinates (stay), request-move -> AwaitingMove
//! AwaitingMove     move-rejected (stay), turn-ended -> AwaitingTurnEnd, you-won -> WinAnnounced
//! WinAnnounced     opponent-coordinates (stay), you-lost -> Closed
//! Closed           nothing
//! ```

use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt,
    hash::{DefaultHasher, Hash, Hasher},
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use thiserror::Error;

use super::messages::{Command, CommandKind};

/// Identity of one match, derived from its two endpoints.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct MatchId(u64);

impl MatchId {
    /// Derive the id from the peer addresses of the two players, in seat
    /// order. The same pair always yields the same id.
    #[must_use]
    pub fn from_endpoints(first: SocketAddr, second: SocketAddr) -> Self {
        let mut hasher = DefaultHasher::new();
        first.hash(&mut hasher);
        second.hash(&mut hasher);
        Self(hasher.finish())
    }

    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Protocol-level phase of a match.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum MatchPhase {
    Start,
    FirstPlayerReady,
    AwaitingTurnEnd,
    AwaitingMove,
    WinAnnounced,
    Closed,
}

impl MatchPhase {
    /// The phase after sending `kind`, or `None` if `kind` may not be sent
    /// in this phase.
    #[must_use]
    pub const fn after_outbound(self, kind: CommandKind) -> Option<Self> {
        use CommandKind as K;
        match (self, kind) {
            (Self::Start, K::ConnectedAck | K::SymbolAssigned) => Some(Self::Start),
            (Self::Start, K::StartGame) => Some(Self::FirstPlayerReady),
            (Self::FirstPlayerReady, K::StartGame) => Some(Self::AwaitingTurnEnd),
            (Self::AwaitingTurnEnd, K::WaitYourTurn | K::OpponentCoordinates) => {
                Some(Self::AwaitingTurnEnd)
            }
            (Self::AwaitingTurnEnd, K::RequestMove) => Some(Self::AwaitingMove),
            (Self::AwaitingMove, K::MoveRejected) => Some(Self::AwaitingMove),
            (Self::AwaitingMove, K::TurnEnded) => Some(Self::AwaitingTurnEnd),
            (Self::AwaitingMove, K::YouWon) => Some(Self::WinAnnounced),
            (Self::WinAnnounced, K::OpponentCoordinates) => Some(Self::WinAnnounced),
            (Self::WinAnnounced, K::YouLost) => Some(Self::Closed),
            _ => None,
        }
    }

    /// Whether a client may send `kind` in this phase.
    #[must_use]
    pub const fn accepts_inbound(self, kind: CommandKind) -> bool {
        matches!((self, kind), (Self::AwaitingMove, CommandKind::SubmitMove))
    }
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Start => "start",
            Self::FirstPlayerReady => "first player ready",
            Self::AwaitingTurnEnd => "awaiting turn end",
            Self::AwaitingMove => "awaiting move",
            Self::WinAnnounced => "win announced",
            Self::Closed => "closed",
        };
        write!(f, "{repr}")
    }
}

/// Protocol violations and registry misuse.
#[derive(Debug, Eq, Error, PartialEq)]
pub enum ProtocolError {
    #[error("match {0} is not registered")]
    UnknownMatch(MatchId),
    #[error("match {0} is already registered")]
    DuplicateMatch(MatchId),
    #[error("can't send {kind} while the match is in the {phase} phase")]
    IllegalOutbound { phase: MatchPhase, kind: CommandKind },
    #[error("can't accept {kind} while the match is in the {phase} phase")]
    IllegalInbound { phase: MatchPhase, kind: CommandKind },
    #[error("{0} requires an argument")]
    MissingArgument(CommandKind),
}

/// Result type for protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Phase table for every live match in the process.
///
/// Lookups and transitions for one match happen under a single lock, so a
/// check-then-advance is atomic with respect to the other player of the
/// same match. The lock is never held across an await point.
#[derive(Debug, Default)]
pub struct ProtocolRegistry {
    phases: Mutex<HashMap<MatchId, MatchPhase>>,
}

impl ProtocolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn phases(&self) -> MutexGuard<'_, HashMap<MatchId, MatchPhase>> {
        // A panic while holding the lock can't leave a half-written phase.
        self.phases.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new match in [`MatchPhase::Start`].
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::DuplicateMatch`] if the id is still live.
    pub fn create(&self, id: MatchId) -> ProtocolResult<()> {
        let mut phases = self.phases();
        if phases.contains_key(&id) {
            return Err(ProtocolError::DuplicateMatch(id));
        }
        phases.insert(id, MatchPhase::Start);
        log::debug!("Match {id} registered");
        Ok(())
    }

    /// Register a new match and return a guard that releases the entry once
    /// every clone of it is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::DuplicateMatch`] if the id is still live.
    pub fn register(self: &Arc<Self>, id: MatchId) -> ProtocolResult<Arc<MatchRegistration>> {
        self.create(id)?;
        Ok(Arc::new(MatchRegistration {
            registry: Arc::clone(self),
            id,
        }))
    }

    #[must_use]
    pub fn phase(&self, id: MatchId) -> Option<MatchPhase> {
        self.phases().get(&id).copied()
    }

    /// Force a phase. Returns the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UnknownMatch`] if the id isn't registered.
    pub fn transition(&self, id: MatchId, next: MatchPhase) -> ProtocolResult<MatchPhase> {
        let mut phases = self.phases();
        let phase = phases.get_mut(&id).ok_or(ProtocolError::UnknownMatch(id))?;
        Ok(std::mem::replace(phase, next))
    }

    /// Drop the entry for `id`, returning its final phase.
    pub fn remove(&self, id: MatchId) -> Option<MatchPhase> {
        let removed = self.phases().remove(&id);
        if let Some(phase) = removed {
            log::debug!("Match {id} released in the {phase} phase");
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phases().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases().is_empty()
    }

    /// Check that `command` may be sent now and advance the phase.
    ///
    /// Returns the phase after the command. On error the phase is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::IllegalOutbound`] for a pair missing from the
    /// phase table, or [`ProtocolError::UnknownMatch`].
    pub fn validate_outbound(&self, command: &Command, id: MatchId) -> ProtocolResult<MatchPhase> {
        let mut phases = self.phases();
        let phase = phases.get_mut(&id).ok_or(ProtocolError::UnknownMatch(id))?;
        let next = phase
            .after_outbound(command.kind)
            .ok_or(ProtocolError::IllegalOutbound {
                phase: *phase,
                kind: command.kind,
            })?;
        *phase = next;
        Ok(next)
    }

    /// Check that `command` may be received now. Never changes the phase.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::IllegalInbound`] unless the command is a
    /// submitted move and the match is waiting for one, or
    /// [`ProtocolError::UnknownMatch`].
    pub fn validate_inbound(&self, command: &Command, id: MatchId) -> ProtocolResult<()> {
        let phase = self.phase(id).ok_or(ProtocolError::UnknownMatch(id))?;
        if phase.accepts_inbound(command.kind) {
            Ok(())
        } else {
            Err(ProtocolError::IllegalInbound {
                phase,
                kind: command.kind,
            })
        }
    }
}

/// Keeps a match's phase entry alive. The entry is removed from the
/// registry when the last clone is dropped.
#[derive(Debug)]
pub struct MatchRegistration {
    registry: Arc<ProtocolRegistry>,
    id: MatchId,
}

impl MatchRegistration {
    #[must_use]
    pub const fn id(&self) -> MatchId {
        self.id
    }
}

impl Drop for MatchRegistration {
    fn drop(&mut self) {
        self.registry.remove(self.id);
    }
}
