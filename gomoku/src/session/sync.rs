//! Synchronization primitives shared by the two players of one match.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::{Barrier, Mutex, OwnedSemaphorePermit, Semaphore, mpsc, oneshot};

use super::errors::{SessionError, SessionResult};
use crate::{
    game::{Board, entities::Coordinate},
    net::protocol::MatchRegistration,
};

/// Players per match.
pub const PLAYERS_PER_MATCH: usize = 2;

/// Exclusive right to run one turn body. Waiters are served in FIFO order,
/// so the two players strictly alternate.
#[derive(Clone, Debug)]
pub struct TurnToken {
    permits: Arc<Semaphore>,
}

impl Default for TurnToken {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnToken {
    #[must_use]
    pub fn new() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(1)),
        }
    }

    /// Wait for the token. It is released when the permit is dropped.
    pub async fn acquire(&self) -> SessionResult<OwnedSemaphorePermit> {
        Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| SessionError::TurnTokenClosed)
    }

    /// Whether some player currently holds the token.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.permits.available_permits() == 0
    }
}

/// Set-once flag marking a decided match.
#[derive(Debug, Default)]
pub struct GameOverFlag(AtomicBool);

impl GameOverFlag {
    /// Mark the match decided. Returns `true` if this call set it.
    pub fn set(&self) -> bool {
        !self.0.swap(true, Ordering::AcqRel)
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

type Handoff = (Coordinate, oneshot::Sender<()>);

/// Zero-capacity hand-off of the last validated move to the opponent.
///
/// Built as a pair of directed single-slot channels. A publish only
/// completes once the opponent has taken the coordinate.
pub struct MoveRelay;

impl MoveRelay {
    /// Create the two connected ends, one per player.
    #[must_use]
    pub fn pair() -> (RelayEnd, RelayEnd) {
        let (first_tx, first_rx) = mpsc::channel(1);
        let (second_tx, second_rx) = mpsc::channel(1);
        (
            RelayEnd {
                outgoing: first_tx,
                incoming: second_rx,
            },
            RelayEnd {
                outgoing: second_tx,
                incoming: first_rx,
            },
        )
    }
}

/// One player's side of the [`MoveRelay`].
#[derive(Debug)]
pub struct RelayEnd {
    outgoing: mpsc::Sender<Handoff>,
    incoming: mpsc::Receiver<Handoff>,
}

impl RelayEnd {
    /// Hand `coord` to the opponent, waiting until it has been taken.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::RelayClosed`] if the opponent is gone.
    pub async fn publish(&self, coord: Coordinate) -> SessionResult<()> {
        let (taken_tx, taken_rx) = oneshot::channel();
        self.outgoing
            .send((coord, taken_tx))
            .await
            .map_err(|_| SessionError::RelayClosed)?;
        taken_rx.await.map_err(|_| SessionError::RelayClosed)
    }

    /// Wait for the opponent's next move.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::RelayClosed`] if the opponent is gone.
    pub async fn take(&mut self) -> SessionResult<Coordinate> {
        let (coord, taken_tx) = self.incoming.recv().await.ok_or(SessionError::RelayClosed)?;
        // The publisher may have stopped waiting; the move still counts.
        let _ = taken_tx.send(());
        Ok(coord)
    }
}

/// State shared by both players of a match.
///
/// The match's protocol entry stays registered for as long as this value
/// is alive.
#[derive(Debug)]
pub struct SharedMatch {
    pub board: Mutex<Board>,
    pub turn: TurnToken,
    pub game_over: GameOverFlag,
    pub handshake: Barrier,
    first_turn: AtomicBool,
    registration: Arc<MatchRegistration>,
}

impl SharedMatch {
    #[must_use]
    pub fn new(registration: Arc<MatchRegistration>) -> Self {
        Self {
            board: Mutex::new(Board::new()),
            turn: TurnToken::new(),
            game_over: GameOverFlag::default(),
            handshake: Barrier::new(PLAYERS_PER_MATCH),
            first_turn: AtomicBool::new(true),
            registration,
        }
    }

    /// Returns `true` exactly once per match, for the first turn body.
    /// There is no earlier move to relay on that turn.
    pub fn take_first_turn(&self) -> bool {
        self.first_turn.swap(false, Ordering::AcqRel)
    }

    #[must_use]
    pub fn registration(&self) -> &MatchRegistration {
        &self.registration
    }
}
