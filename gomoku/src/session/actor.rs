//! Player actor: drives one client through the handshake and its turns.

use std::{fmt, sync::Arc};
use tokio::sync::OwnedSemaphorePermit;

use super::{
    errors::SessionResult,
    sync::{RelayEnd, SharedMatch},
};
use crate::{
    game::entities::{Coordinate, Symbol},
    net::{
        messages::{Command, CommandKind},
        port::CommunicationPort,
        protocol::MatchId,
    },
};

/// The symbol that plays the opening move of every match.
pub const FIRST_MOVER: Symbol = Symbol::X;

/// How a player's match ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActorOutcome {
    Won,
    Lost,
}

impl fmt::Display for ActorOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Won => write!(f, "won"),
            Self::Lost => write!(f, "lost"),
        }
    }
}

/// One of the two concurrent participants of a match.
pub struct PlayerActor<P> {
    match_id: MatchId,
    symbol: Symbol,
    port: P,
    relay: RelayEnd,
    shared: Arc<SharedMatch>,
}

impl<P: CommunicationPort> PlayerActor<P> {
    pub fn new(match_id: MatchId, symbol: Symbol, port: P, relay: RelayEnd, shared: Arc<SharedMatch>) -> Self {
        Self {
            match_id,
            symbol,
            port,
            relay,
            shared,
        }
    }

    #[must_use]
    pub const fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Play the match to its end, then close the port.
    ///
    /// The port is closed on every exit path, including failures.
    ///
    /// # Errors
    ///
    /// Returns the first port, protocol, board or relay failure. The
    /// match is abandoned from this player's side.
    pub async fn run(mut self) -> SessionResult<ActorOutcome> {
        log::info!("Match {}: player {} starting", self.match_id, self.symbol);
        let result = self.play().await;
        match &result {
            Ok(outcome) => log::info!("Match {}: player {} {}", self.match_id, self.symbol, outcome),
            Err(e) => log::error!("Match {}: player {} stopped: {}", self.match_id, self.symbol, e),
        }
        if let Err(e) = self.port.close().await {
            log::warn!("Match {}: failed to close link of player {}: {}", self.match_id, self.symbol, e);
        }
        result
    }

    async fn play(&mut self) -> SessionResult<ActorOutcome> {
        let opening = self.handshake().await?;
        self.turns(opening).await
    }

    /// Announce the match. Both players finish each step before either
    /// starts the next one.
    ///
    /// X takes the turn token before the last step completes, so X always
    /// holds the opening turn. The permit is returned for that turn.
    async fn handshake(&mut self) -> SessionResult<Option<OwnedSemaphorePermit>> {
        let steps = [
            Command::new(CommandKind::ConnectedAck),
            Command::symbol_assigned(self.symbol.opponent()),
            Command::new(CommandKind::StartGame),
        ];
        for command in &steps {
            self.send(command).await?;
            self.shared.handshake.wait().await;
        }

        self.send(&Command::new(CommandKind::WaitYourTurn)).await?;
        let opening = if self.symbol == FIRST_MOVER {
            Some(self.shared.turn.acquire().await?)
        } else {
            None
        };
        self.shared.handshake.wait().await;
        Ok(opening)
    }

    async fn turns(&mut self, mut opening: Option<OwnedSemaphorePermit>) -> SessionResult<ActorOutcome> {
        loop {
            let permit = match opening.take() {
                Some(permit) => permit,
                None => self.shared.turn.acquire().await?,
            };

            if !self.shared.take_first_turn() {
                let coord = self.relay.take().await?;
                self.send(&Command::opponent_coordinates(coord)).await?;
            }

            if self.shared.game_over.is_set() {
                self.send(&Command::new(CommandKind::YouLost)).await?;
                return Ok(ActorOutcome::Lost);
            }

            let coord = self.request_move().await?;
            let won = self.shared.board.lock().await.check_victory(coord);
            if won {
                self.send(&Command::new(CommandKind::YouWon)).await?;
                self.shared.game_over.set();
            } else {
                self.send(&Command::new(CommandKind::TurnEnded)).await?;
                self.send(&Command::new(CommandKind::WaitYourTurn)).await?;
            }

            drop(permit);
            self.relay.publish(coord).await?;

            if won {
                return Ok(ActorOutcome::Won);
            }
        }
    }

    /// Ask for a move until the client names a free cell, and place it.
    async fn request_move(&mut self) -> SessionResult<Coordinate> {
        self.send(&Command::new(CommandKind::RequestMove)).await?;
        loop {
            let text = self.port.receive(self.match_id).await?;
            match text.parse::<Coordinate>() {
                Ok(coord) => {
                    let mut board = self.shared.board.lock().await;
                    if board.is_free(coord) {
                        board.place(coord, self.symbol)?;
                        log::debug!("Match {}: {} placed at {}", self.match_id, self.symbol, coord);
                        return Ok(coord);
                    }
                    log::debug!("Match {}: {} is already taken", self.match_id, coord);
                }
                Err(e) => log::debug!("Match {}: unusable move {:?}: {}", self.match_id, text, e),
            }
            self.send(&Command::new(CommandKind::MoveRejected)).await?;
        }
    }

    async fn send(&mut self, command: &Command) -> SessionResult<()> {
        self.port.send(command, self.match_id).await?;
        Ok(())
    }
}
