//! Match session: wires two ports into a pair of player actors.

use std::sync::Arc;
use tokio::{net::TcpStream, task::JoinHandle};

use super::{
    actor::{ActorOutcome, FIRST_MOVER, PlayerActor},
    errors::SessionResult,
    sync::{MoveRelay, SharedMatch},
};
use crate::{
    net::{
        port::{CommunicationPort, TcpPort},
        protocol::{MatchId, ProtocolRegistry},
    },
};

/// Task handles of a started match, one per player.
pub struct MatchHandles {
    pub id: MatchId,
    pub first: JoinHandle<SessionResult<ActorOutcome>>,
    pub second: JoinHandle<SessionResult<ActorOutcome>>,
}

/// Starts matches against a shared phase registry.
#[derive(Clone, Debug)]
pub struct MatchSession {
    registry: Arc<ProtocolRegistry>,
}

impl MatchSession {
    pub fn new(registry: Arc<ProtocolRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<ProtocolRegistry> {
        &self.registry
    }

    /// Start a match between two freshly accepted TCP connections. The
    /// match id is derived from both peer addresses.
    ///
    /// # Errors
    ///
    /// Fails if a peer address can't be read, or if a match with the
    /// same id is still registered.
    pub fn start_tcp(&self, first: TcpStream, second: TcpStream) -> SessionResult<MatchHandles> {
        let id = MatchId::from_endpoints(first.peer_addr()?, second.peer_addr()?);
        let first = TcpPort::new(first, Arc::clone(&self.registry));
        let second = TcpPort::new(second, Arc::clone(&self.registry));
        self.start(id, first, second)
    }

    /// Register `id` in the start phase and spawn both actors. `first`
    /// plays X and always makes the opening move.
    ///
    /// The actors are not joined. Their handles are returned for callers
    /// that want to wait for the outcome.
    ///
    /// # Errors
    ///
    /// Returns a protocol error if `id` is already registered.
    pub fn start<P>(&self, id: MatchId, first: P, second: P) -> SessionResult<MatchHandles>
    where
        P: CommunicationPort + 'static,
    {
        let registration = self.registry.register(id)?;
        let shared = Arc::new(SharedMatch::new(registration));
        let (first_relay, second_relay) = MoveRelay::pair();

        let first = PlayerActor::new(id, FIRST_MOVER, first, first_relay, Arc::clone(&shared));
        let second = PlayerActor::new(id, FIRST_MOVER.opponent(), second, second_relay, shared);
        log::info!("Match {id} started");

        Ok(MatchHandles {
            id,
            first: tokio::spawn(first.run()),
            second: tokio::spawn(second.run()),
        })
    }
}
