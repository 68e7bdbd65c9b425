//! A low-level async Gomoku client.
//!
//! This client is mostly used by tests, the terminal client and the bots to
//! speak the server's protocol without caring about framing.

use anyhow::{Error, anyhow, bail};
use std::{fmt, net::SocketAddr, time::Duration};
use tokio::{
    io::{AsyncRead, AsyncWrite, BufReader, ReadHalf, WriteHalf, split},
    net::TcpStream,
    time::{sleep, timeout},
};

use super::{
    super::game::entities::{Coordinate, Symbol},
    messages::{Command, CommandKind},
    utils,
};

/// Default timeout for a single connection attempt.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// A decoded message from the server.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ServerEvent {
    Connected,
    /// The symbol the opponent plays with.
    OpponentSymbol(Symbol),
    GameStarted,
    WaitForTurn,
    MoveRequested,
    MoveRejected,
    TurnEnded,
    OpponentMoved(Coordinate),
    Won,
    Lost,
}

impl TryFrom<Command> for ServerEvent {
    type Error = Error;

    fn try_from(command: Command) -> Result<Self, Self::Error> {
        let arg = || {
            command
                .arg()
                .ok_or_else(|| anyhow!("{} is missing its argument", command.kind))
        };
        let event = match command.kind {
            CommandKind::ConnectedAck => Self::Connected,
            CommandKind::SymbolAssigned => {
                Self::OpponentSymbol(arg()?.parse::<Symbol>().map_err(Error::msg)?)
            }
            CommandKind::StartGame => Self::GameStarted,
            CommandKind::WaitYourTurn => Self::WaitForTurn,
            CommandKind::RequestMove => Self::MoveRequested,
            CommandKind::MoveRejected => Self::MoveRejected,
            CommandKind::TurnEnded => Self::TurnEnded,
            CommandKind::OpponentCoordinates => Self::OpponentMoved(arg()?.parse::<Coordinate>()?),
            CommandKind::YouWon => Self::Won,
            CommandKind::YouLost => Self::Lost,
            CommandKind::SubmitMove => bail!("server sent a client-only command"),
        };
        Ok(event)
    }
}

impl fmt::Display for ServerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected => write!(f, "connected"),
            Self::OpponentSymbol(symbol) => write!(f, "opponent plays {symbol}"),
            Self::GameStarted => write!(f, "game started"),
            Self::WaitForTurn => write!(f, "waiting for turn"),
            Self::MoveRequested => write!(f, "your move"),
            Self::MoveRejected => write!(f, "move rejected"),
            Self::TurnEnded => write!(f, "turn ended"),
            Self::OpponentMoved(coord) => write!(f, "opponent played {coord}"),
            Self::Won => write!(f, "you won"),
            Self::Lost => write!(f, "you lost"),
        }
    }
}

/// An async client for one side of a match.
pub struct Client<S = TcpStream> {
    reader: BufReader<ReadHalf<S>>,
    writer: WriteHalf<S>,
}

impl Client<TcpStream> {
    /// Connect to a Gomoku server.
    ///
    /// This method attempts to connect with backoff, trying three times
    /// with decreasing timeouts (1s, 500ms, 100ms).
    ///
    /// # Errors
    ///
    /// Returns an error if no attempt succeeds.
    pub async fn connect(addr: &SocketAddr) -> Result<Self, Error> {
        let mut connect_timeouts = vec![
            Duration::from_millis(100),
            Duration::from_millis(500),
            CONNECT_TIMEOUT,
        ];
        while let Some(connect_timeout) = connect_timeouts.pop() {
            match timeout(connect_timeout, TcpStream::connect(addr)).await {
                Ok(Ok(stream)) => {
                    stream.set_nodelay(true)?;
                    return Ok(Self::new(stream));
                }
                _ => sleep(connect_timeout).await,
            }
        }
        bail!("couldn't connect to {addr}")
    }
}

impl<S: AsyncRead + AsyncWrite> Client<S> {
    pub fn new(stream: S) -> Self {
        let (reader, writer) = split(stream);
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }

    /// Receive the next raw command, or `None` once the server closed the
    /// link.
    ///
    /// # Errors
    ///
    /// Returns an error if the line can't be read or decoded.
    pub async fn recv_command(&mut self) -> Result<Option<Command>, Error> {
        Ok(utils::read_line_json(&mut self.reader).await?)
    }

    /// Receive and decode the next server message.
    ///
    /// # Errors
    ///
    /// Returns an error if the link is closed or the message is invalid.
    pub async fn recv(&mut self) -> Result<ServerEvent, Error> {
        match self.recv_command().await? {
            Some(command) => ServerEvent::try_from(command),
            None => bail!("server closed the connection"),
        }
    }

    /// Receive the next message and require it to be `expected`.
    ///
    /// # Errors
    ///
    /// Returns an error on any other message.
    pub async fn expect(&mut self, expected: ServerEvent) -> Result<(), Error> {
        let event = self.recv().await?;
        if event != expected {
            bail!("invalid server response: expected {expected}, got {event}");
        }
        Ok(())
    }

    /// Consume the four handshake messages, returning the opponent's symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the server deviates from the handshake.
    pub async fn handshake(&mut self) -> Result<Symbol, Error> {
        self.expect(ServerEvent::Connected).await?;
        let opponent = match self.recv().await? {
            ServerEvent::OpponentSymbol(symbol) => symbol,
            event => bail!("invalid server response: expected a symbol, got {event}"),
        };
        self.expect(ServerEvent::GameStarted).await?;
        self.expect(ServerEvent::WaitForTurn).await?;
        Ok(opponent)
    }

    /// Submit a move. The text is sent as-is so malformed moves can be
    /// exercised.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be sent.
    pub async fn submit_move(&mut self, text: impl fmt::Display) -> Result<(), Error> {
        self.send_command(&Command::submit_move(text.to_string())).await
    }

    /// Send an arbitrary command, including ones the server will refuse.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be sent.
    pub async fn send_command(&mut self, command: &Command) -> Result<(), Error> {
        utils::write_line_json(&mut self.writer, command).await?;
        Ok(())
    }
}
