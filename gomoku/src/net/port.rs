//! Per-player communication port.
//!
//! A port is the only way a player actor talks to its client. Every command
//! passes through the match's protocol state machine before it touches the
//! wire, so an out-of-order message fails the call instead of reaching the
//! client.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::{
    io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, ReadHalf, WriteHalf, split},
    net::TcpStream,
};

use super::{
    errors::CodecError,
    messages::Command,
    protocol::{MatchId, ProtocolError, ProtocolRegistry},
    utils,
};

/// Failures of a communication port. All of them end the owning actor.
#[derive(Debug, Error)]
pub enum PortError {
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("transport failure: {0}")]
    Codec(#[from] CodecError),
    #[error("transport failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("link closed by peer")]
    Closed,
}

/// Send and receive validated commands for one player.
#[async_trait]
pub trait CommunicationPort: Send {
    /// Validate `command` against the match's phase, then deliver it.
    ///
    /// Nothing is written if validation fails.
    async fn send(&mut self, command: &Command, match_id: MatchId) -> Result<(), PortError>;

    /// Wait for the client's next command, validate it, and return its
    /// coordinate argument as sent.
    async fn receive(&mut self, match_id: MatchId) -> Result<String, PortError>;

    /// Release the underlying link.
    async fn close(&mut self) -> Result<(), PortError>;
}

/// Port over any async byte stream speaking line-delimited JSON.
pub struct StreamPort<S> {
    reader: BufReader<ReadHalf<S>>,
    writer: WriteHalf<S>,
    registry: Arc<ProtocolRegistry>,
}

/// Port over a TCP connection.
pub type TcpPort = StreamPort<TcpStream>;

impl<S: AsyncRead + AsyncWrite> StreamPort<S> {
    pub fn new(stream: S, registry: Arc<ProtocolRegistry>) -> Self {
        let (reader, writer) = split(stream);
        Self {
            reader: BufReader::new(reader),
            writer,
            registry,
        }
    }
}

#[async_trait]
impl<S> CommunicationPort for StreamPort<S>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    async fn send(&mut self, command: &Command, match_id: MatchId) -> Result<(), PortError> {
        let phase = self.registry.validate_outbound(command, match_id)?;
        log::debug!("Match {match_id}: sending {command} (now {phase})");
        utils::write_line_json(&mut self.writer, command).await?;
        Ok(())
    }

    async fn receive(&mut self, match_id: MatchId) -> Result<String, PortError> {
        let command: Command = utils::read_line_json(&mut self.reader)
            .await?
            .ok_or(PortError::Closed)?;
        log::debug!("Match {match_id}: received {command}");
        self.registry.validate_inbound(&command, match_id)?;
        let Command { kind, args } = command;
        args.into_iter()
            .next()
            .ok_or(PortError::Protocol(ProtocolError::MissingArgument(kind)))
    }

    async fn close(&mut self) -> Result<(), PortError> {
        self.writer.shutdown().await?;
        Ok(())
    }
}
