//! TCP accept loop.
//!
//! Consecutive connections are paired into matches: the first of a pair
//! plays X and moves first. A connection waiting for a partner is only
//! held, nothing is sent to it until the partner arrives.

use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

use super::protocol::ProtocolRegistry;
use crate::session::{MatchHandles, MatchSession};

/// Accept connections forever, starting a match for every pair.
///
/// Accept failures and matches that fail to start are logged; the loop
/// keeps going.
pub async fn run(listener: TcpListener, registry: Arc<ProtocolRegistry>) {
    run_with(listener, registry, |_| {}).await;
}

/// Like [`run`], handing every started match to `on_match`.
pub async fn run_with<F>(listener: TcpListener, registry: Arc<ProtocolRegistry>, mut on_match: F)
where
    F: FnMut(MatchHandles),
{
    let session = MatchSession::new(registry);
    let mut waiting: Option<TcpStream> = None;

    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                log::warn!("Failed to accept connection: {e}");
                continue;
            }
        };
        if let Err(e) = stream.set_nodelay(true) {
            log::debug!("Couldn't disable Nagle for {addr}: {e}");
        }
        log::info!("Accepted connection from {addr}");

        match waiting.take() {
            None => waiting = Some(stream),
            Some(first) => match session.start_tcp(first, stream) {
                Ok(handles) => {
                    log::debug!("Match {} paired with {addr}", handles.id);
                    on_match(handles);
                }
                Err(e) => log::error!("Failed to start match with {addr}: {e}"),
            },
        }
    }
}
