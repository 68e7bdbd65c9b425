//! Two-player Gomoku match server.
//!
//! Pairs consecutive TCP connections into matches and runs each match as a
//! pair of player actors.

mod config;
mod logging;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Error, anyhow};
use log::{error, info};
use pico_args::Arguments;
use tokio::net::TcpListener;

use gomoku::{
    Symbol,
    net::protocol::ProtocolRegistry,
    server,
    session::MatchHandles,
};

use config::ServerConfig;

const HELP: &str = "\
Run a two-player Gomoku match server

USAGE:
  gomoku_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:6969]
  --log        FILTER      Log filter directives        [default: env RUST_LOG or info]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:6969)
  RUST_LOG                 Log filter (e.g., info,gomoku=debug)
  (A .env file in the working directory is read first)
";

struct Args {
    bind: Option<SocketAddr>,
    log: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        log: pargs.opt_value_from_str("--log")?,
    };

    let config = ServerConfig::from_env(args.bind, args.log)?;
    config.validate()?;

    logging::init(&config.log_filter);
    info!("Starting Gomoku server at {}", config.bind);

    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow!("Failed to bind to {}: {}", config.bind, e))?;
    let registry = Arc::new(ProtocolRegistry::new());

    info!("Server is running at {}. Press Ctrl+C to stop.", config.bind);

    tokio::select! {
        () = server::run_with(listener, registry, report_outcome) => {}
        () = shutdown_signal() => {}
    }

    info!("Shutting down server...");

    Ok(())
}

/// Log a match's start and, once both players are done, its outcome.
fn report_outcome(handles: MatchHandles) {
    let MatchHandles { id, first, second } = handles;
    logging::log_match_event(id, "started", "X moves first");

    tokio::spawn(async move {
        for (symbol, handle) in [(Symbol::X, first), (Symbol::O, second)] {
            match handle.await {
                Ok(Ok(outcome)) => {
                    logging::log_match_event(id, "player_finished", &format!("{symbol} {outcome}"));
                }
                Ok(Err(e)) => logging::log_match_failure(id, &symbol.to_string(), &e.to_string()),
                Err(e) => logging::log_match_failure(id, &symbol.to_string(), &format!("task failed: {e}")),
            }
        }
        logging::log_match_event(id, "finished", "both players done");
    });
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install CTRL+C signal handler: {e}");
        std::future::pending::<()>().await;
    }
}
