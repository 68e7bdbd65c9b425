//! Structured logging configuration.
//!
//! The library logs through the `log` facade; those records are forwarded
//! into the tracing subscriber set up here.

use gomoku::net::protocol::MatchId;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// `filter` uses `RUST_LOG` syntax. An unparsable filter falls back to
/// `info`.
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    // Console layer
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log a match lifecycle event with structured data
///
/// # Arguments
///
/// * `match_id` - Match the event belongs to
/// * `event` - Short event name, e.g. `started` or `player_finished`
/// * `detail` - Free-form detail
pub fn log_match_event(match_id: MatchId, event: &str, detail: &str) {
    tracing::info!(
        match_id = %match_id,
        event = event,
        "MATCH: {}",
        detail
    );
}

/// Log a player that left its match early
pub fn log_match_failure(match_id: MatchId, player: &str, error: &str) {
    tracing::warn!(
        match_id = %match_id,
        player = player,
        error = error,
        "MATCH: player stopped early"
    );
}
