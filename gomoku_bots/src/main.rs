//! Gomoku bots that play uniformly random free cells.
//!
//! Each bot keeps its own picture of which cells are taken, learned from
//! its accepted moves and the opponent moves the server announces.

use anyhow::{Context, Error, bail};
use ctrlc::set_handler;
use pico_args::Arguments;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::net::SocketAddr;

use gomoku::{
    Client, Coordinate,
    net::client::ServerEvent,
    session::ActorOutcome,
};

const HELP: &str = "\
Play Gomoku with random moves

USAGE:
  gomoku_bots [OPTIONS]

OPTIONS:
  --connect IP:PORT     Server socket connection address  [default: 127.0.0.1:6969]
  --games   N           Number of games to play in a row  [default: 1]
  --seed    N           Seed for reproducible move choices

FLAGS:
  -h, --help            Print help information
";

const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 6969);

struct Args {
    addr: SocketAddr,
    games: usize,
    seed: Option<u64>,
}

/// Chooses random cells among those not known to be taken.
struct RandomBot {
    free: Vec<Coordinate>,
    rng: StdRng,
}

impl RandomBot {
    fn new(rng: StdRng) -> Self {
        Self {
            free: Coordinate::all().collect(),
            rng,
        }
    }

    /// Forget everything about the previous game.
    fn reset(&mut self) {
        self.free = Coordinate::all().collect();
    }

    fn mark_taken(&mut self, coord: Coordinate) {
        if let Some(idx) = self.free.iter().position(|&c| c == coord) {
            self.free.swap_remove(idx);
        }
    }

    fn pick(&mut self) -> Option<Coordinate> {
        if self.free.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..self.free.len());
        Some(self.free[idx])
    }

    /// Play one full game against whoever the server pairs us with.
    async fn play(&mut self, addr: &SocketAddr) -> Result<ActorOutcome, Error> {
        self.reset();
        let mut client = Client::connect(addr).await?;
        client.handshake().await?;

        let mut pending: Option<Coordinate> = None;
        loop {
            match client.recv().await? {
                event @ (ServerEvent::MoveRequested | ServerEvent::MoveRejected) => {
                    // A rejected cell is taken even if we never saw it played.
                    if let Some(coord) = pending.take().filter(|_| event == ServerEvent::MoveRejected) {
                        self.mark_taken(coord);
                    }
                    let coord = self.pick().context("no free cells left")?;
                    client.submit_move(coord).await?;
                    pending = Some(coord);
                }
                ServerEvent::TurnEnded => {
                    if let Some(coord) = pending.take() {
                        self.mark_taken(coord);
                    }
                }
                ServerEvent::OpponentMoved(coord) => self.mark_taken(coord),
                ServerEvent::WaitForTurn => {}
                ServerEvent::Won => return Ok(ActorOutcome::Won),
                ServerEvent::Lost => return Ok(ActorOutcome::Lost),
                event => bail!("unexpected server message: {event}"),
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        addr: pargs
            .opt_value_from_str("--connect")?
            .unwrap_or(SocketAddr::from(DEFAULT_ADDR)),
        games: pargs.opt_value_from_str("--games")?.unwrap_or(1),
        seed: pargs.opt_value_from_str("--seed")?,
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut bot = RandomBot::new(rng);

    let mut wins = 0;
    for game in 1..=args.games {
        match bot.play(&args.addr).await {
            Ok(outcome) => {
                if outcome == ActorOutcome::Won {
                    wins += 1;
                }
                println!("game {game}: {outcome}");
            }
            Err(e) => eprintln!("game {game}: {e:#}"),
        }
    }
    println!("won {wins} of {} game(s)", args.games);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gomoku::{constants::BOARD_SIZE, net::protocol::ProtocolRegistry, server};
    use std::sync::Arc;
    use tokio::net::TcpListener;

    fn bot(seed: u64) -> RandomBot {
        RandomBot::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_picks_only_free_cells() {
        let mut bot = bot(1);
        let keep: Coordinate = "F6".parse().unwrap();
        for coord in Coordinate::all().filter(|&c| c != keep) {
            bot.mark_taken(coord);
        }
        for _ in 0..10 {
            assert_eq!(bot.pick(), Some(keep));
        }
        bot.mark_taken(keep);
        assert_eq!(bot.pick(), None);
    }

    #[test]
    fn test_reset_frees_every_cell() {
        let mut bot = bot(2);
        bot.mark_taken("A0".parse().unwrap());
        bot.mark_taken("A0".parse().unwrap());
        assert_eq!(bot.free.len(), BOARD_SIZE * BOARD_SIZE - 1);
        bot.reset();
        assert_eq!(bot.free.len(), BOARD_SIZE * BOARD_SIZE);
    }

    #[tokio::test]
    async fn test_two_bots_finish_a_game() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(server::run(listener, Arc::new(ProtocolRegistry::new())));

        let first = tokio::spawn(async move { bot(3).play(&addr).await });
        let second = tokio::spawn(async move { bot(4).play(&addr).await });

        let first = first.await.unwrap().unwrap();
        let second = second.await.unwrap().unwrap();
        assert_ne!(first, second);
    }
}
