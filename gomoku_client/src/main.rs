//! Interactive terminal client for the Gomoku server.
//!
//! Connects, waits for an opponent, then redraws the board after every
//! announced move and reads moves from stdin.

use anyhow::{Result, bail};
use pico_args::Arguments;
use std::{
    io::{self, Write},
    net::SocketAddr,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin, stdin};

use gomoku::{Client, Coordinate, net::client::ServerEvent};
use gomoku_client::{
    board_view::BoardView,
    commands::{self, UserCommand, parse_command},
};

const HELP: &str = "\
Play Gomoku against another player

USAGE:
  gomoku_client [OPTIONS]

OPTIONS:
  --connect IP:PORT     Server socket connection address  [default: 127.0.0.1:6969]

FLAGS:
  -h, --help            Print help information
";

const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 6969);

struct Args {
    addr: SocketAddr,
}

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        addr: pargs
            .opt_value_from_str("--connect")?
            .unwrap_or(SocketAddr::from(DEFAULT_ADDR)),
    };

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let mut client = Client::connect(&args.addr).await?;
    println!("Connected to {}. Waiting for an opponent...", args.addr);

    let opponent = client.handshake().await?;
    let mut view = BoardView::new(opponent.opponent());
    println!("Game on! You play {}, your opponent plays {opponent}.", view.me());
    println!("{}", commands::HELP);

    let mut input = BufReader::new(stdin()).lines();
    let mut pending: Option<Coordinate> = None;

    loop {
        match client.recv().await? {
            event @ (ServerEvent::MoveRequested | ServerEvent::MoveRejected) => {
                if event == ServerEvent::MoveRejected {
                    println!("The server rejected that move. Try another cell.");
                } else {
                    print!("\n{view}");
                }
                let Some(coord) = read_move(&mut input, &view).await? else {
                    println!("Leaving the match.");
                    return Ok(());
                };
                client.submit_move(coord).await?;
                pending = Some(coord);
            }
            ServerEvent::TurnEnded => {
                if let Some(coord) = pending.take() {
                    view.record_own(coord)?;
                }
            }
            ServerEvent::WaitForTurn => println!("Waiting for your opponent..."),
            ServerEvent::OpponentMoved(coord) => {
                view.record_opponent(coord)?;
                println!("Your opponent played {coord}.");
            }
            ServerEvent::Won => {
                if let Some(coord) = pending.take() {
                    view.record_own(coord)?;
                }
                print!("\n{view}");
                println!("You won!");
                return Ok(());
            }
            ServerEvent::Lost => {
                print!("\n{view}");
                println!("You lost.");
                return Ok(());
            }
            event @ (ServerEvent::Connected | ServerEvent::OpponentSymbol(_) | ServerEvent::GameStarted) => {
                bail!("unexpected server message after the handshake: {event}");
            }
        }
    }
}

/// Prompt until the user names a free cell. Returns `None` if they quit or
/// stdin is closed.
async fn read_move(input: &mut Input, view: &BoardView) -> Result<Option<Coordinate>> {
    loop {
        print!("{} to move> ", view.me());
        io::stdout().flush()?;

        let Some(line) = input.next_line().await? else {
            return Ok(None);
        };
        match parse_command(&line) {
            Ok(UserCommand::Move(coord)) if view.is_free(coord) => return Ok(Some(coord)),
            Ok(UserCommand::Move(coord)) => println!("{coord} is already taken."),
            Ok(UserCommand::Board) => print!("{view}"),
            Ok(UserCommand::Help) => println!("{}", commands::HELP),
            Ok(UserCommand::Quit) => return Ok(None),
            Err(e) => println!("{e}"),
        }
    }
}
