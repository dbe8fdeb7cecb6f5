//! Go-Rules command line.
//!
//! ## Usage
//!
//! - `go-rules` - Play a random demo game
//! - `go-rules gtp` - Start a GTP server for GUI integration
//! - `go-rules demo` - Play a random demo game
//! - `go-rules replay W:D4 B:C3 W:pass ...` - Apply moves and print the board
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use go_rules::constants::DEFAULT_BOARD_SIZE;
use go_rules::game::GameState;
use go_rules::gtp::GtpEngine;
use go_rules::playout::random_game;
use go_rules::position::{Move, Player, parse_move};

/// Go-Rules: a rules engine for the game of Go
#[derive(Parser)]
#[command(name = "go-rules")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board size (NxN)
    #[arg(short, long, global = true, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp {
        /// Seed for generated moves
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play a random game and print the final board
    Demo {
        /// Seed for the random game
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Apply a sequence of moves such as `W:D4 B:C3 W:pass` and print the board
    Replay {
        /// Moves as `<color>:<vertex|pass>`
        #[arg(required = true)]
        moves: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Gtp { seed }) => {
            let mut engine = GtpEngine::new(cli.size, rng(seed))?;
            engine.run().context("GTP session failed")?;
        }
        Some(Commands::Replay { moves }) => run_replay(cli.size, &moves)?,
        Some(Commands::Demo { seed }) => run_demo(cli.size, seed)?,
        None => run_demo(cli.size, None)?,
    }
    Ok(())
}

fn rng(seed: Option<u64>) -> fastrand::Rng {
    match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    }
}

fn run_demo(size: usize, seed: Option<u64>) -> anyhow::Result<()> {
    println!("Go-Rules: random game on {size}x{size}\n");
    let game = random_game(size, &mut rng(seed))?;
    info!(ended = game.ended(), "demo finished");
    println!("{game}");
    let stones = game.groups().groups().iter().map(|g| g.len()).sum::<usize>();
    println!("Stones on board: {stones}");
    Ok(())
}

fn run_replay(size: usize, moves: &[String]) -> anyhow::Result<()> {
    let moves = moves
        .iter()
        .map(|text| parse_replay_move(text, size))
        .collect::<anyhow::Result<Vec<Move>>>()?;

    let game = GameState::new(size)?
        .play_moves(moves)
        .context("replay stopped")?;

    print!("{game}");
    if game.ended() {
        println!("Game over");
    } else {
        println!("{} to play", game.current_player());
    }
    Ok(())
}

fn parse_replay_move(text: &str, size: usize) -> anyhow::Result<Move> {
    let (color, vertex) = text
        .split_once(':')
        .with_context(|| format!("expected <color>:<vertex>, got {text:?}"))?;
    let player: Player = color.parse()?;
    Ok(parse_move(player, vertex, size)?)
}
