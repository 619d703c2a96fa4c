//! Pentago-MCTS command line.
//!
//! - `pentago-mcts demo` - one searched move on the empty board
//! - `pentago-mcts selfplay` - a full engine-vs-engine game

use anyhow::Context;
use clap::{Parser, Subcommand};

use pentago_mcts::board::Board;
use pentago_mcts::constants::{DEFAULT_SEED, N};
use pentago_mcts::player::MonteCarloPlayer;
use pentago_mcts::position::{Outcome, Player, Position};

/// Pentago-MCTS: a Monte Carlo Tree Search Pentago player
#[derive(Parser)]
#[command(name = "pentago-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a full game, engine against engine
    Selfplay {
        /// Time allowance per move in milliseconds
        #[arg(long, default_value_t = 200)]
        time_ms: u64,
        /// Random seed for the white player (black gets seed + 1)
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Search one move on the empty board and show it
    Demo,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Selfplay { time_ms, seed }) => run_selfplay(time_ms, seed),
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn run_demo() -> anyhow::Result<()> {
    let mut board = Board::new(N);
    let mut player = MonteCarloPlayer::new();

    println!("Searching the opening move (500 ms)...");
    let mv = player
        .choose_move(&board, Player::White, 500)
        .context("choosing opening move")?;
    println!(
        "{mv} ({} simulations, {:.1}% win rate)",
        player.simulations(),
        player.win_rate() * 100.0
    );

    board.apply(mv, Player::White);
    println!("{board}");
    Ok(())
}

fn run_selfplay(time_ms: u64, seed: u64) -> anyhow::Result<()> {
    let mut board = Board::new(N);
    let mut white = MonteCarloPlayer::with_seed(seed);
    let mut black = MonteCarloPlayer::with_seed(seed.wrapping_add(1));
    let mut to_move = Player::White;

    loop {
        let pos = Position::from_view(&board).context("snapshotting the board")?;
        match pos.winner(to_move) {
            Outcome::Undecided => {}
            Outcome::Draw => {
                println!("Draw.");
                break;
            }
            Outcome::Won(winner) => {
                println!("{winner:?} wins.");
                break;
            }
        }

        let player = match to_move {
            Player::White => &mut white,
            Player::Black => &mut black,
        };
        let mv = player
            .choose_move(&board, to_move, time_ms)
            .context("choosing move")?;
        anyhow::ensure!(board.apply(mv, to_move), "engine returned illegal move {mv}");

        println!(
            "{to_move:?}: {mv} ({} simulations, {:.1}% win rate)",
            player.simulations(),
            player.win_rate() * 100.0
        );
        println!("{board}");
        to_move = to_move.opponent();
    }
    Ok(())
}
