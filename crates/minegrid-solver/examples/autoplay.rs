//! Example playing full games with the automated solver.
//!
//! Each game is opened with a click at the center of the grid, then driven
//! by logic and probability analysis, guessing whenever neither makes
//! progress.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example autoplay
//! ```
//!
//! Play a batch of games on a denser board:
//!
//! ```sh
//! cargo run --example autoplay -- --size 20 --mines 60 --games 100
//! ```
//!
//! Replay a specific board:
//!
//! ```sh
//! RUST_LOG=debug cargo run --example autoplay -- --seed 42
//! ```

use std::process;

use clap::Parser;
use minegrid_core::Position;
use minegrid_game::GameSession;
use minegrid_solver::{Solver, SolverError};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Grid side length.
    #[arg(long, value_name = "CELLS", default_value_t = 10)]
    size: usize,

    /// Number of mines.
    #[arg(long, value_name = "COUNT", default_value_t = 10)]
    mines: usize,

    /// Number of games to play.
    #[arg(long, value_name = "COUNT", default_value_t = 20)]
    games: u64,

    /// Seed of the first game; later games increment it.
    #[arg(long, value_name = "SEED", default_value_t = 0)]
    seed: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut won = 0_u64;
    for seed in args.seed..args.seed + args.games {
        match play_one(args.size, args.mines, seed) {
            Ok(is_won) => {
                println!(
                    "seed {seed}: {}",
                    if is_won { "won" } else { "lost" }
                );
                won += u64::from(is_won);
            }
            Err(err) => {
                eprintln!("seed {seed}: {err}");
                process::exit(1);
            }
        }
    }
    println!("won {won} of {} games", args.games);
}

fn play_one(size: usize, mines: usize, seed: u64) -> Result<bool, SolverError> {
    let mut session = GameSession::with_seed(size, mines, seed)?;
    let mut solver = Solver::new(&mut session)?;

    session.left_click(Position::new(size / 2, size / 2))?;
    while !session.is_done() {
        if !solver.solve_next_step(&mut session)? && !solver.guess(&mut session)? {
            break;
        }
    }
    Ok(session.is_won())
}
