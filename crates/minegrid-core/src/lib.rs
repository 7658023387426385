//! Core data structures for the minegrid puzzle engine.
//!
//! This crate provides the board-level building blocks used by the game state
//! machine and the solver:
//!
//! - [`position`]: zero-based `(x, y)` grid coordinates and neighborhood
//!   iteration
//! - [`cell`]: a single grid cell, split into immutable content (blank,
//!   number, mine) and player-facing visibility (covered, flagged,
//!   questioned, revealed)
//! - [`board`]: the square grid itself — mine placement, adjacency counting,
//!   flood reveal, and win detection
//!
//! Higher-level concerns (the turn state machine, click handling, solving)
//! live in the `minegrid-game` and `minegrid-solver` crates.
//!
//! # Examples
//!
//! ```
//! use minegrid_core::{Board, Position, Visibility};
//!
//! let mut board = Board::new(10, 10);
//! board.populate(&mut rand::rng(), Position::new(5, 5)).unwrap();
//!
//! // The 3x3 zone around the excluded origin is always mine-free.
//! board.reveal(Position::new(5, 5)).unwrap();
//! assert_eq!(board.visibility(Position::new(5, 5)).unwrap(), Visibility::Revealed);
//! ```

pub mod board;
pub mod cell;
pub mod position;

pub use self::{
    board::{Board, BoardError},
    cell::{Cell, CellContent, Visibility},
    position::Position,
};
