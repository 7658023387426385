//! Automated solver for minegrid sessions.
//!
//! The solver plays through the same interface a human has: it reads the
//! visible board, reveals cells with left clicks and flags them with right
//! clicks. Two layers of reasoning are applied in order:
//!
//! 1. **Logic**: the two deterministic neighborhood rules (all mines
//!    flagged, or all covered cells needed), propagated breadth-first
//!    across the grid by [`Solver::logic_wave`].
//! 2. **Probability**: exhaustive enumeration of every mine arrangement
//!    consistent with the visible numbers and the remaining mine budget,
//!    acting on cells that are certainly safe or certainly mined and
//!    exposing per-cell probabilities for [`Solver::guess`].
//!
//! # Examples
//!
//! ```
//! use minegrid_core::Position;
//! use minegrid_game::GameSession;
//! use minegrid_solver::Solver;
//!
//! let mut session = GameSession::with_seed(10, 10, 42)?;
//! let mut solver = Solver::new(&mut session)?;
//!
//! // Open the board, then let logic and probability run their course.
//! session.left_click(Position::new(5, 5))?;
//! while !session.is_done() {
//!     if !solver.solve_next_step(&mut session)? && !solver.guess(&mut session)? {
//!         break;
//!     }
//! }
//! # Ok::<(), minegrid_solver::SolverError>(())
//! ```

mod block;
mod combinations;
mod mirror;
mod solver;
pub mod testing;

pub use self::{
    block::ConstraintBlock,
    solver::{FrontierProbabilities, Solver, SolverError},
};
