//! Game session state machine for the minegrid puzzle.
//!
//! This crate wraps a [`minegrid_core::Board`] in a phase state machine and
//! exposes the only mutating operations a player (or solver) may use:
//! [`GameSession::left_click`] to reveal and [`GameSession::right_click`] to
//! cycle flags. Mine placement is deferred to the first successful reveal so
//! the opening click can never hit a mine.
//!
//! # Examples
//!
//! ```
//! use minegrid_core::Position;
//! use minegrid_game::GameSession;
//!
//! let mut session = GameSession::new(10, 10)?;
//! session.begin()?;
//! session.left_click(Position::new(5, 5))?;
//!
//! assert!(session.phase().is_active() || session.is_done());
//! # Ok::<(), minegrid_game::GameError>(())
//! ```

pub mod session;

pub use self::session::{GameError, GameSession, Phase};
