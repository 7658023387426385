//! Support utilities for tests, examples and benchmarks.
//!
//! Layouts are square ASCII grids, one string per row, with `*` marking a
//! mine and `.` a safe cell:
//!
//! ```
//! use minegrid_solver::testing::layout_session;
//!
//! let session = layout_session(&[
//!     "*.........",
//!     "..........",
//!     "..........",
//!     "..........",
//!     "..........",
//!     "..........",
//!     "..........",
//!     "..........",
//!     "..........",
//!     "..........",
//! ]);
//! assert_eq!(session.mine_count(), 1);
//! ```

use minegrid_core::Position;
use minegrid_game::GameSession;

/// Parses mine positions out of an ASCII layout.
///
/// # Panics
///
/// Panics if the layout is not square or contains a character other than
/// `*` and `.`.
#[must_use]
pub fn mine_positions(rows: &[&str]) -> Vec<Position> {
    let size = rows.len();
    let mut mines = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.len(), size, "layout row {y} is not {size} cells wide");
        for (x, cell) in row.chars().enumerate() {
            match cell {
                '*' => mines.push(Position::new(x, y)),
                '.' => {}
                other => panic!("unexpected layout character {other:?} at ({x}, {y})"),
            }
        }
    }
    mines
}

/// Builds an active session with the exact mine layout given.
///
/// The session is started with the mines already placed, so the usual
/// first-click safe zone does not apply.
///
/// # Panics
///
/// Panics if the layout is invalid or outside the supported grid sizes.
#[must_use]
pub fn layout_session(rows: &[&str]) -> GameSession {
    let mines = mine_positions(rows);
    let mut session = GameSession::with_seed(rows.len(), mines.len(), 0)
        .expect("layout dimensions must be valid");
    session
        .begin_with_mines(&mines)
        .expect("layout mines must be valid");
    session
}
