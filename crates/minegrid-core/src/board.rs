//! The square mine grid: placement, reveal transitions, and win detection.

use std::collections::VecDeque;

use rand::{Rng, RngExt as _};

use crate::{
    cell::{Cell, CellContent, Visibility},
    position::Position,
};

/// Number of cells reserved mine-free around the first click.
const SAFE_ZONE_CELLS: usize = 9;

/// Errors reported by [`Board`] operations.
///
/// All variants are local, recoverable conditions; the board is left
/// unchanged when an operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// The requested mine count does not fit the grid.
    #[display("cannot place {mines} mines on a {size}x{size} grid (capacity {capacity})")]
    MineCapacity {
        /// Requested number of mines.
        mines: usize,
        /// Grid side length.
        size: usize,
        /// Maximum mines the grid can hold.
        capacity: usize,
    },
    /// A coordinate fell outside the grid.
    #[display("position ({x}, {y}) is outside the {size}x{size} grid")]
    OutOfBounds {
        /// Horizontal coordinate.
        x: usize,
        /// Vertical coordinate.
        y: usize,
        /// Grid side length.
        size: usize,
    },
    /// The same position was given twice to [`Board::place_mines`].
    #[display("duplicate mine position ({x}, {y})")]
    DuplicateMine {
        /// Horizontal coordinate.
        x: usize,
        /// Vertical coordinate.
        y: usize,
    },
}

/// A `size` x `size` grid of [`Cell`]s.
///
/// The board owns the grid exclusively and exposes the reveal/flag
/// transitions a game session drives. Mine placement is deferred: a freshly
/// created or cleared board has no mines until [`Board::populate`] (or
/// [`Board::place_mines`]) runs, which lets the first reveal exclude its own
/// 3x3 neighborhood.
///
/// # Examples
///
/// ```
/// use minegrid_core::{Board, Position};
///
/// let mut board = Board::new(10, 10);
/// assert!(!board.is_populated());
///
/// board.populate(&mut rand::rng(), Position::new(4, 4)).unwrap();
/// assert!(board.is_populated());
/// board.reveal(Position::new(4, 4)).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    mine_count: usize,
    cells: Vec<Cell>,
    flags_placed: usize,
    populated: bool,
}

impl Board {
    /// Creates an empty, unpopulated board.
    #[must_use]
    pub fn new(size: usize, mine_count: usize) -> Self {
        Self {
            size,
            mine_count,
            cells: vec![Cell::new(); size * size],
            flags_placed: 0,
            populated: false,
        }
    }

    /// Returns the side length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the configured number of mines.
    #[must_use]
    pub const fn mine_count(&self) -> usize {
        self.mine_count
    }

    /// Returns the number of flags currently placed.
    #[must_use]
    pub const fn flags_placed(&self) -> usize {
        self.flags_placed
    }

    /// Returns `true` once mines have been placed.
    #[must_use]
    pub const fn is_populated(&self) -> bool {
        self.populated
    }

    /// Returns the maximum number of mines this grid can hold while keeping
    /// the first-click 3x3 zone mine-free.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        (self.size * self.size).saturating_sub(SAFE_ZONE_CELLS)
    }

    /// Sets the mine count for the next population. Validation against the
    /// grid capacity happens when mines are placed.
    pub fn set_mine_count(&mut self, mines: usize) {
        self.mine_count = mines;
    }

    /// Reallocates the grid to a new side length and clears it.
    pub fn resize(&mut self, size: usize) {
        self.size = size;
        self.cells = vec![Cell::new(); size * size];
        self.flags_placed = 0;
        self.populated = false;
    }

    /// Clears every cell back to covered blank and forgets the placement.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::new());
        self.flags_placed = 0;
        self.populated = false;
    }

    fn ensure_in_bounds(&self, pos: Position) -> Result<(), BoardError> {
        if pos.in_bounds(self.size) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                x: pos.x(),
                y: pos.y(),
                size: self.size,
            })
        }
    }

    /// Returns the cell at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `pos` is outside the grid.
    pub fn cell(&self, pos: Position) -> Result<&Cell, BoardError> {
        self.ensure_in_bounds(pos)?;
        Ok(&self.cells[pos.index(self.size)])
    }

    /// Returns the visibility of the cell at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `pos` is outside the grid.
    pub fn visibility(&self, pos: Position) -> Result<Visibility, BoardError> {
        Ok(self.cell(pos)?.visibility())
    }

    /// Returns the numeric value of the cell at `pos` (0 for blanks and
    /// mines), regardless of visibility. Callers gating on visibility should
    /// check [`Board::visibility`] first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `pos` is outside the grid.
    pub fn value(&self, pos: Position) -> Result<u8, BoardError> {
        Ok(self.cell(pos)?.content().value())
    }

    /// Returns `true` if the cell at `pos` holds a mine.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `pos` is outside the grid.
    pub fn is_mine(&self, pos: Position) -> Result<bool, BoardError> {
        Ok(self.cell(pos)?.content().is_mine())
    }

    /// Clears the grid and places exactly `mine_count` mines uniformly at
    /// random, excluding the 3x3 block centered on `exclude`.
    ///
    /// Every non-mine cell's content is recomputed to its adjacent-mine
    /// count afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `exclude` is outside the grid,
    /// or [`BoardError::MineCapacity`] if the mine count exceeds
    /// `size * size - 9`.
    pub fn populate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        exclude: Position,
    ) -> Result<(), BoardError> {
        self.ensure_in_bounds(exclude)?;
        if self.mine_count > self.capacity() {
            return Err(BoardError::MineCapacity {
                mines: self.mine_count,
                size: self.size,
                capacity: self.capacity(),
            });
        }

        self.clear();

        let mut placed = 0;
        while placed < self.mine_count {
            let pos = Position::new(
                rng.random_range(0..self.size),
                rng.random_range(0..self.size),
            );
            if pos.in_safe_zone(exclude) {
                continue;
            }
            let cell = &mut self.cells[pos.index(self.size)];
            if cell.content.is_mine() {
                continue;
            }
            cell.content = CellContent::Mine;
            placed += 1;
        }

        self.recount_numbers();
        self.populated = true;
        Ok(())
    }

    /// Clears the grid and places mines at the exact given positions,
    /// adopting `mines.len()` as the new mine count.
    ///
    /// Intended for tools and tests that need a fixed layout; the first-click
    /// exclusion zone is not enforced here.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] for a position outside the grid or
    /// [`BoardError::DuplicateMine`] for a repeated position. The board is
    /// unchanged on failure.
    pub fn place_mines(&mut self, mines: &[Position]) -> Result<(), BoardError> {
        for (i, &pos) in mines.iter().enumerate() {
            self.ensure_in_bounds(pos)?;
            if mines[..i].contains(&pos) {
                return Err(BoardError::DuplicateMine {
                    x: pos.x(),
                    y: pos.y(),
                });
            }
        }

        self.clear();
        self.mine_count = mines.len();
        for &pos in mines {
            self.cells[pos.index(self.size)].content = CellContent::Mine;
        }
        self.recount_numbers();
        self.populated = true;
        Ok(())
    }

    fn recount_numbers(&mut self) {
        for y in 0..self.size {
            for x in 0..self.size {
                let pos = Position::new(x, y);
                if self.cells[pos.index(self.size)].content.is_mine() {
                    continue;
                }
                let count = pos
                    .neighbors(self.size)
                    .filter(|n| self.cells[n.index(self.size)].content.is_mine())
                    .count();
                #[expect(clippy::cast_possible_truncation, reason = "neighbor count is at most 8")]
                let count = count as u8;
                self.cells[pos.index(self.size)].content = CellContent::from_adjacent_mines(count);
            }
        }
    }

    /// Reveals the cell at `pos`.
    ///
    /// Revealed cells and flagged cells are left untouched (a flag must be
    /// cycled off first). Revealing a blank cell triggers a flood reveal of
    /// the connected blank region and its numbered border.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `pos` is outside the grid.
    pub fn reveal(&mut self, pos: Position) -> Result<(), BoardError> {
        self.ensure_in_bounds(pos)?;
        let cell = &mut self.cells[pos.index(self.size)];
        match cell.visibility {
            Visibility::Revealed | Visibility::Flagged => return Ok(()),
            Visibility::Covered | Visibility::Questioned => {}
        }
        if cell.content.is_blank() {
            self.flood_reveal(pos);
        } else {
            cell.visibility = Visibility::Revealed;
        }
        Ok(())
    }

    /// Breadth-first expansion from a blank cell.
    ///
    /// Every connected blank cell is revealed, along with every cell adjacent
    /// to the revealed blank region; the expansion does not continue past
    /// non-blank cells. Uses an explicit worklist so deep cascades on large
    /// boards cannot overflow the stack. Flagged cells swept into the reveal
    /// give their flag back to the counter.
    fn flood_reveal(&mut self, start: Position) {
        let mut worklist = VecDeque::from([start]);
        while let Some(pos) = worklist.pop_front() {
            let cell = &mut self.cells[pos.index(self.size)];
            if cell.visibility.is_revealed() {
                continue;
            }
            if cell.visibility.is_flagged() {
                self.flags_placed -= 1;
            }
            cell.visibility = Visibility::Revealed;
            if self.cells[pos.index(self.size)].content.is_blank() {
                for neighbor in pos.neighbors(self.size) {
                    if !self.cells[neighbor.index(self.size)].visibility.is_revealed() {
                        worklist.push_back(neighbor);
                    }
                }
            }
        }
    }

    /// Cycles the flag state of the cell at `pos`:
    /// `Covered -> Flagged -> Questioned -> Covered`. No-op on revealed
    /// cells. The flag counter changes only on the covered/flagged edges.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `pos` is outside the grid.
    pub fn toggle_flag(&mut self, pos: Position) -> Result<(), BoardError> {
        self.ensure_in_bounds(pos)?;
        let cell = &mut self.cells[pos.index(self.size)];
        cell.visibility = match cell.visibility {
            Visibility::Covered => {
                self.flags_placed += 1;
                Visibility::Flagged
            }
            Visibility::Flagged => {
                self.flags_placed -= 1;
                Visibility::Questioned
            }
            Visibility::Questioned => Visibility::Covered,
            Visibility::Revealed => return Ok(()),
        };
        Ok(())
    }

    /// Returns `true` if the game is won: every non-mine cell revealed, or
    /// every mine cell flagged. Either condition alone is sufficient.
    ///
    /// Always `false` before the board is populated.
    #[must_use]
    pub fn check_win(&self) -> bool {
        if !self.populated {
            return false;
        }
        let mut all_revealed = true;
        let mut all_flagged = true;
        for cell in &self.cells {
            if cell.content.is_mine() {
                if !cell.visibility.is_flagged() {
                    all_flagged = false;
                }
            } else if !cell.visibility.is_revealed() {
                all_revealed = false;
            }
            if !all_revealed && !all_flagged {
                return false;
            }
        }
        all_revealed || all_flagged
    }

    /// Exposes every unflagged mine. Called on loss.
    pub fn reveal_mines(&mut self) {
        for cell in &mut self.cells {
            if cell.content.is_mine() && !cell.visibility.is_flagged() {
                cell.visibility = Visibility::Revealed;
            }
        }
    }

    /// Flags every mine and drops stale question marks. Called on win.
    pub fn flag_all_mines(&mut self) {
        for cell in &mut self.cells {
            if cell.content.is_mine() {
                cell.visibility = Visibility::Flagged;
            } else if cell.visibility.is_questioned() {
                cell.visibility = Visibility::Covered;
            }
        }
        self.flags_placed = self
            .cells
            .iter()
            .filter(|cell| cell.visibility.is_flagged())
            .count();
    }
}
