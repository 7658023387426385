//! The phase state machine driving a single game of minegrid.

use minegrid_core::{Board, BoardError, Position, Visibility};
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

/// Smallest supported grid side length.
pub const MIN_SIZE: usize = 10;
/// Largest supported grid side length.
pub const MAX_SIZE: usize = 100;

/// Errors reported by [`GameSession`] operations.
///
/// All variants are recoverable; operations validate their inputs before
/// mutating and leave the session unchanged on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// Grid side length outside the supported `10..=100` range.
    #[display("grid size {size} is outside the supported range {MIN_SIZE}-{MAX_SIZE}")]
    Size {
        /// The rejected side length.
        size: usize,
    },
    /// Mine count of zero, or more mines than the grid can hold while
    /// keeping the first-click 3x3 zone clear.
    #[display("mine count {mines} is invalid (must be between 1 and {capacity})")]
    MineCapacity {
        /// The rejected mine count.
        mines: usize,
        /// Maximum mines the current grid can hold.
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
    /// A fixed mine layout was rejected by the board.
    #[display("invalid mine layout: {_0}")]
    Layout(BoardError),
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::MineCapacity {
                mines, capacity, ..
            } => Self::MineCapacity { mines, capacity },
            BoardError::OutOfBounds { x, y, size } => Self::OutOfBounds { x, y, size },
            BoardError::DuplicateMine { .. } => Self::Layout(err),
        }
    }
}

/// Lifecycle phase of a session.
///
/// Strictly forward-only (`NotStarted -> Active -> Lost | Won`) except for
/// the explicit [`GameSession::reset`]. Terminal phases are reached only
/// through reveal transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Phase {
    /// Configured but not yet begun; size and mine count may change.
    NotStarted,
    /// Accepting clicks.
    Active,
    /// A mine was revealed.
    Lost,
    /// Every safe cell was revealed, or every mine was flagged.
    Won,
}

/// A single game of minegrid.
///
/// Wraps a [`Board`] and enforces the phase rules: configuration only while
/// not started, clicks only while active, and automatic end-of-game sweeps
/// (mines exposed on loss, mines flagged on win).
///
/// Mines are not placed at construction. The first successful
/// [`GameSession::left_click`] populates the board with the clicked cell's
/// 3x3 neighborhood excluded, so the opening reveal always lands on a blank
/// and floods.
///
/// # Examples
///
/// ```
/// use minegrid_core::Position;
/// use minegrid_game::GameSession;
///
/// let mut session = GameSession::with_seed(10, 10, 42)?;
/// session.begin()?;
/// session.left_click(Position::new(5, 5))?;
///
/// // The opening click is never a mine.
/// assert!(!session.phase().is_lost());
/// # Ok::<(), minegrid_game::GameError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    phase: Phase,
    first_move_done: bool,
    rng: Pcg64Mcg,
}

impl GameSession {
    /// Creates a session with an entropy-seeded placement RNG.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Size`] or [`GameError::MineCapacity`] for an
    /// invalid configuration.
    pub fn new(size: usize, mines: usize) -> Result<Self, GameError> {
        Self::with_rng(size, mines, Pcg64Mcg::from_rng(&mut rand::rng()))
    }

    /// Creates a session whose mine placement is fully determined by `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Size`] or [`GameError::MineCapacity`] for an
    /// invalid configuration.
    pub fn with_seed(size: usize, mines: usize, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(size, mines, Pcg64Mcg::seed_from_u64(seed))
    }

    fn with_rng(size: usize, mines: usize, rng: Pcg64Mcg) -> Result<Self, GameError> {
        validate_size(size)?;
        validate_mines(mines, size)?;
        Ok(Self {
            board: Board::new(size, mines),
            phase: Phase::NotStarted,
            first_move_done: false,
            rng,
        })
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the grid side length.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.board.size()
    }

    /// Returns the configured number of mines.
    #[must_use]
    pub const fn mine_count(&self) -> usize {
        self.board.mine_count()
    }

    /// Returns the number of flags currently placed.
    #[must_use]
    pub const fn flags_placed(&self) -> usize {
        self.board.flags_placed()
    }

    /// Returns the mine count minus the placed flags, saturating at zero.
    #[must_use]
    pub const fn mines_remaining(&self) -> usize {
        self.board.mine_count().saturating_sub(self.board.flags_placed())
    }

    /// Returns `true` once the session has reached a terminal phase.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Lost | Phase::Won)
    }

    /// Returns `true` if the session ended in a win.
    #[must_use]
    pub const fn is_won(&self) -> bool {
        matches!(self.phase, Phase::Won)
    }

    /// Returns the visibility of the cell at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] if `pos` is outside the grid.
    pub fn tile_state(&self, pos: Position) -> Result<Visibility, GameError> {
        Ok(self.board.visibility(pos)?)
    }

    /// Returns the numeric value of the cell at `pos` if it is revealed, and
    /// a neutral 0 otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] if `pos` is outside the grid.
    pub fn tile_value(&self, pos: Position) -> Result<u8, GameError> {
        if self.board.visibility(pos)?.is_revealed() {
            Ok(self.board.value(pos)?)
        } else {
            Ok(0)
        }
    }

    /// Reconfigures the grid side length.
    ///
    /// Honored only while the session is [`Phase::NotStarted`]; in any other
    /// phase a valid size is silently ignored. Changing the size reallocates
    /// the grid and implicitly resets it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Size`] if `size` is outside `10..=100`.
    pub fn set_size(&mut self, size: usize) -> Result<(), GameError> {
        validate_size(size)?;
        if self.phase.is_not_started() {
            self.board.resize(size);
            self.first_move_done = false;
        }
        Ok(())
    }

    /// Reconfigures the mine count.
    ///
    /// Honored only while the session is [`Phase::NotStarted`]; in any other
    /// phase a valid count is silently ignored. The capacity bound is
    /// re-checked against the grid when the session begins.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::MineCapacity`] if `mines` is zero.
    pub fn set_mines(&mut self, mines: usize) -> Result<(), GameError> {
        if mines == 0 {
            return Err(GameError::MineCapacity {
                mines,
                capacity: self.board.capacity(),
            });
        }
        if self.phase.is_not_started() {
            self.board.set_mine_count(mines);
        }
        Ok(())
    }

    /// Starts the game: `NotStarted -> Active`.
    ///
    /// No mines exist yet at this point; placement happens on the first
    /// click. Calling `begin` on a session that is not `NotStarted` is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::MineCapacity`] if the configured mine count does
    /// not fit the grid.
    pub fn begin(&mut self) -> Result<(), GameError> {
        if !self.phase.is_not_started() {
            return Ok(());
        }
        validate_mines(self.board.mine_count(), self.board.size())?;
        self.phase = Phase::Active;
        Ok(())
    }

    /// Restarts the session as active with mines placed at the exact given
    /// positions, skipping the usual first-click placement.
    ///
    /// Intended for tools and tests that need a reproducible layout.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::MineCapacity`] for an empty layout,
    /// [`GameError::OutOfBounds`] or [`GameError::Layout`] for an invalid
    /// one.
    pub fn begin_with_mines(&mut self, mines: &[Position]) -> Result<(), GameError> {
        if mines.is_empty() {
            return Err(GameError::MineCapacity {
                mines: 0,
                capacity: self.board.capacity(),
            });
        }
        self.board.place_mines(mines)?;
        self.first_move_done = true;
        self.phase = Phase::Active;
        Ok(())
    }

    /// Returns the session to [`Phase::NotStarted`] and clears the board.
    pub fn reset(&mut self) {
        self.board.clear();
        self.first_move_done = false;
        self.phase = Phase::NotStarted;
    }

    /// Reveals the cell at `pos`.
    ///
    /// A no-op unless the session is active and the target cell is covered.
    /// The first successful click places the mines with the clicked cell's
    /// 3x3 neighborhood excluded. Revealing a mine loses the game and
    /// exposes the remaining mines; revealing the last safe cell (or having
    /// every mine flagged) wins it and flags the mines.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] if `pos` is outside the grid, in
    /// any phase.
    pub fn left_click(&mut self, pos: Position) -> Result<(), GameError> {
        let visibility = self.board.visibility(pos)?;
        if !self.phase.is_active() || !visibility.is_covered() {
            return Ok(());
        }

        if !self.first_move_done {
            self.board.populate(&mut self.rng, pos)?;
            self.first_move_done = true;
        }

        self.board.reveal(pos)?;

        if self.board.is_mine(pos)? {
            self.phase = Phase::Lost;
            self.board.reveal_mines();
        } else if self.board.check_win() {
            self.phase = Phase::Won;
            self.board.flag_all_mines();
        }
        Ok(())
    }

    /// Cycles the flag state of the cell at `pos`
    /// (`Covered -> Flagged -> Questioned -> Covered`).
    ///
    /// A no-op unless the session is active and the target cell is not
    /// revealed.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] if `pos` is outside the grid, in
    /// any phase.
    pub fn right_click(&mut self, pos: Position) -> Result<(), GameError> {
        let visibility = self.board.visibility(pos)?;
        if !self.phase.is_active() || visibility.is_revealed() {
            return Ok(());
        }
        self.board.toggle_flag(pos)?;
        Ok(())
    }
}

fn validate_size(size: usize) -> Result<(), GameError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(GameError::Size { size })
    }
}

fn validate_mines(mines: usize, size: usize) -> Result<(), GameError> {
    let capacity = (size * size).saturating_sub(9);
    if mines == 0 || mines > capacity {
        return Err(GameError::MineCapacity { mines, capacity });
    }
    Ok(())
}
