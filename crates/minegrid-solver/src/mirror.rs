//! Solver-side mirror of the visible board state.
//!
//! The solver never inspects hidden cells. It keeps a private copy of what a
//! player could see (visibility and revealed values) plus per-cell caches of
//! the covered neighbors and adjacent flag counts that every deduction rule
//! consumes.

use minegrid_core::{Position, Visibility};
use minegrid_game::{GameError, GameSession};
use tinyvec::ArrayVec;

/// Cached view of one cell.
#[derive(Debug, Clone, Default)]
pub(crate) struct MirrorCell {
    /// Visibility as last pulled from the session.
    pub visibility: Visibility,
    /// Revealed value; meaningless unless `visibility` is revealed.
    pub value: u8,
    /// Neighbors that are still covered.
    pub covered: ArrayVec<[Position; 8]>,
    /// Number of flagged neighbors.
    pub flagged: u8,
}

impl MirrorCell {
    /// A revealed numbered cell with no covered neighbors left constrains
    /// nothing and is skipped by every pass.
    pub fn is_satisfied(&self) -> bool {
        self.visibility.is_revealed() && self.covered.is_empty()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MirrorGrid {
    size: usize,
    cells: Vec<MirrorCell>,
}

impl MirrorGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![MirrorCell::default(); size * size],
        }
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub fn cell(&self, pos: Position) -> &MirrorCell {
        &self.cells[pos.index(self.size)]
    }

    /// Iterates every position of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    /// Pulls the full visible state from `session` and rebuilds every cache.
    ///
    /// Question marks are a player-facing reminder with no meaning to the
    /// deduction rules, so they are cycled back to plain covered on sight.
    pub fn refresh_all(&mut self, session: &mut GameSession) -> Result<(), GameError> {
        for pos in self.positions() {
            self.pull(session, pos)?;
        }
        for pos in self.positions() {
            self.rebuild_cache(pos);
        }
        Ok(())
    }

    /// Pulls one cell and rebuilds the caches it participates in (its own
    /// and those of its neighbors).
    pub fn refresh_cell(&mut self, session: &mut GameSession, pos: Position) -> Result<(), GameError> {
        self.pull(session, pos)?;
        self.rebuild_cache(pos);
        for neighbor in pos.neighbors(self.size) {
            self.rebuild_cache(neighbor);
        }
        Ok(())
    }

    fn pull(&mut self, session: &mut GameSession, pos: Position) -> Result<(), GameError> {
        let mut visibility = session.tile_state(pos)?;
        if visibility.is_questioned() {
            session.right_click(pos)?;
            visibility = session.tile_state(pos)?;
        }
        let value = session.tile_value(pos)?;
        let cell = &mut self.cells[pos.index(self.size)];
        cell.visibility = visibility;
        cell.value = value;
        Ok(())
    }

    fn rebuild_cache(&mut self, pos: Position) {
        let covered: ArrayVec<[Position; 8]> = pos
            .neighbors(self.size)
            .filter(|&n| self.cell(n).visibility.is_covered())
            .collect();
        let flagged = pos
            .neighbors(self.size)
            .filter(|&n| self.cell(n).visibility.is_flagged())
            .count();
        let cell = &mut self.cells[pos.index(self.size)];
        cell.covered = covered;
        cell.flagged = u8::try_from(flagged).unwrap_or(u8::MAX);
    }
}
