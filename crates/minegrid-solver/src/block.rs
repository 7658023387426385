//! Constraint blocks derived from revealed numbered cells.

use std::collections::HashMap;

use minegrid_core::Position;
use tinyvec::ArrayVec;

use crate::{SolverError, mirror::MirrorGrid};

/// An exact-count constraint contributed by one revealed cell: exactly
/// `required_mines` of the `members` are mines.
///
/// The required count is the cell's value minus its already-flagged
/// neighbors; the members are its still-covered neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintBlock {
    required_mines: usize,
    members: Vec<Position>,
}

impl ConstraintBlock {
    /// Returns how many of the members must be mines.
    #[must_use]
    pub const fn required_mines(&self) -> usize {
        self.required_mines
    }

    /// Returns the covered cells this constraint ranges over.
    #[must_use]
    pub fn members(&self) -> &[Position] {
        &self.members
    }

    pub(crate) fn at(mirror: &MirrorGrid, pos: Position) -> Result<Self, SolverError> {
        if !pos.in_bounds(mirror.size()) {
            return Err(SolverError::BlockGeneration { position: pos });
        }
        let cell = mirror.cell(pos);
        if !cell.visibility.is_revealed() || cell.covered.is_empty() {
            return Err(SolverError::BlockGeneration { position: pos });
        }
        Ok(Self {
            required_mines: usize::from(cell.value.saturating_sub(cell.flagged)),
            members: cell.covered.to_vec(),
        })
    }

    pub(crate) fn shrink(&mut self, member: Position, is_mine: bool) -> bool {
        self.members.retain(|&p| p != member);
        if is_mine {
            if self.required_mines == 0 {
                return false;
            }
            self.required_mines -= 1;
        }
        true
    }
}

/// All constraint blocks of the current board position, indexed by small
/// integer handles, together with the frontier they range over.
#[derive(Debug, Clone, Default)]
pub(crate) struct BlockArena {
    blocks: Vec<ConstraintBlock>,
    frontier: Vec<Position>,
    frontier_index: HashMap<Position, usize>,
    membership: HashMap<Position, ArrayVec<[usize; 8]>>,
}

impl BlockArena {
    /// Collects a block from every revealed cell that still has covered
    /// neighbors and a consistent flag count. Cells whose flagged neighbors
    /// already exceed their value are treated as satisfied and skipped.
    pub fn build(mirror: &MirrorGrid) -> Self {
        let mut arena = Self::default();
        for pos in mirror.positions() {
            let cell = mirror.cell(pos);
            if !cell.visibility.is_revealed()
                || cell.covered.is_empty()
                || cell.flagged > cell.value
            {
                continue;
            }
            let handle = arena.blocks.len();
            let block = ConstraintBlock {
                required_mines: usize::from(cell.value - cell.flagged),
                members: cell.covered.to_vec(),
            };
            for &member in &block.members {
                arena.membership.entry(member).or_default().push(handle);
                if !arena.frontier_index.contains_key(&member) {
                    arena.frontier_index.insert(member, arena.frontier.len());
                    arena.frontier.push(member);
                }
            }
            arena.blocks.push(block);
        }
        arena
    }

    pub fn blocks(&self) -> &[ConstraintBlock] {
        &self.blocks
    }

    pub fn frontier(&self) -> &[Position] {
        &self.frontier
    }

    pub fn frontier_index(&self, pos: Position) -> usize {
        self.frontier_index[&pos]
    }

    /// Handles of every block containing `pos` as a member.
    pub fn blocks_containing(&self, pos: Position) -> &[usize] {
        self.membership.get(&pos).map_or(&[], |handles| handles.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
