//! Deduction passes and the solving entry points.

use minegrid_core::Position;
use minegrid_game::{GameError, GameSession};
use std::collections::VecDeque;

use crate::{
    block::{BlockArena, ConstraintBlock},
    combinations::Combinations,
    mirror::MirrorGrid,
};

/// Errors reported by [`Solver`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SolverError {
    /// A constraint block was requested at a cell that contributes no
    /// constraint (covered, flagged, or already satisfied).
    #[display("cell {position} does not constrain any covered neighbor")]
    BlockGeneration {
        /// The offending cell.
        position: Position,
    },
    /// The session handed to a solver call is not the one the solver was
    /// built for.
    #[display(
        "session does not match the solver's game ({expected_size}x{expected_size} grid, {expected_mines} mines)"
    )]
    SessionMismatch {
        /// Grid side length the solver was built against.
        expected_size: usize,
        /// Mine count the solver was built against.
        expected_mines: usize,
    },
    /// The underlying session rejected an operation.
    #[display("game error: {_0}")]
    Game(#[from] GameError),
}

/// Mine probabilities for the current frontier, as measured over every
/// mine arrangement consistent with the visible numbers and the remaining
/// mine budget.
///
/// Returned by [`Solver::probabilities`]. An empty frontier, or one with no
/// consistent arrangement at all (possible when the player has placed wrong
/// flags), carries no usable data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierProbabilities {
    cells: Vec<Position>,
    mine_counts: Vec<usize>,
    valid_assignments: usize,
}

impl FrontierProbabilities {
    /// Returns `true` if no probability data is available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() || self.valid_assignments == 0
    }

    /// Returns the number of frontier cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns the frontier cells, in discovery order.
    #[must_use]
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Returns how many mine arrangements were consistent.
    #[must_use]
    pub const fn valid_assignments(&self) -> usize {
        self.valid_assignments
    }

    /// Returns the mine probability of the `index`-th frontier cell.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or no arrangement was consistent.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn probability(&self, index: usize) -> f64 {
        assert!(self.valid_assignments > 0);
        self.mine_counts[index] as f64 / self.valid_assignments as f64
    }

    /// Returns the mine probability of `pos`, or `None` if it is not part
    /// of the frontier.
    #[must_use]
    pub fn probability_at(&self, pos: Position) -> Option<f64> {
        let index = self.cells.iter().position(|&p| p == pos)?;
        Some(self.probability(index))
    }

    /// Iterates `(cell, mine probability)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Position, f64)> + '_ {
        (0..self.cells.len()).map(|i| (self.cells[i], self.probability(i)))
    }

    const fn empty() -> Self {
        Self {
            cells: Vec::new(),
            mine_counts: Vec::new(),
            valid_assignments: 0,
        }
    }
}

/// An automated player bound to one game.
///
/// The solver only ever acts through the same two operations a human has,
/// [`GameSession::left_click`] and [`GameSession::right_click`], and only
/// ever reads the visible state. It is constructed against a session and
/// rejects any session whose shape differs from that one.
///
/// # Examples
///
/// ```
/// use minegrid_core::Position;
/// use minegrid_game::GameSession;
/// use minegrid_solver::Solver;
///
/// let mut session = GameSession::with_seed(10, 10, 42)?;
/// let mut solver = Solver::new(&mut session)?;
/// session.left_click(Position::new(5, 5))?;
///
/// while solver.solve_next_step(&mut session)? {}
/// # Ok::<(), minegrid_solver::SolverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    size: usize,
    mine_count: usize,
    mirror: MirrorGrid,
}

impl Solver {
    /// Binds a solver to `session`, beginning the game if it has not been
    /// begun yet.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Game`] if the session's configuration cannot
    /// begin.
    pub fn new(session: &mut GameSession) -> Result<Self, SolverError> {
        session.begin()?;
        let mut solver = Self {
            size: session.size(),
            mine_count: session.mine_count(),
            mirror: MirrorGrid::new(session.size()),
        };
        solver.mirror.refresh_all(session)?;
        Ok(solver)
    }

    /// Performs the next solving step: a logic wave from the center of the
    /// grid, falling back to probability analysis when logic is exhausted.
    ///
    /// Returns `true` if any cell was revealed or flagged.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::SessionMismatch`] if `session` is not the
    /// solver's game.
    pub fn solve_next_step(&mut self, session: &mut GameSession) -> Result<bool, SolverError> {
        self.check_session(session)?;
        self.mirror.refresh_all(session)?;
        let hint = Position::new(self.size / 2, self.size / 2);
        if self.logic_wave_inner(session, hint)? {
            log::debug!("logic wave made progress");
            return Ok(true);
        }
        self.probability_pass(session)
    }

    /// Applies the two deterministic deduction rules outward from `hint`,
    /// breadth-first across the whole grid.
    ///
    /// Returns `true` if any cell was revealed or flagged.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::SessionMismatch`] if `session` is not the
    /// solver's game, or [`SolverError::Game`] if `hint` is out of bounds.
    pub fn logic_wave(
        &mut self,
        session: &mut GameSession,
        hint: Position,
    ) -> Result<bool, SolverError> {
        self.check_session(session)?;
        self.mirror.refresh_all(session)?;
        self.logic_wave_inner(session, hint)
    }

    /// Applies the two deterministic deduction rules to every cell in
    /// row-major order.
    ///
    /// Reaches the same conclusions as [`Solver::logic_wave`]; the order of
    /// the individual actions differs.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::SessionMismatch`] if `session` is not the
    /// solver's game.
    pub fn logic_scan(&mut self, session: &mut GameSession) -> Result<bool, SolverError> {
        self.check_session(session)?;
        self.mirror.refresh_all(session)?;
        let mut acted = false;
        for pos in self.mirror.positions() {
            acted |= self.apply_deduction(session, pos)?;
        }
        Ok(acted)
    }

    /// Computes mine probabilities for the current frontier.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::SessionMismatch`] if `session` is not the
    /// solver's game.
    pub fn probabilities(
        &mut self,
        session: &mut GameSession,
    ) -> Result<FrontierProbabilities, SolverError> {
        self.check_session(session)?;
        self.mirror.refresh_all(session)?;
        Ok(self.frontier_probabilities(session))
    }

    /// Acts on the single most confident frontier cell, flagging it when its
    /// mine probability is above one half and revealing it otherwise.
    ///
    /// Returns `false` if there is no frontier to guess on.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::SessionMismatch`] if `session` is not the
    /// solver's game.
    pub fn guess(&mut self, session: &mut GameSession) -> Result<bool, SolverError> {
        self.check_session(session)?;
        self.mirror.refresh_all(session)?;
        let stats = self.frontier_probabilities(session);
        if stats.is_empty() {
            return Ok(false);
        }

        let confidence = |p: f64| p.max(1.0 - p);
        let Some((best, probability)) = stats
            .iter()
            .max_by(|(_, a), (_, b)| confidence(*a).total_cmp(&confidence(*b)))
        else {
            return Ok(false);
        };

        log::debug!("guessing {best} with mine probability {probability:.3}");
        if probability > 0.5 {
            session.right_click(best)?;
        } else {
            session.left_click(best)?;
        }
        self.mirror.refresh_all(session)?;
        Ok(true)
    }

    /// Builds the constraint block contributed by the revealed cell at
    /// `pos`, as of the visible state last pulled from the session.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::BlockGeneration`] if the cell is covered,
    /// out of bounds, or has no covered neighbors left.
    pub fn constraint_block(
        &mut self,
        session: &mut GameSession,
        pos: Position,
    ) -> Result<ConstraintBlock, SolverError> {
        self.check_session(session)?;
        self.mirror.refresh_all(session)?;
        ConstraintBlock::at(&self.mirror, pos)
    }

    fn check_session(&self, session: &GameSession) -> Result<(), SolverError> {
        if session.size() != self.size || session.mine_count() != self.mine_count {
            return Err(SolverError::SessionMismatch {
                expected_size: self.size,
                expected_mines: self.mine_count,
            });
        }
        Ok(())
    }

    fn logic_wave_inner(
        &mut self,
        session: &mut GameSession,
        hint: Position,
    ) -> Result<bool, SolverError> {
        // Bounds-check the hint through the session so the error carries
        // the grid size.
        session.tile_state(hint)?;

        let mut visited = vec![false; self.size * self.size];
        let mut queue = VecDeque::from([hint]);
        visited[hint.index(self.size)] = true;

        let mut acted = false;
        while let Some(pos) = queue.pop_front() {
            acted |= self.apply_deduction(session, pos)?;
            for neighbor in pos.neighbors(self.size) {
                let index = neighbor.index(self.size);
                if !visited[index] {
                    visited[index] = true;
                    queue.push_back(neighbor);
                }
            }
        }
        Ok(acted)
    }

    /// Applies the deterministic rules to one cell:
    ///
    /// - all mines flagged (`flagged == value`): reveal every covered
    ///   neighbor;
    /// - all covered cells needed (`flagged + covered == value`): flag every
    ///   covered neighbor.
    ///
    /// A cell carrying more flags than its value is treated as satisfied.
    fn apply_deduction(
        &mut self,
        session: &mut GameSession,
        pos: Position,
    ) -> Result<bool, SolverError> {
        let cell = self.mirror.cell(pos);
        if !cell.visibility.is_revealed() || cell.covered.is_empty() || cell.flagged > cell.value {
            return Ok(false);
        }
        let value = cell.value;
        let flagged = cell.flagged;
        let covered = cell.covered;

        if flagged == value {
            log::trace!("{pos} satisfied by flags, revealing {} covered neighbors", covered.len());
            for &target in &covered {
                session.left_click(target)?;
            }
            let mut flooded = false;
            for &target in &covered {
                self.mirror.refresh_cell(session, target)?;
                let refreshed = self.mirror.cell(target);
                if refreshed.visibility.is_revealed() && refreshed.value == 0 {
                    flooded = true;
                }
            }
            // A revealed blank cascades arbitrarily far; resynchronize
            // everything.
            if flooded {
                self.mirror.refresh_all(session)?;
            }
            Ok(true)
        } else if usize::from(flagged) + covered.len() == usize::from(value) {
            log::trace!("{pos} needs all covered neighbors, flagging {}", covered.len());
            for &target in &covered {
                session.right_click(target)?;
                self.mirror.refresh_cell(session, target)?;
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Acts on every frontier cell whose probability is exactly 0 (reveal)
    /// or exactly 1 (flag). Returns `true` if anything was done.
    fn probability_pass(&mut self, session: &mut GameSession) -> Result<bool, SolverError> {
        let stats = self.frontier_probabilities(session);
        if stats.is_empty() {
            return Ok(false);
        }

        let mut acted = false;
        for (index, &pos) in stats.cells.iter().enumerate() {
            if stats.mine_counts[index] == stats.valid_assignments {
                session.right_click(pos)?;
                acted = true;
            } else if stats.mine_counts[index] == 0 {
                session.left_click(pos)?;
                acted = true;
            }
        }
        if acted {
            log::debug!(
                "probability pass acted on certain cells ({} arrangements over {} frontier cells)",
                stats.valid_assignments,
                stats.len()
            );
            self.mirror.refresh_all(session)?;
        }
        Ok(acted)
    }

    fn frontier_probabilities(&self, session: &GameSession) -> FrontierProbabilities {
        let arena = BlockArena::build(&self.mirror);
        if arena.is_empty() {
            return FrontierProbabilities::empty();
        }

        let (mine_counts, valid_assignments) =
            Enumerator::run(&arena, self.mine_count, session.flags_placed());
        log::trace!(
            "enumerated {valid_assignments} consistent arrangements over {} frontier cells",
            arena.frontier().len()
        );
        FrontierProbabilities {
            cells: arena.frontier().to_vec(),
            mine_counts,
            valid_assignments,
        }
    }
}

/// Depth-first enumeration of every mine arrangement satisfying all blocks
/// of an arena within the remaining mine budget.
///
/// Each recursion level fixes one block's arrangement and descends with a
/// shrunk copy of the remaining blocks, so no rollback is needed when a
/// branch is abandoned.
struct Enumerator<'a> {
    arena: &'a BlockArena,
    budget: usize,
    flags_on_board: usize,
    assignment: Vec<bool>,
    mine_counts: Vec<usize>,
    valid_assignments: usize,
}

impl<'a> Enumerator<'a> {
    fn run(arena: &'a BlockArena, budget: usize, flags_on_board: usize) -> (Vec<usize>, usize) {
        let frontier_len = arena.frontier().len();
        let mut enumerator = Self {
            arena,
            budget,
            flags_on_board,
            assignment: vec![false; frontier_len],
            mine_counts: vec![0; frontier_len],
            valid_assignments: 0,
        };
        let blocks: Vec<(usize, ConstraintBlock)> =
            arena.blocks().iter().cloned().enumerate().collect();
        enumerator.recurse(&blocks, 0);
        (enumerator.mine_counts, enumerator.valid_assignments)
    }

    fn recurse(&mut self, blocks: &[(usize, ConstraintBlock)], mines_so_far: usize) {
        // Flags already on the board count against the budget too.
        if self.flags_on_board + mines_so_far > self.budget {
            return;
        }
        let Some((first, rest)) = blocks.split_first() else {
            self.valid_assignments += 1;
            for (count, &is_mine) in self.mine_counts.iter_mut().zip(self.assignment.iter()) {
                if is_mine {
                    *count += 1;
                }
            }
            return;
        };
        let (handle, current) = (first.0, &first.1);
        if current.required_mines() > current.members().len() {
            return;
        }

        for mask in Combinations::new(current.members().len(), current.required_mines()) {
            for (i, &member) in current.members().iter().enumerate() {
                self.assignment[self.arena.frontier_index(member)] = mask[i];
            }

            // Copy-on-descend: charge this arrangement to every other block
            // sharing a member, on a private copy of the remaining blocks.
            let mut rest_updated = rest.to_vec();
            let mut consistent = true;
            'shrink: for (i, &member) in current.members().iter().enumerate() {
                for &other in self.arena.blocks_containing(member) {
                    if other == handle {
                        continue;
                    }
                    let Some(entry) = rest_updated.iter_mut().find(|(h, _)| *h == other) else {
                        continue;
                    };
                    if !entry.1.shrink(member, mask[i]) {
                        consistent = false;
                        break 'shrink;
                    }
                }
            }
            if consistent {
                self.recurse(&rest_updated, mines_so_far + current.required_mines());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::layout_session;

    const CORNER_MINE: [&str; 10] = [
        "*.........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
    ];

    // A mine wall with a gap at x = 5 and a tenth mine hiding right below
    // the gap. Logic alone flags the wall and reveals the gap; finishing
    // the board takes probability analysis and one guess.
    const GAPPED_WALL: [&str; 10] = [
        "..........",
        "..........",
        "..........",
        "..........",
        "*****.****",
        ".....*....",
        "..........",
        "..........",
        "..........",
        "..........",
    ];

    // Three mines, one of them boxing the far corner in so the opening
    // flood cannot finish the board.
    const BOXED_CORNER: [&str; 10] = [
        "*.........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        ".........*",
        "........*.",
    ];

    fn solve_to_fixpoint(solver: &mut Solver, session: &mut GameSession) {
        while !session.is_done() && solver.solve_next_step(session).unwrap() {}
    }

    #[test]
    fn test_lone_covered_neighbor_of_a_one_is_flagged() {
        let mut session = layout_session(&BOXED_CORNER);
        let mut solver = Solver::new(&mut session).unwrap();
        session.left_click(Position::new(5, 5)).unwrap();
        assert!(session.phase().is_active());

        // (1, 1) now reads 1 with the corner mine as its only covered
        // neighbor.
        assert_eq!(session.tile_value(Position::new(1, 1)).unwrap(), 1);
        assert!(solver.solve_next_step(&mut session).unwrap());
        assert!(session.tile_state(Position::new(0, 0)).unwrap().is_flagged());
    }

    #[test]
    fn test_guess_is_a_noop_once_logic_has_solved_the_board() {
        let mut session = layout_session(&BOXED_CORNER);
        let mut solver = Solver::new(&mut session).unwrap();
        session.left_click(Position::new(5, 5)).unwrap();

        solve_to_fixpoint(&mut solver, &mut session);
        assert!(session.is_won());
        assert!(!solver.guess(&mut session).unwrap());
    }

    /// Reveals the three numbered witnesses around the corner mine without
    /// touching a blank (any blank would flood the whole board and win).
    fn reveal_corner_witnesses(session: &mut GameSession) {
        for pos in [Position::new(1, 0), Position::new(0, 1), Position::new(1, 1)] {
            session.left_click(pos).unwrap();
        }
    }

    #[test]
    fn test_certain_cells_are_flagged_and_revealed() {
        let mut session = layout_session(&CORNER_MINE);
        let mut solver = Solver::new(&mut session).unwrap();
        reveal_corner_witnesses(&mut session);

        // With a budget of one mine, only the corner satisfies all three
        // witnesses; the whole frontier is certain.
        assert!(solver.solve_next_step(&mut session).unwrap());
        assert!(session.tile_state(Position::new(0, 0)).unwrap().is_flagged());
        assert!(session.phase().is_won());
    }

    #[test]
    fn test_logic_wave_and_scan_reach_the_same_conclusions() {
        let mut wave_session = layout_session(&GAPPED_WALL);
        wave_session.left_click(Position::new(0, 0)).unwrap();
        let mut scan_session = wave_session.clone();

        let mut wave_solver = Solver::new(&mut wave_session).unwrap();
        let mut scan_solver = Solver::new(&mut scan_session).unwrap();

        while wave_solver
            .logic_wave(&mut wave_session, Position::new(5, 5))
            .unwrap()
        {}
        while scan_solver.logic_scan(&mut scan_session).unwrap() {}

        let mines = crate::testing::mine_positions(&GAPPED_WALL);
        for y in 0..10 {
            for x in 0..10 {
                let pos = Position::new(x, y);
                let state = wave_session.tile_state(pos).unwrap();
                assert_eq!(
                    state,
                    scan_session.tile_state(pos).unwrap(),
                    "wave and scan disagree at {pos}"
                );
                // Soundness against ground truth: deduction never flags a
                // safe cell nor reveals a mine.
                if state.is_flagged() {
                    assert!(mines.contains(&pos), "safe cell {pos} was flagged");
                }
                if state.is_revealed() {
                    assert!(!mines.contains(&pos), "mine {pos} was revealed");
                }
            }
        }
    }

    #[test]
    fn test_probabilities_pin_the_corner_mine() {
        let mut session = layout_session(&CORNER_MINE);
        let mut solver = Solver::new(&mut session).unwrap();
        reveal_corner_witnesses(&mut session);

        // One mine to spend and three witnesses to satisfy; only the corner
        // does all of it at once.
        let stats = solver.probabilities(&mut session).unwrap();
        assert_eq!(stats.valid_assignments(), 1);
        assert_eq!(stats.probability_at(Position::new(0, 0)), Some(1.0));
        assert_eq!(stats.probability_at(Position::new(2, 0)), Some(0.0));
        assert_eq!(stats.probability_at(Position::new(2, 2)), Some(0.0));
        assert_eq!(stats.probability_at(Position::new(5, 5)), None);
    }

    #[test]
    fn test_probability_certainties_match_logical_deduction() {
        let mut logic_session = layout_session(&GAPPED_WALL);
        logic_session.left_click(Position::new(0, 0)).unwrap();
        let mut stats_session = logic_session.clone();

        // Probabilities of the opening position on one copy, logic run to
        // fixpoint on the other.
        let mut stats_solver = Solver::new(&mut stats_session).unwrap();
        let stats = stats_solver.probabilities(&mut stats_session).unwrap();
        let mut logic_solver = Solver::new(&mut logic_session).unwrap();
        while logic_solver.logic_scan(&mut logic_session).unwrap() {}

        // The wall frontier is fully determined, so the two passes must
        // agree cell for cell: certain mines end up flagged, certain safe
        // cells end up revealed.
        assert_eq!(stats.len(), 10);
        for (pos, probability) in stats.iter() {
            let state = logic_session.tile_state(pos).unwrap();
            if probability == 1.0 {
                assert!(state.is_flagged(), "certain mine {pos} not flagged");
            } else {
                assert_eq!(probability, 0.0);
                assert!(state.is_revealed(), "certain safe cell {pos} not revealed");
            }
        }
    }

    #[test]
    fn test_uncertain_frontier_defers_to_guess() {
        let mut session = layout_session(&GAPPED_WALL);
        let mut solver = Solver::new(&mut session).unwrap();
        session.left_click(Position::new(0, 0)).unwrap();

        solve_to_fixpoint(&mut solver, &mut session);
        assert!(session.phase().is_active());

        // Logic has flagged the whole wall and opened the gap; one mine
        // remains among the three cells below the gap.
        assert_eq!(session.flags_placed(), 9);
        assert!(session.tile_state(Position::new(5, 4)).unwrap().is_revealed());
        let stats = solver.probabilities(&mut session).unwrap();
        assert_eq!(stats.len(), 3);
        for (_, probability) in stats.iter() {
            assert!((probability - 1.0 / 3.0).abs() < f64::EPSILON);
        }

        // No certainty anywhere, so the step reports no progress but a
        // guess still acts.
        assert!(!solver.solve_next_step(&mut session).unwrap());
        assert!(solver.guess(&mut session).unwrap());
    }

    #[test]
    fn test_solver_finishes_gapped_wall_board() {
        let mut session = layout_session(&GAPPED_WALL);
        let mut solver = Solver::new(&mut session).unwrap();
        session.left_click(Position::new(0, 0)).unwrap();

        // The budget check makes the position fully determined once the
        // guess opens a second witness next to the hidden mine.
        for _ in 0..100 {
            if session.is_done() {
                break;
            }
            if !solver.solve_next_step(&mut session).unwrap()
                && !solver.guess(&mut session).unwrap()
            {
                break;
            }
        }
        assert!(session.is_won());
        assert!(session.tile_state(Position::new(5, 5)).unwrap().is_flagged());
    }

    #[test]
    fn test_excess_flags_are_treated_as_satisfied() {
        let mut session = layout_session(&GAPPED_WALL);
        let mut solver = Solver::new(&mut session).unwrap();
        session.left_click(Position::new(0, 0)).unwrap();
        session.left_click(Position::new(5, 4)).unwrap();

        // Five flags around a value-3 cell, three of them wrong.
        for pos in [
            Position::new(4, 4),
            Position::new(6, 4),
            Position::new(4, 5),
            Position::new(5, 5),
            Position::new(6, 5),
        ] {
            session.right_click(pos).unwrap();
        }

        solve_to_fixpoint(&mut solver, &mut session);

        // The overfull cell must not be "solved" by revealing its flagged
        // mine neighbors.
        assert!(!session.phase().is_lost());
        assert!(session.tile_state(Position::new(4, 4)).unwrap().is_flagged());
        assert!(session.tile_state(Position::new(6, 4)).unwrap().is_flagged());

        // With the flag count over budget no arrangement is consistent, so
        // guessing has nothing to act on.
        assert!(!solver.guess(&mut session).unwrap());
    }

    #[test]
    fn test_session_mismatch_is_rejected() {
        let mut session = GameSession::with_seed(10, 10, 1).unwrap();
        let mut solver = Solver::new(&mut session).unwrap();

        let mut other = GameSession::with_seed(12, 10, 1).unwrap();
        other.begin().unwrap();
        assert_eq!(
            solver.solve_next_step(&mut other).unwrap_err(),
            SolverError::SessionMismatch {
                expected_size: 10,
                expected_mines: 10,
            }
        );

        let mut other = GameSession::with_seed(10, 11, 1).unwrap();
        other.begin().unwrap();
        assert_eq!(
            solver.guess(&mut other).unwrap_err(),
            SolverError::SessionMismatch {
                expected_size: 10,
                expected_mines: 10,
            }
        );

        // The original session is still accepted.
        assert!(solver.probabilities(&mut session).is_ok());
    }

    #[test]
    fn test_logic_wave_rejects_out_of_bounds_hint() {
        let mut session = GameSession::with_seed(10, 10, 1).unwrap();
        let mut solver = Solver::new(&mut session).unwrap();
        assert_eq!(
            solver
                .logic_wave(&mut session, Position::new(10, 0))
                .unwrap_err(),
            SolverError::Game(GameError::OutOfBounds {
                x: 10,
                y: 0,
                size: 10,
            })
        );
    }

    #[test]
    fn test_constraint_block_errors_surface() {
        let mut session = layout_session(&CORNER_MINE);
        let mut solver = Solver::new(&mut session).unwrap();
        session.left_click(Position::new(1, 1)).unwrap();

        let block = solver
            .constraint_block(&mut session, Position::new(1, 1))
            .unwrap();
        assert_eq!(block.required_mines(), 1);
        assert_eq!(block.members().len(), 8);
        assert!(block.members().contains(&Position::new(0, 0)));

        assert_eq!(
            solver
                .constraint_block(&mut session, Position::new(5, 5))
                .unwrap_err(),
            SolverError::BlockGeneration {
                position: Position::new(5, 5)
            }
        );
    }

    #[test]
    fn test_solver_plays_random_boards_without_panicking() {
        for seed in 0..4 {
            let mut session = GameSession::with_seed(10, 10, seed).unwrap();
            let mut solver = Solver::new(&mut session).unwrap();
            session.left_click(Position::new(5, 5)).unwrap();

            for _ in 0..1_000 {
                if session.is_done() {
                    break;
                }
                if !solver.solve_next_step(&mut session).unwrap()
                    && !solver.guess(&mut session).unwrap()
                {
                    break;
                }
            }
            // Losses are possible when a guess is forced; stalling short of
            // a terminal phase without having opened the board is not.
            assert!(!session.phase().is_not_started());
            assert!(session.tile_state(Position::new(5, 5)).unwrap().is_revealed());
        }
    }
}
