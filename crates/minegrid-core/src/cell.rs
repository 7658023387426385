//! A single grid cell: content plus player-facing visibility.

/// What a cell actually contains once the board has been populated.
///
/// Content is immutable between population and the next reset. Before the
/// first move populates the board, every cell reads as [`CellContent::Blank`]
/// and the value is not meaningful.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::IsVariant)]
pub enum CellContent {
    /// No adjacent mines; revealing cascades to the neighbors.
    #[default]
    Blank,
    /// Count of adjacent mines, always in `1..=8`.
    Number(u8),
    /// A mine; revealing it loses the game.
    Mine,
}

impl CellContent {
    /// Builds content from an adjacent-mine count.
    ///
    /// # Panics
    ///
    /// Panics if `count` exceeds 8, which cannot happen for an 8-neighbor
    /// grid.
    #[must_use]
    pub fn from_adjacent_mines(count: u8) -> Self {
        match count {
            0 => Self::Blank,
            1..=8 => Self::Number(count),
            _ => panic!("invalid adjacent mine count: {count}"),
        }
    }

    /// Returns the numeric value shown for this content: the adjacent-mine
    /// count for numbers, and a neutral 0 for blanks and mines.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Blank | Self::Mine => 0,
            Self::Number(n) => n,
        }
    }
}

/// The player-facing state of a cell.
///
/// Flag toggling cycles `Covered -> Flagged -> Questioned -> Covered`;
/// revealing is one-way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::IsVariant)]
pub enum Visibility {
    /// Not yet interacted with.
    #[default]
    Covered,
    /// Marked as a suspected mine; counts toward the flag total.
    Flagged,
    /// Marked as uncertain; does not count toward the flag total.
    Questioned,
    /// Permanently exposed.
    Revealed,
}

/// One cell of the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub(crate) content: CellContent,
    pub(crate) visibility: Visibility,
}

impl Cell {
    /// Creates a covered, blank cell.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            content: CellContent::Blank,
            visibility: Visibility::Covered,
        }
    }

    /// Returns the content of this cell.
    #[must_use]
    pub const fn content(&self) -> CellContent {
        self.content
    }

    /// Returns the visibility of this cell.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_from_adjacent_mines() {
        assert_eq!(CellContent::from_adjacent_mines(0), CellContent::Blank);
        assert_eq!(CellContent::from_adjacent_mines(1), CellContent::Number(1));
        assert_eq!(CellContent::from_adjacent_mines(8), CellContent::Number(8));
    }

    #[test]
    #[should_panic(expected = "invalid adjacent mine count: 9")]
    fn test_content_rejects_impossible_count() {
        let _ = CellContent::from_adjacent_mines(9);
    }

    #[test]
    fn test_content_value_is_neutral_for_non_numbers() {
        assert_eq!(CellContent::Blank.value(), 0);
        assert_eq!(CellContent::Mine.value(), 0);
        assert_eq!(CellContent::Number(5).value(), 5);
    }

    #[test]
    fn test_new_cell_is_covered_blank() {
        let cell = Cell::new();
        assert!(cell.content().is_blank());
        assert!(cell.visibility().is_covered());
        assert_eq!(cell, Cell::default());
    }
}
