//! Board position (x, y) coordinate types.

use std::fmt::{self, Display};

/// A zero-based `(x, y)` coordinate on a square grid.
///
/// `x` runs left to right, `y` top to bottom. Positions carry no grid size of
/// their own; operations that depend on the grid take `size` as a parameter
/// and clip to the board edges.
///
/// # Examples
///
/// ```
/// use minegrid_core::Position;
///
/// let pos = Position::new(3, 4);
/// assert_eq!(pos.x(), 3);
/// assert_eq!(pos.y(), 4);
///
/// // Corner cells have three neighbors.
/// assert_eq!(Position::new(0, 0).neighbors(10).count(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    x: usize,
    y: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the horizontal coordinate.
    #[must_use]
    pub const fn x(self) -> usize {
        self.x
    }

    /// Returns the vertical coordinate.
    #[must_use]
    pub const fn y(self) -> usize {
        self.y
    }

    /// Returns the row-major index of this position on a `size`-wide grid.
    ///
    /// The caller is responsible for ensuring the position is in bounds.
    #[must_use]
    pub const fn index(self, size: usize) -> usize {
        self.y * size + self.x
    }

    /// Returns `true` if this position lies on a `size` x `size` grid.
    #[must_use]
    pub const fn in_bounds(self, size: usize) -> bool {
        self.x < size && self.y < size
    }

    /// Returns `true` if this position lies in the 3x3 block centered on
    /// `origin` (Chebyshev distance at most 1, including `origin` itself).
    ///
    /// This is the zone kept mine-free around the first click.
    ///
    /// # Examples
    ///
    /// ```
    /// use minegrid_core::Position;
    ///
    /// let origin = Position::new(5, 5);
    /// assert!(Position::new(4, 6).in_safe_zone(origin));
    /// assert!(Position::new(5, 5).in_safe_zone(origin));
    /// assert!(!Position::new(5, 7).in_safe_zone(origin));
    /// ```
    #[must_use]
    pub const fn in_safe_zone(self, origin: Self) -> bool {
        self.x.abs_diff(origin.x) <= 1 && self.y.abs_diff(origin.y) <= 1
    }

    /// Returns the in-bounds positions adjacent to this one (up to 8).
    pub fn neighbors(self, size: usize) -> impl Iterator<Item = Self> {
        const OFFSETS: [(isize, isize); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        OFFSETS.into_iter().filter_map(move |(dx, dy)| {
            let x = self.x.checked_add_signed(dx)?;
            let y = self.y.checked_add_signed(dy)?;
            (x < size && y < size).then_some(Self { x, y })
        })
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}
