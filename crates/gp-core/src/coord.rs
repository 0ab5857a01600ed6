//! Integer grid coordinate and the Manhattan heuristic.
//!
//! `Coord` carries a third axis `z` so coordinates can be handed straight to
//! a layered tile map.  Cells built by this crate always have `z == 0`, and
//! neither [`Coord::manhattan`] nor any search cost looks at it.

/// A cell position on the grid: `x` is the column, `y` the row.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coord {
    /// Planar coordinate (`z = 0`).
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y, z: 0 }
    }

    /// Manhattan distance on the `(x, y)` plane.
    ///
    /// Admissible and consistent for 4-directional movement with unit edge
    /// cost.  Diagonal or weighted movement needs a different heuristic.
    #[inline]
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// `true` if `other` is exactly one step away along one axis.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }

    /// The four axis-aligned neighbours, in `+x, -x, +y, -y` order.
    pub fn neighbors4(self) -> [Coord; 4] {
        [
            Coord { x: self.x + 1, ..self },
            Coord { x: self.x - 1, ..self },
            Coord { y: self.y + 1, ..self },
            Coord { y: self.y - 1, ..self },
        ]
    }
}

impl From<(i32, i32)> for Coord {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Coord::new(x, y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
