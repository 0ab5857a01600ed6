//! Cell classification and the unit edge-cost model.
//!
//! Every traversable edge costs exactly 1.  An edge touching a `Blocked`
//! cell costs [`UNREACHABLE`] (+∞), which the searches treat as "no edge"
//! without needing to rebuild the adjacency when a wall appears.

/// Path cost.  `f32` so that +∞ is representable and absorbs additions.
pub type Cost = f32;

/// Cost of a forbidden edge and initial value of every `g`/`rhs`.
pub const UNREACHABLE: Cost = f32::INFINITY;

/// What occupies a grid cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Open floor (default state).
    #[default]
    Free,
    /// Where a path starts.  Traversable.
    Source,
    /// Where a path ends.  Traversable.
    Destination,
    /// Wall.  Every edge touching it is forbidden.
    Blocked,
}

impl CellState {
    #[inline]
    pub fn is_blocked(self) -> bool {
        matches!(self, CellState::Blocked)
    }

    /// Character used by the ASCII grid format.
    pub fn as_char(self) -> char {
        match self {
            CellState::Free        => '.',
            CellState::Source      => 'S',
            CellState::Destination => 'D',
            CellState::Blocked     => '#',
        }
    }

    /// Inverse of [`as_char`](Self::as_char).  Returns `None` for any other
    /// character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(CellState::Free),
            'S' => Some(CellState::Source),
            'D' => Some(CellState::Destination),
            '#' => Some(CellState::Blocked),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CellState::Free        => "free",
            CellState::Source      => "source",
            CellState::Destination => "destination",
            CellState::Blocked     => "blocked",
        }
    }
}

impl std::fmt::Display for CellState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cost of moving between two adjacent cells.
#[inline]
pub fn edge_cost(a: CellState, b: CellState) -> Cost {
    if a.is_blocked() || b.is_blocked() {
        UNREACHABLE
    } else {
        1.0
    }
}
