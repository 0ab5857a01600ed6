//! Search results: [`Path`] and [`SearchStats`].

use gp_core::{CellId, Coord, Cost, GridGraph, UNREACHABLE};

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a planning query: cells to visit in order, from start to
/// goal inclusive.
///
/// An empty path means no path exists.  That is a normal outcome, not an
/// error; callers branch on [`is_found`](Self::is_found).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Cells in visiting order.
    pub cells: Vec<CellId>,
    /// Coordinates of `cells`, for the rendering collaborator.
    pub coords: Vec<Coord>,
    /// Sum of edge costs along `cells`.  +∞ for an empty path.
    pub cost: Cost,
}

impl Path {
    /// The "no path" result.
    pub fn unreachable() -> Self {
        Self { cells: Vec::new(), coords: Vec::new(), cost: UNREACHABLE }
    }

    /// Build a path from a cell walk, resolving coordinates and summing edge
    /// costs under the graph's current states.
    pub fn from_cells(graph: &GridGraph, cells: Vec<CellId>) -> Self {
        if cells.is_empty() {
            return Self::unreachable();
        }
        let coords = cells.iter().map(|&c| graph.coord(c)).collect();
        let cost = cells
            .windows(2)
            .fold(0.0, |acc, w| acc + graph.edge_cost(w[0], w[1]));
        Self { cells, coords, cost }
    }

    pub fn is_found(&self) -> bool {
        !self.cells.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells, endpoints included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Number of moves (`len - 1`), 0 for an empty path.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn first(&self) -> Option<CellId> {
        self.cells.first().copied()
    }

    pub fn last(&self) -> Option<CellId> {
        self.cells.last().copied()
    }

    /// `true` if every move changes exactly one axis by one unit.
    pub fn is_contiguous(&self) -> bool {
        self.coords.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }
}

// ── SearchStats ───────────────────────────────────────────────────────────────

/// Work counters for one search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells whose `g` was settled or raised.
    pub expanded: usize,
    /// Entries popped with an outdated key and pushed back (D* Lite) or
    /// skipped as stale duplicates (A*).
    pub requeued: usize,
    /// Total queue insertions.
    pub pushed: usize,
}

impl std::ops::AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.expanded += rhs.expanded;
        self.requeued += rhs.requeued;
        self.pushed   += rhs.pushed;
    }
}
