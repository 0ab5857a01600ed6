//! Neighbour graph over grid cells, and its builder.
//!
//! # Data layout
//!
//! Adjacency uses **Compressed Sparse Row (CSR)** format.  Given a
//! `CellId c`, its neighbours occupy the slice:
//!
//! ```text
//! neighbor_cell[ neighbor_start[c] .. neighbor_start[c+1] ]
//! ```
//!
//! Topology is fixed once built.  Obstacles are expressed by changing a
//! cell's [`CellState`] in place; the edge-cost model turns any edge touching
//! a `Blocked` cell into +∞, so a wall never requires rebuilding the CSR.
//!
//! # Symmetry
//!
//! The searches assume that if `a` lists `b` as a neighbour then `b` lists
//! `a` (D* Lite walks neighbours as predecessors).  [`GridGraphBuilder::add_link`]
//! and [`Grid::build_graph`](crate::Grid::build_graph) always produce symmetric
//! graphs.  [`GridGraph::is_symmetric`] reports violations but never repairs
//! them; an asymmetric graph is outside the searches' contract.

use std::ops::Range;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::cell::{edge_cost, Cost};
use crate::{CellId, CellState, Coord, CoreError, CoreResult};

// ── GridGraph ─────────────────────────────────────────────────────────────────

/// Grid cells and their neighbour lists in CSR format, plus a coordinate
/// index for resolving collaborator-supplied positions.
///
/// Do not construct directly; use [`GridGraphBuilder`] or
/// [`Grid::build_graph`](crate::Grid::build_graph).
#[derive(Clone, Debug)]
pub struct GridGraph {
    // ── Cell data (indexed by CellId) ─────────────────────────────────────
    /// Coordinate of each cell.
    pub cell_coord: Vec<Coord>,

    /// Classification of each cell.  Mutated through [`set_state`](Self::set_state).
    cell_state: Vec<CellState>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// CSR row pointer.  Length = `cell_count + 1`.
    pub neighbor_start: Vec<u32>,

    /// Neighbour ids, grouped by owning cell.
    pub neighbor_cell: Vec<CellId>,

    index: FxHashMap<Coord, CellId>,
}

impl GridGraph {
    /// A graph with no cells.
    pub fn empty() -> Self {
        GridGraphBuilder::new().build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn cell_count(&self) -> usize {
        self.cell_coord.len()
    }

    /// Number of directed neighbour entries (twice the undirected link count
    /// for a symmetric graph).
    pub fn link_count(&self) -> usize {
        self.neighbor_cell.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_coord.is_empty()
    }

    /// Every cell id, in ascending order.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.cell_count()).map(|i| CellId(i as u32))
    }

    // ── Cell access ───────────────────────────────────────────────────────

    #[inline]
    pub fn coord(&self, cell: CellId) -> Coord {
        self.cell_coord[cell.index()]
    }

    #[inline]
    pub fn state(&self, cell: CellId) -> CellState {
        self.cell_state[cell.index()]
    }

    /// Reclassify `cell`, returning its previous state.
    pub fn set_state(&mut self, cell: CellId, state: CellState) -> CellState {
        std::mem::replace(&mut self.cell_state[cell.index()], state)
    }

    /// The cell at `coord`, if the graph has one.
    #[inline]
    pub fn cell_at(&self, coord: Coord) -> Option<CellId> {
        self.index.get(&coord).copied()
    }

    /// Like [`cell_at`](Self::cell_at) but treats a missing coordinate as an
    /// error.
    pub fn lookup(&self, coord: Coord) -> CoreResult<CellId> {
        self.cell_at(coord).ok_or(CoreError::CellNotFound(coord))
    }

    /// First cell with the given classification, in id order.
    pub fn find_state(&self, state: CellState) -> Option<CellId> {
        self.cell_state
            .iter()
            .position(|&s| s == state)
            .map(|i| CellId(i as u32))
    }

    // ── Adjacency ─────────────────────────────────────────────────────────

    /// Positions of `cell`'s neighbours inside `neighbor_cell`.
    ///
    /// Lets callers that hold `&mut self` elsewhere iterate neighbours by
    /// index without borrowing the slice.
    #[inline]
    pub fn neighbor_range(&self, cell: CellId) -> Range<usize> {
        let start = self.neighbor_start[cell.index()] as usize;
        let end   = self.neighbor_start[cell.index() + 1] as usize;
        start..end
    }

    #[inline]
    pub fn neighbors(&self, cell: CellId) -> &[CellId] {
        &self.neighbor_cell[self.neighbor_range(cell)]
    }

    #[inline]
    pub fn degree(&self, cell: CellId) -> usize {
        self.neighbor_range(cell).len()
    }

    /// Cost of stepping between two cells under the current states.
    ///
    /// Does not check adjacency; callers only ask about listed neighbours.
    #[inline]
    pub fn edge_cost(&self, a: CellId, b: CellId) -> Cost {
        edge_cost(self.state(a), self.state(b))
    }

    /// `true` if every neighbour relation has its reverse.
    pub fn is_symmetric(&self) -> bool {
        self.first_asymmetric_link().is_none()
    }

    /// A `(from, to)` pair where `to` does not list `from` back, if any.
    pub fn first_asymmetric_link(&self) -> Option<(CellId, CellId)> {
        self.cells().find_map(|from| {
            self.neighbors(from)
                .iter()
                .find(|&&to| !self.neighbors(to).contains(&from))
                .map(|&to| (from, to))
        })
    }
}

// ── GridGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`GridGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use gp_core::{CellState, Coord, GridGraphBuilder};
///
/// let mut b = GridGraphBuilder::new();
/// let a = b.add_cell(Coord::new(0, 0), CellState::Source);
/// let c = b.add_cell(Coord::new(1, 0), CellState::Destination);
/// b.add_link(a, c);
/// let graph = b.build();
/// assert_eq!(graph.cell_count(), 2);
/// assert_eq!(graph.link_count(), 2); // both directions
/// ```
pub struct GridGraphBuilder {
    cells:     Vec<(Coord, CellState)>,
    raw_links: Vec<(CellId, CellId)>,
    index:     FxHashMap<Coord, CellId>,
}

impl GridGraphBuilder {
    pub fn new() -> Self {
        Self {
            cells:     Vec::new(),
            raw_links: Vec::new(),
            index:     FxHashMap::default(),
        }
    }

    /// Pre-allocate for a grid of known size.
    pub fn with_capacity(cells: usize, links: usize) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(cells);
        Self {
            cells: Vec::with_capacity(cells),
            raw_links: Vec::with_capacity(links),
            index,
        }
    }

    /// Add a cell and return its `CellId` (sequential from 0).
    ///
    /// Adding a coordinate twice updates its state and returns the existing id.
    pub fn add_cell(&mut self, coord: Coord, state: CellState) -> CellId {
        if let Some(&id) = self.index.get(&coord) {
            self.cells[id.index()].1 = state;
            return id;
        }
        let id = CellId(self.cells.len() as u32);
        self.cells.push((coord, state));
        self.index.insert(coord, id);
        id
    }

    /// Add a one-way neighbour relation.  Only useful for building
    /// deliberately asymmetric graphs; the searches expect [`add_link`](Self::add_link).
    pub fn add_directed_link(&mut self, from: CellId, to: CellId) {
        self.raw_links.push((from, to));
    }

    /// Add a neighbour relation in both directions.
    pub fn add_link(&mut self, a: CellId, b: CellId) {
        self.add_directed_link(a, b);
        self.add_directed_link(b, a);
    }

    pub fn cell_count(&self) -> usize { self.cells.len() }
    pub fn link_count(&self) -> usize { self.raw_links.len() }

    /// Consume the builder and produce a [`GridGraph`].
    ///
    /// Neighbour order within a cell follows insertion order.
    pub fn build(self) -> GridGraph {
        let cell_count = self.cells.len();
        let link_count = self.raw_links.len();

        // Stable sort keeps per-cell insertion order.
        let mut raw = self.raw_links;
        raw.sort_by_key(|&(from, _)| from.0);

        let neighbor_cell: Vec<CellId> = raw.iter().map(|&(_, to)| to).collect();

        let mut neighbor_start = vec![0u32; cell_count + 1];
        for &(from, _) in &raw {
            neighbor_start[from.index() + 1] += 1;
        }
        for i in 1..=cell_count {
            neighbor_start[i] += neighbor_start[i - 1];
        }
        debug_assert_eq!(neighbor_start[cell_count] as usize, link_count);

        let (cell_coord, cell_state) = self.cells.into_iter().unzip();

        debug!(cells = cell_count, links = link_count, "grid graph built");

        GridGraph {
            cell_coord,
            cell_state,
            neighbor_start,
            neighbor_cell,
            index: self.index,
        }
    }
}

impl Default for GridGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
