//! One-shot A* over a fixed graph snapshot.
//!
//! # Heuristic
//!
//! Manhattan distance to the goal.  It is admissible only because movement
//! is 4-directional with unit cost; diagonal or weighted movement needs a
//! different heuristic.
//!
//! # Duplicates
//!
//! There is no closed set and no decrease-key.  A neighbour whose `g`
//! improves is pushed again, and the older entry is skipped when it surfaces
//! (its stored `f` exceeds the cell's current `g + h`).  Relaxation only
//! happens on strict improvement, so revisits cost time, never correctness.
//!
//! # Shared graphs
//!
//! `g` and predecessor links live in the `AStar` value, not on the graph, so
//! any number of searches may borrow the same [`GridGraph`] at once.

use std::cmp::Ordering;

use tracing::{debug, trace};

use gp_core::{CellId, Coord, Cost, GridGraph, UNREACHABLE};
use gp_queue::{HeapItem, IndexedHeap};

use crate::{Path, SearchResult, SearchStats};

/// Open-list entry: a cell and the `f = g + h` it was pushed with.
#[derive(Clone, Copy, Debug)]
struct Frontier {
    f:    Cost,
    cell: CellId,
}

impl HeapItem for Frontier {
    type Id = CellId;
    fn id(&self) -> CellId {
        self.cell
    }
}

/// Lowest `f` first; `CellId` breaks ties so results are deterministic.
fn by_f(a: &Frontier, b: &Frontier) -> Ordering {
    a.f.total_cmp(&b.f).then(a.cell.cmp(&b.cell))
}

/// A* search from `start` to `goal` over a borrowed graph.
///
/// Construct one per request; [`compute_path`](Self::compute_path) resets all
/// scratch state, so calling it again simply repeats the search.
pub struct AStar<'g> {
    graph:     &'g GridGraph,
    start:     CellId,
    goal:      CellId,
    /// Best known cost from `start`, indexed by `CellId`.
    g:         Vec<Cost>,
    /// Cell each entry was last relaxed from; `CellId::INVALID` if never.
    came_from: Vec<CellId>,
    stats:     SearchStats,
}

impl<'g> AStar<'g> {
    /// # Panics
    ///
    /// Later calls panic if `start` or `goal` is not a cell of `graph`.
    pub fn new(graph: &'g GridGraph, start: CellId, goal: CellId) -> Self {
        let n = graph.cell_count();
        Self {
            graph,
            start,
            goal,
            g: vec![UNREACHABLE; n],
            came_from: vec![CellId::INVALID; n],
            stats: SearchStats::default(),
        }
    }

    /// Resolve `start` and `goal` by coordinate, failing if either is absent.
    pub fn from_coords(graph: &'g GridGraph, start: Coord, goal: Coord) -> SearchResult<Self> {
        let start = graph.lookup(start)?;
        let goal = graph.lookup(goal)?;
        Ok(Self::new(graph, start, goal))
    }

    #[inline]
    fn heuristic(&self, cell: CellId) -> Cost {
        self.graph.coord(cell).manhattan(self.graph.coord(self.goal)) as Cost
    }

    /// Run the search.  Returns the empty path if `goal` is unreachable.
    pub fn compute_path(&mut self) -> Path {
        let graph = self.graph;
        self.g.fill(UNREACHABLE);
        self.came_from.fill(CellId::INVALID);
        self.stats = SearchStats::default();

        let mut open = IndexedHeap::with_capacity(graph.cell_count(), by_f);
        self.g[self.start.index()] = 0.0;
        open.insert(Frontier { f: self.heuristic(self.start), cell: self.start });
        self.stats.pushed += 1;

        while let Ok(Frontier { f, cell }) = open.extract_min() {
            if cell == self.goal {
                let path = self.reconstruct();
                debug!(
                    start = %graph.coord(self.start),
                    goal = %graph.coord(self.goal),
                    cost = path.cost,
                    expanded = self.stats.expanded,
                    "A* path found"
                );
                return path;
            }

            let g_cur = self.g[cell.index()];
            if f > g_cur + self.heuristic(cell) {
                self.stats.requeued += 1;
                continue;
            }
            self.stats.expanded += 1;
            trace!(cell = %graph.coord(cell), g = g_cur, "A* expand");

            for &next in graph.neighbors(cell) {
                let tentative = g_cur + graph.edge_cost(cell, next);
                if tentative < self.g[next.index()] {
                    self.g[next.index()] = tentative;
                    self.came_from[next.index()] = cell;
                    open.insert(Frontier { f: tentative + self.heuristic(next), cell: next });
                    self.stats.pushed += 1;
                }
            }
        }

        debug!(
            start = %graph.coord(self.start),
            goal = %graph.coord(self.goal),
            expanded = self.stats.expanded,
            "A* found no path"
        );
        Path::unreachable()
    }

    fn reconstruct(&self) -> Path {
        let mut cells = vec![self.goal];
        let mut cur = self.goal;
        while cur != self.start {
            cur = self.came_from[cur.index()];
            if !cur.is_valid() {
                break;
            }
            cells.push(cur);
        }
        cells.reverse();
        Path::from_cells(self.graph, cells)
    }

    /// Cost from `start` found by the last [`compute_path`](Self::compute_path).
    pub fn g(&self, cell: CellId) -> Cost {
        self.g[cell.index()]
    }

    /// Counters from the last [`compute_path`](Self::compute_path).
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn start(&self) -> CellId { self.start }
    pub fn goal(&self) -> CellId { self.goal }
}

/// Convenience: build an [`AStar`] and run it once.
pub fn find_path(graph: &GridGraph, start: CellId, goal: CellId) -> Path {
    AStar::new(graph, start, goal).compute_path()
}
