//! D* Lite: incremental replanning over a mutable grid graph.
//!
//! D* Lite searches backwards from the goal and keeps, for every cell, the
//! cost-to-goal estimate `g` and the one-step lookahead
//!
//! ```text
//! rhs(u) = min over neighbours p of ( cost(p, u) + g(p) )     (u ≠ goal)
//! rhs(goal) = 0
//! ```
//!
//! A cell is *consistent* when `g == rhs`.  Inconsistent cells wait in the
//! open list ordered by
//!
//! ```text
//! key(u) = ( min(g, rhs) + h(start, u) + k_m,  min(g, rhs) )
//! ```
//!
//! and [`DStarLite::compute_shortest_path`] processes them until the start is
//! consistent and nothing in the queue could still improve it.
//!
//! # Incremental updates
//!
//! Changing a cell's state only changes the cost of edges touching that cell,
//! so only the cell and its neighbours can get a new `rhs`.
//! [`update_obstacle`](DStarLite::update_obstacle) re-evaluates exactly those,
//! then resumes the search with the existing `g`/`rhs` field.
//!
//! # Key modifier
//!
//! When the start moves, every queued key's heuristic term becomes stale.
//! Rather than re-keying the queue, `k_m` accumulates `h(old_start, new_start)`
//! and is added to every key computed afterwards; outdated entries are
//! detected on extraction and pushed back with a fresh key.
//!
//! Moving the goal invalidates every `g`, so [`move_goal`](DStarLite::move_goal)
//! reinitialises from scratch in O(V).

use std::cmp::Ordering;

use tracing::{debug, trace, warn};

use gp_core::{CellId, CellState, Coord, Cost, GridGraph, UNREACHABLE};
use gp_queue::{HeapItem, IndexedHeap};

use crate::{Path, SearchResult, SearchStats};

// ── Key ───────────────────────────────────────────────────────────────────────

/// Two-component D* Lite priority, compared lexicographically.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key {
    pub k1: Cost,
    pub k2: Cost,
}

impl Key {
    /// Total order: `k1` first, then `k2`.
    pub fn total_cmp(&self, other: &Key) -> Ordering {
        self.k1.total_cmp(&other.k1).then(self.k2.total_cmp(&other.k2))
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Key) -> Option<Ordering> {
        Some(self.total_cmp(other))
    }
}

/// Open-list entry: a cell and the key it was queued with.
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    key:  Key,
    cell: CellId,
}

impl HeapItem for OpenEntry {
    type Id = CellId;
    fn id(&self) -> CellId {
        self.cell
    }
}

fn by_key(a: &OpenEntry, b: &OpenEntry) -> Ordering {
    a.key.total_cmp(&b.key).then(a.cell.cmp(&b.cell))
}

type OpenList = IndexedHeap<OpenEntry, fn(&OpenEntry, &OpenEntry) -> Ordering>;

// ── DStarLite ─────────────────────────────────────────────────────────────────

/// Incremental shortest-path session between a moving start and a goal.
///
/// The session borrows the graph mutably for its whole lifetime: obstacle
/// edits go through [`update_obstacle`](Self::update_obstacle) so the search
/// sees every change, and nothing else can mutate the graph behind its back.
/// Use [`graph`](Self::graph) to read the current states.
///
/// # Example
///
/// ```
/// use gp_core::{CellState, Coord, Grid};
/// use gp_search::DStarLite;
///
/// let grid = Grid::parse("S..\n...\n..D\n").unwrap();
/// let mut graph = grid.build_graph();
/// let mut dsl = DStarLite::from_coords(&mut graph, Coord::new(0, 0), Coord::new(2, 2)).unwrap();
/// dsl.compute_shortest_path();
/// assert_eq!(dsl.shortest_path_cost(), 4.0);
///
/// let wall = dsl.graph().lookup(Coord::new(1, 1)).unwrap();
/// dsl.update_obstacle(wall, CellState::Blocked);
/// assert_eq!(dsl.shortest_path_cost(), 4.0);
/// assert!(!dsl.path().coords.contains(&Coord::new(1, 1)));
/// ```
pub struct DStarLite<'g> {
    graph:      &'g mut GridGraph,
    start:      CellId,
    goal:       CellId,
    /// Start position the current `k_m` was accumulated up to.
    last_start: CellId,
    k_m:        Cost,
    /// Cost-to-goal estimate, indexed by `CellId`.
    g:          Vec<Cost>,
    /// One-step lookahead, indexed by `CellId`.
    rhs:        Vec<Cost>,
    open:       OpenList,
    /// Lifetime count of queue insertions.
    pushes:     usize,
}

impl<'g> DStarLite<'g> {
    /// Start a session and queue the goal.  Does not search yet; call
    /// [`compute_shortest_path`](Self::compute_shortest_path).
    ///
    /// # Panics
    ///
    /// Panics if `start` or `goal` is not a cell of `graph`.
    pub fn new(graph: &'g mut GridGraph, start: CellId, goal: CellId) -> Self {
        let n = graph.cell_count();
        let mut dsl = Self {
            graph,
            start,
            goal,
            last_start: start,
            k_m: 0.0,
            g: vec![UNREACHABLE; n],
            rhs: vec![UNREACHABLE; n],
            open: IndexedHeap::with_capacity(n, by_key as fn(&OpenEntry, &OpenEntry) -> Ordering),
            pushes: 0,
        };
        dsl.initialize();
        dsl
    }

    /// Resolve `start` and `goal` by coordinate, failing if either is absent.
    pub fn from_coords(graph: &'g mut GridGraph, start: Coord, goal: Coord) -> SearchResult<Self> {
        let start = graph.lookup(start)?;
        let goal = graph.lookup(goal)?;
        Ok(Self::new(graph, start, goal))
    }

    fn initialize(&mut self) {
        self.g.fill(UNREACHABLE);
        self.rhs.fill(UNREACHABLE);
        self.open.clear();
        self.k_m = 0.0;
        self.last_start = self.start;

        self.rhs[self.goal.index()] = 0.0;
        let key = self.calculate_key(self.goal);
        self.push(OpenEntry { key, cell: self.goal });
    }

    fn push(&mut self, entry: OpenEntry) {
        self.open.insert(entry);
        self.pushes += 1;
    }

    // ── Core ──────────────────────────────────────────────────────────────

    #[inline]
    fn heuristic(&self, a: CellId, b: CellId) -> Cost {
        self.graph.coord(a).manhattan(self.graph.coord(b)) as Cost
    }

    fn calculate_key(&self, u: CellId) -> Key {
        let m = self.g[u.index()].min(self.rhs[u.index()]);
        Key { k1: m + self.heuristic(self.start, u) + self.k_m, k2: m }
    }

    fn update_vertex(&mut self, u: CellId) {
        if u != self.goal {
            let graph = &*self.graph;
            self.rhs[u.index()] = graph
                .neighbors(u)
                .iter()
                .map(|&p| graph.edge_cost(p, u) + self.g[p.index()])
                .fold(UNREACHABLE, Cost::min);
        }
        self.open.remove(u);
        if self.g[u.index()] != self.rhs[u.index()] {
            let key = self.calculate_key(u);
            self.push(OpenEntry { key, cell: u });
        }
    }

    /// Re-evaluate every neighbour of `u`.  The graph is symmetric, so the
    /// neighbours are also `u`'s predecessors.
    fn update_neighbors(&mut self, u: CellId) {
        for i in self.graph.neighbor_range(u) {
            let p = self.graph.neighbor_cell[i];
            self.update_vertex(p);
        }
    }

    /// Process inconsistent cells until the start's `g` is final.
    ///
    /// Safe to call repeatedly: with nothing changed it returns immediately
    /// and leaves every `g`/`rhs` untouched.
    pub fn compute_shortest_path(&mut self) -> SearchStats {
        let mut stats = SearchStats::default();
        let pushes_before = self.pushes;

        loop {
            let Ok(top) = self.open.peek_min().copied() else { break };
            let s = self.start.index();
            if top.key >= self.calculate_key(self.start) && self.rhs[s] == self.g[s] {
                break;
            }
            let Ok(OpenEntry { key: k_old, cell: u }) = self.open.extract_min() else { break };
            let k_new = self.calculate_key(u);
            let ui = u.index();

            if k_old < k_new {
                self.push(OpenEntry { key: k_new, cell: u });
                stats.requeued += 1;
            } else if self.g[ui] > self.rhs[ui] {
                self.g[ui] = self.rhs[ui];
                stats.expanded += 1;
                trace!(cell = %self.graph.coord(u), g = self.g[ui], "D* Lite lower");
                self.update_neighbors(u);
            } else {
                self.g[ui] = UNREACHABLE;
                stats.expanded += 1;
                trace!(cell = %self.graph.coord(u), "D* Lite raise");
                self.update_vertex(u);
                self.update_neighbors(u);
            }
        }

        stats.pushed = self.pushes - pushes_before;
        debug!(
            start = %self.graph.coord(self.start),
            goal = %self.graph.coord(self.goal),
            cost = self.g[self.start.index()],
            expanded = stats.expanded,
            requeued = stats.requeued,
            "D* Lite converged"
        );
        stats
    }

    // ── Results ───────────────────────────────────────────────────────────

    /// Walk from the start, always stepping to the neighbour that minimises
    /// `cost + g`.
    ///
    /// Returns the empty path if the start cannot reach the goal.  If the walk
    /// hits a cell with no finite successor it stops there and returns the
    /// partial path.
    pub fn path(&self) -> Path {
        if self.g[self.start.index()] == UNREACHABLE {
            return Path::unreachable();
        }

        let graph = &*self.graph;
        let mut cells = vec![self.start];
        let mut current = self.start;

        while current != self.goal {
            if cells.len() > graph.cell_count() {
                warn!(
                    start = %graph.coord(self.start),
                    at = %graph.coord(current),
                    "D* Lite path walk exceeded cell count; returning partial path"
                );
                break;
            }

            let mut best = UNREACHABLE;
            let mut next = None;
            for &s in graph.neighbors(current) {
                let val = graph.edge_cost(current, s) + self.g[s.index()];
                if val < best {
                    best = val;
                    next = Some(s);
                }
            }
            let Some(next) = next else { break };
            cells.push(next);
            current = next;
        }

        Path::from_cells(graph, cells)
    }

    /// `g(start)`: the cost of the current shortest path, +∞ if none.
    pub fn shortest_path_cost(&self) -> Cost {
        self.g[self.start.index()]
    }

    // ── Edits ─────────────────────────────────────────────────────────────

    /// Reclassify `cell` and replan.
    pub fn update_obstacle(&mut self, cell: CellId, state: CellState) -> SearchStats {
        self.apply_state(cell, state);
        self.compute_shortest_path()
    }

    /// Apply several reclassifications, then replan once.
    pub fn update_obstacles(&mut self, edits: &[(CellId, CellState)]) -> SearchStats {
        for &(cell, state) in edits {
            self.apply_state(cell, state);
        }
        self.compute_shortest_path()
    }

    fn apply_state(&mut self, cell: CellId, state: CellState) {
        let old = self.graph.set_state(cell, state);
        debug!(cell = %self.graph.coord(cell), from = %old, to = %state, "obstacle update");
        self.update_vertex(cell);
        self.update_neighbors(cell);
    }

    /// Move the start to `cell` and replan, keeping the existing `g`/`rhs`.
    pub fn move_start(&mut self, cell: CellId) -> SearchStats {
        self.k_m += self.heuristic(self.last_start, cell);
        self.last_start = cell;
        self.start = cell;
        self.compute_shortest_path()
    }

    /// Move the goal to `cell`, discard all search state, and replan.
    pub fn move_goal(&mut self, cell: CellId) -> SearchStats {
        self.goal = cell;
        self.initialize();
        self.compute_shortest_path()
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn g(&self, cell: CellId) -> Cost {
        self.g[cell.index()]
    }

    pub fn rhs(&self, cell: CellId) -> Cost {
        self.rhs[cell.index()]
    }

    pub fn is_consistent(&self, cell: CellId) -> bool {
        self.g[cell.index()] == self.rhs[cell.index()]
    }

    pub fn start(&self) -> CellId { self.start }
    pub fn goal(&self) -> CellId { self.goal }

    /// Accumulated key modifier.  Reset to 0 by [`move_goal`](Self::move_goal).
    pub fn key_modifier(&self) -> Cost {
        self.k_m
    }

    /// Number of inconsistent cells waiting in the open list.
    pub fn queue_len(&self) -> usize {
        self.open.len()
    }

    /// The graph as the session currently sees it.
    pub fn graph(&self) -> &GridGraph {
        &*self.graph
    }
}
