//! Rectangular tile grid and conversion to a [`GridGraph`].
//!
//! `Grid` is the collaborator-facing snapshot: a row-major array of
//! [`CellState`]s.  Searches never see it directly; they run on the graph
//! produced by [`Grid::build_graph`].
//!
//! # ASCII format
//!
//! One row per line, top row is `y = 0`, leftmost column is `x = 0`:
//!
//! ```text
//! S..#.
//! .#.#.
//! .#..D
//! ```
//!
//! `.` free, `#` blocked, `S` source, `D` destination.  Blank lines and
//! surrounding whitespace are ignored; every row must have the same width.

use std::fmt;
use std::path::Path;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{CellId, CellState, Coord, CoreError, CoreResult, GridGraph, GridGraphBuilder};

/// Row-major `width × height` grid of cell states.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width:  usize,
    height: usize,
    cells:  Vec<CellState>,
}

impl Grid {
    /// An all-`Free` grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![CellState::Free; width * height] }
    }

    /// Parse the ASCII format described in the module docs.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let mut width = None;
        let mut cells = Vec::new();
        let mut height = 0;

        for (row, line) in text.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
            let before = cells.len();
            for (col, c) in line.chars().enumerate() {
                let state = CellState::from_char(c).ok_or_else(|| {
                    CoreError::Parse(format!("unexpected {c:?} at row {row}, column {col}"))
                })?;
                cells.push(state);
            }
            let row_width = cells.len() - before;
            match width {
                None => width = Some(row_width),
                Some(w) if w != row_width => {
                    return Err(CoreError::Parse(format!(
                        "row {row} has {row_width} cells, expected {w}"
                    )));
                }
                Some(_) => {}
            }
            height += 1;
        }

        Ok(Self { width: width.unwrap_or(0), height, cells })
    }

    /// Read and [`parse`](Self::parse) a grid file.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    // ── Cell access ───────────────────────────────────────────────────────

    fn offset(&self, coord: Coord) -> CoreResult<usize> {
        if !self.contains(coord) {
            return Err(CoreError::OutOfBounds {
                x:      coord.x,
                y:      coord.y,
                width:  self.width,
                height: self.height,
            });
        }
        Ok(coord.y as usize * self.width + coord.x as usize)
    }

    fn coord_of(&self, offset: usize) -> Coord {
        Coord::new((offset % self.width) as i32, (offset / self.width) as i32)
    }

    pub fn get(&self, coord: Coord) -> CoreResult<CellState> {
        Ok(self.cells[self.offset(coord)?])
    }

    /// Set the state at `coord`, returning the previous one.
    pub fn set(&mut self, coord: Coord, state: CellState) -> CoreResult<CellState> {
        let i = self.offset(coord)?;
        Ok(std::mem::replace(&mut self.cells[i], state))
    }

    /// First `Source` cell in row-major order.
    pub fn source(&self) -> Option<Coord> {
        self.find(CellState::Source)
    }

    /// First `Destination` cell in row-major order.
    pub fn destination(&self) -> Option<Coord> {
        self.find(CellState::Destination)
    }

    fn find(&self, state: CellState) -> Option<Coord> {
        self.cells.iter().position(|&s| s == state).map(|i| self.coord_of(i))
    }

    /// Number of cells in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    // ── Generation ────────────────────────────────────────────────────────

    /// Turn each `Free` cell into a wall with probability `density`.
    ///
    /// Source and destination cells are never touched.  The same seed always
    /// produces the same walls.  Returns the number of walls placed.
    pub fn scatter_walls(&mut self, density: f64, seed: u64) -> usize {
        let mut rng = SmallRng::seed_from_u64(seed);
        let p = density.clamp(0.0, 1.0);
        let mut placed = 0;
        for cell in self.cells.iter_mut().filter(|c| **c == CellState::Free) {
            if rng.gen_bool(p) {
                *cell = CellState::Blocked;
                placed += 1;
            }
        }
        placed
    }

    // ── Graph conversion ──────────────────────────────────────────────────

    /// Build the 4-neighbour graph for this grid.
    ///
    /// Every cell (walls included) becomes a graph cell so a wall can later be
    /// removed by changing its state.  `CellId`s follow row-major order, and
    /// each cell's neighbours are listed in `+x, -x, +y, -y` order.
    pub fn build_graph(&self) -> GridGraph {
        let mut b = GridGraphBuilder::with_capacity(self.cells.len(), self.cells.len() * 4);
        for (i, &state) in self.cells.iter().enumerate() {
            b.add_cell(self.coord_of(i), state);
        }
        for i in 0..self.cells.len() {
            let coord = self.coord_of(i);
            for n in coord.neighbors4() {
                if let Ok(j) = self.offset(n) {
                    b.add_directed_link(CellId(i as u32), CellId(j as u32));
                }
            }
        }
        b.build()
    }

    // ── Rendering ─────────────────────────────────────────────────────────

    /// ASCII rendering in the [`parse`](Self::parse) format.
    pub fn render(&self) -> String {
        self.render_path(&[])
    }

    /// ASCII rendering with path cells drawn as `*` (source and destination
    /// keep their own characters).
    pub fn render_path(&self, path: &[Coord]) -> String {
        let mut chars: Vec<char> = self.cells.iter().map(|s| s.as_char()).collect();
        for &c in path {
            if let Ok(i) = self.offset(c) {
                if chars[i] == '.' {
                    chars[i] = '*';
                }
            }
        }
        let mut out = String::with_capacity(self.cells.len() + self.height);
        for row in chars.chunks(self.width.max(1)) {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
