//! `gp-core` — grid cells, coordinates, and the neighbour graph.
//!
//! This crate is a dependency of every other `gp-*` crate.  It has no
//! `gp-*` dependencies and holds no search state: `g`, `rhs`, and keys live
//! in the search instances in `gp-search`.
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `CellId`                                                  |
//! | [`coord`]   | `Coord`, Manhattan distance                               |
//! | [`cell`]    | `CellState`, `Cost`, `UNREACHABLE`, `edge_cost`           |
//! | [`graph`]   | `GridGraph` (CSR adjacency), `GridGraphBuilder`           |
//! | [`grid`]    | `Grid` (row-major tiles, ASCII I/O, `build_graph`)        |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod cell;
pub mod coord;
pub mod error;
pub mod graph;
pub mod grid;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{edge_cost, CellState, Cost, UNREACHABLE};
pub use coord::Coord;
pub use error::{CoreError, CoreResult};
pub use graph::{GridGraph, GridGraphBuilder};
pub use grid::Grid;
pub use ids::CellId;
