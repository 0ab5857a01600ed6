//! Core error type.
//!
//! Lookups by [`Coord`] go through `Result` so a collaborator handing in a
//! coordinate that is not in the graph fails fast with a typed error.
//! Lookups by [`CellId`](crate::CellId) are contract-checked by slice
//! indexing instead.

use thiserror::Error;

use crate::Coord;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("cell {0} not found in graph")]
    CellNotFound(Coord),

    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x:      i32,
        y:      i32,
        width:  usize,
        height: usize,
    },

    #[error("grid parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `gp-core`.
pub type CoreResult<T> = Result<T, CoreError>;
