//! Dense cell identifier.
//!
//! A `CellId` is the position of a cell inside a [`GridGraph`](crate::GridGraph)'s
//! per-cell arrays.  Search crates size their scratch `Vec`s by
//! `graph.cell_count()` and index them with `id.index()`, so two searches over
//! the same graph never share state.

use std::fmt;

/// Index of a cell in a [`GridGraph`](crate::GridGraph).
///
/// Identity of a cell is its `CellId`: two lookups of the same coordinate
/// always return the same id.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId(pub u32);

impl CellId {
    /// Sentinel meaning "no cell" — equivalent to `u32::MAX`.
    pub const INVALID: CellId = CellId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for CellId {
    /// Returns the `INVALID` sentinel so unset predecessors are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellId({})", self.0)
    }
}

impl From<CellId> for usize {
    #[inline(always)]
    fn from(id: CellId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for CellId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<CellId, Self::Error> {
        u32::try_from(n).map(CellId)
    }
}
