//! `gp-search` — static and incremental shortest-path search on grid graphs.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`astar`]       | `AStar`, `find_path` (one-shot search)                 |
//! | [`dstar_lite`]  | `DStarLite`, `Key` (incremental replanning)            |
//! | [`path`]        | `Path`, `SearchStats`                                  |
//! | [`error`]       | `SearchError`, `SearchResult<T>`                       |
//!
//! # Choosing a search
//!
//! Build a fresh [`AStar`] per query when the grid changes rarely or the
//! query endpoints jump around.  Keep one [`DStarLite`] session alive when
//! the goal is fixed and obstacles or the start move a little at a time:
//! each edit only re-examines the cells whose cost-to-goal could change.
//!
//! # Usage constraints
//!
//! Everything runs synchronously on the caller's thread.  Each search keeps
//! its `g`/`rhs` state privately, so several `AStar`s may share one
//! `&GridGraph`.  A `DStarLite` holds `&mut GridGraph` for its whole
//! session; obstacle edits must go through it.
//!
//! Both searches assume a symmetric graph (see
//! [`GridGraph::is_symmetric`](gp_core::GridGraph::is_symmetric)).  Results
//! on an asymmetric graph are unspecified.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Path`, `SearchStats`, `Key`. |

pub mod astar;
pub mod dstar_lite;
pub mod error;
pub mod path;


pub use astar::{find_path, AStar};
pub use dstar_lite::{DStarLite, Key};
pub use error::{SearchError, SearchResult};
pub use path::{Path, SearchStats};
