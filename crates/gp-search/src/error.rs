//! Search-subsystem error type.
//!
//! An unreachable goal is not an error: both searches report it as an empty
//! [`Path`](crate::Path).  Errors here only cover bad inputs, such as a start
//! or goal coordinate the graph does not contain.

use thiserror::Error;

use gp_core::CoreError;

/// Errors produced by `gp-search`.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SearchResult<T> = Result<T, SearchError>;
