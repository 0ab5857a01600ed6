//! `gp-queue` — indexable priority queue for the gridplan searches.
//!
//! # Crate layout
//!
//! | Module     | Contents                                             |
//! |------------|------------------------------------------------------|
//! | [`heap`]   | `IndexedHeap` (binary min-heap), `HeapItem` trait    |
//! | [`error`]  | `QueueError`, `QueueResult<T>`                       |
//!
//! The ordering is injected as a closure at construction time, so one heap
//! type serves both A* (`f = g + h`) and D* Lite (lexicographic key).
//! Identity for removal comes from [`HeapItem::id`], never from priority
//! equality.

pub mod error;
pub mod heap;

#[cfg(test)]
mod tests;

pub use error::{QueueError, QueueResult};
pub use heap::{HeapItem, IndexedHeap};
