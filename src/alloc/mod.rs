//! Node allocation.
//!
//! - `allocator`: the [`NodeAlloc`] seam, the [`Global`] allocator and [`AllocError`]
//! - `budget`: [`Budget`], a counting allocator with an optional limit

pub mod allocator;
pub mod budget;

pub use allocator::{AllocError, Global, NodeAlloc};
pub use budget::Budget;
