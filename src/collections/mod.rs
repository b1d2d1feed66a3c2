//! Linked collections.
//!
//! - `linked_deque`: [`LinkedDeque`], a singly linked double-ended queue,
//!   with its node types and iterators

pub mod linked_deque;

pub use linked_deque::{DetachedChain, LinkedDeque, Node, NodeBox};
