//! # `linked-deque` - Singly Linked Double-Ended Queue
//!
//! A generic, singly linked double-ended queue for performance-sensitive code:
//! one heap node per element and no further indirection, O(1) insertion at
//! both ends, O(1) removal at the front, O(1) size and O(n) bulk release.
//!
//! ## Safety Guarantees
//!
//! ### Ownership
//! - **Single owner per node**: a linked node is owned by exactly one deque; a
//!   detached node is owned by exactly one [`NodeBox`]. Moving nodes between
//!   deques moves that ownership, so a node can never be freed twice or be
//!   reachable from two deques.
//! - **Non-owning tail**: the deque's reference to its last node is a plain
//!   back-reference into its own chain, never a second owner.
//! - **No unsafe code in the public API** except the explicitly `unsafe`
//!   unchecked accessors, whose only precondition is non-emptiness.
//!
//! ### Failure Model
//! - **Allocation failure is a value**: inserting operations return
//!   [`AllocError`] and leave the deque exactly as it was.
//! - **Precondition violations fail fast**: the unchecked accessors assert
//!   non-emptiness in debug builds; the checked accessors return `Option`.
//!
//! ### Concurrency
//! Single-threaded by design: no locks, no atomics. A deque is `Send`/`Sync`
//! when its elements are, and every mutating operation takes `&mut self`, so
//! exclusive access is enforced statically.
//!
//! ## Architecture
//!
//! 1. **Node allocation** ([`alloc`]):
//!    - [`NodeAlloc`]: fallible allocate/deallocate seam
//!    - [`Global`]: the process allocator
//!    - [`Budget`]: counting allocator with an optional limit
//!
//! 2. **Nodes** ([`Node`], [`NodeBox`]):
//!    - Pure storage: one element and the link to the next node
//!    - `NodeBox` owns a detached node between allocation and insertion
//!
//! 3. **Deque** ([`LinkedDeque`]):
//!    - `push`/`append`/`pop` and their node-level variants
//!    - `clear` (O(1), hands the chain back as a [`DetachedChain`]) and
//!      `free_all` (O(n) release)
//!
//! ## Example
//!
//! ```rust
//! use linked_deque::{AllocError, Budget, LinkedDeque};
//!
//! // Push is LIFO at the front, append is FIFO at the back.
//! let mut deque = LinkedDeque::new();
//! deque.push(1).unwrap();
//! deque.append(2).unwrap();
//! deque.append(3).unwrap();
//! assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//!
//! // Allocation failures surface as errors and leave the deque unchanged.
//! let budget = Budget::new(1);
//! let mut bounded = LinkedDeque::new_in(budget.clone());
//! bounded.append("a").unwrap();
//! assert_eq!(bounded.append("b"), Err(AllocError));
//! assert_eq!(bounded.len(), 1);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod alloc;
pub mod collections;

pub use alloc::{AllocError, Budget, Global, NodeAlloc};
pub use collections::{DetachedChain, LinkedDeque, Node, NodeBox};

// Compile-time assertions for memory layout optimizations
const _: () = {
    use core::mem;
    use core::ptr::NonNull;

    // The global allocator handle is a ZST.
    assert!(mem::size_of::<Global>() == 0);

    // Links use the `NonNull` niche: an absent link costs nothing extra.
    assert!(mem::size_of::<Option<NonNull<Node<u64>>>>() == mem::size_of::<usize>());

    // The deque handle is exactly first + last + size.
    assert!(mem::size_of::<LinkedDeque<u64>>() == mem::size_of::<usize>() * 3);

    // A detached node handle is a single pointer.
    assert!(mem::size_of::<NodeBox<u64>>() == mem::size_of::<usize>());
};
