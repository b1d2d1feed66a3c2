//! `Budget` - a counting allocator with an optional allocation limit.
//!
//! Every allocation is served by [`Global`]; the budget only decides whether a
//! request is granted and keeps track of what is still outstanding. Clones
//! share the same accounting, so a container and the detached nodes it hands
//! out are all charged against one budget.
//!
//! Single-threaded: the counters are `Cell`s behind an `Rc`.

use super::allocator::{AllocError, Global, NodeAlloc};
use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;
use std::rc::Rc;

#[derive(Debug)]
struct BudgetState {
    limit: Cell<Option<usize>>,
    allocations: Cell<usize>,
    live: Cell<usize>,
}

/// A shared allocation budget.
#[derive(Debug, Clone)]
pub struct Budget {
    state: Rc<BudgetState>,
}

impl Budget {
    /// Creates a budget that grants at most `limit` allocations.
    pub fn new(limit: usize) -> Self {
        Self::with_limit(Some(limit))
    }

    /// Creates a budget that never refuses a request on its own.
    pub fn unlimited() -> Self {
        Self::with_limit(None)
    }

    fn with_limit(limit: Option<usize>) -> Self {
        Self {
            state: Rc::new(BudgetState {
                limit: Cell::new(limit),
                allocations: Cell::new(0),
                live: Cell::new(0),
            }),
        }
    }

    /// Replaces the limit. Allocations already served still count against it.
    pub fn set_limit(&self, limit: Option<usize>) {
        self.state.limit.set(limit);
    }

    /// Total number of allocations granted so far.
    pub fn allocations(&self) -> usize {
        self.state.allocations.get()
    }

    /// Number of granted allocations not yet deallocated.
    pub fn live(&self) -> usize {
        self.state.live.get()
    }

    /// Number of allocations still available, or `None` when unlimited.
    pub fn remaining(&self) -> Option<usize> {
        self.state
            .limit
            .get()
            .map(|limit| limit.saturating_sub(self.allocations()))
    }

    /// Returns `true` if both handles share the same accounting.
    pub fn same_budget(&self, other: &Budget) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl NodeAlloc for Budget {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if self.remaining() == Some(0) {
            return Err(AllocError);
        }

        let ptr = Global.allocate(layout)?;
        self.state.allocations.set(self.allocations() + 1);
        self.state.live.set(self.live() + 1);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        Global.deallocate(ptr, layout);
        // Saturating: a block may come from another budget.
        self.state.live.set(self.live().saturating_sub(1));
    }
}
