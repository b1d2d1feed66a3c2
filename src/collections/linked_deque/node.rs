//! Nodes of a [`LinkedDeque`](super::LinkedDeque) chain.
//!
//! A [`Node`] holds one element by value and the link to the rest of the
//! chain. Nodes linked into a deque are owned by that deque; a node that is
//! not linked anywhere is owned by a [`NodeBox`].

use crate::alloc::{AllocError, Global, NodeAlloc};
use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::mem::ManuallyDrop;
use core::ops::{Deref, DerefMut};
use core::ptr::{self, NonNull};
use std::alloc::handle_alloc_error;

/// The storage unit of a chain: one element and the link to its successor.
pub struct Node<T> {
    pub(super) data: T,
    pub(super) next: Option<NonNull<Node<T>>>,
}

impl<T> Node<T> {
    pub(super) const LAYOUT: Layout = Layout::new::<Node<T>>();

    /// Returns a reference to the stored element.
    #[inline(always)]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Returns the next node in the chain, or `None` at the end.
    ///
    /// ```rust
    /// use linked_deque::LinkedDeque;
    ///
    /// let deque: LinkedDeque<i32> = [1, 2, 3].into_iter().collect();
    /// let mut sum = 0;
    /// let mut node = deque.first();
    /// while let Some(n) = node {
    ///     sum += *n.data();
    ///     node = n.next();
    /// }
    /// assert_eq!(sum, 6);
    /// ```
    #[inline(always)]
    pub fn next(&self) -> Option<&Node<T>> {
        // SAFETY: a linked successor is owned by the same chain as `self` and
        // outlives the borrow of `self`.
        self.next.map(|next| unsafe { &*next.as_ptr() })
    }

    /// Allocates a node in `alloc` holding `data`, unlinked.
    pub(super) fn allocate_in<A: NodeAlloc>(
        data: T,
        alloc: &A,
    ) -> Result<NonNull<Node<T>>, AllocError> {
        let raw = match alloc.allocate(Self::LAYOUT) {
            Ok(raw) => raw.cast::<Node<T>>(),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(size = Self::LAYOUT.size(), "node allocation failed");
                return Err(err);
            }
        };

        // SAFETY: freshly allocated with the layout of `Node<T>`.
        unsafe { raw.as_ptr().write(Node { data, next: None }) };
        Ok(raw)
    }

    /// Moves the element out of `node` and frees its storage.
    ///
    /// # Safety
    /// `node` must have been allocated by `allocate_in` with an allocator of
    /// type `A`, and must not be reachable from any chain.
    pub(super) unsafe fn release<A: NodeAlloc>(node: NonNull<Node<T>>, alloc: &A) -> T {
        let Node { data, .. } = node.as_ptr().read();
        alloc.deallocate(node.cast(), Self::LAYOUT);
        data
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("data", &self.data)
            .field("has_next", &self.next.is_some())
            .finish()
    }
}

// SAFETY: a node is only reachable through its unique owner, so thread
// safety depends on `T` alone.
unsafe impl<T: Send> Send for Node<T> {}
unsafe impl<T: Sync> Sync for Node<T> {}

/// A uniquely owned node that is not linked into any deque.
///
/// `NodeBox` is how nodes travel between the allocator and deques: it is
/// produced by [`NodeBox::try_new_in`] or [`LinkedDeque::pop_node`] and
/// consumed by [`LinkedDeque::push_node`] or [`LinkedDeque::append_node`],
/// which link the existing allocation without allocating again. Dropping a
/// `NodeBox` drops the element and frees the node.
///
/// [`LinkedDeque::pop_node`]: super::LinkedDeque::pop_node
/// [`LinkedDeque::push_node`]: super::LinkedDeque::push_node
/// [`LinkedDeque::append_node`]: super::LinkedDeque::append_node
pub struct NodeBox<T, A: NodeAlloc = Global> {
    pub(super) ptr: NonNull<Node<T>>,
    alloc: A,
    _marker: PhantomData<Node<T>>,
}

impl<T> NodeBox<T> {
    /// Allocates a detached node holding `value` with the global allocator.
    ///
    /// # Errors
    /// Returns `AllocError` if the node cannot be allocated.
    pub fn try_new(value: T) -> Result<Self, AllocError> {
        Self::try_new_in(value, Global)
    }

    /// Allocates a detached node holding `value` with the global allocator.
    ///
    /// Calls [`handle_alloc_error`] if the node cannot be allocated.
    pub fn new(value: T) -> Self {
        match Self::try_new(value) {
            Ok(node) => node,
            Err(AllocError) => handle_alloc_error(Node::<T>::LAYOUT),
        }
    }
}

impl<T, A: NodeAlloc> NodeBox<T, A> {
    /// Allocates a detached node holding `value` in `alloc`.
    ///
    /// # Errors
    /// Returns `AllocError` if the node cannot be allocated; `value` is dropped.
    pub fn try_new_in(value: T, alloc: A) -> Result<Self, AllocError> {
        let ptr = Node::allocate_in(value, &alloc)?;
        // SAFETY: freshly allocated in `alloc` and unlinked.
        Ok(unsafe { Self::from_raw_parts(ptr, alloc) })
    }

    /// Frees the node and returns the element it held.
    pub fn into_inner(self) -> T {
        let (ptr, alloc) = self.into_raw_parts();
        // SAFETY: we owned the node, and it is unlinked.
        unsafe { Node::release(ptr, &alloc) }
    }

    /// Returns a reference to the stored element.
    #[inline(always)]
    pub fn data(&self) -> &T {
        // SAFETY: we own the node.
        unsafe { &(*self.ptr.as_ptr()).data }
    }

    /// Returns a mutable reference to the stored element.
    #[inline(always)]
    pub fn data_mut(&mut self) -> &mut T {
        // SAFETY: we own the node exclusively.
        unsafe { &mut (*self.ptr.as_ptr()).data }
    }

    /// Returns the allocator that will free this node.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    pub(super) fn into_raw_parts(self) -> (NonNull<Node<T>>, A) {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so `alloc` is moved out exactly once.
        (this.ptr, unsafe { ptr::read(&this.alloc) })
    }

    /// # Safety
    /// `ptr` must be an unlinked node allocated by an allocator of type `A`,
    /// with no other owner.
    pub(super) unsafe fn from_raw_parts(ptr: NonNull<Node<T>>, alloc: A) -> Self {
        debug_assert!((*ptr.as_ptr()).next.is_none(), "NodeBox over a linked node");
        Self {
            ptr,
            alloc,
            _marker: PhantomData,
        }
    }
}

impl<T, A: NodeAlloc> Deref for NodeBox<T, A> {
    type Target = T;

    #[inline(always)]
    fn deref(&self) -> &T {
        self.data()
    }
}

impl<T, A: NodeAlloc> DerefMut for NodeBox<T, A> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut T {
        self.data_mut()
    }
}

impl<T, A: NodeAlloc> Drop for NodeBox<T, A> {
    fn drop(&mut self) {
        // SAFETY: we own the node, and it is unlinked.
        unsafe {
            ptr::drop_in_place(ptr::addr_of_mut!((*self.ptr.as_ptr()).data));
            self.alloc.deallocate(self.ptr.cast(), Node::<T>::LAYOUT);
        }
    }
}

impl<T: fmt::Debug, A: NodeAlloc> fmt::Debug for NodeBox<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeBox").field(self.data()).finish()
    }
}

// SAFETY: Send/Sync if T and the allocator handle are.
unsafe impl<T: Send, A: NodeAlloc + Send> Send for NodeBox<T, A> {}
unsafe impl<T: Sync, A: NodeAlloc + Sync> Sync for NodeBox<T, A> {}
