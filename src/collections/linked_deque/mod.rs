//! `LinkedDeque` - a singly linked double-ended queue.
//!
//! Each element lives in its own heap node; the deque keeps the first node,
//! the last node and a running count, so it can:
//! - insert at the front (`push`) or at the back (`append`) in O(1)
//! - remove from the front (`pop`) in O(1)
//! - report its size in O(1)
//! - release every node (`free_all`) in O(n)
//!
//! The deque owns the whole chain. Each node links to its successor, and
//! `last` is a non-owning back-reference into the same chain, never a second
//! owner. Nodes only leave the deque as owning values ([`NodeBox`] or
//! [`DetachedChain`]), so no node is ever reachable from two deques.
//!
//! Node allocation goes through a [`NodeAlloc`] and is fallible: `push` and
//! `append` report [`AllocError`] and leave the deque untouched.
//!
//! Front/back access comes in two flavours: the checked API (`pop`, `head`,
//! `tail`) returns `Option`, and the `*_unchecked` API trusts the caller and
//! only asserts non-emptiness in debug builds.
//!
//! ```rust
//! use linked_deque::LinkedDeque;
//!
//! let mut deque = LinkedDeque::new();
//! deque.append(2).unwrap();
//! deque.append(3).unwrap();
//! deque.push(1).unwrap();
//!
//! assert_eq!(deque.len(), 3);
//! assert_eq!(deque.head(), Some(&1));
//! assert_eq!(deque.tail(), Some(&3));
//! assert_eq!(deque.pop(), Some(1));
//! assert_eq!(deque.pop(), Some(2));
//! assert_eq!(deque.pop(), Some(3));
//! assert_eq!(deque.pop(), None);
//! ```

#[cfg(feature = "proptest")]
mod arbitrary;
mod chain;
mod iter;
mod node;
mod serde_impl;

pub use chain::{DetachedChain, Nodes};
pub use iter::{IntoIter, Iter, IterMut};
pub use node::{Node, NodeBox};

use crate::alloc::{AllocError, Global, NodeAlloc};
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;
use std::alloc::handle_alloc_error;

type Link<T> = Option<NonNull<Node<T>>>;

/// A singly linked double-ended queue.
pub struct LinkedDeque<T, A: NodeAlloc = Global> {
    first: Link<T>,
    last: Link<T>,
    len: usize,
    alloc: A,
    _marker: PhantomData<Box<Node<T>>>,
}

impl<T> LinkedDeque<T> {
    /// Creates an empty deque backed by the global allocator.
    ///
    /// `const`, so it can initialise statics.
    pub const fn new() -> Self {
        Self {
            first: None,
            last: None,
            len: 0,
            alloc: Global,
            _marker: PhantomData,
        }
    }
}

impl<T, A: NodeAlloc> LinkedDeque<T, A> {
    /// Creates an empty deque whose nodes are allocated in `alloc`.
    pub fn new_in(alloc: A) -> Self {
        Self {
            first: None,
            last: None,
            len: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Returns the allocator used for this deque's nodes.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns the number of elements in the deque.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the first node, if any.
    #[inline]
    pub fn first(&self) -> Option<&Node<T>> {
        // SAFETY: linked nodes are owned by `self` and live as long as the borrow.
        self.first.map(|node| unsafe { &*node.as_ptr() })
    }

    /// Returns the last node, if any.
    #[inline]
    pub fn last(&self) -> Option<&Node<T>> {
        // SAFETY: as in `first`.
        self.last.map(|node| unsafe { &*node.as_ptr() })
    }

    /// Returns the element at the front, if any.
    #[inline]
    pub fn head(&self) -> Option<&T> {
        self.first().map(Node::data)
    }

    /// Returns the element at the front mutably, if any.
    #[inline]
    pub fn head_mut(&mut self) -> Option<&mut T> {
        // SAFETY: `&mut self` gives exclusive access to the chain. Only the
        // element is exposed; links stay private to the deque.
        self.first.map(|node| unsafe { &mut (*node.as_ptr()).data })
    }

    /// Returns the element at the back, if any.
    #[inline]
    pub fn tail(&self) -> Option<&T> {
        self.last().map(Node::data)
    }

    /// Returns the element at the back mutably, if any.
    #[inline]
    pub fn tail_mut(&mut self) -> Option<&mut T> {
        // SAFETY: as in `head_mut`.
        self.last.map(|node| unsafe { &mut (*node.as_ptr()).data })
    }

    /// Returns the element at the front without checking for emptiness.
    ///
    /// # Safety
    /// The deque must not be empty. This is asserted in debug builds only.
    #[inline]
    pub unsafe fn head_unchecked(&self) -> &T {
        debug_assert!(self.first.is_some(), "head_unchecked on an empty LinkedDeque");
        &(*self.first.unwrap_unchecked().as_ptr()).data
    }

    /// Returns the element at the back without checking for emptiness.
    ///
    /// # Safety
    /// The deque must not be empty. This is asserted in debug builds only.
    #[inline]
    pub unsafe fn tail_unchecked(&self) -> &T {
        debug_assert!(self.last.is_some(), "tail_unchecked on an empty LinkedDeque");
        &(*self.last.unwrap_unchecked().as_ptr()).data
    }

    /// Inserts a detached node at the front. Never allocates.
    pub fn push_node(&mut self, node: NodeBox<T, A>) {
        let (node, _) = node.into_raw_parts();
        // SAFETY: the node came out of a `NodeBox`, so we now own it.
        unsafe { self.link_front(node) };
    }

    /// Inserts `value` at the front.
    ///
    /// # Errors
    /// Returns `AllocError` if no node can be allocated for `value`; the
    /// deque is left unchanged and `value` is dropped.
    pub fn push(&mut self, value: T) -> Result<(), AllocError> {
        let node = Node::allocate_in(value, &self.alloc)?;
        // SAFETY: freshly allocated in our allocator.
        unsafe { self.link_front(node) };
        Ok(())
    }

    /// Inserts a detached node at the back. Never allocates.
    pub fn append_node(&mut self, node: NodeBox<T, A>) {
        let (node, _) = node.into_raw_parts();
        // SAFETY: the node came out of a `NodeBox`, so we now own it.
        unsafe { self.link_back(node) };
    }

    /// Inserts `value` at the back.
    ///
    /// # Errors
    /// Returns `AllocError` if no node can be allocated for `value`; the
    /// deque is left unchanged and `value` is dropped.
    pub fn append(&mut self, value: T) -> Result<(), AllocError> {
        let node = Node::allocate_in(value, &self.alloc)?;
        // SAFETY: freshly allocated in our allocator.
        unsafe { self.link_back(node) };
        Ok(())
    }

    /// Unlinks the front node and hands it back without freeing it, so it can
    /// be inspected, reused with `push_node`/`append_node`, or dropped.
    pub fn pop_node(&mut self) -> Option<NodeBox<T, A>> {
        let first = self.first?;
        // SAFETY: `first` is linked into `self`.
        unsafe { self.unlink_front(first) };
        // SAFETY: unlinked above; nothing else refers to it.
        Some(unsafe { NodeBox::from_raw_parts(first, self.alloc.clone()) })
    }

    /// Removes the front element and frees its node.
    pub fn pop(&mut self) -> Option<T> {
        let first = self.first?;
        // SAFETY: `first` is linked into `self`.
        Some(unsafe { self.take_front(first) })
    }

    /// Removes the front element without checking for emptiness.
    ///
    /// # Safety
    /// The deque must not be empty. This is asserted in debug builds only.
    pub unsafe fn pop_unchecked(&mut self) -> T {
        debug_assert!(self.first.is_some(), "pop_unchecked on an empty LinkedDeque");
        let first = self.first.unwrap_unchecked();
        self.take_front(first)
    }

    /// Empties the deque in O(1) without touching node memory.
    ///
    /// The chain that was linked is returned as a [`DetachedChain`]: its nodes
    /// can be reused, re-attached, leaked on purpose, or released by dropping
    /// the chain.
    ///
    /// Discarding the result drops the chain on the spot, which releases every
    /// node in O(n) just like [`free_all`](Self::free_all). Keep the chain, or
    /// call [`DetachedChain::leak`] on it, to leave node memory untouched.
    #[must_use = "dropping the chain releases every node; call .leak() to keep them"]
    pub fn clear(&mut self) -> DetachedChain<T, A> {
        let nodes = Self {
            first: self.first.take(),
            last: self.last.take(),
            len: mem::take(&mut self.len),
            alloc: self.alloc.clone(),
            _marker: PhantomData,
        };
        DetachedChain::new(nodes)
    }

    /// Releases every node, front to back, and leaves the deque empty.
    ///
    /// O(n). A no-op on an empty deque. If an element's destructor panics,
    /// the remaining nodes are still released while unwinding.
    pub fn free_all(&mut self) {
        /// Keeps releasing nodes if a destructor panics.
        struct DropGuard<'a, T, A: NodeAlloc>(&'a mut LinkedDeque<T, A>);

        impl<T, A: NodeAlloc> Drop for DropGuard<'_, T, A> {
            fn drop(&mut self) {
                while let Some(first) = self.0.first {
                    // SAFETY: `first` is linked into the deque.
                    drop(unsafe { self.0.take_front(first) });
                }
            }
        }

        #[cfg(feature = "tracing")]
        let released = self.len;

        while let Some(first) = self.first {
            // SAFETY: `first` is linked into `self`.
            let value = unsafe { self.take_front(first) };
            let guard = DropGuard(&mut *self);
            drop(value);
            mem::forget(guard);
        }
        debug_assert!(self.last.is_none() && self.len == 0);

        #[cfg(feature = "tracing")]
        {
            if released != 0 {
                tracing::trace!(released, "LinkedDeque nodes released");
            }
        }
    }

    /// Moves every node of `other` to the back of `self` in O(1).
    ///
    /// `other` is left empty.
    pub fn splice_back(&mut self, other: &mut Self) {
        let Some(other_first) = other.first.take() else {
            return;
        };

        match self.last {
            // SAFETY: `last` is linked into `self`.
            Some(last) => unsafe { (*last.as_ptr()).next = Some(other_first) },
            None => self.first = Some(other_first),
        }
        self.last = other.last.take();
        self.len += mem::take(&mut other.len);

        #[cfg(debug_assertions)]
        self.debug_check_links();
    }

    /// Appends every element of `iter`, all or nothing.
    ///
    /// # Errors
    /// Returns `AllocError` if a node cannot be allocated. The deque then
    /// holds exactly what it held before the call; the elements already
    /// taken from `iter` are dropped.
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), AllocError> {
        let mut staged = Self::new_in(self.alloc.clone());
        for value in iter {
            staged.append(value)?;
        }
        self.splice_back(&mut staged);
        Ok(())
    }

    /// Returns `true` if the deque holds an element equal to `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|item| item == value)
    }

    /// Returns an iterator over the elements, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.first(), self.len)
    }

    /// Returns an iterator over mutable references to the elements, front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.first, self.len)
    }

    /// Clones the deque into a new one sharing the same allocator.
    ///
    /// # Errors
    /// Returns `AllocError` if a node cannot be allocated.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut out = Self::new_in(self.alloc.clone());
        out.try_extend(self.iter().cloned())?;
        Ok(out)
    }

    /// # Safety
    /// `node` must be owned by the caller, allocated by an allocator of type
    /// `A`, and not linked anywhere.
    #[inline]
    unsafe fn link_front(&mut self, node: NonNull<Node<T>>) {
        (*node.as_ptr()).next = self.first;
        if self.first.is_none() {
            self.last = Some(node);
        }
        self.first = Some(node);
        self.len += 1;

        #[cfg(debug_assertions)]
        self.debug_check_links();
    }

    /// # Safety
    /// As for `link_front`.
    #[inline]
    unsafe fn link_back(&mut self, node: NonNull<Node<T>>) {
        (*node.as_ptr()).next = None;
        match self.last {
            Some(last) => (*last.as_ptr()).next = Some(node),
            None => self.first = Some(node),
        }
        self.last = Some(node);
        self.len += 1;

        #[cfg(debug_assertions)]
        self.debug_check_links();
    }

    /// # Safety
    /// `first` must be `self.first`.
    #[inline]
    unsafe fn unlink_front(&mut self, first: NonNull<Node<T>>) {
        self.first = (*first.as_ptr()).next.take();
        if self.first.is_none() {
            self.last = None;
        }
        self.len -= 1;

        #[cfg(debug_assertions)]
        self.debug_check_links();
    }

    /// # Safety
    /// `first` must be `self.first`.
    #[inline]
    unsafe fn take_front(&mut self, first: NonNull<Node<T>>) -> T {
        self.unlink_front(first);
        Node::release(first, &self.alloc)
    }

    /// Checks the size/first/last bookkeeping. The full walk from `first` to
    /// `last` only runs on short chains, so debug builds stay O(1) per
    /// operation.
    #[cfg(debug_assertions)]
    fn debug_check_links(&self) {
        const MAX_WALK: usize = 64;

        assert_eq!(self.len == 0, self.first.is_none(), "len and first disagree");
        assert_eq!(self.first.is_none(), self.last.is_none(), "first and last disagree");

        let (Some(first), Some(last)) = (self.first, self.last) else {
            return;
        };
        // SAFETY: `last` is linked into `self`.
        assert!(unsafe { (*last.as_ptr()).next.is_none() }, "last must end the chain");

        if self.len <= MAX_WALK {
            let mut node = first;
            for _ in 1..self.len {
                // SAFETY: every node reached from `first` is linked into `self`.
                let Some(next) = (unsafe { (*node.as_ptr()).next }) else {
                    panic!("chain shorter than len");
                };
                node = next;
            }
            assert_eq!(node, last, "len - 1 steps from first must reach last");
        }
    }
}

impl<T, A: NodeAlloc> Drop for LinkedDeque<T, A> {
    fn drop(&mut self) {
        self.free_all();
    }
}

impl<T, A: NodeAlloc + Default> Default for LinkedDeque<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: fmt::Debug, A: NodeAlloc> fmt::Debug for LinkedDeque<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone, A: NodeAlloc> Clone for LinkedDeque<T, A> {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(deque) => deque,
            Err(AllocError) => handle_alloc_error(Node::<T>::LAYOUT),
        }
    }
}

impl<T: PartialEq, A: NodeAlloc, B: NodeAlloc> PartialEq<LinkedDeque<T, B>> for LinkedDeque<T, A> {
    fn eq(&self, other: &LinkedDeque<T, B>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: NodeAlloc> Eq for LinkedDeque<T, A> {}

impl<T: Hash, A: NodeAlloc> Hash for LinkedDeque<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for item in self {
            item.hash(state);
        }
    }
}

/// Appends every element; aborts through [`handle_alloc_error`] if a node
/// cannot be allocated. Use [`LinkedDeque::try_extend`] to handle the failure.
impl<T, A: NodeAlloc> Extend<T> for LinkedDeque<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if self.append(value).is_err() {
                handle_alloc_error(Node::<T>::LAYOUT);
            }
        }
    }
}

impl<'a, T: Copy + 'a, A: NodeAlloc> Extend<&'a T> for LinkedDeque<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for LinkedDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T, A: NodeAlloc> IntoIterator for LinkedDeque<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, A: NodeAlloc> IntoIterator for &'a LinkedDeque<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: NodeAlloc> IntoIterator for &'a mut LinkedDeque<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// SAFETY: the deque uniquely owns its chain; there is no shared mutable state.
unsafe impl<T: Send, A: NodeAlloc + Send> Send for LinkedDeque<T, A> {}
unsafe impl<T: Sync, A: NodeAlloc + Sync> Sync for LinkedDeque<T, A> {}
