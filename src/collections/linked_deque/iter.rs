//! Iterators over a [`LinkedDeque`]. All of them walk front to back.

use super::{Link, LinkedDeque, Node};
use crate::alloc::{Global, NodeAlloc};
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

/// Borrowing iterator over a `LinkedDeque`, front to back.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    len: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(first: Option<&'a Node<T>>, len: usize) -> Self {
        Self { next: first, len }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next();
        self.len -= 1;
        Some(node.data())
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            len: self.len,
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Mutable iterator for `LinkedDeque`.
pub struct IterMut<'a, T> {
    next: Link<T>,
    len: usize,
    _marker: PhantomData<&'a mut Node<T>>,
}

impl<T> IterMut<'_, T> {
    pub(super) fn new(first: Link<T>, len: usize) -> Self {
        Self {
            next: first,
            len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        // SAFETY: the iterator holds the deque's unique borrow for 'a, and
        // each node is yielded once.
        let node = unsafe { &mut *node.as_ptr() };
        self.next = node.next;
        self.len -= 1;
        Some(&mut node.data)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

// SAFETY: behaves like `&'a mut T`.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

/// Owning iterator for `LinkedDeque`; pops from the front.
pub struct IntoIter<T, A: NodeAlloc = Global> {
    deque: LinkedDeque<T, A>,
}

impl<T, A: NodeAlloc> IntoIter<T, A> {
    pub(super) fn new(deque: LinkedDeque<T, A>) -> Self {
        Self { deque }
    }
}

impl<T, A: NodeAlloc> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.deque.pop()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T, A: NodeAlloc> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: NodeAlloc> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: NodeAlloc> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.deque).finish()
    }
}
