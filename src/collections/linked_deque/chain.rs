//! The node chain handed back by [`LinkedDeque::clear`].

use super::{LinkedDeque, Node, NodeBox};
use crate::alloc::{Global, NodeAlloc};
use core::fmt;
use core::iter::FusedIterator;
use core::mem::ManuallyDrop;

/// A chain of nodes detached from a deque in O(1).
///
/// The chain still owns its nodes: dropping it releases them (O(n)).
/// Alternatively the nodes can be drained one by one as [`NodeBox`] values
/// for reuse, the whole chain re-attached with [`DetachedChain::into_deque`],
/// or deliberately leaked with [`DetachedChain::leak`].
#[must_use = "dropping the chain releases every node; call .leak() to keep them"]
pub struct DetachedChain<T, A: NodeAlloc = Global> {
    nodes: LinkedDeque<T, A>,
}

impl<T, A: NodeAlloc> DetachedChain<T, A> {
    pub(super) fn new(nodes: LinkedDeque<T, A>) -> Self {
        Self { nodes }
    }

    /// Returns the number of nodes in the chain.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the chain has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the first node of the chain, if any.
    pub fn first(&self) -> Option<&Node<T>> {
        self.nodes.first()
    }

    /// Turns the chain back into a deque, in its original order.
    pub fn into_deque(self) -> LinkedDeque<T, A> {
        self.nodes
    }

    /// Forgets the chain without releasing any node.
    ///
    /// The nodes and their elements are leaked; their destructors never run.
    pub fn leak(self) {
        let _ = ManuallyDrop::new(self.nodes);
    }
}

impl<T: fmt::Debug, A: NodeAlloc> fmt::Debug for DetachedChain<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DetachedChain").field(&self.nodes).finish()
    }
}

impl<T, A: NodeAlloc> IntoIterator for DetachedChain<T, A> {
    type Item = NodeBox<T, A>;
    type IntoIter = Nodes<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        Nodes { nodes: self.nodes }
    }
}

/// Drains a [`DetachedChain`] front to back, one detached node at a time.
pub struct Nodes<T, A: NodeAlloc = Global> {
    nodes: LinkedDeque<T, A>,
}

impl<T, A: NodeAlloc> Iterator for Nodes<T, A> {
    type Item = NodeBox<T, A>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.pop_node()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.nodes.len(), Some(self.nodes.len()))
    }
}

impl<T, A: NodeAlloc> ExactSizeIterator for Nodes<T, A> {}

impl<T, A: NodeAlloc> FusedIterator for Nodes<T, A> {}
