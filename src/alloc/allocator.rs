//! The node allocator seam: [`NodeAlloc`], the [`Global`] allocator and [`AllocError`].

use core::alloc::Layout;
use core::ptr::NonNull;
use std::alloc::{alloc, dealloc};

/// A trait for node allocators.
///
/// This trait is similar to `std::alloc::Allocator`, narrowed to what a linked
/// container needs: one fixed-layout block per element, handed out and taken
/// back one at a time. Allocation is fallible and failures are reported as
/// [`AllocError`] instead of aborting.
///
/// Implementations must be interchangeable within a type: memory allocated by
/// one instance (or clone) of `Self` may be deallocated by any other instance
/// of `Self`. Containers rely on this when nodes move between them.
pub trait NodeAlloc: Clone {
    /// Allocates memory according to the given layout.
    ///
    /// # Errors
    /// Returns `AllocError` if allocation fails.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Deallocates memory.
    ///
    /// # Safety
    /// `ptr` must denote a block of memory currently allocated by an allocator of this type.
    /// `layout` must be the same layout that was used to allocate that block of memory.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The process-wide allocator, reached through `std::alloc`.
///
/// Zero-sized, so containers parameterized over it carry no extra state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Global;

impl NodeAlloc for Global {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            // SAFETY: alignment is a non-zero power of two, so this is a
            // well-aligned dangling pointer.
            return Ok(unsafe { NonNull::new_unchecked(layout.align() as *mut u8) });
        }

        // SAFETY: layout has a non-zero size.
        let raw = unsafe { alloc(layout) };
        NonNull::new(raw).ok_or(AllocError)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            dealloc(ptr.as_ptr(), layout);
        }
    }
}

/// The error type for allocation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError;

impl core::fmt::Display for AllocError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("memory allocation failed")
    }
}

impl std::error::Error for AllocError {}
