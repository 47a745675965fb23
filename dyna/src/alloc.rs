//! Allocator interface for [`DynArray`](crate::DynArray) storage

use std::alloc::{Layout, alloc, dealloc, handle_alloc_error};
use std::ptr::NonNull;

/// A trait for all allocators that collections can be generic about
///
/// Allocators are stateless type-level capabilities: every instance of one
/// allocator type manages the same pool, so two containers parameterized by
/// the same allocator can always adopt each other's buffers. Swapping the
/// type swaps the pool.
pub trait Allocator {
    /// Allocate uninitialized storage for `count` elements of `T`
    ///
    /// The returned memory is owned by the caller until it is passed back
    /// through [`deallocate`](Allocator::deallocate) with the same `count`.
    /// Zero size requests (zero `count` or zero sized `T`) return a dangling
    /// pointer and must not touch the pool.
    fn allocate<T>(count: usize) -> *mut T;

    /// Release storage previously obtained from [`allocate`](Allocator::allocate)
    ///
    /// # Safety
    ///
    /// `ptr` must have come from a call to `allocate::<T>(count)` on this
    /// allocator type with the same `count`, and must not be used afterwards.
    unsafe fn deallocate<T>(ptr: *mut T, count: usize);
}

/// An implementation of [`Allocator`] on the general purpose heap
pub struct DefaultHeap;

impl Allocator for DefaultHeap {
    fn allocate<T>(count: usize) -> *mut T {
        let layout = Layout::array::<T>(count).expect("allocation size overflow");
        if layout.size() == 0 {
            return NonNull::dangling().as_ptr();
        }
        let ptr = unsafe { alloc(layout) };
        if ptr.is_null() {
            // out of memory is not recovered from locally
            handle_alloc_error(layout);
        }
        ptr as *mut T
    }

    unsafe fn deallocate<T>(ptr: *mut T, count: usize) {
        let layout = Layout::array::<T>(count).expect("allocation size overflow");
        if layout.size() != 0 {
            unsafe { dealloc(ptr as *mut u8, layout) }
        }
    }
}
