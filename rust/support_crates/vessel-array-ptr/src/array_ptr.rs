//! Owning pointer to a heap-allocated array.
//!
//! This module provides `ArrayPtr`, a move-only handle to a single block of
//! `capacity` initialized elements obtained from the global allocator.
//!
//! # Ownership
//!
//! An `ArrayPtr` is either empty (null, no allocation) or the exclusive owner of
//! one block. The type is not `Clone`: duplicating the handle would produce two
//! owners of the same block. Ownership leaves the handle only through
//! [`ArrayPtr::release`] (the block comes back as a `Box<[T]>`) or is exchanged
//! with another handle through [`ArrayPtr::swap`].
//!
//! # Element lifecycle
//!
//! Elements are constructed only when the whole block is allocated and are
//! dropped only when the whole block is released. Writing into a slot replaces
//! the value that was there; no slot is ever left uninitialized.

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};
use std::slice::SliceIndex;

use vessel_common::{Result, error::Error};

/// An owning pointer to a heap block of `T` values.
///
/// The block holds exactly [`capacity`](Self::capacity) initialized elements.
/// An empty handle owns nothing and reports a capacity of zero.
pub struct ArrayPtr<T> {
    /// Start of the owned block, or null when nothing is owned.
    ptr: *mut T,
    /// Number of elements in the owned block.
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<T> ArrayPtr<T> {
    /// Creates an empty handle that owns no memory.
    pub const fn new() -> ArrayPtr<T> {
        ArrayPtr {
            ptr: ptr::null_mut(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates a block of `capacity` default-valued elements.
    ///
    /// A `capacity` of zero allocates nothing and returns an empty handle.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the byte size of the block overflows or
    /// the global allocator cannot serve the request. Nothing stays allocated
    /// on failure.
    pub fn allocate(capacity: usize) -> Result<ArrayPtr<T>>
    where
        T: Default,
    {
        Self::allocate_with(capacity, |_| T::default())
    }

    /// Allocates a block of `capacity` elements, each a clone of `value`.
    ///
    /// # Errors
    ///
    /// Same as [`allocate`](Self::allocate).
    pub fn allocate_with_value(capacity: usize, value: &T) -> Result<ArrayPtr<T>>
    where
        T: Clone,
    {
        Self::allocate_with(capacity, |_| value.clone())
    }

    /// Allocates a block of `capacity` elements, calling `make` with each slot
    /// index in ascending order to produce the slot's value.
    ///
    /// If `make` panics, the elements built so far are dropped and the block is
    /// freed before the panic propagates.
    pub fn allocate_with<F>(capacity: usize, mut make: F) -> Result<ArrayPtr<T>>
    where
        F: FnMut(usize) -> T,
    {
        if capacity == 0 {
            return Ok(ArrayPtr::new());
        }

        let layout =
            Layout::array::<T>(capacity).map_err(|_| Error::allocation_failure::<T>(capacity))?;
        let ptr = if layout.size() == 0 {
            NonNull::<T>::dangling().as_ptr()
        } else {
            // SAFETY: `layout` has a non-zero size.
            let ptr = unsafe { alloc::alloc(layout) } as *mut T;
            if ptr.is_null() {
                return Err(Error::allocation_failure::<T>(capacity));
            }
            ptr
        };

        let mut block = PartialBlock {
            ptr,
            layout,
            initialized: 0,
        };
        while block.initialized < capacity {
            let value = make(block.initialized);
            // SAFETY: the slot lies inside the block and has not been written yet.
            unsafe { block.ptr.add(block.initialized).write(value) };
            block.initialized += 1;
        }
        std::mem::forget(block);

        log::trace!(
            "ArrayPtr: allocated {capacity} elements ({} bytes)",
            layout.size()
        );
        Ok(ArrayPtr {
            ptr,
            capacity,
            _marker: PhantomData,
        })
    }

    /// Takes ownership of an existing boxed slice.
    ///
    /// An empty slice produces an empty handle.
    pub fn from_boxed_slice(block: Box<[T]>) -> ArrayPtr<T> {
        let capacity = block.len();
        if capacity == 0 {
            return ArrayPtr::new();
        }
        ArrayPtr {
            ptr: Box::into_raw(block) as *mut T,
            capacity,
            _marker: PhantomData,
        }
    }

    /// Consumes the handle and returns the owned block as a boxed slice
    /// (an empty slice when nothing is owned).
    pub fn into_boxed_slice(mut self) -> Box<[T]> {
        self.release().unwrap_or_default()
    }

    /// Returns the number of elements in the owned block.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if this handle currently owns a block.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        !self.ptr.is_null()
    }

    /// Returns a raw pointer to the start of the block, or null when empty.
    ///
    /// The pointer is valid until the handle is dropped, released or swapped.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr
    }

    /// Returns a mutable raw pointer to the start of the block, or null when empty.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr
    }

    /// Returns the whole block as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        if self.ptr.is_null() {
            return &[];
        }
        // SAFETY: a non-null `ptr` points to `capacity` initialized elements.
        unsafe { std::slice::from_raw_parts(self.ptr, self.capacity) }
    }

    /// Returns the whole block as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if self.ptr.is_null() {
            return &mut [];
        }
        // SAFETY: a non-null `ptr` points to `capacity` initialized elements,
        // and `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr, self.capacity) }
    }

    /// Returns a reference to the element in slot `index` without bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`capacity`](Self::capacity).
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.capacity);
        unsafe { &*self.ptr.add(index) }
    }

    /// Returns a mutable reference to the element in slot `index` without
    /// bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`capacity`](Self::capacity).
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.capacity);
        unsafe { &mut *self.ptr.add(index) }
    }

    /// Hands the owned block to the caller and leaves this handle empty.
    ///
    /// Returns `None` when nothing is owned, including on every call after the
    /// first one.
    #[must_use = "dropping the released block frees it immediately"]
    pub fn release(&mut self) -> Option<Box<[T]>> {
        if self.ptr.is_null() {
            return None;
        }
        let slice = ptr::slice_from_raw_parts_mut(self.ptr, self.capacity);
        self.ptr = ptr::null_mut();
        self.capacity = 0;
        // SAFETY: the block was produced either by `allocate_with`, using the
        // global allocator with `Layout::array::<T>(capacity)`, or by
        // `Box::<[T]>::into_raw`; both match the layout `Box<[T]>` frees with.
        // All elements are initialized and the handle no longer refers to them.
        Some(unsafe { Box::from_raw(slice) })
    }

    /// Exchanges the owned blocks of two handles. No element is touched.
    #[inline]
    pub fn swap(&mut self, other: &mut ArrayPtr<T>) {
        std::mem::swap(&mut self.ptr, &mut other.ptr);
        std::mem::swap(&mut self.capacity, &mut other.capacity);
    }
}

impl<T> Default for ArrayPtr<T> {
    fn default() -> Self {
        ArrayPtr::new()
    }
}

impl<T> Drop for ArrayPtr<T> {
    /// Drops every element of the owned block and returns the memory to the
    /// global allocator.
    fn drop(&mut self) {
        if let Some(block) = self.release() {
            log::trace!("ArrayPtr: releasing {} elements", block.len());
            drop(block);
        }
    }
}

impl<T, I: SliceIndex<[T]>> std::ops::Index<I> for ArrayPtr<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T, I: SliceIndex<[T]>> std::ops::IndexMut<I> for ArrayPtr<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T> std::ops::Deref for ArrayPtr<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> std::ops::DerefMut for ArrayPtr<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> From<Box<[T]>> for ArrayPtr<T> {
    fn from(block: Box<[T]>) -> Self {
        ArrayPtr::from_boxed_slice(block)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ArrayPtr<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayPtr")
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .field("data", &self.as_slice())
            .finish()
    }
}

// SAFETY: ArrayPtr exclusively owns its elements, so moving it to another
// thread moves the elements with it.
unsafe impl<T: Send> Send for ArrayPtr<T> {}

// SAFETY: shared access to ArrayPtr only hands out shared references to the
// elements.
unsafe impl<T: Sync> Sync for ArrayPtr<T> {}

/// A block whose first `initialized` slots hold values.
///
/// Dropping it drops those values and frees the block; `allocate_with` forgets
/// it once every slot is written.
struct PartialBlock<T> {
    ptr: *mut T,
    layout: Layout,
    initialized: usize,
}

impl<T> Drop for PartialBlock<T> {
    fn drop(&mut self) {
        // SAFETY: exactly the first `initialized` slots were written, and the
        // block was allocated with `layout` unless that layout is zero-sized.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr, self.initialized));
            if self.layout.size() != 0 {
                alloc::dealloc(self.ptr as *mut u8, self.layout);
            }
        }
    }
}
