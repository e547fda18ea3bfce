use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Range};
use std::slice::SliceIndex;

use vessel_array_ptr::ArrayPtr;
use vessel_common::{Result, error::Error, verify_index};

use crate::reserve::ReserveProxy;

/// A growable, contiguous array built on a single [`ArrayPtr`] block.
///
/// The vector tracks its logical length (`len`) separately from the number of
/// allocated slots (`capacity`). Slots past `len` hold `T::default()` filler:
/// every slot in the block is always initialized, and a slot that stops being
/// part of the vector is reset to the default value at that moment, dropping
/// whatever it held.
///
/// # Growth
///
/// When an append or insert finds no free slot, the block is replaced by one
/// with twice the capacity (or [`MIN_NON_ZERO_CAPACITY`](Self::MIN_NON_ZERO_CAPACITY)
/// slots when empty). [`reserve`](Self::reserve) and [`resize`](Self::resize)
/// allocate exactly the requested size instead. Only a growing `resize` can
/// leave the vector with less capacity than before.
///
/// # Errors
///
/// Operations that allocate return `AllocationFailure` when the block cannot be
/// obtained. They build the new block first and only then swap it in, so a
/// failed call leaves the vector unchanged.
///
/// # Positions
///
/// Raw pointers obtained from [`as_ptr_range`](Self::as_ptr_range) or
/// [`as_ptr`](Self::as_ptr) are invalidated by every call that reallocates or
/// shifts elements: `reserve`, `resize`, `push_back`, `insert` and `erase`.
pub struct SimpleVector<T> {
    buffer: ArrayPtr<T>,
    size: usize,
    capacity: usize,
}

impl<T> SimpleVector<T> {
    /// Capacity of the first block allocated by a growing append or insert.
    pub const MIN_NON_ZERO_CAPACITY: usize = 2;

    /// Factor applied to a non-zero capacity when an append or insert grows the block.
    pub const GROWTH_FACTOR: usize = 2;

    /// Creates an empty vector without allocating.
    pub const fn new() -> SimpleVector<T> {
        SimpleVector {
            buffer: ArrayPtr::new(),
            size: 0,
            capacity: 0,
        }
    }

    /// Returns the number of elements in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buffer.as_slice()[..self.size]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buffer.as_mut_slice()[..self.size]
    }

    /// Returns a raw pointer to the first element (null if nothing was ever allocated).
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buffer.as_ptr()
    }

    /// Returns the begin and end positions of the elements.
    #[inline]
    pub fn as_ptr_range(&self) -> Range<*const T> {
        self.as_slice().as_ptr_range()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T> {
        verify_index!(index, self.size);
        Ok(&self.buffer[index])
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        verify_index!(index, self.size);
        Ok(&mut self.buffer[index])
    }

    /// Returns a reference to the element at `index` without bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.size);
        unsafe { self.buffer.get_unchecked(index) }
    }

    /// Returns a mutable reference to the element at `index` without bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.size);
        unsafe { self.buffer.get_unchecked_mut(index) }
    }

    /// Exchanges the contents of two vectors without touching any element.
    ///
    /// This shadows the slice method `<[T]>::swap(a, b)` reachable through
    /// `Deref`; swap two elements with `as_mut_slice().swap(a, b)` instead.
    pub fn swap(&mut self, other: &mut SimpleVector<T>) {
        self.buffer.swap(&mut other.buffer);
        std::mem::swap(&mut self.size, &mut other.size);
        std::mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Moves the contents out into a new vector, leaving `self` empty with
    /// no allocation.
    pub fn take(&mut self) -> SimpleVector<T> {
        let mut taken = SimpleVector::new();
        taken.swap(self);
        taken
    }

    /// Converts the vector into a `Vec` of its elements, reusing the block.
    pub fn into_vec(mut self) -> Vec<T> {
        let size = self.size;
        self.size = 0;
        self.capacity = 0;
        let mut vec = self
            .buffer
            .release()
            .map(|block| block.into_vec())
            .unwrap_or_default();
        vec.truncate(size);
        vec
    }

    /// Verifies the size and capacity bookkeeping against the owned block.
    ///
    /// # Panics
    ///
    /// Panics if the internal state of the vector is inconsistent.
    pub fn verify(&self) {
        assert!(self.size <= self.capacity);
        assert_eq!(self.capacity, self.buffer.capacity());
        assert_eq!(self.capacity != 0, self.buffer.is_allocated());
    }

    /// The capacity an append or insert grows to when the vector is full.
    #[inline]
    fn grown_capacity(&self) -> usize {
        std::cmp::max(
            self.capacity.saturating_mul(Self::GROWTH_FACTOR),
            Self::MIN_NON_ZERO_CAPACITY,
        )
    }
}

impl<T: Default> SimpleVector<T> {
    /// Creates a vector of `size` default-valued elements.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the block cannot be allocated.
    pub fn with_size(size: usize) -> Result<SimpleVector<T>> {
        Ok(SimpleVector {
            buffer: ArrayPtr::allocate(size)?,
            size,
            capacity: size,
        })
    }

    /// Creates an empty vector with `request.capacity()` slots allocated.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the block cannot be allocated.
    pub fn with_reserved(request: ReserveProxy) -> Result<SimpleVector<T>> {
        let capacity = request.capacity();
        Ok(SimpleVector {
            buffer: ArrayPtr::allocate(capacity)?,
            size: 0,
            capacity,
        })
    }

    /// Creates a vector holding `values` in iteration order, with capacity
    /// equal to the iterator's reported length.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the block cannot be allocated.
    pub fn from_values<I>(values: I) -> Result<SimpleVector<T>>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let values = values.into_iter();
        let capacity = values.len();
        let mut buffer = ArrayPtr::allocate(capacity)?;
        let mut size = 0;
        for (slot, value) in buffer.iter_mut().zip(values) {
            *slot = value;
            size += 1;
        }
        Ok(SimpleVector {
            buffer,
            size,
            capacity,
        })
    }

    /// Ensures room for at least `new_capacity` elements.
    ///
    /// If `new_capacity` exceeds the current capacity, the elements move to a
    /// block of exactly `new_capacity` slots; otherwise nothing happens.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the new block cannot be allocated; the
    /// vector is left unchanged.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity > self.capacity {
            self.reallocate(new_capacity, None)?;
        }
        Ok(())
    }

    /// Changes the number of elements to `new_size`.
    ///
    /// Shrinking resets the removed slots to the default value and keeps the
    /// capacity. Growing moves the elements to a block of exactly `new_size`
    /// slots, even when the current capacity would have sufficed, and fills the
    /// new tail with default values.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if growing cannot allocate the new block; the
    /// vector is left unchanged.
    pub fn resize(&mut self, new_size: usize) -> Result<()> {
        if new_size <= self.size {
            self.truncate(new_size);
            return Ok(());
        }
        self.reallocate(new_size, None)?;
        self.size = new_size;
        Ok(())
    }

    /// Appends `value` to the back of the vector.
    ///
    /// Amortized O(1); a call that finds the vector full moves every element
    /// into a block of twice the capacity.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if growing fails. `value` is dropped and the
    /// vector is left unchanged.
    pub fn push_back(&mut self, value: T) -> Result<()> {
        if self.size == self.capacity {
            self.reallocate(self.grown_capacity(), None)?;
        }
        self.buffer[self.size] = value;
        self.size += 1;
        Ok(())
    }

    /// Removes the last element and returns it, or `None` if the vector is empty.
    ///
    /// The slot stays allocated and is reset to the default value.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.size == 0 {
            return None;
        }
        self.size -= 1;
        Some(std::mem::take(&mut self.buffer[self.size]))
    }

    /// Inserts `value` at `index`, shifting the elements from `index` onward one
    /// slot to the back. `index == len()` appends.
    ///
    /// Returns the index of the inserted element.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the vector is full and growing fails.
    /// `value` is dropped and the vector is left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<usize> {
        assert!(
            index <= self.size,
            "insert index {index} is out of range for size {}",
            self.size
        );
        if self.size < self.capacity {
            let slots = self.buffer.as_mut_slice();
            // Walk from the back: the free slot at `size` travels down to
            // `index`, and every element is moved before its old slot is reused.
            let mut slot = self.size;
            while slot > index {
                slots.swap(slot, slot - 1);
                slot -= 1;
            }
            slots[index] = value;
        } else {
            self.reallocate(self.grown_capacity(), Some(index))?;
            self.buffer[index] = value;
        }
        self.size += 1;
        Ok(index)
    }

    /// Removes the element at `index`, shifting the elements after it one slot
    /// to the front.
    ///
    /// Returns the index now holding the element that followed the removed
    /// one, which equals `len()` when the last element was removed.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn erase(&mut self, index: usize) -> usize {
        assert!(
            index < self.size,
            "erase index {index} is out of range for size {}",
            self.size
        );
        let slots = &mut self.buffer.as_mut_slice()[..self.size];
        for slot in index + 1..slots.len() {
            slots.swap(slot - 1, slot);
        }
        self.size -= 1;
        self.buffer[self.size] = T::default();
        index
    }

    /// Removes all elements. The capacity is retained.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Appends clones of every element of `values`.
    ///
    /// The block grows by the usual doubling steps until the new elements fit,
    /// before any element is cloned.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if growing fails; the vector is left unchanged.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<()>
    where
        T: Clone,
    {
        let required = self
            .size
            .checked_add(values.len())
            .ok_or_else(|| Error::allocation_failure::<T>(usize::MAX))?;
        if required > self.capacity {
            let mut new_capacity = self.grown_capacity();
            while new_capacity < required {
                new_capacity = new_capacity.saturating_mul(Self::GROWTH_FACTOR);
            }
            self.reallocate(new_capacity, None)?;
        }
        let tail = &mut self.buffer.as_mut_slice()[self.size..required];
        for (slot, value) in tail.iter_mut().zip(values) {
            slot.clone_from(value);
        }
        self.size = required;
        Ok(())
    }

    /// Resets the slots in `[new_size, len())` to the default value.
    fn truncate(&mut self, new_size: usize) {
        if new_size >= self.size {
            return;
        }
        self.buffer.as_mut_slice()[new_size..self.size]
            .iter_mut()
            .for_each(|slot| *slot = T::default());
        self.size = new_size;
    }

    /// Moves the elements into a new block of `new_capacity` slots.
    ///
    /// With `gap = Some(index)`, elements from `index` onward land one slot
    /// further back, leaving slot `index` holding a default value.
    fn reallocate(&mut self, new_capacity: usize, gap: Option<usize>) -> Result<()> {
        debug_assert!(new_capacity >= self.size + usize::from(gap.is_some()));
        let mut block = ArrayPtr::<T>::allocate(new_capacity)?;
        log::debug!(
            "SimpleVector: reallocating {} -> {new_capacity} slots ({} elements)",
            self.capacity,
            self.size
        );

        let live = &mut self.buffer.as_mut_slice()[..self.size];
        for (index, value) in live.iter_mut().enumerate() {
            let target = match gap {
                Some(gap) if index >= gap => index + 1,
                _ => index,
            };
            std::mem::swap(&mut block[target], value);
        }

        self.buffer.swap(&mut block);
        self.capacity = new_capacity;
        Ok(())
    }
}

impl<T: Clone> SimpleVector<T> {
    /// Creates a vector of `size` clones of `value`.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the block cannot be allocated.
    pub fn with_value(size: usize, value: T) -> Result<SimpleVector<T>> {
        Ok(SimpleVector {
            buffer: ArrayPtr::allocate_with_value(size, &value)?,
            size,
            capacity: size,
        })
    }

    /// Like [`with_value`](Self::with_value), but diverges on allocation
    /// failure the way `vec![value; size]` does.
    pub fn from_elem(value: T, size: usize) -> SimpleVector<T> {
        Self::with_value(size, value).unwrap_or_else(|e| e.handle_alloc_failure())
    }

    /// Creates a vector holding clones of `values`, with capacity equal to its length.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the block cannot be allocated.
    pub fn from_slice(values: &[T]) -> Result<SimpleVector<T>> {
        Ok(SimpleVector {
            buffer: ArrayPtr::allocate_with(values.len(), |i| values[i].clone())?,
            size: values.len(),
            capacity: values.len(),
        })
    }

    /// Returns a deep copy with its own block of exactly `len()` slots.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the block cannot be allocated.
    pub fn try_clone(&self) -> Result<SimpleVector<T>> {
        Self::from_slice(self.as_slice())
    }

    /// Replaces the contents of `self` with a deep copy of `other`.
    ///
    /// The copy is built completely before it is swapped in, so on failure
    /// `self` is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailure` if the copy cannot be allocated.
    pub fn assign_from(&mut self, other: &SimpleVector<T>) -> Result<()> {
        let mut copy = other.try_clone()?;
        self.swap(&mut copy);
        Ok(())
    }
}

impl<T> Default for SimpleVector<T> {
    fn default() -> Self {
        SimpleVector::new()
    }
}

impl<T: Clone> Clone for SimpleVector<T> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|e| e.handle_alloc_failure())
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(e) = self.assign_from(source) {
            e.handle_alloc_failure();
        }
    }
}

impl<T, I: SliceIndex<[T]>> std::ops::Index<I> for SimpleVector<T> {
    type Output = I::Output;

    /// # Panics
    ///
    /// Panics if `index` reaches past `len()`. Use [`SimpleVector::at`] for a
    /// checked lookup that returns an error instead.
    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T, I: SliceIndex<[T]>> std::ops::IndexMut<I> for SimpleVector<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T> Deref for SimpleVector<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for SimpleVector<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for SimpleVector<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for SimpleVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleVector")
            .field("data", &self.as_slice())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T: PartialEq> PartialEq for SimpleVector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for SimpleVector<T> {}

impl<T: PartialOrd> PartialOrd for SimpleVector<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for SimpleVector<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for SimpleVector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<'a, T> IntoIterator for &'a SimpleVector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SimpleVector<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for SimpleVector<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<T> From<Vec<T>> for SimpleVector<T> {
    /// Adopts the elements of `vec`; the resulting capacity equals its length.
    fn from(vec: Vec<T>) -> Self {
        let buffer = ArrayPtr::from_boxed_slice(vec.into_boxed_slice());
        let size = buffer.capacity();
        SimpleVector {
            buffer,
            size,
            capacity: size,
        }
    }
}

impl<T, const N: usize> From<[T; N]> for SimpleVector<T> {
    fn from(values: [T; N]) -> Self {
        SimpleVector::from(Vec::from(values))
    }
}

impl<T> FromIterator<T> for SimpleVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        SimpleVector::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T: Default> TryFrom<ReserveProxy> for SimpleVector<T> {
    type Error = Error;

    fn try_from(request: ReserveProxy) -> Result<Self> {
        SimpleVector::with_reserved(request)
    }
}
