//! Capacity requests for constructing an empty vector with storage reserved up front.

/// A request for a [`SimpleVector`](crate::SimpleVector) with `capacity` slots
/// reserved and no elements.
///
/// The type only exists to select that construction path, see
/// [`SimpleVector::with_reserved`](crate::SimpleVector::with_reserved).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReserveProxy {
    capacity: usize,
}

impl ReserveProxy {
    pub const fn new(capacity: usize) -> ReserveProxy {
        ReserveProxy { capacity }
    }

    /// The number of slots to reserve.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Shorthand for [`ReserveProxy::new`].
///
/// ```
/// use vessel_vector::{SimpleVector, reserve};
///
/// let v = SimpleVector::<u32>::with_reserved(reserve(8)).unwrap();
/// assert_eq!(v.len(), 0);
/// assert_eq!(v.capacity(), 8);
/// ```
pub const fn reserve(capacity: usize) -> ReserveProxy {
    ReserveProxy::new(capacity)
}
