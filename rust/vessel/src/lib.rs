//! # Vessel: owning buffers and a growable array
//!
//! Vessel provides a small stack of value-semantics containers built directly on
//! the global allocator, with allocation failures reported as errors instead of
//! aborting the process.
//!
//! ## Module Organization
//!
//! * [`common`] - Error and result types shared by every crate
//! * [`vector`] - [`SimpleVector`](vector::SimpleVector), the growable array,
//!   and the [`reserve`](vector::reserve) capacity request
//!
//! ### Support Modules
//!
//! * [`support::array_ptr`] - The move-only owning block the vector is built on
//!
//! ## Getting Started
//!
//! ```
//! use vessel::vector::{SimpleVector, reserve};
//!
//! let mut v = SimpleVector::<u64>::with_reserved(reserve(4))?;
//! for i in 0..6 {
//!     v.push_back(i)?;
//! }
//! assert_eq!(v.len(), 6);
//! assert_eq!(v.capacity(), 8);
//! assert!(v.at(6).is_err());
//! # Ok::<(), vessel::common::error::Error>(())
//! ```

pub use vessel_common as common;
pub use vessel_vector as vector;

pub mod support {
    pub use vessel_array_ptr as array_ptr;
}
