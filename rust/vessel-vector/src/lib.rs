//! A growable contiguous array with explicit size and capacity bookkeeping.
//!
//! [`SimpleVector`] stores its elements in a single [`ArrayPtr`] block. It keeps
//! the logical length apart from the allocated capacity, grows by doubling on
//! append and insert, and reports allocation failures as errors instead of
//! aborting.
//!
//! ```
//! use vessel_vector::{SimpleVector, simple_vec};
//!
//! let mut v = simple_vec![10, 20, 30];
//! v.insert(1, 15).unwrap();
//! assert_eq!(v.as_slice(), &[10, 15, 20, 30]);
//!
//! v.erase(0);
//! assert_eq!(v.as_slice(), &[15, 20, 30]);
//! assert!(v.at(3).is_err());
//! ```
//!
//! [`ArrayPtr`]: vessel_array_ptr::ArrayPtr

mod macros;
pub mod reserve;
pub mod simple_vector;

pub use reserve::{ReserveProxy, reserve};
pub use simple_vector::SimpleVector;
