//! Single-owner heap blocks of typed elements.
//!
//! [`ArrayPtr`] is the storage primitive underneath the growable containers in
//! the vessel workspace. It owns at most one contiguous block, never duplicates
//! it, and releases it exactly once: on drop, or when ownership is handed out
//! through [`ArrayPtr::release`].

pub mod array_ptr;

pub use array_ptr::ArrayPtr;
