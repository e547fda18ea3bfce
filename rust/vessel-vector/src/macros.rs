/// Creates a [`SimpleVector`](crate::SimpleVector) from a list of elements or
/// from a value and a count, like `vec!`.
///
/// The capacity equals the number of elements. Allocation failure diverges
/// through [`std::alloc::handle_alloc_error`], as `vec!` does.
///
/// ```
/// use vessel_vector::simple_vec;
///
/// let v = simple_vec![1, 2, 3];
/// assert_eq!(v.len(), 3);
/// assert_eq!(v.capacity(), 3);
///
/// let w = simple_vec!["x"; 2];
/// assert_eq!(w.as_slice(), &["x", "x"]);
///
/// let e: vessel_vector::SimpleVector<u8> = simple_vec![];
/// assert!(e.is_empty());
/// ```
#[macro_export]
macro_rules! simple_vec {
    () => {
        $crate::SimpleVector::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::SimpleVector::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::SimpleVector::from([$($x),+])
    };
}
