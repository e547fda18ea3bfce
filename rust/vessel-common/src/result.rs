pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Checks that `index` addresses one of the first `size` elements,
/// returning `IndexOutOfRange` from the enclosing function otherwise.
#[macro_export]
macro_rules! verify_index {
    ($index:expr, $size:expr) => {{
        $crate::result::verify_index($index, $size)?;
    }};
}

#[inline]
pub fn verify_index(index: usize, size: usize) -> Result<()> {
    if index < size {
        Ok(())
    } else {
        index_out_of_range(index, size)
    }
}

#[cold]
pub fn index_out_of_range(index: usize, size: usize) -> Result<()> {
    Err(crate::error::ErrorKind::IndexOutOfRange {
        requested: index,
        size,
    }
    .into())
}
