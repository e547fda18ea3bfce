use std::alloc::Layout;

use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Allocation of `requested` elements of type `T` could not be satisfied.
    pub fn allocation_failure<T>(requested: usize) -> Error {
        Error(
            ErrorKind::AllocationFailure {
                requested,
                element_size: std::mem::size_of::<T>(),
                align: std::mem::align_of::<T>(),
            }
            .into(),
        )
    }

    pub fn index_out_of_range(requested: usize, size: usize) -> Error {
        Error(ErrorKind::IndexOutOfRange { requested, size }.into())
    }

    pub fn is_allocation_failure(&self) -> bool {
        matches!(self.kind(), ErrorKind::AllocationFailure { .. })
    }

    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self.kind(), ErrorKind::IndexOutOfRange { .. })
    }

    /// Diverges the way the standard collections do when an infallible API
    /// hits an allocation failure.
    ///
    /// `AllocationFailure` is forwarded to [`std::alloc::handle_alloc_error`]
    /// with the layout that could not be served. A request whose byte size is
    /// not representable as a `Layout` panics with a capacity overflow message,
    /// and any other error kind panics with its description.
    #[cold]
    pub fn handle_alloc_failure(self) -> ! {
        match self.into_kind() {
            ErrorKind::AllocationFailure {
                requested,
                element_size,
                align,
            } => {
                let layout = requested
                    .checked_mul(element_size)
                    .and_then(|size| Layout::from_size_align(size, align).ok());
                match layout {
                    Some(layout) => std::alloc::handle_alloc_error(layout),
                    None => panic!(
                        "capacity overflow: {requested} elements of {element_size} bytes"
                    ),
                }
            }
            kind => panic!("{kind}"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error(
        "failed to allocate {requested} elements of {element_size} bytes (align {align})"
    )]
    AllocationFailure {
        requested: usize,
        element_size: usize,
        align: usize,
    },

    #[error("index {requested} is out of range for size {size}")]
    IndexOutOfRange { requested: usize, size: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
