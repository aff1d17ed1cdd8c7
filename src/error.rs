//! error types

use std::fmt;

/// Returned by [`try_insert`](crate::Registry::try_insert) and
/// [`insert_default`](crate::Registry::insert_default) when every handle is already issued.
/// The rejected record comes back through [`into_inner`](InsertError::into_inner).
#[derive(Copy, Clone)]
pub struct InsertError<T> {
    pub(crate) capacity: usize,
    pub(crate) inner: T,
}

impl<T> InsertError<T> {
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> fmt::Debug for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("InsertError")
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "registry is full (capacity {})", self.capacity)
    }
}

impl<T> std::error::Error for InsertError<T> {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum RemoveErrorKind {
    /// The handle is free: never issued, or already removed.
    NotLive,
    /// The handle's index is beyond this registry's capacity, so it can't have come from here.
    OutOfBounds,
}

/// Returned by [`remove`](crate::Registry::remove). Nothing in the registry changes when this
/// is returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RemoveError {
    pub(crate) kind: RemoveErrorKind,
}

impl RemoveError {
    pub fn kind(&self) -> RemoveErrorKind {
        self.kind
    }
}

impl fmt::Display for RemoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let message = match self.kind {
            RemoveErrorKind::NotLive => "handle is not live",
            RemoveErrorKind::OutOfBounds => "handle index out of bounds",
        };
        write!(f, "{}", message)
    }
}

impl std::error::Error for RemoveError {}
