//! the handle type

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::NonZeroU32;

/// An opaque 32-bit token naming one record in a [`Registry`](crate::Registry).
///
/// A handle stays valid across insertions and removals of *other* records, even though those
/// operations can move its record to a different storage position. Once the record is removed,
/// looking the handle up reports "not found" until the registry hands the same handle out again
/// to a new record. Handles are recycled most-recently-freed first.
///
/// The bit pattern is not a storage position and carries no meaning for callers. Use
/// [`to_bits`](Handle::to_bits) and [`from_bits`](Handle::from_bits) only to move a handle
/// through code that can't hold the typed value.
///
/// # Example
///
/// ```
/// use dense_registry::{Handle, Registry};
///
/// let mut registry = Registry::<u64>::new();
/// let handle = registry.insert(7);
/// let bits = handle.to_bits();
/// assert_eq!(Handle::<u64>::from_bits(bits), Some(handle));
/// assert_eq!(std::mem::size_of::<Option<Handle<u64>>>(), 4);
/// ```
// Note that we can't use #[derive(...)] for common traits here, because Handle should be Copy
// and Ord and Eq even when T isn't. See https://github.com/rust-lang/rust/issues/108894.
#[repr(transparent)]
pub struct Handle<T>(
    NonZeroU32,
    // https://doc.rust-lang.org/nomicon/phantom-data.html#table-of-phantomdata-patterns
    PhantomData<fn() -> T>,
);

impl<T> Handle<T> {
    /// The slot index must be less than `u32::MAX`.
    pub(crate) fn from_index(index: u32) -> Self {
        debug_assert!(index < u32::MAX, "slot index out of range");
        // Adding 1 here makes index=u32::MAX unrepresentable, rather than index=0.
        match NonZeroU32::new(index.wrapping_add(1)) {
            Some(bits) => Self(bits, PhantomData),
            None => panic!("slot index out of range"),
        }
    }

    pub(crate) fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// The raw 32-bit token. Never zero.
    pub fn to_bits(self) -> u32 {
        self.0.get()
    }

    /// Rebuild a handle from [`to_bits`](Handle::to_bits). Returns `None` for zero, which no
    /// handle ever uses. Any other value is accepted: registry lookups with a handle that was
    /// never issued simply miss.
    pub fn from_bits(bits: u32) -> Option<Self> {
        NonZeroU32::new(bits).map(|bits| Self(bits, PhantomData))
    }
}

impl<T> Copy for Handle<T> {}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Handle({})", self.index())
    }
}

impl<T> Hash for Handle<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.0.hash(state);
    }
}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Handle<T> {}

impl<T> PartialOrd for Handle<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Handle<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct NotCopy;

    #[test]
    fn test_bits_round_trip() {
        for index in [0, 1, 255, u32::MAX - 1] {
            let handle = Handle::<NotCopy>::from_index(index);
            assert_eq!(handle.index(), index);
            assert_eq!(Handle::from_bits(handle.to_bits()), Some(handle));
        }
        assert_eq!(Handle::<NotCopy>::from_bits(0), None);
    }

    #[test]
    fn test_traits_without_bounds_on_t() {
        let a = Handle::<NotCopy>::from_index(3);
        let b = a;
        assert_eq!(a, b);
        assert!(Handle::<NotCopy>::from_index(2) < a);
        assert_eq!(format!("{:?}", a), "Handle(3)");
    }

    #[test]
    fn test_handle_sizes() {
        assert_eq!(4, std::mem::size_of::<Handle<()>>());
        assert_eq!(4, std::mem::size_of::<Option<Handle<()>>>());
    }
}
