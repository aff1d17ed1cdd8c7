//! Stable handles over densely packed records.
//!
//! A [`Registry`] stores its records in one contiguous array with no holes, so iterating over
//! them is a plain slice walk. Callers refer to records through [`Handle`]s, which keep pointing
//! at the same record while other records come and go. Insertion, removal, and lookup are all
//! O(1). Removal moves at most one record: the last one, into the gap.
//!
//! Capacity is fixed at compile time with a [`typenum`] type parameter (256 by default), and all
//! storage is allocated up front.
//!
//! # Example
//!
//! ```
//! use dense_registry::Registry;
//!
//! #[derive(Default)]
//! struct Mesh {
//!     dummy: i32,
//! }
//!
//! let mut meshes = Registry::<Mesh>::new();
//! let a = meshes.insert(Mesh { dummy: 0 });
//! let b = meshes.insert(Mesh { dummy: 1 });
//! let c = meshes.insert(Mesh { dummy: 2 });
//!
//! meshes.remove(b).unwrap();
//! let dummies: Vec<i32> = meshes.values().map(|mesh| mesh.dummy).collect();
//! assert_eq!(dummies, [0, 2]);
//! assert_eq!(meshes[a].dummy, 0);
//! assert_eq!(meshes[c].dummy, 2);
//! assert!(meshes.get(b).is_none());
//! ```

use std::fmt;
use std::marker::PhantomData;
use typenum::Unsigned;

pub mod error;
pub mod handle;
pub mod handle_map;
pub mod iter;
mod slot;


pub use error::{InsertError, RemoveError, RemoveErrorKind};
pub use handle::Handle;

use error::RemoveErrorKind::{NotLive, OutOfBounds};
use iter::{Handles, IntoIter, Iter, IterMut};
use slot::Slot;

// This "static" assert gets compiled out for any capacity we accept.
fn static_assert_capacity<N: Unsigned>() {
    // Handle reserves index u32::MAX, and positions are stored as u32.
    assert!(N::U64 < u32::MAX as u64, "capacity must be less than u32::MAX");
}

/// the default capacity, matching the usual fixed-size record tables
pub type DefaultCapacity = typenum::U256;

/// A fixed-capacity collection of densely packed records addressed by stable [`Handle`]s.
///
/// `N` is the maximum number of live records, as a [`typenum`] unsigned integer. Everything the
/// registry will ever need is allocated in the constructor.
pub struct Registry<T, N: Unsigned = DefaultCapacity> {
    // INVARIANTS:
    // 1. values and back_refs always have the same length, which is the number of live records,
    //    and neither ever grows beyond N.
    // 2. For every position p < values.len(), slots[back_refs[p]] == Occupied { position: p }.
    // 3. Every other slot is Free and appears exactly once on the chain starting at free_head.
    values: Vec<T>,
    back_refs: Vec<u32>,
    slots: Box<[Slot]>,
    free_head: Option<u32>,
    _capacity: PhantomData<N>,
}

impl<T> Registry<T, DefaultCapacity> {
    /// Construct a new, empty `Registry<T>` with the default capacity of 256.
    pub fn new() -> Self {
        Self::with_capacity_type()
    }
}

impl<T, N: Unsigned> Registry<T, N> {
    /// Construct a new, empty `Registry<T>` with a custom capacity.
    ///
    /// ```
    /// use dense_registry::Registry;
    /// use typenum::U4;
    ///
    /// let registry = Registry::<String, U4>::with_capacity_type();
    /// assert_eq!(registry.capacity(), 4);
    /// ```
    pub fn with_capacity_type() -> Self {
        static_assert_capacity::<N>();
        let (slots, free_head) = slot::new_table(N::USIZE);
        Self {
            values: Vec::with_capacity(N::USIZE),
            back_refs: Vec::with_capacity(N::USIZE),
            slots,
            free_head,
            _capacity: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        N::USIZE
    }

    pub fn is_full(&self) -> bool {
        self.free_head.is_none()
    }

    /// The current storage position of a live handle's record, or `None` if the handle isn't
    /// live. Positions change whenever another record is removed.
    ///
    /// This is the liveness check behind every lookup. The slot table entry for the handle has
    /// to be occupied *and* the back-reference at that position has to name the same handle.
    pub fn position(&self, handle: Handle<T>) -> Option<usize> {
        let index = handle.index();
        let position = self.slots.get(index as usize)?.position()? as usize;
        if position < self.back_refs.len() && self.back_refs[position] == index {
            Some(position)
        } else {
            None
        }
    }

    /// The handle whose record currently sits at `position`, if `position < len()`.
    pub fn handle_at(&self, position: usize) -> Option<Handle<T>> {
        self.back_refs
            .get(position)
            .map(|&index| Handle::from_index(index))
    }

    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.position(handle).is_some()
    }

    /// Get a reference to a record. Returns `None` for any handle that isn't live, including
    /// handles that were removed, never issued, or issued by a different registry with a larger
    /// capacity.
    ///
    /// The reference borrows the registry, so it can't outlive the next insert or remove (either
    /// of which may move the record).
    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        let position = self.position(handle)?;
        self.values.get(position)
    }

    /// Get a mutable reference to a record. Returns `None` for any handle that isn't live.
    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        let position = self.position(handle)?;
        self.values.get_mut(position)
    }

    /// Insert a record at the end of the dense array and return its handle, or give the record
    /// back if every handle is already issued.
    ///
    /// The handle comes from the head of the free list, so the most recently removed handle is
    /// reissued first. In a registry that has never had a removal, handles are issued in
    /// ascending order.
    pub fn try_insert(&mut self, value: T) -> Result<Handle<T>, InsertError<T>> {
        let Some(index) = self.free_head else {
            log::debug!("insert rejected, registry is full at capacity {}", N::USIZE);
            return Err(InsertError {
                capacity: N::USIZE,
                inner: value,
            });
        };
        let next = match self.slots[index as usize] {
            Slot::Free { next } => next,
            Slot::Occupied { .. } => panic!("free list reached an occupied slot"),
        };
        // The Vecs were allocated with room for N records, and the free list has exactly
        // N - len entries, so these pushes never reallocate.
        let position = self.values.len();
        debug_assert!(position < N::USIZE);
        self.values.push(value);
        self.back_refs.push(index);
        self.slots[index as usize] = Slot::Occupied {
            position: position as u32,
        };
        self.free_head = next;
        let handle = Handle::from_index(index);
        log::trace!("inserted {:?} at position {}", handle, position);
        Ok(handle)
    }

    /// Like [`try_insert`](Registry::try_insert), but panics if the registry is full.
    pub fn insert(&mut self, value: T) -> Handle<T> {
        match self.try_insert(value) {
            Ok(handle) => handle,
            Err(error) => panic!("{}", error),
        }
    }

    /// Insert a default-initialized record.
    pub fn insert_default(&mut self) -> Result<Handle<T>, InsertError<T>>
    where
        T: Default,
    {
        self.try_insert(T::default())
    }

    /// Remove a record and return it.
    ///
    /// The last record in the dense array moves into the vacated position, so the array stays
    /// gap-free and exactly one record moves, no matter how many are live. The handle goes to
    /// the head of the free list.
    ///
    /// Removing a handle that isn't live is an error, and leaves the registry untouched.
    ///
    /// ```
    /// use dense_registry::{Registry, RemoveErrorKind};
    ///
    /// let mut registry = Registry::<&str>::new();
    /// let handle = registry.insert("foo");
    /// assert_eq!(registry.remove(handle), Ok("foo"));
    /// let error = registry.remove(handle).unwrap_err();
    /// assert_eq!(error.kind(), RemoveErrorKind::NotLive);
    /// ```
    pub fn remove(&mut self, handle: Handle<T>) -> Result<T, RemoveError> {
        if handle.index() as usize >= self.slots.len() {
            log::debug!("remove rejected, {:?} is out of bounds", handle);
            return Err(RemoveError { kind: OutOfBounds });
        }
        let Some(position) = self.position(handle) else {
            log::debug!("remove rejected, {:?} is not live", handle);
            return Err(RemoveError { kind: NotLive });
        };
        Ok(self.remove_at(position))
    }

    // The caller guarantees that position < len.
    fn remove_at(&mut self, position: usize) -> T {
        let last = self.values.len() - 1;
        let index = self.back_refs[position];
        let value = self.values.swap_remove(position);
        self.back_refs.swap_remove(position);
        if position != last {
            let moved = self.back_refs[position];
            self.slots[moved as usize] = Slot::Occupied {
                position: position as u32,
            };
            log::trace!(
                "relocated {:?} from position {} to {}",
                Handle::<T>::from_index(moved),
                last,
                position,
            );
        }
        self.slots[index as usize] = Slot::Free {
            next: self.free_head,
        };
        self.free_head = Some(index);
        log::trace!(
            "removed {:?} from position {}",
            Handle::<T>::from_index(index),
            position,
        );
        value
    }

    /// Remove every record for which `keep` returns `false`. Each record is visited exactly
    /// once, but not necessarily in position order, because removals move the last record
    /// forward.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(Handle<T>, &mut T) -> bool,
    {
        let mut position = 0;
        while position < self.values.len() {
            let handle = Handle::from_index(self.back_refs[position]);
            if keep(handle, &mut self.values[position]) {
                position += 1;
            } else {
                // The last record moves into this position, so look at it next.
                drop(self.remove_at(position));
            }
        }
    }

    /// Drop all records and return every handle to the free list, in the same order as a
    /// freshly constructed registry.
    pub fn clear(&mut self) {
        self.values.clear();
        self.back_refs.clear();
        self.free_head = slot::seed(&mut self.slots);
    }

    /// All live records, in storage order.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// All live records, in storage order. Handles are unaffected by anything done through this
    /// slice, since records can be mutated but not moved.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Iterate over `(Handle, &T)` in storage order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            handles: self.back_refs.iter(),
            values: self.values.iter(),
        }
    }

    /// Iterate over `(Handle, &mut T)` in storage order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            handles: self.back_refs.iter(),
            values: self.values.iter_mut(),
        }
    }

    /// Iterate over live handles in storage order.
    pub fn handles(&self) -> Handles<'_, T> {
        Handles {
            inner: self.back_refs.iter(),
            _phantom: PhantomData,
        }
    }

    pub fn values(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn values_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.values.iter_mut()
    }

    pub fn into_values(self) -> std::vec::IntoIter<T> {
        self.values.into_iter()
    }

    /// Iterate over `(Handle, T)` in storage order, consuming the registry.
    pub fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            handles: self.back_refs.into_iter(),
            values: self.values.into_iter(),
        }
    }
}

impl<T, N: Unsigned> Default for Registry<T, N> {
    fn default() -> Self {
        Self::with_capacity_type()
    }
}

impl<T, N: Unsigned> Clone for Registry<T, N>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        // Vec::clone only allocates room for len elements, but a registry reserves its full
        // capacity up front.
        let mut values = Vec::with_capacity(N::USIZE);
        values.extend_from_slice(&self.values);
        let mut back_refs = Vec::with_capacity(N::USIZE);
        back_refs.extend_from_slice(&self.back_refs);
        Self {
            values,
            back_refs,
            slots: self.slots.clone(),
            free_head: self.free_head,
            _capacity: PhantomData,
        }
    }
}

impl<T, N: Unsigned> fmt::Debug for Registry<T, N>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T, N: Unsigned> std::ops::Index<Handle<T>> for Registry<T, N> {
    type Output = T;

    fn index(&self, handle: Handle<T>) -> &T {
        match self.get(handle) {
            Some(value) => value,
            None => panic!("{:?} is not live", handle),
        }
    }
}

impl<T, N: Unsigned> std::ops::IndexMut<Handle<T>> for Registry<T, N> {
    fn index_mut(&mut self, handle: Handle<T>) -> &mut T {
        match self.get_mut(handle) {
            Some(value) => value,
            None => panic!("{:?} is not live", handle),
        }
    }
}
