//! iterator types

use crate::{Handle, Registry};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::slice;
use std::vec;
use typenum::Unsigned;

/// An iterator over `(Handle, &T)` in storage order. Returned by
/// [`iter`](crate::Registry::iter) or automatically constructed by iterating over `&Registry`.
#[derive(Clone, Debug)]
pub struct Iter<'registry, T> {
    pub(crate) handles: slice::Iter<'registry, u32>,
    pub(crate) values: slice::Iter<'registry, T>,
}

impl<'registry, T> Iterator for Iter<'registry, T> {
    type Item = (Handle<T>, &'registry T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = *self.handles.next()?;
        let value = self.values.next()?;
        Some((Handle::from_index(index), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<'registry, T> DoubleEndedIterator for Iter<'registry, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = *self.handles.next_back()?;
        let value = self.values.next_back()?;
        Some((Handle::from_index(index), value))
    }
}

impl<'registry, T> ExactSizeIterator for Iter<'registry, T> {}

impl<'registry, T> FusedIterator for Iter<'registry, T> {}

impl<'registry, T, N: Unsigned> IntoIterator for &'registry Registry<T, N> {
    type Item = (Handle<T>, &'registry T);
    type IntoIter = Iter<'registry, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over `(Handle, &mut T)` in storage order. Returned by
/// [`iter_mut`](crate::Registry::iter_mut) or automatically constructed by iterating over
/// `&mut Registry`.
#[derive(Debug)]
pub struct IterMut<'registry, T> {
    pub(crate) handles: slice::Iter<'registry, u32>,
    pub(crate) values: slice::IterMut<'registry, T>,
}

impl<'registry, T> Iterator for IterMut<'registry, T> {
    type Item = (Handle<T>, &'registry mut T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = *self.handles.next()?;
        let value = self.values.next()?;
        Some((Handle::from_index(index), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<'registry, T> DoubleEndedIterator for IterMut<'registry, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = *self.handles.next_back()?;
        let value = self.values.next_back()?;
        Some((Handle::from_index(index), value))
    }
}

impl<'registry, T> ExactSizeIterator for IterMut<'registry, T> {}

impl<'registry, T> FusedIterator for IterMut<'registry, T> {}

impl<'registry, T, N: Unsigned> IntoIterator for &'registry mut Registry<T, N> {
    type Item = (Handle<T>, &'registry mut T);
    type IntoIter = IterMut<'registry, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An iterator over live handles in storage order. Returned by
/// [`handles`](crate::Registry::handles).
#[derive(Clone, Debug)]
pub struct Handles<'registry, T> {
    pub(crate) inner: slice::Iter<'registry, u32>,
    pub(crate) _phantom: PhantomData<fn() -> T>,
}

impl<'registry, T> Iterator for Handles<'registry, T> {
    type Item = Handle<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|&index| Handle::from_index(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'registry, T> DoubleEndedIterator for Handles<'registry, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|&index| Handle::from_index(index))
    }
}

impl<'registry, T> ExactSizeIterator for Handles<'registry, T> {}

impl<'registry, T> FusedIterator for Handles<'registry, T> {}

/// An iterator over `(Handle, T)` in storage order. Returned by
/// [`into_iter`](crate::Registry::into_iter) or automatically constructed by iterating over
/// `Registry`.
#[derive(Clone, Debug)]
pub struct IntoIter<T> {
    pub(crate) handles: vec::IntoIter<u32>,
    pub(crate) values: vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = (Handle<T>, T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.handles.next()?;
        let value = self.values.next()?;
        Some((Handle::from_index(index), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.handles.next_back()?;
        let value = self.values.next_back()?;
        Some((Handle::from_index(index), value))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T, N: Unsigned> IntoIterator for Registry<T, N> {
    type Item = (Handle<T>, T);
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_iter()
    }
}

#[cfg(test)]
mod test {
    use crate::Registry;

    #[test]
    fn test_iterators_agree_on_order() {
        let mut registry = Registry::<u32>::new();
        let handles: Vec<_> = (0..5).map(|i| registry.insert(i * 10)).collect();
        registry.remove(handles[1]).unwrap();

        // The record from the last position moved into position 1.
        let pairs: Vec<_> = registry.iter().map(|(h, &v)| (h, v)).collect();
        assert_eq!(
            pairs,
            [
                (handles[0], 0),
                (handles[4], 40),
                (handles[2], 20),
                (handles[3], 30),
            ]
        );
        assert_eq!(
            registry.handles().collect::<Vec<_>>(),
            pairs.iter().map(|&(h, _)| h).collect::<Vec<_>>(),
        );
        assert_eq!(registry.values().copied().collect::<Vec<_>>(), [0, 40, 20, 30]);
        assert_eq!(registry.iter().len(), 4);
        assert_eq!(registry.iter().next_back(), Some((handles[3], &30)));

        for (handle, value) in &mut registry {
            *value += handle.to_bits();
        }
        for (handle, &value) in &registry {
            assert_eq!(value % 10, handle.to_bits() % 10);
        }

        let owned: Vec<_> = registry.into_iter().map(|(h, _)| h).collect();
        assert_eq!(owned, pairs.iter().map(|&(h, _)| h).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_iterators() {
        let mut registry = Registry::<String>::new();
        assert!(registry.iter().next().is_none());
        assert!(registry.iter_mut().next().is_none());
        assert!(registry.handles().next().is_none());
        assert!(registry.into_values().next().is_none());
    }
}
