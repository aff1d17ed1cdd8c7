//! a secondary map from handles to other values
//!
//! This doesn't depend on any private registry APIs, and it doesn't require any unsafe code.

use crate::{Handle, Registry};
use typenum::Unsigned;

/// a `hashbrown::HashMap` from handles to side data
///
/// Handles carry no generation, so once a handle is removed from its registry and reissued, the
/// new record would see the old record's entry here. Remove side data together with the record,
/// or call [`vacuum`](HandleMap::vacuum) after removals and before the next insert.
///
/// # Example
///
/// ```
/// use dense_registry::{handle_map::HandleMap, Registry};
///
/// let mut registry = Registry::<&str>::new();
/// let foo = registry.insert("foo");
/// let bar = registry.insert("bar");
///
/// let mut map = HandleMap::new();
/// map.insert(foo, 42);
/// map.insert(bar, 99);
/// assert_eq!(map.get(foo), Some(&42));
///
/// registry.remove(foo).unwrap();
/// map.vacuum(&registry);
/// assert_eq!(map.get(foo), None);
/// assert_eq!(map[bar], 99);
/// ```
pub struct HandleMap<T, V> {
    map: hashbrown::HashMap<Handle<T>, V>,
}

impl<T, V> HandleMap<T, V> {
    pub fn new() -> Self {
        Self {
            map: hashbrown::HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains_handle(&self, handle: Handle<T>) -> bool {
        self.map.contains_key(&handle)
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&V> {
        self.map.get(&handle)
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut V> {
        self.map.get_mut(&handle)
    }

    /// Returns the previous value for this handle, if any.
    pub fn insert(&mut self, handle: Handle<T>, value: V) -> Option<V> {
        self.map.insert(handle, value)
    }

    pub fn remove(&mut self, handle: Handle<T>) -> Option<V> {
        self.map.remove(&handle)
    }

    /// Drop every entry whose handle isn't live in `registry`.
    pub fn vacuum<N: Unsigned>(&mut self, registry: &Registry<T, N>) {
        let before = self.map.len();
        self.map.retain(|&handle, _value| registry.contains(handle));
        log::trace!("vacuumed {} dead entries", before - self.map.len());
    }

    pub fn iter(&self) -> hashbrown::hash_map::Iter<'_, Handle<T>, V> {
        self.map.iter()
    }
}

impl<T, V> Default for HandleMap<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> std::ops::Index<Handle<T>> for HandleMap<T, V> {
    type Output = V;

    fn index(&self, handle: Handle<T>) -> &V {
        match self.get(handle) {
            Some(value) => value,
            None => panic!("no entry for {:?}", handle),
        }
    }
}

impl<T, V> std::ops::IndexMut<Handle<T>> for HandleMap<T, V> {
    fn index_mut(&mut self, handle: Handle<T>) -> &mut V {
        match self.get_mut(handle) {
            Some(value) => value,
            None => panic!("no entry for {:?}", handle),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_handle_map() {
        let mut reg = Registry::<()>::new();
        let h0 = reg.insert(());
        let h1 = reg.insert(());
        let h2 = reg.insert(());

        let mut map = HandleMap::new();
        map.insert(h0, "foo");
        map.insert(h1, "bar");
        map.insert(h2, "baz");
        assert_eq!(map.len(), 3);

        // overwrite "foo" with "fooo"
        assert_eq!(map.insert(h0, "fooo"), Some("foo"));
        assert_eq!(map[h0], "fooo");

        // `vacuum` drops h1 and h2 once they're removed from the registry
        reg.remove(h2).unwrap();
        reg.remove(h1).unwrap();
        map.vacuum(&reg);
        assert_eq!(map.get(h1), None);
        assert_eq!(map.get(h2), None);
        assert!(map.contains_handle(h0));
        assert_eq!(map.len(), 1);

        // h1 was freed last, so it's reissued first, with no stale entry left behind
        let h1_new = reg.insert(());
        assert_eq!(h1_new, h1);
        assert_eq!(map.get(h1_new), None);

        *map.get_mut(h0).unwrap() = "f";
        assert_eq!(map.remove(h0), Some("f"));
        assert!(map.is_empty());
    }
}
