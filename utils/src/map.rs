use std::collections::hash_map::Entry;
use std::hash::Hash;

use fnv::FnvHashMap;

/// FNV-hashed map for small `Copy` keys such as plan shapes.
pub struct Map<K, V>(pub FnvHashMap<K, V>);

impl<K: Eq + Hash, V> Map<K, V> {
    pub fn new() -> Self {
        Self(FnvHashMap::<K, V>::default())
    }

    /// Stores `data` under `k` unless the key is already present. The value
    /// is built lazily so nothing is created for a rejected insert.
    pub fn insert_if_absent(&mut self, k: K, data: impl FnOnce() -> V) -> bool {
        match self.0.entry(k) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(data());
                true
            }
        }
    }

    pub fn get(&self, k: &K) -> Option<&V> {
        self.0.get(k)
    }

    pub fn contains_key(&self, k: &K) -> bool {
        self.0.contains_key(k)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Removes and returns every entry.
    pub fn drain(&mut self) -> Vec<(K, V)> {
        self.0.drain().collect()
    }
}

impl<K: Eq + Hash, V> Default for Map<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Map;

    #[test]
    fn insert_if_absent_keeps_first_value() {
        let mut map: Map<u32, &str> = Map::new();
        assert!(map.insert_if_absent(1, || "first"));
        assert!(!map.insert_if_absent(1, || panic!("value must not be built for an existing key")));
        assert_eq!(map.get(&1), Some(&"first"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn drain_empties_the_map() {
        let mut map: Map<u32, u32> = Map::default();
        map.insert_if_absent(1, || 10);
        map.insert_if_absent(2, || 20);
        let mut drained: Vec<(u32, u32)> = map.drain();
        drained.sort();
        assert_eq!(drained, vec![(1, 10), (2, 20)]);
        assert!(map.is_empty());
    }
}
