use slotmap::{Key, SlotMap};

/// Insertion-ordered arena. Keys stay valid across removals of other
/// elements, and a removed key never resolves again.
#[derive(Debug, Clone)]
pub struct Collection<K: Key, V> {
    items: SlotMap<K, V>,
    order: Vec<K>,
}

impl<K: Key, V> Collection<K, V> {
    pub fn new() -> Self {
        Self {
            items: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    pub fn insert(&mut self, value: V) -> K {
        let key = self.items.insert(value);
        self.order.push(key);
        key
    }

    pub fn remove(&mut self, key: K) -> Option<V> {
        let value = self.items.remove(key)?;
        self.order.retain(|&k| k != key);
        Some(value)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.order.clear();
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.items.get(key)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.items.get_mut(key)
    }

    pub fn contains(&self, key: K) -> bool {
        self.items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Key at a creation-order position.
    pub fn key_at(&self, index: usize) -> Option<K> {
        self.order.get(index).copied()
    }

    /// Elements in creation order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (K, &V)> + '_ {
        self.order
            .iter()
            .filter_map(move |&k| self.items.get(k).map(|v| (k, v)))
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<K: Key, V> Default for Collection<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
