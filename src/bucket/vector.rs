use alloc::vec::Vec;

use super::Bucket;
use crate::entry::Entry;

/// A bucket backed by contiguous storage, searched linearly.
///
/// Removal shifts the tail down so the remaining entries keep their insertion
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorBucket<K, V> {
    entries: Vec<Entry<K, V>>,
}

impl<K, V> Default for VectorBucket<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Eq, V> VectorBucket<K, V> {
    fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key() == key)
    }
}

impl<K: Eq, V> Bucket<K, V> for VectorBucket<K, V> {
    type Iter<'a>
        = core::slice::Iter<'a, Entry<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IntoEntries = alloc::vec::IntoIter<Entry<K, V>>;

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn find(&self, key: &K) -> Option<&Entry<K, V>> {
        self.entries.iter().find(|entry| entry.key() == key)
    }

    fn find_mut(&mut self, key: &K) -> Option<&mut Entry<K, V>> {
        self.entries.iter_mut().find(|entry| entry.key() == key)
    }

    fn insert(&mut self, entry: Entry<K, V>) -> Option<V> {
        match self.position(entry.key()) {
            Some(index) => Some(self.entries[index].replace_value(entry.into_value())),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    fn remove(&mut self, key: &K) -> Option<Entry<K, V>> {
        let index = self.position(key)?;
        Some(self.entries.remove(index))
    }

    fn append_without_search(&mut self, entry: Entry<K, V>) {
        self.entries.push(entry);
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.entries.iter()
    }

    fn into_entries(self) -> Self::IntoEntries {
        self.entries.into_iter()
    }

    fn allocated_bytes(&self) -> usize {
        self.entries.capacity() * core::mem::size_of::<Entry<K, V>>()
    }
}
