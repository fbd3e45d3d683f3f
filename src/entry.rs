/// A stored key/value pair together with the hash it was filed under.
///
/// Every table variant stores `Entry` values, whether in an open-addressing
/// slot or inside a bucket. The hash is computed once, when the key is first
/// inserted, and is reused verbatim whenever the table grows. The hasher must
/// therefore produce the same hash for a key over the table's whole lifetime;
/// this is assumed and not checked.
///
/// The hash and key cannot be changed after construction. The value can be
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    hash: u64,
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates an entry for `key` filed under `hash`.
    pub fn new(hash: u64, key: K, value: V) -> Self {
        Self { hash, key, value }
    }

    /// Returns the cached hash of the key.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Returns the key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the value mutably.
    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Replaces the value and returns the previous one.
    #[inline]
    pub fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    /// Consumes the entry, returning the value.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }

    /// Consumes the entry, returning the key and value.
    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Borrows the key and value as a pair.
    #[inline]
    pub(crate) fn pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }
}

impl<K: Eq, V> Entry<K, V> {
    /// Returns `true` if this entry was filed under `hash` and holds `key`.
    ///
    /// The hash is compared first so mismatched keys rarely reach `Eq`.
    #[inline]
    pub(crate) fn matches(&self, hash: u64, key: &K) -> bool {
        self.hash == hash && self.key == *key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_expose_parts() {
        let mut entry = Entry::new(17, "key", 1);
        assert_eq!(entry.hash(), 17);
        assert_eq!(entry.key(), &"key");
        assert_eq!(entry.value(), &1);

        *entry.value_mut() += 1;
        assert_eq!(entry.replace_value(10), 2);
        assert_eq!(entry.hash(), 17);
        assert_eq!(entry.into_parts(), ("key", 10));
    }

    #[test]
    fn matches_requires_hash_and_key() {
        let entry = Entry::new(3, 42u64, ());
        assert!(entry.matches(3, &42));
        assert!(!entry.matches(4, &42));
        assert!(!entry.matches(3, &43));
    }
}
