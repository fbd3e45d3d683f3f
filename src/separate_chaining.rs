use alloc::boxed::Box;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::marker::PhantomData;

use crate::bucket::Bucket;
use crate::bucket::LinkedListBucket;
use crate::bucket::TreeBucket;
use crate::bucket::VectorBucket;
use crate::config::ChainingConfig;
use crate::entry::Entry;
use crate::error::ConfigError;
use crate::error::Error;
use crate::error::Result;
use crate::hasher::DefaultHashBuilder;
use crate::iter::Keys;
use crate::iter::Values;

/// Separate chaining with contiguous buckets.
pub type DynamicArrayChainingTable<K, V, S = DefaultHashBuilder> =
    SeparateChainingTable<K, V, VectorBucket<K, V>, S>;

/// Separate chaining with linked-list buckets.
pub type LinkedListChainingTable<K, V, S = DefaultHashBuilder> =
    SeparateChainingTable<K, V, LinkedListBucket<K, V>, S>;

/// Separate chaining with binary-search-tree buckets. Keys must be `Ord`.
pub type TreeChainingTable<K, V, S = DefaultHashBuilder> =
    SeparateChainingTable<K, V, TreeBucket<K, V>, S>;

fn empty_buckets<B: Default>(capacity: usize) -> Box<[B]> {
    (0..capacity).map(|_| B::default()).collect()
}

/// A hash table holding one [`Bucket`] per hash slot.
///
/// Every entry lives in bucket `hash % capacity`. When an insert brings a
/// bucket to `max_chain_size` entries the bucket array doubles and every
/// entry is redistributed by its cached hash. The table's load factor plays
/// no part in growth.
///
/// ## Example
///
/// ```rust
/// use collision_maps::ChainingConfig;
/// use collision_maps::TreeChainingTable;
///
/// let mut table: TreeChainingTable<u32, &str> =
///     TreeChainingTable::with_config(ChainingConfig::default().capacity(8)).unwrap();
/// table.insert(1, "one");
/// table.insert(2, "two");
///
/// assert_eq!(table.insert(1, "uno"), Some("one"));
/// assert_eq!(table.get(&1), Ok(&"uno"));
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Clone)]
pub struct SeparateChainingTable<K, V, B, S = DefaultHashBuilder> {
    buckets: Box<[B]>,
    populated: usize,
    max_chain_size: usize,
    hash_builder: S,
    _marker: PhantomData<(K, V)>,
}

impl<K, V, B, S> Debug for SeparateChainingTable<K, V, B, S>
where
    K: Debug,
    V: Debug,
    B: Bucket<K, V>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, B, S> SeparateChainingTable<K, V, B, S> {
    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table contains no entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the bucket length that triggers growth.
    pub fn max_chain_size(&self) -> usize {
        self.max_chain_size
    }

    /// Returns the table's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }
}

impl<K, V, B, S> SeparateChainingTable<K, V, B, S>
where
    B: Bucket<K, V>,
{
    /// Removes every entry, keeping the bucket count.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(|bucket| *bucket = B::default());
        self.populated = 0;
    }

    /// Returns an iterator over `(&K, &V)` pairs, bucket by bucket.
    pub fn iter(&self) -> Iter<'_, K, V, B> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
            remaining: self.populated,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over the keys, bucket by bucket.
    pub fn keys(&self) -> Keys<Iter<'_, K, V, B>> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values, bucket by bucket.
    pub fn values(&self) -> Values<Iter<'_, K, V, B>> {
        Values { inner: self.iter() }
    }

    /// Estimates the bytes held by the table: the header, the bucket array,
    /// and the storage each bucket allocates for its entries. Heap data owned
    /// by keys and values is not counted.
    pub fn memory_footprint(&self) -> usize {
        core::mem::size_of::<Self>()
            + self.buckets.len() * core::mem::size_of::<B>()
            + self
                .buckets
                .iter()
                .map(|bucket| bucket.allocated_bytes())
                .sum::<usize>()
    }
}

impl<K, V, B, S> SeparateChainingTable<K, V, B, S>
where
    K: Hash + Eq,
    B: Bucket<K, V>,
    S: BuildHasher,
{
    /// Creates an empty table from a configuration and a hasher builder.
    ///
    /// Fails without allocating if the configuration is out of range.
    pub fn with_config_and_hasher(config: ChainingConfig, hash_builder: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            buckets: empty_buckets(config.capacity),
            populated: 0,
            max_chain_size: config.max_chain_size,
            hash_builder,
            _marker: PhantomData,
        })
    }

    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// Fails with [`Error::NotFound`] if the key is absent.
    pub fn get(&self, key: &K) -> Result<&V> {
        let hash = self.hash_builder.hash_one(key);
        self.buckets[self.bucket_index(hash)]
            .find(key)
            .map(Entry::value)
            .ok_or(Error::NotFound)
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// Fails with [`Error::NotFound`] if the key is absent.
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        let hash = self.hash_builder.hash_one(key);
        let index = self.bucket_index(hash);
        self.buckets[index]
            .find_mut(key)
            .map(Entry::value_mut)
            .ok_or(Error::NotFound)
    }

    /// Returns `true` if the table holds an entry for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        let hash = self.hash_builder.hash_one(key);
        self.buckets[self.bucket_index(hash)].find(key).is_some()
    }

    /// Inserts a key/value pair.
    ///
    /// If the key was already present its value is replaced and the old value
    /// is returned. Otherwise the entry joins its bucket, and the table grows
    /// once if that bucket now holds `max_chain_size` entries.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_builder.hash_one(&key);
        let index = self.bucket_index(hash);
        let bucket = &mut self.buckets[index];
        let previous = bucket.insert(Entry::new(hash, key, value));
        let chain_len = bucket.len();

        if previous.is_none() {
            self.populated += 1;
            if chain_len >= self.max_chain_size {
                self.grow();
            }
        }
        previous
    }

    /// Removes `key`, returning its value.
    ///
    /// Fails with [`Error::NotFound`] if the key is absent.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        let hash = self.hash_builder.hash_one(key);
        let index = self.bucket_index(hash);
        let entry = self.buckets[index].remove(key).ok_or(Error::NotFound)?;
        self.populated -= 1;
        Ok(entry.into_value())
    }

    /// Doubles the bucket array and redistributes every entry by its cached
    /// hash.
    #[cold]
    fn grow(&mut self) {
        let capacity = self.buckets.len() * 2;
        let mut buckets: Box<[B]> = empty_buckets(capacity);
        for bucket in core::mem::take(&mut self.buckets).into_vec() {
            for entry in bucket.into_entries() {
                let index = (entry.hash() % capacity as u64) as usize;
                buckets[index].append_without_search(entry);
            }
        }

        #[cfg(feature = "logging")]
        log::debug!(
            "chaining table grew from {} to {} buckets holding {} entries",
            capacity / 2,
            capacity,
            self.populated
        );
        self.buckets = buckets;
    }

    /// Computes a histogram of bucket lengths: bin `i` counts the buckets
    /// holding `i` entries.
    #[cfg(any(test, feature = "stats"))]
    pub fn chain_histogram(&self) -> crate::stats::ProbeHistogram {
        let mut hist = crate::stats::ProbeHistogram::default();
        for bucket in self.buckets.iter() {
            hist.record(bucket.len());
        }
        hist
    }

    /// Returns occupancy statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::stats::DebugStats {
        crate::stats::DebugStats {
            populated: self.populated,
            capacity: self.capacity(),
            tombstones: 0,
            empty: self.buckets.iter().filter(|bucket| bucket.is_empty()).count(),
            load_factor: self.populated as f64 / self.capacity() as f64,
            total_bytes: self.memory_footprint(),
        }
    }
}

impl<K, V, B, S> SeparateChainingTable<K, V, B, S>
where
    K: Hash + Eq,
    B: Bucket<K, V>,
    S: BuildHasher + Default,
{
    /// Creates an empty table with 40 buckets and a chain limit of 5.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty table from a configuration, using the default hasher
    /// builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collision_maps::ChainingConfig;
    /// use collision_maps::ConfigError;
    /// use collision_maps::LinkedListChainingTable;
    ///
    /// let table = LinkedListChainingTable::<u64, u64>::with_config(
    ///     ChainingConfig::default().capacity(100).max_chain_size(5),
    /// )
    /// .unwrap();
    /// assert_eq!(table.capacity(), 100);
    ///
    /// let invalid = LinkedListChainingTable::<u64, u64>::with_config(
    ///     ChainingConfig::default().max_chain_size(0),
    /// );
    /// assert_eq!(invalid.unwrap_err(), ConfigError::ZeroMaxChainSize);
    /// ```
    pub fn with_config(config: ChainingConfig) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, S::default())
    }

    /// Creates a table from a configuration and fills it from `iter`.
    ///
    /// Later pairs overwrite earlier pairs with the same key.
    pub fn from_iter_with_config<I>(iter: I, config: ChainingConfig) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut table = Self::with_config(config)?;
        table.extend(iter);
        Ok(table)
    }
}

impl<K, V, B, S> SeparateChainingTable<K, V, B, S>
where
    K: Hash + Eq,
    B: Bucket<K, V>,
    S: BuildHasher,
{
    /// Creates an empty table with the default configuration and the given
    /// hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            buckets: empty_buckets(ChainingConfig::DEFAULT_CAPACITY),
            populated: 0,
            max_chain_size: ChainingConfig::DEFAULT_MAX_CHAIN_SIZE,
            hash_builder,
            _marker: PhantomData,
        }
    }
}

impl<K, V, B, S> Default for SeparateChainingTable<K, V, B, S>
where
    K: Hash + Eq,
    B: Bucket<K, V>,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, B, S> PartialEq for SeparateChainingTable<K, V, B, S>
where
    K: Hash + Eq,
    V: PartialEq,
    B: Bucket<K, V>,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_ok_and(|v| v == value))
    }
}

impl<K, V, B, S> Eq for SeparateChainingTable<K, V, B, S>
where
    K: Hash + Eq,
    V: Eq,
    B: Bucket<K, V>,
    S: BuildHasher,
{
}

impl<K, V, B, S> Extend<(K, V)> for SeparateChainingTable<K, V, B, S>
where
    K: Hash + Eq,
    B: Bucket<K, V>,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, B, S> FromIterator<(K, V)> for SeparateChainingTable<K, V, B, S>
where
    K: Hash + Eq,
    B: Bucket<K, V>,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<'a, K, V, B, S> IntoIterator for &'a SeparateChainingTable<K, V, B, S>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the entries of a [`SeparateChainingTable`], bucket by
/// bucket in each bucket's own order.
pub struct Iter<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    buckets: core::slice::Iter<'a, B>,
    current: Option<B::Iter<'a>>,
    remaining: usize,
    _marker: PhantomData<&'a (K, V)>,
}

impl<'a, K, V, B> Debug for Iter<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl<'a, K, V, B> Iterator for Iter<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(entry.pair());
            }
            self.current = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, B> ExactSizeIterator for Iter<'a, K, V, B>
where
    B: Bucket<K, V> + 'a,
    K: 'a,
    V: 'a,
{
}
