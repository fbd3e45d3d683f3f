use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::config::OpenAddressingConfig;
use crate::entry::Entry;
use crate::error::ConfigError;
use crate::error::Error;
use crate::error::Result;
use crate::hasher::DefaultHashBuilder;
use crate::iter::Keys;
use crate::iter::Values;
use crate::probe::DoubleHashProbe;
use crate::probe::LinearProbe;
use crate::probe::ProbeStrategy;
use crate::probe::QuadraticProbe;

/// Open addressing with `(h + i) mod n` probing.
pub type LinearProbingTable<K, V, S = DefaultHashBuilder> =
    OpenAddressingTable<K, V, LinearProbe, S>;

/// Open addressing with `(h + i²) mod n` probing.
pub type QuadraticProbingTable<K, V, S = DefaultHashBuilder> =
    OpenAddressingTable<K, V, QuadraticProbe, S>;

/// Open addressing with a prime-derived secondary offset.
pub type DoubleHashingTable<K, V, S = DefaultHashBuilder> =
    OpenAddressingTable<K, V, DoubleHashProbe, S>;

/// A single cell of the slot array.
///
/// `Empty` ends a failed search. `Tombstone` marks a deleted entry: searches
/// continue past it, and inserts never reuse it. New entries always go to the
/// first `Empty` cell on their probe path.
#[derive(Clone)]
enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied(Entry<K, V>),
}

impl<K, V> Slot<K, V> {
    #[inline]
    fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    fn entry(&self) -> Option<&Entry<K, V>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    #[inline]
    fn entry_mut(&mut self) -> Option<&mut Entry<K, V>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Moves the entry out, leaving a tombstone behind.
    #[inline]
    fn take(&mut self) -> Option<Entry<K, V>> {
        match core::mem::replace(self, Slot::Tombstone) {
            Slot::Occupied(entry) => Some(entry),
            other => {
                *self = other;
                None
            }
        }
    }

    #[inline]
    fn into_entry(self) -> Option<Entry<K, V>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            Slot::Empty | Slot::Tombstone => None,
        }
    }
}

/// Outcome of one walk along an insert's probe path.
enum Placement<K, V> {
    Inserted,
    Replaced(V),
    /// The whole cycle was walked without meeting the key or an empty slot.
    Exhausted(Entry<K, V>),
}

fn empty_slots<K, V>(capacity: usize) -> Box<[Slot<K, V>]> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

/// A hash table storing every entry directly in one flat slot array.
///
/// Collisions are resolved by walking the probe sequence produced by `P`
/// (see [`crate::probe`]). Deleted entries leave tombstones that later
/// searches step over. The table doubles and rehashes every live entry, using
/// its cached hash, as soon as `len / capacity` reaches the resize factor.
///
/// Probe walks are bounded by the capacity. Every supported sequence repeats
/// with that period, so a longer walk would only revisit slots. An insert
/// whose walk finds no empty slot rebuilds the array in place when it holds
/// tombstones and the load is below the resize factor, and grows otherwise.
///
/// ## Example
///
/// ```rust
/// use collision_maps::LinearProbingTable;
///
/// let mut table: LinearProbingTable<&str, i32> = LinearProbingTable::new();
/// table.insert("a", 10);
/// table.insert("b", 20);
///
/// assert_eq!(table.get(&"a"), Ok(&10));
/// assert_eq!(table.remove(&"a"), Ok(10));
/// assert!(!table.contains_key(&"a"));
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Clone)]
pub struct OpenAddressingTable<K, V, P, S = DefaultHashBuilder> {
    slots: Box<[Slot<K, V>]>,
    populated: usize,
    tombstones: usize,
    resize_factor: f64,
    probe: P,
    hash_builder: S,
}

impl<K, V, P, S> Debug for OpenAddressingTable<K, V, P, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, P, S> OpenAddressingTable<K, V, P, S> {
    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table contains no entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of slots.
    ///
    /// The capacity starts at the configured value and doubles on every
    /// growth. Rebuilding away tombstones keeps it unchanged. It never
    /// shrinks.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the load factor that triggers growth.
    pub fn resize_factor(&self) -> f64 {
        self.resize_factor
    }

    /// Returns the probe strategy.
    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Returns the table's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes every entry, keeping the capacity. Tombstones are cleared too.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = Slot::Empty);
        self.populated = 0;
        self.tombstones = 0;
    }

    /// Returns an iterator over `(&K, &V)` pairs in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.populated,
        }
    }

    /// Returns an iterator over the keys, in slot order.
    pub fn keys(&self) -> Keys<Iter<'_, K, V>> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values, in slot order.
    pub fn values(&self) -> Values<Iter<'_, K, V>> {
        Values { inner: self.iter() }
    }

    /// Estimates the bytes held by the table itself: the header plus one
    /// slot per unit of capacity. Heap data owned by keys and values is not
    /// counted.
    pub fn memory_footprint(&self) -> usize {
        core::mem::size_of::<Self>() + self.slots.len() * core::mem::size_of::<Slot<K, V>>()
    }

    #[inline]
    fn load_factor(&self) -> f64 {
        self.populated as f64 / self.slots.len() as f64
    }
}

impl<K, V, P, S> OpenAddressingTable<K, V, P, S>
where
    K: Hash + Eq,
    P: ProbeStrategy,
    S: BuildHasher,
{
    /// Creates an empty table from a configuration, a probe strategy, and a
    /// hasher builder.
    ///
    /// Fails without allocating if the configuration is out of range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collision_maps::DoubleHashingTable;
    /// use collision_maps::OpenAddressingConfig;
    /// use collision_maps::hasher::DefaultHashBuilder;
    /// use collision_maps::probe::DoubleHashProbe;
    ///
    /// let table: DoubleHashingTable<u64, ()> = DoubleHashingTable::with_config_and_hasher(
    ///     OpenAddressingConfig::default().capacity(128),
    ///     DoubleHashProbe::with_prime(13).unwrap(),
    ///     DefaultHashBuilder::default(),
    /// )
    /// .unwrap();
    /// assert_eq!(table.capacity(), 128);
    /// assert_eq!(table.probe().prime(), 13);
    /// ```
    pub fn with_config_and_hasher(
        config: OpenAddressingConfig,
        probe: P,
        hash_builder: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            slots: empty_slots(config.capacity),
            populated: 0,
            tombstones: 0,
            resize_factor: config.resize_factor,
            probe,
            hash_builder,
        })
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// Fails with [`Error::NotFound`] if the key is absent.
    pub fn get(&self, key: &K) -> Result<&V> {
        let hash = self.hash_builder.hash_one(key);
        self.find_index(hash, key)
            .and_then(|index| self.slots[index].entry())
            .map(Entry::value)
            .ok_or(Error::NotFound)
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// Fails with [`Error::NotFound`] if the key is absent.
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        let hash = self.hash_builder.hash_one(key);
        let index = self.find_index(hash, key).ok_or(Error::NotFound)?;
        self.slots[index]
            .entry_mut()
            .map(Entry::value_mut)
            .ok_or(Error::NotFound)
    }

    /// Returns `true` if the table holds an entry for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        let hash = self.hash_builder.hash_one(key);
        self.find_index(hash, key).is_some()
    }

    /// Inserts a key/value pair.
    ///
    /// If the key was already present its value is replaced in place and the
    /// old value is returned; the length is unchanged. Otherwise the entry is
    /// stored at the first empty slot of its probe path, and the table grows
    /// if the load factor reached the resize factor.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_builder.hash_one(&key);
        let mut entry = Entry::new(hash, key, value);
        loop {
            match self.place(entry) {
                Placement::Replaced(previous) => return Some(previous),
                Placement::Inserted => {
                    self.populated += 1;
                    if self.load_factor() >= self.resize_factor {
                        self.grow();
                    }
                    return None;
                }
                Placement::Exhausted(rejected) => {
                    entry = rejected;
                    if self.tombstones > 0 && self.load_factor() < self.resize_factor {
                        #[cfg(feature = "logging")]
                        log::trace!(
                            "probe cycle for hash {:#018x} is blocked by {} tombstones, rebuilding {} slots in place",
                            entry.hash(),
                            self.tombstones,
                            self.capacity()
                        );
                        self.rehash(self.capacity());
                    } else {
                        #[cfg(feature = "logging")]
                        log::trace!(
                            "probe cycle for hash {:#018x} has no empty slot in {} slots, growing",
                            entry.hash(),
                            self.capacity()
                        );
                        self.grow();
                    }
                }
            }
        }
    }

    /// Removes `key`, returning its value and leaving a tombstone in its slot.
    ///
    /// Fails with [`Error::NotFound`] if the key is absent.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        let hash = self.hash_builder.hash_one(key);
        let index = self.find_index(hash, key).ok_or(Error::NotFound)?;
        let entry = self.slots[index].take().ok_or(Error::NotFound)?;
        self.populated -= 1;
        self.tombstones += 1;
        Ok(entry.into_value())
    }

    fn find_index(&self, hash: u64, key: &K) -> Option<usize> {
        let capacity = self.capacity();
        for index in self.probe.probe_sequence(hash, capacity).take(capacity) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(entry) if entry.matches(hash, key) => return Some(index),
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
        }

        None
    }

    fn place(&mut self, entry: Entry<K, V>) -> Placement<K, V> {
        let capacity = self.capacity();
        for index in self.probe.probe_sequence(entry.hash(), capacity).take(capacity) {
            let slot = &mut self.slots[index];
            match slot {
                Slot::Occupied(existing) if existing.matches(entry.hash(), entry.key()) => {
                    return Placement::Replaced(existing.replace_value(entry.into_value()));
                }
                Slot::Empty => {
                    *slot = Slot::Occupied(entry);
                    return Placement::Inserted;
                }
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
        }

        Placement::Exhausted(entry)
    }

    #[cold]
    fn grow(&mut self) {
        self.rehash(self.capacity() * 2);
    }

    /// Rebuilds the slot array at `capacity`, re-placing every live entry by
    /// its cached hash. Tombstones are dropped.
    ///
    /// If some entry's probe cycle has no empty slot in the new array (only
    /// possible with quadratic probing), the capacity doubles and the rehash
    /// restarts.
    #[cold]
    fn rehash(&mut self, mut capacity: usize) {
        #[cfg(feature = "logging")]
        let old_capacity = self.capacity();

        let mut pending: Vec<Entry<K, V>> = core::mem::take(&mut self.slots)
            .into_vec()
            .into_iter()
            .filter_map(Slot::into_entry)
            .collect();
        self.tombstones = 0;

        loop {
            let mut slots = empty_slots(capacity);
            let mut stranded = Vec::new();
            for entry in pending.drain(..) {
                let target = self
                    .probe
                    .probe_sequence(entry.hash(), capacity)
                    .take(capacity)
                    .find(|&index| slots[index].is_empty());
                match target {
                    Some(index) => slots[index] = Slot::Occupied(entry),
                    None => stranded.push(entry),
                }
            }

            if stranded.is_empty() {
                #[cfg(feature = "logging")]
                {
                    if capacity == old_capacity {
                        log::debug!(
                            "open-addressing table rebuilt {} slots in place holding {} entries",
                            capacity,
                            self.populated
                        );
                    } else {
                        log::debug!(
                            "open-addressing table grew from {} to {} slots holding {} entries",
                            old_capacity,
                            capacity,
                            self.populated
                        );
                    }
                }
                self.slots = slots;
                return;
            }

            #[cfg(feature = "logging")]
            log::trace!(
                "{} entries found no empty slot at capacity {}, restarting rehash",
                stranded.len(),
                capacity
            );
            pending = slots
                .into_vec()
                .into_iter()
                .filter_map(Slot::into_entry)
                .chain(stranded)
                .collect();
            capacity *= 2;
        }
    }

    /// Computes a histogram of probe lengths for the live entries.
    ///
    /// Bin `i` counts entries that sit at position `i` of their own probe
    /// sequence, i.e. that a lookup finds after `i` collisions.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> crate::stats::ProbeHistogram {
        let mut hist = crate::stats::ProbeHistogram::default();
        let capacity = self.capacity();
        for (slot_index, slot) in self.slots.iter().enumerate() {
            let Some(entry) = slot.entry() else {
                continue;
            };
            if let Some(position) = self
                .probe
                .probe_sequence(entry.hash(), capacity)
                .take(capacity)
                .position(|index| index == slot_index)
            {
                hist.record(position);
            }
        }
        hist
    }

    /// Returns occupancy statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> crate::stats::DebugStats {
        let mut tombstones = 0;
        let mut empty = 0;
        for slot in self.slots.iter() {
            match slot {
                Slot::Empty => empty += 1,
                Slot::Tombstone => tombstones += 1,
                Slot::Occupied(_) => {}
            }
        }

        crate::stats::DebugStats {
            populated: self.populated,
            capacity: self.capacity(),
            tombstones,
            empty,
            load_factor: self.load_factor(),
            total_bytes: self.memory_footprint(),
        }
    }
}

impl<K, V, P, S> OpenAddressingTable<K, V, P, S>
where
    K: Hash + Eq,
    P: ProbeStrategy + Default,
    S: BuildHasher + Default,
{
    /// Creates an empty table with 64 slots and a resize factor of `0.7`.
    pub fn new() -> Self {
        Self {
            slots: empty_slots(OpenAddressingConfig::DEFAULT_CAPACITY),
            populated: 0,
            tombstones: 0,
            resize_factor: OpenAddressingConfig::DEFAULT_RESIZE_FACTOR,
            probe: P::default(),
            hash_builder: S::default(),
        }
    }

    /// Creates an empty table from a configuration, using the default probe
    /// strategy and hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collision_maps::ConfigError;
    /// use collision_maps::OpenAddressingConfig;
    /// use collision_maps::QuadraticProbingTable;
    ///
    /// let table = QuadraticProbingTable::<u64, u64>::with_config(
    ///     OpenAddressingConfig::default().capacity(30).resize_factor(0.6),
    /// )
    /// .unwrap();
    /// assert_eq!(table.capacity(), 30);
    ///
    /// let invalid = QuadraticProbingTable::<u64, u64>::with_config(
    ///     OpenAddressingConfig::default().capacity(0),
    /// );
    /// assert_eq!(invalid.unwrap_err(), ConfigError::ZeroCapacity);
    /// ```
    pub fn with_config(config: OpenAddressingConfig) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, P::default(), S::default())
    }

    /// Creates a table from a configuration and fills it from `iter`.
    ///
    /// Later pairs overwrite earlier pairs with the same key.
    pub fn from_iter_with_config<I>(iter: I, config: OpenAddressingConfig) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut table = Self::with_config(config)?;
        table.extend(iter);
        Ok(table)
    }
}

impl<K, V, P, S> OpenAddressingTable<K, V, P, S>
where
    K: Hash + Eq,
    P: ProbeStrategy + Default,
    S: BuildHasher,
{
    /// Creates an empty table with the default configuration and the given
    /// hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            slots: empty_slots(OpenAddressingConfig::DEFAULT_CAPACITY),
            populated: 0,
            tombstones: 0,
            resize_factor: OpenAddressingConfig::DEFAULT_RESIZE_FACTOR,
            probe: P::default(),
            hash_builder,
        }
    }
}

impl<K, V, P, S> Default for OpenAddressingTable<K, V, P, S>
where
    K: Hash + Eq,
    P: ProbeStrategy + Default,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, P, S> PartialEq for OpenAddressingTable<K, V, P, S>
where
    K: Hash + Eq,
    V: PartialEq,
    P: ProbeStrategy,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_ok_and(|v| v == value))
    }
}

impl<K, V, P, S> Eq for OpenAddressingTable<K, V, P, S>
where
    K: Hash + Eq,
    V: Eq,
    P: ProbeStrategy,
    S: BuildHasher,
{
}

impl<K, V, P, S> Extend<(K, V)> for OpenAddressingTable<K, V, P, S>
where
    K: Hash + Eq,
    P: ProbeStrategy,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, P, S> FromIterator<(K, V)> for OpenAddressingTable<K, V, P, S>
where
    K: Hash + Eq,
    P: ProbeStrategy + Default,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<'a, K, V, P, S> IntoIterator for &'a OpenAddressingTable<K, V, P, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the entries of an [`OpenAddressingTable`], in slot order.
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V> Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some(entry) = slot.entry() {
                self.remaining -= 1;
                return Some(entry.pair());
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
