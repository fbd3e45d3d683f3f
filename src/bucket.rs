//! Buckets for separate chaining.
//!
//! A [`SeparateChainingTable`] maps each hash to one bucket and hands the
//! rest of the work to it. Every bucket keeps its keys pairwise distinct.
//!
//! [`SeparateChainingTable`]: crate::SeparateChainingTable

mod linked_list;
mod tree;
mod vector;

pub use linked_list::LinkedListBucket;
pub use tree::TreeBucket;
pub use vector::VectorBucket;

use crate::entry::Entry;

/// The storage behind one slot of a separate-chaining table.
///
/// Lookups match keys by whatever relation the bucket is built on: `Eq` for
/// [`VectorBucket`] and [`LinkedListBucket`], `Ord` for [`TreeBucket`]. The
/// cached hash is carried along but never consulted inside a bucket.
pub trait Bucket<K, V>: Default {
    /// Borrowing iterator over the entries, in the bucket's natural order.
    type Iter<'a>: Iterator<Item = &'a Entry<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Owning iterator used to redistribute entries when the table grows.
    type IntoEntries: Iterator<Item = Entry<K, V>>;

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the bucket holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the entry holding `key`, if any.
    fn find(&self, key: &K) -> Option<&Entry<K, V>>;

    /// Returns the entry holding `key` mutably, if any.
    fn find_mut(&mut self, key: &K) -> Option<&mut Entry<K, V>>;

    /// Inserts `entry`, overwriting the value of an entry with an equal key.
    ///
    /// Returns the replaced value. On a replacement the stored key and hash
    /// are kept and the length is unchanged.
    fn insert(&mut self, entry: Entry<K, V>) -> Option<V>;

    /// Removes and returns the entry holding `key`, if any.
    fn remove(&mut self, key: &K) -> Option<Entry<K, V>>;

    /// Adds `entry` without checking for an equal key.
    ///
    /// Only valid when `entry`'s key is known to be absent, as during a
    /// rehash where every redistributed key is already distinct.
    fn append_without_search(&mut self, entry: Entry<K, V>);

    /// Returns an iterator over the entries.
    fn iter(&self) -> Self::Iter<'_>;

    /// Consumes the bucket, yielding its entries by value.
    fn into_entries(self) -> Self::IntoEntries;

    /// Estimates the bytes this bucket allocates for its entries.
    fn allocated_bytes(&self) -> usize;
}
