use alloc::boxed::Box;
use core::fmt::Debug;
use core::marker::PhantomData;
use core::ptr::NonNull;

use super::Bucket;
use crate::entry::Entry;

struct ListNode<K, V> {
    entry: Entry<K, V>,
    next: Option<NonNull<ListNode<K, V>>>,
}

/// A bucket backed by a singly linked list with head and tail pointers.
///
/// Appending is O(1) through the tail pointer; search and removal walk from
/// the head. Nodes are individually heap allocated and linked by raw
/// pointers, which the bucket owns exclusively.
pub struct LinkedListBucket<K, V> {
    head: Option<NonNull<ListNode<K, V>>>,
    tail: Option<NonNull<ListNode<K, V>>>,
    len: usize,
    _marker: PhantomData<Box<ListNode<K, V>>>,
}

// SAFETY: The bucket owns every node reachable from `head` and hands out
// references only through `&self`/`&mut self`, like `Box`.
unsafe impl<K: Send, V: Send> Send for LinkedListBucket<K, V> {}
// SAFETY: Shared access only produces shared references to entries.
unsafe impl<K: Sync, V: Sync> Sync for LinkedListBucket<K, V> {}

impl<K, V> Default for LinkedListBucket<K, V> {
    fn default() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }
}

impl<K, V> LinkedListBucket<K, V> {
    fn push_back(&mut self, entry: Entry<K, V>) {
        let node = NonNull::from(Box::leak(Box::new(ListNode { entry, next: None })));
        match self.tail {
            // SAFETY: `tail` points to the last live node, which is owned by this
            // bucket and not otherwise borrowed while we hold `&mut self`.
            Some(mut tail) => unsafe { tail.as_mut().next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
    }

    fn pop_front(&mut self) -> Option<Entry<K, V>> {
        let head = self.head?;
        // SAFETY: `head` was produced by `Box::leak` in `push_back` and is
        // unlinked here before being reclaimed, so it is freed exactly once.
        let node = unsafe { Box::from_raw(head.as_ptr()) };
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        Some(node.entry)
    }
}

impl<K, V> Drop for LinkedListBucket<K, V> {
    fn drop(&mut self) {
        // Iterative, so a long chain cannot overflow the stack.
        while self.pop_front().is_some() {}
    }
}

impl<K: Clone, V: Clone> Clone for LinkedListBucket<K, V> {
    fn clone(&self) -> Self {
        let mut bucket = Self::default();
        let mut cursor = self.head;
        while let Some(node) = cursor {
            // SAFETY: Every pointer reachable from `head` is a live node owned by
            // `self`, which is borrowed for the duration of the walk.
            let node = unsafe { node.as_ref() };
            bucket.push_back(node.entry.clone());
            cursor = node.next;
        }
        bucket
    }
}

impl<K: Debug, V: Debug> Debug for LinkedListBucket<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter_nodes()).finish()
    }
}

impl<K, V> LinkedListBucket<K, V> {
    fn iter_nodes(&self) -> Iter<'_, K, V> {
        Iter {
            next: self.head,
            remaining: self.len,
            _marker: PhantomData,
        }
    }
}

impl<K: Eq, V> Bucket<K, V> for LinkedListBucket<K, V> {
    type Iter<'a>
        = Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IntoEntries = IntoEntries<K, V>;

    fn len(&self) -> usize {
        self.len
    }

    fn find(&self, key: &K) -> Option<&Entry<K, V>> {
        self.iter_nodes().find(|entry| entry.key() == key)
    }

    fn find_mut(&mut self, key: &K) -> Option<&mut Entry<K, V>> {
        let mut cursor = self.head;
        while let Some(mut node) = cursor {
            // SAFETY: The node is live and owned by this bucket; `&mut self`
            // guarantees no other reference into the list exists.
            let node = unsafe { node.as_mut() };
            if node.entry.key() == key {
                return Some(&mut node.entry);
            }
            cursor = node.next;
        }

        None
    }

    fn insert(&mut self, entry: Entry<K, V>) -> Option<V> {
        match self.find_mut(entry.key()) {
            Some(existing) => Some(existing.replace_value(entry.into_value())),
            None => {
                self.push_back(entry);
                None
            }
        }
    }

    fn remove(&mut self, key: &K) -> Option<Entry<K, V>> {
        let mut previous: Option<NonNull<ListNode<K, V>>> = None;
        let mut cursor = self.head;
        while let Some(node) = cursor {
            // SAFETY: The node is live and owned by this bucket.
            let next = unsafe { node.as_ref().next };
            // SAFETY: As above.
            if unsafe { node.as_ref() }.entry.key() == key {
                match previous {
                    // SAFETY: `previous` is the live node linking to `node`.
                    Some(mut previous) => unsafe { previous.as_mut().next = next },
                    None => self.head = next,
                }
                if next.is_none() {
                    self.tail = previous;
                }
                self.len -= 1;
                // SAFETY: `node` came from `Box::leak` and is now unreachable from
                // the list, so reclaiming it here frees it exactly once.
                let node = unsafe { Box::from_raw(node.as_ptr()) };
                return Some(node.entry);
            }
            previous = cursor;
            cursor = next;
        }

        None
    }

    fn append_without_search(&mut self, entry: Entry<K, V>) {
        self.push_back(entry);
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.iter_nodes()
    }

    fn into_entries(self) -> Self::IntoEntries {
        IntoEntries { bucket: self }
    }

    fn allocated_bytes(&self) -> usize {
        self.len * core::mem::size_of::<ListNode<K, V>>()
    }
}

/// Borrowing iterator over a [`LinkedListBucket`], head to tail.
pub struct Iter<'a, K, V> {
    next: Option<NonNull<ListNode<K, V>>>,
    remaining: usize,
    _marker: PhantomData<&'a ListNode<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        // SAFETY: The list is borrowed for `'a`, so every reachable node stays
        // alive and unmodified for that lifetime.
        let node = unsafe { node.as_ref() };
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Owning iterator over a [`LinkedListBucket`], head to tail.
///
/// Entries not consumed are dropped with the iterator.
pub struct IntoEntries<K, V> {
    bucket: LinkedListBucket<K, V>,
}

impl<K, V> Iterator for IntoEntries<K, V> {
    type Item = Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.bucket.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.bucket.len, Some(self.bucket.len))
    }
}
