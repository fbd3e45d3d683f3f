use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;

use super::Bucket;
use crate::entry::Entry;

type NodeId = usize;

#[derive(Clone)]
struct TreeNode<K, V> {
    entry: Entry<K, V>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

/// A bucket backed by an unbalanced binary search tree ordered by key.
///
/// Nodes live in a dense arena and refer to each other by index, with a
/// parent link on every node. Removing a node swaps the last arena slot into
/// the hole, so the arena never holds dead nodes.
///
/// The tree is not rebalanced. Feeding it keys in sorted order degrades it to
/// a list.
#[derive(Clone)]
pub struct TreeBucket<K, V> {
    nodes: Vec<TreeNode<K, V>>,
    root: Option<NodeId>,
}

impl<K, V> Default for TreeBucket<K, V> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }
}

impl<K: Debug, V: Debug> Debug for TreeBucket<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.in_order()).finish()
    }
}

impl<K, V> TreeBucket<K, V> {
    fn in_order(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            stack: Vec::new(),
            cursor: self.root,
            remaining: self.nodes.len(),
        }
    }

    /// Points whatever referred to `node` (its parent or the root) at
    /// `replacement` instead.
    fn replace_child(&mut self, node: NodeId, replacement: Option<NodeId>) {
        let parent = self.nodes[node].parent;
        if let Some(replacement) = replacement {
            self.nodes[replacement].parent = parent;
        }
        match parent {
            None => self.root = replacement,
            Some(parent) => {
                let parent = &mut self.nodes[parent];
                if parent.left == Some(node) {
                    parent.left = replacement;
                } else {
                    parent.right = replacement;
                }
            }
        }
    }

    /// Frees the arena slot of an already unlinked node.
    ///
    /// The last node moves into the freed slot and its neighbours are
    /// re-pointed. Callers holding the id of the last node must remap it to
    /// `id`.
    fn release(&mut self, id: NodeId) -> Entry<K, V> {
        let last = self.nodes.len() - 1;
        let removed = self.nodes.swap_remove(id);
        if id != last {
            let moved = &self.nodes[id];
            let (parent, left, right) = (moved.parent, moved.left, moved.right);
            match parent {
                None => self.root = Some(id),
                Some(parent) => {
                    let parent = &mut self.nodes[parent];
                    if parent.left == Some(last) {
                        parent.left = Some(id);
                    } else {
                        parent.right = Some(id);
                    }
                }
            }
            for child in [left, right].into_iter().flatten() {
                self.nodes[child].parent = Some(id);
            }
        }

        removed.entry
    }
}

impl<K: Ord, V> TreeBucket<K, V> {
    fn locate(&self, key: &K) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            cursor = match key.cmp(node.entry.key()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }

        None
    }
}

impl<K: Ord, V> Bucket<K, V> for TreeBucket<K, V> {
    type Iter<'a>
        = Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IntoEntries = IntoEntries<K, V>;

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn find(&self, key: &K) -> Option<&Entry<K, V>> {
        self.locate(key).map(|id| &self.nodes[id].entry)
    }

    fn find_mut(&mut self, key: &K) -> Option<&mut Entry<K, V>> {
        let id = self.locate(key)?;
        Some(&mut self.nodes[id].entry)
    }

    fn insert(&mut self, entry: Entry<K, V>) -> Option<V> {
        let Some(mut id) = self.root else {
            self.root = Some(0);
            self.nodes.push(TreeNode {
                entry,
                left: None,
                right: None,
                parent: None,
            });
            return None;
        };

        loop {
            let new_id = self.nodes.len();
            let node = &mut self.nodes[id];
            let child = match entry.key().cmp(node.entry.key()) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return Some(node.entry.replace_value(entry.into_value())),
            };
            match *child {
                Some(next) => id = next,
                None => {
                    *child = Some(new_id);
                    self.nodes.push(TreeNode {
                        entry,
                        left: None,
                        right: None,
                        parent: Some(id),
                    });
                    return None;
                }
            }
        }
    }

    fn remove(&mut self, key: &K) -> Option<Entry<K, V>> {
        let target = self.locate(key)?;
        let node = &self.nodes[target];
        match (node.left, node.right) {
            (Some(left), Some(_)) => {
                // The in-order predecessor has no right child, so unlinking it
                // is a single splice. Its entry then takes the target's place.
                let mut predecessor = left;
                while let Some(next) = self.nodes[predecessor].right {
                    predecessor = next;
                }
                let orphan = self.nodes[predecessor].left;
                self.replace_child(predecessor, orphan);

                let last = self.nodes.len() - 1;
                let target = if target == last { predecessor } else { target };
                let replacement = self.release(predecessor);
                Some(core::mem::replace(&mut self.nodes[target].entry, replacement))
            }
            (child, None) | (None, child) => {
                self.replace_child(target, child);
                Some(self.release(target))
            }
        }
    }

    fn append_without_search(&mut self, entry: Entry<K, V>) {
        self.insert(entry);
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.in_order()
    }

    /// Yields entries in pre-order, so inserting them into an empty tree in
    /// this order rebuilds the same shape.
    fn into_entries(self) -> Self::IntoEntries {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            let node = &self.nodes[id];
            stack.extend(node.right);
            stack.extend(node.left);
        }

        IntoEntries {
            slots: self.nodes.into_iter().map(|node| Some(node.entry)).collect(),
            order: order.into_iter(),
        }
    }

    fn allocated_bytes(&self) -> usize {
        self.nodes.capacity() * core::mem::size_of::<TreeNode<K, V>>()
    }
}

/// In-order iterator over a [`TreeBucket`], smallest key first.
pub struct Iter<'a, K, V> {
    nodes: &'a [TreeNode<K, V>],
    stack: Vec<NodeId>,
    cursor: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        while let Some(id) = self.cursor {
            self.stack.push(id);
            self.cursor = nodes[id].left;
        }
        let id = self.stack.pop()?;
        self.cursor = nodes[id].right;
        self.remaining -= 1;
        Some(&nodes[id].entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Pre-order owning iterator over a [`TreeBucket`].
pub struct IntoEntries<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    order: alloc::vec::IntoIter<NodeId>,
}

impl<K, V> Iterator for IntoEntries<K, V> {
    type Item = Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.order.next()?;
        self.slots[id].take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}
