//* The registry of a pool could be modeled by a hash set of strong handles, but then no entry
//* would ever be freed while the pool is alive. Instead, we only keep weak references to the
//* interned nodes, grouped in buckets by their structural hash. Each node carries a weak
//* back-reference to this registry, and when its last handle is dropped it calls `evict` with its
//* hash, which removes the dead reference from its bucket.

use crate::ast::rc::{Interned, Node, Rc};
use ahash::AHashMap;
use std::rc;

pub(crate) struct Storage<T: Interned> {
    buckets: AHashMap<u64, Vec<rc::Weak<Node<T>>>>,
}

impl<T: Interned> Storage<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: AHashMap::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, node: &rc::Rc<Node<T>>) {
        let bucket = self.buckets.entry(node.hash).or_default();
        bucket.retain(|entry| entry.strong_count() > 0);
        bucket.push(rc::Rc::downgrade(node));
    }

    /// Removes every dead reference from the bucket associated with `hash`. This is called by a
    /// node when its strong count reaches zero.
    pub fn evict(&mut self, hash: u64) {
        if let Some(bucket) = self.buckets.get_mut(&hash) {
            bucket.retain(|entry| entry.strong_count() > 0);
            if bucket.is_empty() {
                self.buckets.remove(&hash);
            }
            log::trace!("evicted entry with hash {:#018x}", hash);
        }
    }

    // This method is only necessary for the hash consing tests
    #[cfg(test)]
    pub fn len(&self) -> usize {
        let live = |bucket: &Vec<rc::Weak<Node<T>>>| {
            bucket.iter().filter(|entry| entry.strong_count() > 0).count()
        };
        self.buckets.values().map(live).sum()
    }

    // Counts dead registrations as well
    #[cfg(test)]
    pub fn bucket_len(&self, hash: u64) -> usize {
        self.buckets.get(&hash).map_or(0, Vec::len)
    }
}

impl<T: Interned + PartialEq> Storage<T> {
    /// Returns a handle to the live entry that is structurally equal to `value`, if there is one.
    pub fn get(&self, hash: u64, value: &T) -> Option<Rc<T>> {
        self.buckets
            .get(&hash)?
            .iter()
            .filter_map(rc::Weak::upgrade)
            .find(|node| node.value == *value)
            .map(Rc::from_node)
    }
}
