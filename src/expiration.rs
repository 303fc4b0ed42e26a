//! Expiration Index: a time-ordered min-heap of expiration candidates.
//!
//! Grounded on `original_source/include/TTLManager.hpp` /
//! `src/TTLManager.cpp`, a `priority_queue<TTLEntry, vector<TTLEntry>,
//! greater<TTLEntry>>` ordered by ascending `expiryTime`. `BinaryHeap`
//! is a max-heap by default, so records are wrapped in `Reverse` to get
//! the same min-heap ordering without a custom `Ord` impl fighting the
//! standard max-heap direction.
//!
//! Duplicates for the same key are expected and tolerated: a key's TTL
//! may be extended by a later `set`/`expire` without purging the earlier
//! record (see staleness policy in the design doc). The Facade, not this
//! index, validates drained keys against the Primary Map before acting
//! on them.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug, Default)]
pub struct ExpirationIndex {
    heap: BinaryHeap<Reverse<(u64, Box<str>)>>,
}

impl ExpirationIndex {
    pub fn new() -> Self {
        ExpirationIndex {
            heap: BinaryHeap::new(),
        }
    }

    /// Inserts a record. Duplicates for the same key are permitted.
    pub fn add(&mut self, key: &str, expiry: u64) {
        self.heap.push(Reverse((expiry, key.into())));
    }

    pub fn peek_min(&self) -> Option<(&str, u64)> {
        self.heap.peek().map(|Reverse((expiry, key))| (&**key, *expiry))
    }

    /// Removes every record whose `expiry <= now` and returns their keys
    /// in ascending-expiry order. Callers must treat the result as
    /// candidates, not certainties — a key may have been re-set with a
    /// later expiry since this record was added.
    pub fn drain_expired(&mut self, now: u64) -> Vec<Box<str>> {
        let mut drained = Vec::new();
        while let Some(Reverse((expiry, _))) = self.heap.peek() {
            if *expiry > now {
                break;
            }
            let Reverse((_, key)) = self.heap.pop().expect("peeked element must pop");
            drained.push(key);
        }
        drained
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_expired_returns_ascending_order() {
        let mut idx = ExpirationIndex::new();
        idx.add("c", 30);
        idx.add("a", 10);
        idx.add("b", 20);
        let drained = idx.drain_expired(25);
        assert_eq!(
            drained.iter().map(|k| &**k).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn drain_expired_is_inclusive_of_now() {
        let mut idx = ExpirationIndex::new();
        idx.add("a", 10);
        assert!(idx.drain_expired(9).is_empty());
        assert_eq!(idx.drain_expired(10).len(), 1);
    }

    #[test]
    fn duplicates_for_same_key_are_tolerated() {
        let mut idx = ExpirationIndex::new();
        idx.add("a", 10);
        idx.add("a", 20);
        assert_eq!(idx.len(), 2);
        let drained = idx.drain_expired(15);
        assert_eq!(drained.len(), 1);
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn peek_min_reflects_smallest_expiry() {
        let mut idx = ExpirationIndex::new();
        idx.add("later", 100);
        idx.add("sooner", 5);
        assert_eq!(idx.peek_min(), Some(("sooner", 5)));
    }

    #[test]
    fn clear_empties_heap() {
        let mut idx = ExpirationIndex::new();
        idx.add("a", 10);
        idx.clear();
        assert!(idx.is_empty());
    }
}
