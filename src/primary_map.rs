//! Primary Map: the authoritative `key -> (value, expiry)` store.
//!
//! Grounded on `original_source/include/HashTable.hpp` and
//! `src/HashTable.cpp`, which hand-roll a bucket-vector hash table with a
//! 0.75 load factor and a doubling resize. `hashbrown::HashMap` already
//! gives the same amortized O(1) insert/lookup/remove with load-factor
//! resizing built in — the teacher crate (`src/stores.rs`) reaches for
//! `hashbrown` directly rather than re-deriving bucket/resize logic, and
//! this module follows the same call.

use hashbrown::HashMap;

/// A key's expiration: either it never expires, or it expires at an
/// absolute second-resolution timestamp.
///
/// The original source represents "never" with a sentinel `-1`
/// `long long`; Rust has sum types, so we use one instead of overloading
/// `u64::MAX` or similar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    Never,
    At(u64),
}

impl Expiry {
    /// `expired ⇔ now > expiry`, strict inequality, applied uniformly —
    /// a key whose expiry equals `now` is still visible for one more
    /// second. The original source is inconsistent about this (compares
    /// `>` in some places and `<=` in others); this crate picks the one
    /// rule and applies it everywhere.
    fn is_expired_at(&self, now: u64) -> bool {
        matches!(self, Expiry::At(expiry) if now > *expiry)
    }
}

#[derive(Debug, Clone)]
struct Record {
    value: Box<str>,
    expiry: Expiry,
}

/// Authoritative key/value/expiry store.
#[derive(Debug, Default)]
pub struct PrimaryMap {
    table: HashMap<Box<str>, Record>,
}

impl PrimaryMap {
    pub fn new() -> Self {
        PrimaryMap {
            table: HashMap::new(),
        }
    }

    /// Insert or overwrite `key`. Never fails for well-formed input; the
    /// `bool` return is reserved for future use, per the operation
    /// contract.
    pub fn insert(&mut self, key: &str, value: &str, expiry: Expiry) -> bool {
        match self.table.get_mut(key) {
            Some(record) => {
                record.value = value.into();
                record.expiry = expiry;
            }
            None => {
                self.table.insert(key.into(), Record {
                    value: value.into(),
                    expiry,
                });
            }
        }
        true
    }

    /// Returns the value iff the key is present and not expired at `now`.
    /// Never removes an expired entry — passive expiration is the
    /// Facade's job.
    pub fn get(&self, key: &str, now: u64) -> Option<&str> {
        let record = self.table.get(key)?;
        if record.expiry.is_expired_at(now) {
            return None;
        }
        Some(&record.value)
    }

    /// Looks up the current value and expiry regardless of whether the
    /// entry has expired. Used by the Facade to compute `estimate` for a
    /// key being overwritten or evicted.
    pub fn peek_raw(&self, key: &str) -> Option<(&str, Expiry)> {
        self.table.get(key).map(|r| (&*r.value, r.expiry))
    }

    /// Removes `key` unconditionally, expired or not. Returns whether it
    /// was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.table.remove(key).is_some()
    }

    /// Equivalent to `get(key, now).is_some()`.
    pub fn exists(&self, key: &str, now: u64) -> bool {
        self.get(key, now).is_some()
    }

    /// If `key` is present and not already expired at `now`, sets its
    /// expiry and returns success; otherwise fails without mutation.
    pub fn update_expiry(&mut self, key: &str, expiry: Expiry, now: u64) -> bool {
        match self.table.get_mut(key) {
            Some(record) if !record.expiry.is_expired_at(now) => {
                record.expiry = expiry;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Keys whose `expiry` is not "never" and `now > expiry`.
    pub fn collect_expired(&self, now: u64) -> Vec<Box<str>> {
        self.table
            .iter()
            .filter(|(_, record)| record.expiry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect()
    }
}
