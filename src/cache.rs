//! Cache Facade: sequences the three substructures, owns the byte
//! counter, and enforces the byte and key-count budgets.
//!
//! Grounded on `original_source/include/Cache.hpp` / `src/Cache.cpp`,
//! which owns a `HashTable`, `LRUCache`, and `TTLManager` and drives
//! `cleanupExpiredKeys` / `evictIfNeeded` around every public operation.
//! The algorithm here is unchanged from the original; only the pieces it
//! is built from are idiomatic Rust.

use crate::clock::now_secs;
use crate::error::CacheError;
use crate::expiration::ExpirationIndex;
use crate::primary_map::{Expiry, PrimaryMap};
use crate::recency::RecencyIndex;
use crate::CacheConfig;
use std::time::Instant;

/// Fixed per-entry bookkeeping overhead added to `key.len() + value.len()`
/// when estimating an entry's footprint. The original computes this as
/// `sizeof(HashNode) + sizeof(LRUNode)`, which is platform-dependent; this
/// crate picks a single portable constant instead (open question in the
/// design doc, resolved here).
const ENTRY_OVERHEAD_BYTES: usize = 48;

/// The composite key-value cache: Primary Map + Recency Index +
/// Expiration Index, kept mutually consistent by this Facade.
pub struct Cache {
    primary: PrimaryMap,
    recency: RecencyIndex,
    expiration: ExpirationIndex,
    bytes: usize,
    config: CacheConfig,
    total_operations: u64,
    start_time: Instant,
}

fn estimate(key: &str, value: &str) -> usize {
    key.len() + value.len() + ENTRY_OVERHEAD_BYTES
}

impl Cache {
    /// Constructs a cache with the given byte and key-count budgets.
    /// Fails if `max_keys == 0` — the Recency Index's arena list assumes
    /// a capacity of at least one. `max_memory == 0` is legal: see
    /// `set`'s budget-recovery note.
    pub fn new(max_memory: usize, max_keys: usize) -> Result<Self, CacheError> {
        Self::with_config(CacheConfig::new(max_memory, max_keys))
    }

    pub fn with_config(config: CacheConfig) -> Result<Self, CacheError> {
        if config.max_keys == 0 {
            return Err(CacheError::ZeroCapacity);
        }
        Ok(Cache {
            primary: PrimaryMap::new(),
            recency: RecencyIndex::new(config.max_keys),
            expiration: ExpirationIndex::new(),
            bytes: 0,
            config,
            total_operations: 0,
            start_time: Instant::now(),
        })
    }

    /// Passive expiration sweep: collect truly-expired keys from the
    /// Primary Map (the authority), remove them everywhere, then drain
    /// the Expiration Index of whatever records have crossed `now` —
    /// some of those keys may already be gone, or may have had their TTL
    /// extended since the record was added; either way the Primary Map
    /// removal already happened (or didn't need to), so drained keys are
    /// simply discarded.
    fn sweep(&mut self, now: u64) {
        let expired = self.primary.collect_expired(now);
        for key in &expired {
            if let Some((value, _)) = self.primary.peek_raw(key) {
                self.bytes -= estimate(key, value);
            }
            self.primary.remove(key);
            self.recency.remove(key);
        }
        if !expired.is_empty() {
            tracing::debug!(count = expired.len(), "passive expiration swept keys");
        }
        self.expiration.drain_expired(now);
    }

    fn evict_one(&mut self) -> Option<Box<str>> {
        let key = self.recency.evict_tail()?;
        if let Some((value, _)) = self.primary.peek_raw(&key) {
            self.bytes -= estimate(&key, value);
        }
        self.primary.remove(&key);
        Some(key)
    }

    /// Enforce budgets by evicting from the tail of the Recency Index
    /// while either the byte budget or the key-count budget is exceeded.
    /// Stops if the index becomes empty, which is how a single entry
    /// larger than `max_memory` is allowed through (P4): it evicts
    /// everything else, gets inserted, and the byte counter is left
    /// above budget until it is itself evicted or deleted.
    fn enforce_budgets(&mut self) {
        while self.bytes > self.config.max_memory || self.recency.is_full() {
            match self.evict_one() {
                Some(key) => tracing::debug!(%key, "evicted entry to satisfy budget"),
                None => break,
            }
        }
    }

    /// `ttl_seconds <= 0` means "no TTL".
    pub fn set(&mut self, key: &str, value: &str, ttl_seconds: i64) -> Result<bool, CacheError> {
        self.set_at(key, value, ttl_seconds, now_secs())
    }

    /// Time-parameterized `set`, for deterministic tests.
    pub fn set_at(
        &mut self,
        key: &str,
        value: &str,
        ttl_seconds: i64,
        now: u64,
    ) -> Result<bool, CacheError> {
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }
        self.total_operations += 1;
        self.sweep(now);

        // Retire any existing entry for `key` completely — out of the
        // Primary Map and the Recency Index — before budget enforcement
        // runs below. Otherwise, if `key` is already tracked and happens
        // to be (or become) the Recency Index's tail while the index is
        // at capacity, `enforce_budgets` could evict `key` itself via
        // `evict_one`, which reads whatever `peek_raw` still returns for
        // it — the *old*, pre-overwrite value — and subtract that from
        // the byte counter a second time, underflowing it.
        if let Some((old_value, _)) = self.primary.peek_raw(key) {
            self.bytes -= estimate(key, old_value);
            self.primary.remove(key);
            self.recency.remove(key);
        }
        self.bytes += estimate(key, value);

        self.enforce_budgets();

        let expiry = if ttl_seconds > 0 {
            let expiry_at = now + ttl_seconds as u64;
            self.expiration.add(key, expiry_at);
            Expiry::At(expiry_at)
        } else {
            Expiry::Never
        };

        self.primary.insert(key, value, expiry);

        // `key` was fully retired above, so `touch` always sees it as
        // brand new here: it may itself evict a tail key if the index is
        // now at capacity, and that eviction is necessarily some other
        // key, never `key` itself.
        if let Some(evicted) = self.recency.touch(key) {
            if let Some((value, _)) = self.primary.peek_raw(&evicted) {
                self.bytes -= estimate(&evicted, value);
            }
            self.primary.remove(&evicted);
            tracing::debug!(key = %evicted, "evicted entry on touch at capacity");
        }

        if self.bytes > self.config.max_memory {
            // P4 guarantees this only happens when the cache holds
            // exactly the key just set: a single entry larger than the
            // whole byte budget. Everything else was evicted to make
            // room for it; there's nothing left to evict it in turn.
            tracing::warn!(
                key,
                bytes = self.bytes,
                max_memory = self.config.max_memory,
                "entry larger than byte budget inserted; cache left over budget"
            );
        }

        Ok(true)
    }

    pub fn get(&mut self, key: &str) -> Option<String> {
        self.get_at(key, now_secs())
    }

    pub fn get_at(&mut self, key: &str, now: u64) -> Option<String> {
        self.total_operations += 1;
        self.sweep(now);
        let value = self.primary.get(key, now).map(str::to_owned);
        if value.is_some() {
            self.recency.touch(key);
        }
        value
    }

    pub fn del(&mut self, key: &str) -> bool {
        self.del_at(key, now_secs())
    }

    pub fn del_at(&mut self, key: &str, now: u64) -> bool {
        self.total_operations += 1;
        self.sweep(now);
        // The sweep above has already removed anything expired as of
        // `now`, so whatever remains in the Primary Map is live.
        match self.primary.peek_raw(key) {
            Some((value, _)) => {
                self.bytes -= estimate(key, value);
                self.primary.remove(key);
                self.recency.remove(key);
                true
            }
            None => false,
        }
    }

    pub fn exists(&mut self, key: &str) -> bool {
        self.exists_at(key, now_secs())
    }

    pub fn exists_at(&mut self, key: &str, now: u64) -> bool {
        self.total_operations += 1;
        self.sweep(now);
        self.primary.exists(key, now)
    }

    /// `seconds` must be positive. Fails if the key is absent or already
    /// expired.
    pub fn expire(&mut self, key: &str, seconds: i64) -> bool {
        self.expire_at(key, seconds, now_secs())
    }

    pub fn expire_at(&mut self, key: &str, seconds: i64, now: u64) -> bool {
        self.total_operations += 1;
        self.sweep(now);
        if seconds <= 0 || !self.primary.exists(key, now) {
            return false;
        }
        let expiry_at = now + seconds as u64;
        self.expiration.add(key, expiry_at);
        self.primary.update_expiry(key, Expiry::At(expiry_at), now)
    }

    /// Clears all three substructures and resets the byte counter. The
    /// operation counter still increments and `start_time` is not reset
    /// — `ops_per_second` therefore reflects cumulative throughput across
    /// flushes, matching the original's behavior (open question,
    /// preserved deliberately).
    pub fn flush(&mut self) {
        self.total_operations += 1;
        self.primary.clear();
        self.recency.clear();
        self.expiration.clear();
        self.bytes = 0;
    }

    pub fn key_count(&self) -> usize {
        self.primary.len()
    }

    pub fn memory_usage(&self) -> usize {
        self.bytes
    }

    pub fn max_memory(&self) -> usize {
        self.config.max_memory
    }

    pub fn max_keys(&self) -> usize {
        self.config.max_keys
    }

    pub fn ttl_index_size(&self) -> usize {
        self.expiration.len()
    }

    pub fn total_operations(&self) -> u64 {
        self.total_operations
    }

    pub fn ops_per_second(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_operations as f64 / elapsed
        } else {
            0.0
        }
    }
}
