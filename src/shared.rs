//! Thread-safe wrapper for multi-threaded use.
//!
//! The design requires that a concurrent implementation serialize all
//! public operations behind a single mutex spanning the three
//! substructures and the byte counter — partial locking would violate
//! the membership and byte-accounting invariants. `parking_lot::Mutex`
//! is the teacher crate's synchronization primitive of choice (used the
//! same way here: one lock, no substructure ever accessed outside it).

use crate::cache::Cache;
use crate::config::CacheConfig;
use crate::error::CacheError;
use parking_lot::Mutex;

/// `Cache` behind a single `parking_lot::Mutex`, safe to share across
/// threads. Each public method takes the lock for the duration of one
/// cache operation and releases it before returning.
pub struct SharedCache {
    inner: Mutex<Cache>,
}

impl SharedCache {
    pub fn new(max_memory: usize, max_keys: usize) -> Result<Self, CacheError> {
        Ok(SharedCache {
            inner: Mutex::new(Cache::new(max_memory, max_keys)?),
        })
    }

    pub fn with_config(config: CacheConfig) -> Result<Self, CacheError> {
        Ok(SharedCache {
            inner: Mutex::new(Cache::with_config(config)?),
        })
    }

    pub fn set(&self, key: &str, value: &str, ttl_seconds: i64) -> Result<bool, CacheError> {
        self.inner.lock().set(key, value, ttl_seconds)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().get(key)
    }

    pub fn del(&self, key: &str) -> bool {
        self.inner.lock().del(key)
    }

    pub fn exists(&self, key: &str) -> bool {
        self.inner.lock().exists(key)
    }

    pub fn expire(&self, key: &str, seconds: i64) -> bool {
        self.inner.lock().expire(key, seconds)
    }

    pub fn flush(&self) {
        self.inner.lock().flush()
    }

    pub fn key_count(&self) -> usize {
        self.inner.lock().key_count()
    }

    pub fn memory_usage(&self) -> usize {
        self.inner.lock().memory_usage()
    }

    pub fn ops_per_second(&self) -> f64 {
        self.inner.lock().ops_per_second()
    }
}
