//! `minicache` — an in-process, single-node key-value cache with a
//! byte-budget bound, an LRU key-count bound, and per-key TTL expiration.
//!
//! The hard part is keeping three auxiliary structures mutually
//! consistent under every mutation and under passive expiration sweeps:
//! a [`primary_map::PrimaryMap`] (authoritative key -> value/expiry), a
//! [`recency::RecencyIndex`] (O(1) LRU touch/evict), and an
//! [`expiration::ExpirationIndex`] (time-ordered expiration candidates).
//! [`cache::Cache`] is the facade that sequences them.
//!
//! ```
//! use minicache::Cache;
//!
//! let mut cache = Cache::new(1024 * 1024, 100).unwrap();
//! cache.set("user:1", "alice", 0).unwrap();
//! assert_eq!(cache.get("user:1"), Some("alice".to_string()));
//! ```

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod expiration;
pub mod primary_map;
pub mod recency;
pub mod shared;

pub use cache::Cache;
pub use config::CacheConfig;
pub use error::CacheError;
pub use shared::SharedCache;
