//! Black-box end-to-end scenarios against the public `Cache` API, the
//! way the teacher crate reserves `tests/` for whole-crate behavior
//! (`tests/cached.rs`) and keeps narrower unit tests inside each module.
//!
//! Each `#[test]` here corresponds to one of the six end-to-end
//! scenarios in the design doc. `T0` is always `0`; scenarios "advance
//! now" by calling the `_at` variants with a later timestamp rather than
//! sleeping.

use minicache::Cache;

const T0: u64 = 1_000_000;

#[test]
fn scenario_1_set_get_delete_roundtrip() {
    let mut cache = Cache::new(1 << 20, 10).unwrap();
    assert!(cache.set_at("a", "1", 0, T0).unwrap());
    assert_eq!(cache.get_at("a", T0), Some("1".to_string()));
    assert!(cache.del_at("a", T0));
    assert_eq!(cache.get_at("a", T0), None);
}

#[test]
fn scenario_2_ttl_expiry() {
    let mut cache = Cache::new(1 << 20, 10).unwrap();
    cache.set_at("k", "v", 2, T0).unwrap();
    assert_eq!(cache.get_at("k", T0), Some("v".to_string()));
    assert_eq!(cache.get_at("k", T0 + 3), None);
    assert!(!cache.exists_at("k", T0 + 3));
}

#[test]
fn scenario_3_get_promotes_lru_order() {
    let mut cache = Cache::new(1 << 20, 3).unwrap();
    cache.set_at("a", "1", 0, T0).unwrap();
    cache.set_at("b", "2", 0, T0).unwrap();
    cache.set_at("c", "3", 0, T0).unwrap();
    cache.get_at("a", T0); // promotes a; b is now LRU
    cache.set_at("d", "4", 0, T0).unwrap();
    assert!(cache.exists_at("a", T0));
    assert!(!cache.exists_at("b", T0));
    assert!(cache.exists_at("c", T0));
    assert!(cache.exists_at("d", T0));
}

#[test]
fn scenario_4_expire_command() {
    let mut cache = Cache::new(1 << 20, 10).unwrap();
    cache.set_at("x", "y", 0, T0).unwrap();
    assert!(!cache.expire_at("x", 0, T0));
    assert!(cache.expire_at("x", 5, T0));
    assert_eq!(cache.get_at("x", T0 + 6), None);
}

#[test]
fn scenario_5_flush_resets_everything() {
    let mut cache = Cache::new(1 << 20, 10).unwrap();
    cache.set_at("a", "1", 0, T0).unwrap();
    cache.set_at("b", "2", 0, T0).unwrap();
    cache.flush();
    assert!(!cache.exists_at("a", T0));
    assert!(!cache.exists_at("b", T0));
    assert_eq!(cache.key_count(), 0);
    assert_eq!(cache.memory_usage(), 0);
}

#[test]
fn scenario_6_two_key_capacity_evicts_oldest() {
    let mut cache = Cache::new(1 << 20, 2).unwrap();
    cache.set_at("a", "1", 0, T0).unwrap();
    cache.set_at("b", "2", 0, T0).unwrap();
    cache.set_at("c", "3", 0, T0).unwrap();
    assert_eq!(cache.key_count(), 2);
    assert!(!cache.exists_at("a", T0));
    assert!(cache.exists_at("b", T0));
    assert!(cache.exists_at("c", T0));
}

#[test]
fn p1_membership_agreement_after_mixed_operations() {
    let mut cache = Cache::new(1 << 20, 5).unwrap();
    for i in 0..5 {
        cache.set_at(&format!("k{i}"), "v", 0, T0).unwrap();
    }
    cache.del_at("k2", T0);
    cache.set_at("k5", "v", 1, T0).unwrap();
    assert_eq!(cache.key_count(), 5);
    assert!(!cache.exists_at("k2", T0));
    for i in [0, 1, 3, 4] {
        assert!(cache.exists_at(&format!("k{i}"), T0));
    }
}

#[test]
fn p3_key_count_never_exceeds_max_keys() {
    let mut cache = Cache::new(1 << 20, 4).unwrap();
    for i in 0..100 {
        cache.set_at(&format!("k{i}"), "v", 0, T0).unwrap();
        assert!(cache.key_count() <= 4);
    }
}

#[test]
fn p5_ttl_enforced_across_all_observer_operations() {
    let mut cache = Cache::new(1 << 20, 10).unwrap();
    cache.set_at("a", "1", 1, T0).unwrap();
    let later = T0 + 5;
    assert_eq!(cache.get_at("a", later), None);
    assert!(!cache.exists_at("a", later));
    assert!(!cache.del_at("a", later));
    assert!(!cache.expire_at("a", 10, later));
}

#[test]
fn round_trip_law() {
    let mut cache = Cache::new(1 << 20, 10).unwrap();
    cache.set_at("key", "value", 0, T0).unwrap();
    assert_eq!(cache.get_at("key", T0), Some("value".to_string()));
}

#[test]
fn overwrite_law_keeps_key_count_stable() {
    let mut cache = Cache::new(1 << 20, 10).unwrap();
    cache.set_at("k", "v1", 0, T0).unwrap();
    cache.set_at("k", "v2", 0, T0).unwrap();
    assert_eq!(cache.get_at("k", T0), Some("v2".to_string()));
    assert_eq!(cache.key_count(), 1);
}

#[test]
fn expire_between_sweep_and_call_is_treated_as_absent() {
    let mut cache = Cache::new(1 << 20, 10).unwrap();
    cache.set_at("a", "1", 1, T0).unwrap();
    // advancing past the TTL means the passive sweep inside expire_at
    // removes "a" before the expire logic itself runs
    assert!(!cache.expire_at("a", 10, T0 + 10));
}

#[test]
fn empty_value_strings_round_trip() {
    let mut cache = Cache::new(1 << 20, 10).unwrap();
    cache.set_at("a", "", 0, T0).unwrap();
    assert_eq!(cache.get_at("a", T0), Some(String::new()));
}

#[test]
fn max_keys_one_every_set_evicts_the_prior_key() {
    let mut cache = Cache::new(1 << 20, 1).unwrap();
    cache.set_at("a", "1", 0, T0).unwrap();
    cache.set_at("b", "2", 0, T0).unwrap();
    assert_eq!(cache.key_count(), 1);
    assert!(cache.exists_at("b", T0));
}

#[test]
fn zero_byte_budget_evicts_down_to_the_key_just_set() {
    let mut cache = Cache::new(0, 10).unwrap();
    cache.set_at("a", "1", 0, T0).unwrap();
    cache.set_at("b", "2", 0, T0).unwrap();
    assert_eq!(cache.key_count(), 1);
    assert!(cache.exists_at("b", T0));
}

#[test]
fn overwriting_lru_tail_key_at_key_count_capacity_is_safe() {
    // The key being overwritten is itself the LRU tail at an index that
    // is exactly at capacity. Budget enforcement must not be able to
    // evict it mid-overwrite and read its stale byte estimate out of
    // the Primary Map.
    let mut cache = Cache::new(1 << 20, 2).unwrap();
    cache.set_at("a", "11111", 0, T0).unwrap();
    cache.set_at("b", "22222", 0, T0).unwrap();
    cache.set_at("a", "1", 0, T0).unwrap();
    assert_eq!(cache.key_count(), 2);
    assert!(cache.exists_at("b", T0));
    assert_eq!(cache.get_at("a", T0), Some("1".to_string()));
}
