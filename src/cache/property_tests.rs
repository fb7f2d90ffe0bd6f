//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store against a simple reference model.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::cache::CacheStore;

// == Test Configuration ==
const TEST_TTL_MS: u64 = 5_000;

// == Strategies ==
/// Generates cache keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: u32 },
    Get { key: String },
    Remove { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Remove { key }),
    ]
}

// == Reference Model ==
/// Vec ordered least to most recently used. Nothing expires within one
/// test run because time never advances past the TTL.
#[derive(Default)]
struct LruModel {
    order: Vec<(String, u32)>,
}

impl LruModel {
    fn get(&mut self, key: &str) -> Option<u32> {
        let pos = self.order.iter().position(|(k, _)| k == key)?;
        let item = self.order.remove(pos);
        let value = item.1;
        self.order.push(item);
        Some(value)
    }

    fn set(&mut self, key: String, value: u32, capacity: usize) -> Option<String> {
        let mut evicted = None;
        if let Some(pos) = self.order.iter().position(|(k, _)| *k == key) {
            self.order.remove(pos);
        } else if self.order.len() >= capacity {
            evicted = Some(self.order.remove(0).0);
        }
        self.order.push((key, value));
        evicted
    }

    fn remove(&mut self, key: &str) -> bool {
        match self.order.iter().position(|(k, _)| k == key) {
            Some(pos) => {
                self.order.remove(pos);
                true
            }
            None => false,
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Any operation sequence behaves exactly like the reference LRU model
    #[test]
    fn prop_matches_lru_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let mut store = CacheStore::new(capacity, TEST_TTL_MS);
        let mut model = LruModel::default();

        for (step, op) in ops.into_iter().enumerate() {
            let now = step as u64;
            match op {
                CacheOp::Set { key, value } => {
                    let expected = model.set(key.clone(), value, capacity);
                    let evicted = store.set(key, value, None, now);
                    prop_assert_eq!(evicted, expected);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.get(&key, now), model.get(&key));
                }
                CacheOp::Remove { key } => {
                    prop_assert_eq!(store.remove(&key), model.remove(&key));
                }
            }
            prop_assert!(store.len() <= capacity);
            prop_assert_eq!(store.len(), model.order.len());
        }
    }

    // Filling a full store with one new key evicts exactly the oldest key
    #[test]
    fn prop_new_key_at_capacity_evicts_exactly_one(
        keys in prop::collection::hash_set("[a-z]{1,8}", 2..30),
        new_key in "[A-Z]{1,8}"
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let capacity = keys.len();
        let mut store = CacheStore::new(capacity, TEST_TTL_MS);

        for key in &keys {
            store.set(key.clone(), 0u8, None, 0);
        }
        let evicted = store.set(new_key.clone(), 1u8, None, 0);

        prop_assert_eq!(evicted.as_deref(), Some(keys[0].as_str()));
        prop_assert_eq!(store.len(), capacity);
        prop_assert!(store.peek(&new_key).is_some());
    }

    // A value is served up to its expiry and never after it
    #[test]
    fn prop_never_served_after_expiry(
        ttl in 0u64..10_000,
        reads in prop::collection::vec(0u64..20_000, 1..20)
    ) {
        let mut store = CacheStore::new(10, TEST_TTL_MS);
        store.set("k".to_string(), 7u32, Some(ttl), 0);

        let mut reads = reads;
        reads.sort_unstable();
        for now in reads {
            let value = store.get("k", now);
            if now > ttl {
                prop_assert_eq!(value, None);
            } else {
                prop_assert_eq!(value, Some(7));
            }
        }
    }

    // Expired entries are purged before anything live is evicted
    #[test]
    fn prop_expired_entries_purged_before_eviction(
        short_lived in prop::collection::hash_set("[a-z]{1,6}", 1..10),
        long_lived in prop::collection::hash_set("[A-Z]{1,6}", 1..10)
    ) {
        let capacity = short_lived.len() + long_lived.len();
        let mut store = CacheStore::new(capacity, TEST_TTL_MS);

        // Long-lived keys go in first, so they are the LRU candidates
        for key in &long_lived {
            store.set(key.clone(), (), Some(100_000), 0);
        }
        for key in &short_lived {
            store.set(key.clone(), (), Some(10), 0);
        }

        let evicted = store.set("0new".to_string(), (), None, 1_000);

        prop_assert_eq!(evicted, None);
        let surviving: HashSet<&String> = long_lived.iter().filter(|k| store.peek(k).is_some()).collect();
        prop_assert_eq!(surviving.len(), long_lived.len());
        prop_assert_eq!(store.len(), long_lived.len() + 1);
    }
}

// == Concurrent Access ==
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // Concurrent get_or_compute callers never push the store past capacity
    // and every returned value is one some caller computed for that key
    #[test]
    fn prop_concurrent_get_or_compute_respects_capacity(
        keys in prop::collection::vec(key_strategy(), 10..60)
    ) {
        use crate::cache::SharedCache;
        use crate::clock::ManualClock;
        use std::sync::Arc;

        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .build()
            .unwrap();

        rt.block_on(async {
            let capacity = 5;
            let cache = SharedCache::new(
                CacheStore::new(capacity, TEST_TTL_MS),
                Arc::new(ManualClock::new(0)),
            );

            let mut handles = Vec::new();
            for key in keys {
                let cache = cache.clone();
                handles.push(tokio::spawn(async move {
                    let expected = format!("value-{}", key);
                    let computed = expected.clone();
                    let got = cache
                        .get_or_compute(&key, None, || async move { Ok::<_, ()>(computed) })
                        .await;
                    (got, expected)
                }));
            }

            for handle in handles {
                let (got, expected) = handle.await.unwrap();
                prop_assert_eq!(got, Ok(expected));
            }

            prop_assert!(cache.len().await <= capacity);
            Ok(())
        })?;
    }
}
