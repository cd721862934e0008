// ==============================================
// CACHE BEHAVIOR TESTS (integration)
// ==============================================
//
// End-to-end checks of the public contract: round trips, the capacity bound,
// recency promotion, duplicate-key updates, miss purity, and teardown. A
// model-based proptest compares the cache against a naive reference
// implementation under random operation sequences.

use webcache::{CacheError, WebCache};

fn keys_mru_to_lru(cache: &WebCache) -> Vec<String> {
    cache.iter().map(|e| e.key().to_string()).collect()
}

// ==============================================
// Round trip
// ==============================================

#[test]
fn put_then_get_returns_what_was_stored() {
    let mut cache = WebCache::try_new(8).unwrap();
    cache
        .put("/logo.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47])
        .unwrap();

    let entry = cache.get("/logo.png").expect("fresh key must hit");
    assert_eq!(entry.content_type(), "image/png");
    assert_eq!(entry.content(), &[0x89, 0x50, 0x4e, 0x47]);
    assert_eq!(entry.content_length(), 4);
}

// ==============================================
// Capacity bound
// ==============================================

#[test]
fn retained_set_is_the_m_most_recent_keys() {
    let mut cache = WebCache::try_new(3).unwrap();
    for i in 0..10 {
        cache.put(format!("/{i}"), "t", vec![]).unwrap();
        assert!(cache.len() <= 3);
    }
    assert_eq!(keys_mru_to_lru(&cache), vec!["/9", "/8", "/7"]);
}

// ==============================================
// Recency promotion
// ==============================================

#[test]
fn spec_scenario_b_survives_because_it_was_touched() {
    let mut cache = WebCache::try_new(2).unwrap();
    cache.put("A", "t", b"a".to_vec()).unwrap();
    cache.put("B", "t", b"b".to_vec()).unwrap();
    cache.put("C", "t", b"c".to_vec()).unwrap();

    // A evicted, cache holds {B, C}
    assert!(!cache.contains("A"));
    assert!(cache.contains("B"));
    assert!(cache.contains("C"));

    // touch B, then insert D: C goes, B stays
    assert!(cache.get("B").is_some());
    cache.put("D", "t", b"d".to_vec()).unwrap();
    assert_eq!(cache.len(), 2);
    assert!(cache.contains("B"));
    assert!(cache.contains("D"));
    assert!(!cache.contains("C"));
}

#[test]
fn promoted_key_outlives_every_untouched_key() {
    let mut cache = WebCache::try_new(4).unwrap();
    for key in ["/a", "/b", "/c", "/d"] {
        cache.put(key, "t", vec![]).unwrap();
    }
    assert!(cache.get("/a").is_some());

    // three inserts evict the three untouched keys, never /a
    for key in ["/e", "/f", "/g"] {
        cache.put(key, "t", vec![]).unwrap();
        assert!(cache.contains("/a"));
    }
    assert!(!cache.contains("/b"));
    assert!(!cache.contains("/c"));
    assert!(!cache.contains("/d"));
}

// ==============================================
// No duplicate leak
// ==============================================

#[test]
fn rewriting_one_key_keeps_exactly_one_entry() {
    let mut cache = WebCache::try_new(4).unwrap();
    for round in 0..1000u32 {
        cache
            .put("/hot", "text/plain", round.to_string().into_bytes())
            .unwrap();
        assert_eq!(cache.len(), 1);
    }
    assert_eq!(cache.get("/hot").unwrap().content(), b"999");
    cache.validate_invariants();
}

#[test]
fn rewrites_interleaved_with_inserts_stay_consistent() {
    let mut cache = WebCache::try_new(3).unwrap();
    for i in 0..50 {
        cache.put("/hot", "t", vec![i]).unwrap();
        cache.put(format!("/cold/{i}"), "t", vec![]).unwrap();
        cache.validate_invariants();
    }
    assert!(cache.contains("/hot"));
    assert_eq!(cache.peek("/hot").unwrap().content(), &[49]);
}

// ==============================================
// Miss purity
// ==============================================

#[test]
fn misses_change_nothing() {
    let mut cache = WebCache::try_new(3).unwrap();
    cache.put("/a", "t", b"a".to_vec()).unwrap();
    cache.put("/b", "t", b"b".to_vec()).unwrap();
    let order = keys_mru_to_lru(&cache);

    for _ in 0..10 {
        assert!(cache.get("/nope").is_none());
    }

    assert_eq!(cache.len(), 2);
    assert_eq!(keys_mru_to_lru(&cache), order);
    assert_eq!(cache.peek("/a").unwrap().content(), b"a");
    assert_eq!(cache.peek("/b").unwrap().content(), b"b");
}

// ==============================================
// Errors
// ==============================================

#[test]
fn invalid_construction_and_keys_are_reported() {
    assert!(matches!(
        WebCache::try_new(0),
        Err(CacheError::InvalidArgument(_))
    ));

    let mut cache = WebCache::try_new(1).unwrap();
    assert!(matches!(
        cache.put("", "t", vec![]),
        Err(CacheError::InvalidArgument(_))
    ));
    assert!(cache.is_empty());
}

// ==============================================
// Invariant checkers
// ==============================================

// Both checkers are part of the public API so external test and fuzz builds
// can call them at any optimization level, not just under debug assertions.
#[test]
fn invariant_checks_pass_after_mixed_operations() {
    let mut cache = WebCache::try_new(3).unwrap();
    cache.put("/a", "t", b"a".to_vec()).unwrap();
    cache.put("/b", "t", b"b".to_vec()).unwrap();
    cache.put("/a", "t", b"a2".to_vec()).unwrap();
    let _ = cache.get("/b");
    cache.put("/c", "t", b"c".to_vec()).unwrap();
    cache.put("/d", "t", b"d".to_vec()).unwrap();
    let _ = cache.remove("/b");
    cache.validate_invariants();

    let mut list = webcache::RecencyList::new();
    let a = list.push_front(1);
    list.push_front(2);
    let c = list.push_front(3);
    list.move_to_front(a);
    list.remove(c);
    let _ = list.pop_back();
    list.debug_validate();
}

// ==============================================
// Teardown completeness
// ==============================================

mod teardown {
    use std::cell::Cell;
    use std::rc::Rc;

    use webcache::RecencyList;

    struct DropGuard {
        drops: Rc<Cell<usize>>,
    }

    impl Drop for DropGuard {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    #[test]
    fn dropping_the_list_drops_every_value_exactly_once() {
        let drops = Rc::new(Cell::new(0));
        {
            let mut list = RecencyList::new();
            for _ in 0..5 {
                list.push_front(DropGuard {
                    drops: Rc::clone(&drops),
                });
            }
            let popped = list.pop_back().unwrap();
            drop(popped);
            assert_eq!(drops.get(), 1);
        }
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn clear_drops_values_and_leaves_list_usable() {
        let drops = Rc::new(Cell::new(0));
        let mut list = RecencyList::new();
        for _ in 0..3 {
            list.push_front(DropGuard {
                drops: Rc::clone(&drops),
            });
        }
        list.clear();
        assert_eq!(drops.get(), 3);
        assert!(list.is_empty());

        list.push_front(DropGuard {
            drops: Rc::clone(&drops),
        });
        assert_eq!(list.len(), 1);
    }
}

// ==============================================
// Model-based property tests
// ==============================================

mod model {
    use proptest::prelude::*;
    use webcache::WebCache;

    /// Naive reference: a vec in MRU→LRU order.
    struct ModelCache {
        order: Vec<(String, String, Vec<u8>)>,
        max_size: usize,
    }

    impl ModelCache {
        fn new(max_size: usize) -> Self {
            Self {
                order: Vec::new(),
                max_size,
            }
        }

        fn put(&mut self, key: &str, content_type: &str, content: &[u8]) {
            if let Some(pos) = self.order.iter().position(|(k, _, _)| k == key) {
                self.order.remove(pos);
            }
            self.order
                .insert(0, (key.to_string(), content_type.to_string(), content.to_vec()));
            while self.order.len() > self.max_size {
                self.order.pop();
            }
        }

        fn get(&mut self, key: &str) -> Option<(String, Vec<u8>)> {
            let pos = self.order.iter().position(|(k, _, _)| k == key)?;
            let entry = self.order.remove(pos);
            let result = (entry.1.clone(), entry.2.clone());
            self.order.insert(0, entry);
            Some(result)
        }

        fn remove(&mut self, key: &str) -> bool {
            let pos = self.order.iter().position(|(k, _, _)| k == key);
            match pos {
                Some(pos) => {
                    self.order.remove(pos);
                    true
                }
                None => false,
            }
        }
    }

    #[derive(Debug, Clone)]
    enum Op {
        Put { key: String, content: Vec<u8> },
        Get { key: String },
        Remove { key: String },
        Touch { key: String },
    }

    // Small key space so operations collide often.
    fn key_strategy() -> impl Strategy<Value = String> {
        (0u8..12).prop_map(|n| format!("/k{n}"))
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (key_strategy(), prop::collection::vec(any::<u8>(), 0..16))
                .prop_map(|(key, content)| Op::Put { key, content }),
            key_strategy().prop_map(|key| Op::Get { key }),
            key_strategy().prop_map(|key| Op::Remove { key }),
            key_strategy().prop_map(|key| Op::Touch { key }),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn cache_matches_naive_model(
            max_size in 1usize..8,
            ops in prop::collection::vec(op_strategy(), 1..80),
        ) {
            let mut cache = WebCache::try_new(max_size).unwrap();
            let mut model = ModelCache::new(max_size);

            for op in &ops {
                match op {
                    Op::Put { key, content } => {
                        cache.put(key.clone(), "t", content.clone()).unwrap();
                        model.put(key, "t", content);
                    }
                    Op::Get { key } => {
                        let got = cache.get(key).map(|e| {
                            (e.content_type().to_string(), e.content().to_vec())
                        });
                        let expected = model.get(key);
                        prop_assert_eq!(got, expected);
                    }
                    Op::Remove { key } => {
                        let removed = cache.remove(key).is_some();
                        prop_assert_eq!(removed, model.remove(key));
                    }
                    Op::Touch { key } => {
                        let touched = cache.touch(key);
                        prop_assert_eq!(touched, model.get(key).is_some());
                    }
                }

                prop_assert!(cache.len() <= max_size);
                prop_assert_eq!(cache.len(), model.order.len());
                cache.validate_invariants();
            }

            // Final recency order must match the model exactly.
            let cache_order: Vec<String> =
                cache.iter().map(|e| e.key().to_string()).collect();
            let model_order: Vec<String> =
                model.order.iter().map(|(k, _, _)| k.clone()).collect();
            prop_assert_eq!(cache_order, model_order);
        }
    }
}
