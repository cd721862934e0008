#![no_main]

use libfuzzer_sys::fuzz_target;
use webcache::WebCache;

// Fuzz arbitrary operation sequences on WebCache
//
// Drives random sequences of put, get, peek, touch, remove, and pop_lru over
// a small key space and checks the capacity bound and index/list consistency
// after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let max_size = (data[0] as usize % 16).max(1);
    let mut cache = match WebCache::try_new(max_size) {
        Ok(cache) => cache,
        Err(_) => return,
    };

    let mut idx = 1;
    while idx + 2 < data.len() {
        let op = data[idx] % 6;
        let key = format!("/k{}", data[idx + 1] % 24);
        let payload = vec![data[idx + 2]; (data[idx + 2] as usize) % 32];

        match op {
            0 => {
                cache.put(key, "t", payload).unwrap();
            }
            1 => {
                let _ = cache.get(&key);
            }
            2 => {
                let _ = cache.peek(&key);
            }
            3 => {
                cache.touch(&key);
            }
            4 => {
                let _ = cache.remove(&key);
            }
            5 => {
                let _ = cache.pop_lru();
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= cache.capacity());
        cache.validate_invariants();

        idx += 3;
    }
});
