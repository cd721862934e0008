use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use webcache::WebCache;

fn filled_cache(capacity: usize) -> WebCache {
    let mut cache = WebCache::try_new(capacity).unwrap();
    for i in 0..capacity {
        cache
            .put(format!("/file/{i}"), "text/html", vec![0u8; 64])
            .unwrap();
    }
    cache
}

fn bench_put_with_eviction(c: &mut Criterion) {
    c.bench_function("webcache_put_evicting", |b| {
        b.iter_batched(
            || filled_cache(1024),
            |mut cache| {
                for i in 0..1024usize {
                    cache
                        .put(
                            format!("/new/{}", std::hint::black_box(i)),
                            "text/html",
                            vec![0u8; 64],
                        )
                        .unwrap();
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("webcache_get_hit", |b| {
        b.iter_batched(
            || filled_cache(1024),
            |mut cache| {
                for i in 0..1024usize {
                    let key = format!("/file/{}", std::hint::black_box(i));
                    let _ = std::hint::black_box(cache.get(&key));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("webcache_get_miss", |b| {
        b.iter_batched(
            || filled_cache(1024),
            |mut cache| {
                for i in 0..1024usize {
                    let key = format!("/absent/{}", std::hint::black_box(i));
                    let _ = std::hint::black_box(cache.get(&key));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_update_in_place(c: &mut Criterion) {
    c.bench_function("webcache_put_update", |b| {
        b.iter_batched(
            || filled_cache(1024),
            |mut cache| {
                for i in 0..1024usize {
                    cache
                        .put(
                            format!("/file/{}", std::hint::black_box(i % 1024)),
                            "text/html",
                            vec![1u8; 64],
                        )
                        .unwrap();
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_pop_lru(c: &mut Criterion) {
    c.bench_function("webcache_pop_lru", |b| {
        b.iter_batched(
            || filled_cache(1024),
            |mut cache| {
                while let Some(entry) = cache.pop_lru() {
                    std::hint::black_box(entry.content_length());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_put_with_eviction,
    bench_get_hit,
    bench_get_miss,
    bench_update_in_place,
    bench_pop_lru
);
criterion_main!(benches);
