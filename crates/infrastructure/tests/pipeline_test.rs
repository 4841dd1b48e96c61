use ferrous_rdns_application::ports::RecordSink;
use ferrous_rdns_infrastructure::dns::{ReverseDnsCache, ReverseDnsCacheConfig};
use ferrous_rdns_infrastructure::pipeline::UnorderedPipeline;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

mod helpers;
use helpers::MockReverseResolver;

#[tokio::test]
async fn test_doubling_transform_delivers_every_output() {
    let pipeline = UnorderedPipeline::new(
        Vec::new(),
        |n: u32| async move { vec![n, n + 100] },
        4,
    );

    for n in 0..10 {
        pipeline.enqueue(n).await;
    }
    let delivered = pipeline.stop().await.unwrap();

    assert_eq!(delivered.len(), 20);
    let unique: HashSet<u32> = delivered.into_iter().collect();
    assert_eq!(unique.len(), 20);
    assert!((0..10).all(|n| unique.contains(&n) && unique.contains(&(n + 100))));
}

#[tokio::test]
async fn test_transform_may_produce_nothing() {
    let pipeline = UnorderedPipeline::new(
        Vec::new(),
        |n: u32| async move {
            if n % 2 == 0 {
                vec![n]
            } else {
                vec![]
            }
        },
        3,
    );

    for n in 0..10 {
        pipeline.enqueue(n).await;
    }
    let mut delivered = pipeline.stop().await.unwrap();
    delivered.sort_unstable();

    assert_eq!(delivered, vec![0, 2, 4, 6, 8]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_stop_waits_for_slow_items() {
    let processed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&processed);
    let pipeline = UnorderedPipeline::new(
        Vec::new(),
        move |n: u32| {
            let counter = Arc::clone(&counter);
            async move {
                tokio::time::sleep(Duration::from_millis(5 * u64::from(n % 4))).await;
                counter.fetch_add(1, Ordering::SeqCst);
                vec![n]
            }
        },
        4,
    );

    for n in 0..32 {
        pipeline.enqueue(n).await;
    }
    let delivered = pipeline.stop().await.unwrap();

    assert_eq!(processed.load(Ordering::SeqCst), 32);
    assert_eq!(delivered.len(), 32);
}

#[tokio::test]
async fn test_full_input_queue_blocks_enqueue() {
    let gate = Arc::new(Semaphore::new(0));
    let worker_gate = Arc::clone(&gate);
    let pipeline = UnorderedPipeline::new(
        Vec::new(),
        move |n: u32| {
            let gate = Arc::clone(&worker_gate);
            async move {
                if let Ok(permit) = gate.acquire().await {
                    permit.forget();
                }
                vec![n]
            }
        },
        1,
    );

    // One item held by the blocked worker, one filling the queue.
    pipeline.enqueue(1).await;
    pipeline.enqueue(2).await;

    let blocked = tokio::time::timeout(Duration::from_millis(50), pipeline.enqueue(3)).await;
    assert!(blocked.is_err(), "enqueue should stall while the queue is full");

    gate.add_permits(3);
    pipeline.enqueue(3).await;

    let mut delivered = pipeline.stop().await.unwrap();
    delivered.sort_unstable();
    assert_eq!(delivered, vec![1, 2, 3]);
}

struct CountingSink {
    lines: Vec<String>,
}

impl RecordSink<String> for CountingSink {
    fn accept(&mut self, item: String) {
        self.lines.push(item);
    }
}

#[tokio::test]
async fn test_pipeline_over_lookup_cache() {
    let resolver = Arc::new(
        MockReverseResolver::new()
            .with_answer("8.8.8.8", &["dns.google."])
            .with_answer("1.1.1.1", &["one.one.one.one."])
            .with_delay(Duration::from_millis(5)),
    );
    let cache = ReverseDnsCache::new(
        resolver.clone(),
        ReverseDnsCacheConfig {
            ttl: Duration::from_secs(60),
            lookup_timeout: Duration::from_secs(1),
            max_workers: Some(2),
        },
    );

    let transform_cache = cache.clone();
    let pipeline = UnorderedPipeline::new(
        CountingSink { lines: Vec::new() },
        move |address: &'static str| {
            let cache = transform_cache.clone();
            async move {
                cache
                    .lookup(address)
                    .await
                    .into_iter()
                    .map(|name| format!("{} {}", address, name))
                    .collect::<Vec<_>>()
            }
        },
        4,
    );

    for i in 0..10 {
        pipeline
            .enqueue(if i % 2 == 0 { "8.8.8.8" } else { "1.1.1.1" })
            .await;
    }
    let sink = pipeline.stop().await.unwrap();

    assert_eq!(sink.lines.len(), 10);
    assert_eq!(
        sink.lines.iter().filter(|l| *l == "8.8.8.8 dns.google.").count(),
        5
    );
    assert_eq!(resolver.call_count(), 2);

    let stats = cache.stats();
    assert_eq!(stats.cache_hit + stats.cache_miss, 10);
    assert_eq!(stats.requests_filled, stats.cache_miss);
}
