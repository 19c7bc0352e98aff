mod common;

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use url_service::config::EngineSettings;
use url_service::domain::entities::Tier;
use url_service::error::AppError;
use url_service::utils::code_generator::{CODE_ALPHABET, CODE_LENGTH};

#[tokio::test]
async fn test_shorten_without_alias_generates_code() {
    let (state, repository, cache) = common::create_test_state();

    let link = state
        .link_service
        .create("https://example.com", None)
        .unwrap();

    assert_eq!(link.short_code.len(), CODE_LENGTH);
    assert!(link.short_code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
    assert_eq!(link.original_url, "https://example.com");

    state.propagation.wait_idle().await;

    let row = repository.row(&link.short_code).unwrap();
    assert_eq!(row.original_url, "https://example.com");
    assert_eq!(
        cache.entry(&link.short_code),
        Some(("https://example.com".to_string(), 360))
    );
}

#[tokio::test]
async fn test_duplicate_alias_conflicts() {
    let (state, _repository, _cache) = common::create_test_state();

    state
        .link_service
        .create("https://a.com", Some("promo"))
        .unwrap();
    let err = state
        .link_service
        .create("https://b.com", Some("promo"))
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
    assert_eq!(err.to_string(), "Custom alias already exists");

    let resolution = state.resolver_service.resolve("promo").await;
    assert_eq!(resolution.original_url, "https://a.com");

    state.propagation.wait_idle().await;
}

#[tokio::test]
async fn test_read_your_write_skips_durable_store() {
    let (state, repository, _cache) = common::create_test_state();

    let link = state
        .link_service
        .create("https://example.com/a?b=c#d", None)
        .unwrap();
    let resolution = state.resolver_service.resolve(&link.short_code).await;

    assert!(resolution.found);
    assert_eq!(resolution.original_url, "https://example.com/a?b=c#d");
    assert_eq!(repository.get_url_calls.load(Ordering::SeqCst), 0);

    state.propagation.wait_idle().await;
}

#[tokio::test]
async fn test_durable_only_code_warms_faster_tiers() {
    let (state, repository, cache) = common::create_test_state();
    repository.insert("abc123", "https://x.com");

    let resolution = state.resolver_service.resolve("abc123").await;

    assert!(resolution.found);
    assert_eq!(resolution.original_url, "https://x.com");
    assert_eq!(resolution.tier, Some(Tier::Durable));
    assert!(state.state_store.contains("abc123"));

    state.propagation.wait_idle().await;

    assert_eq!(
        cache.entry("abc123"),
        Some(("https://x.com".to_string(), 3600))
    );

    let again = state.resolver_service.resolve("abc123").await;
    assert_eq!(again.tier, Some(Tier::Cache));
    assert_eq!(repository.get_url_calls.load(Ordering::SeqCst), 1);

    state.propagation.wait_idle().await;
}

#[tokio::test]
async fn test_stats_for_unknown_code() {
    let (state, _repository, _cache) = common::create_test_state();

    let err = state.stats_service.get_stats("zzz000").await.unwrap_err();

    assert!(matches!(err, AppError::NotFound { .. }));
    assert_eq!(err.to_string(), "URL not found");
}

#[tokio::test]
async fn test_resolve_unknown_code_is_not_found() {
    let (state, _repository, _cache) = common::create_test_state();

    let resolution = state.resolver_service.resolve("nothing").await;

    assert!(!resolution.found);
    assert!(resolution.original_url.is_empty());
    assert!(!state.state_store.contains("nothing"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolves_count_exactly_locally() {
    const N: i64 = 200;

    let (state, repository, cache) = common::create_test_state();
    repository.fail_increments.store(true, Ordering::SeqCst);
    cache.fail_all.store(true, Ordering::SeqCst);

    state
        .link_service
        .create("https://hot.example.com", Some("hot"))
        .unwrap();
    state.propagation.wait_idle().await;

    let handles: Vec<_> = (0..N)
        .map(|_| {
            let resolver = state.resolver_service.clone();
            tokio::spawn(async move { resolver.resolve("hot").await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().found);
    }
    state.propagation.wait_idle().await;

    let local = state.stats_service.get_stats("hot").await.unwrap();
    assert_eq!(local.click_count, N);

    // Every other durable increment was made to fail.
    let durable = repository.row("hot").unwrap().click_count;
    assert!(durable < N, "durable counter {durable} should lag {N}");
}

#[tokio::test]
async fn test_slow_cache_is_bounded_by_deadline() {
    let (state, _repository, cache) = common::create_test_state();
    cache.set_delay(Duration::from_secs(5));

    state
        .link_service
        .create("https://example.com", Some("slow"))
        .unwrap();

    let started = Instant::now();
    let resolution = state.resolver_service.resolve("slow").await;

    assert!(resolution.found);
    assert_eq!(resolution.tier, Some(Tier::Local));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_durable_outage_degrades_to_miss() {
    let (state, repository, _cache) = common::create_test_state();
    repository.insert("abc123", "https://x.com");
    repository.fail_reads.store(true, Ordering::SeqCst);

    let resolution = state.resolver_service.resolve("abc123").await;

    assert!(!resolution.found);
    assert!(state.stats_service.get_stats("abc123").await.is_err());
}

#[tokio::test]
async fn test_full_queue_drops_propagation_but_not_creates() {
    let settings = EngineSettings {
        propagation_queue_capacity: 2,
        propagation_concurrency: 1,
        ..common::test_settings()
    };
    let (state, _repository, _cache) = common::create_test_state_with(settings);

    let codes: Vec<String> = (0..20)
        .map(|i| {
            state
                .link_service
                .create(&format!("https://example.com/{i}"), None)
                .unwrap()
                .short_code
        })
        .collect();

    for code in &codes {
        assert!(state.state_store.contains(code));
    }

    state.propagation.wait_idle().await;
    assert!(state.propagation.stats().dropped > 0);
}

#[tokio::test]
async fn test_shutdown_drains_then_rejects() {
    let (state, repository, _cache) = common::create_test_state();
    repository.set_delay(Duration::from_millis(20));

    let link = state
        .link_service
        .create("https://example.com", None)
        .unwrap();

    assert!(state.propagation.shutdown(Duration::from_secs(2)).await);
    assert!(repository.row(&link.short_code).is_some());

    // Still served locally after the queue stops accepting work.
    let late = state
        .link_service
        .create("https://late.example.com", None)
        .unwrap();
    assert!(state.state_store.contains(&late.short_code));
    assert!(repository.row(&late.short_code).is_none());

    assert_eq!(repository.save_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_cancelled_resolve_leaves_propagation_intact() {
    let (state, repository, cache) = common::create_test_state();
    repository.set_delay(Duration::from_millis(50));
    cache.set_delay(Duration::from_millis(100));

    state
        .link_service
        .create("https://example.com/cancel", Some("cancel"))
        .unwrap();

    // The caller gives up while the resolve is still waiting on the cache.
    let abandoned = tokio::time::timeout(
        Duration::from_millis(10),
        state.resolver_service.resolve("cancel"),
    )
    .await;
    assert!(abandoned.is_err());

    state.propagation.wait_idle().await;

    let row = repository.row("cancel").unwrap();
    assert_eq!(row.original_url, "https://example.com/cancel");
    assert_eq!(
        cache.entry("cancel"),
        Some(("https://example.com/cancel".to_string(), 360))
    );

    let local = state.state_store.stats("cancel").unwrap();
    assert_eq!(local.click_count, 0);
    assert_eq!(
        state.state_store.get_url("cancel").as_deref(),
        Some("https://example.com/cancel")
    );

    let stats = state.propagation.stats();
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.completed, stats.submitted);
}
