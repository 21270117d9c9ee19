use dexter_core::{CatalogError, RecordCache};
use dexter_test_utils::assertions::{assert_not_found, assert_transport};
use dexter_test_utils::fixtures::{id, record};
use dexter_test_utils::generators::arb_catalog_id;
use dexter_test_utils::{shared_catalog, ScriptedCatalog};
use proptest::prelude::*;
use std::time::Duration;

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn concurrent_loads_share_one_fetch() {
    let (catalog, client) = shared_catalog(ScriptedCatalog::gated());
    let cache = RecordCache::new(client);

    let first = tokio::spawn({
        let cache = cache.clone();
        async move { cache.ensure_loaded(id(7)).await }
    });
    let second = tokio::spawn({
        let cache = cache.clone();
        async move { cache.ensure_loaded(id(7)).await }
    });
    settle().await;
    assert!(cache.is_pending(id(7)));
    assert_eq!(catalog.request_count(7), 1);

    catalog.release(1);
    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();
    assert_eq!(first, record(7));
    assert_eq!(second, record(7));
    assert_eq!(catalog.request_count(7), 1);

    let stats = cache.stats();
    assert_eq!(stats.fetches, 1);
    assert_eq!(stats.joins, 1);
    assert_eq!(cache.get(id(7)), Some(record(7)));
}

#[tokio::test]
async fn late_joiner_attaches_to_inflight_request() {
    let (catalog, client) = shared_catalog(ScriptedCatalog::gated());
    let cache = RecordCache::new(client);

    cache.prefetch(id(3));
    settle().await;
    assert_eq!(catalog.request_count(3), 1);

    let load = tokio::spawn({
        let cache = cache.clone();
        async move { cache.ensure_loaded(id(3)).await }
    });
    settle().await;
    catalog.release(1);

    assert_eq!(load.await.unwrap().unwrap(), record(3));
    assert_eq!(catalog.request_count(3), 1);
}

#[tokio::test]
async fn joined_callers_all_see_the_failure() {
    let (catalog, client) = shared_catalog(ScriptedCatalog::gated());
    catalog.fail(9);
    let cache = RecordCache::new(client);

    let loads: Vec<_> = (0..3)
        .map(|_| {
            let cache = cache.clone();
            tokio::spawn(async move { cache.ensure_loaded(id(9)).await })
        })
        .collect();
    settle().await;
    catalog.release(1);

    for load in loads {
        assert_transport(&load.await.unwrap());
    }
    assert_eq!(catalog.request_count(9), 1);
    assert!(cache.get(id(9)).is_none());
    assert!(!cache.is_pending(id(9)));
}

#[tokio::test]
async fn prefetch_swallows_failures_and_leaves_key_absent() {
    let (catalog, client) = shared_catalog(ScriptedCatalog::new().with_missing(2000));
    let cache = RecordCache::new(client);

    cache.prefetch(id(2000));
    tokio::time::sleep(Duration::from_millis(5)).await;

    assert_eq!(catalog.request_count(2000), 1);
    assert!(cache.is_empty());
    assert_eq!(cache.stats().failures, 1);

    // Retry goes back to the network.
    assert_not_found(&cache.ensure_loaded(id(2000)).await);
    assert_eq!(catalog.request_count(2000), 2);
}

#[tokio::test]
async fn error_then_success_caches_the_success() {
    let (catalog, client) = shared_catalog(ScriptedCatalog::new());
    catalog.fail(25);
    let cache = RecordCache::new(client);

    let err = cache.ensure_loaded(id(25)).await.unwrap_err();
    assert!(matches!(err, CatalogError::Transport { .. }));

    catalog.clear_failure(25);
    assert_eq!(cache.ensure_loaded(id(25)).await.unwrap().name, "pikachu");
    assert_eq!(cache.ensure_loaded(id(25)).await.unwrap().name, "pikachu");
    assert_eq!(catalog.request_count(25), 2);
    assert_eq!(cache.stats().hits, 1);
}

proptest! {
    #[test]
    fn concurrent_burst_fetches_once(target in arb_catalog_id(), callers in 2usize..8) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async {
            let (catalog, client) = shared_catalog(ScriptedCatalog::gated());
            let cache = RecordCache::new(client);
            let loads: Vec<_> = (0..callers)
                .map(|_| {
                    let cache = cache.clone();
                    tokio::spawn(async move { cache.ensure_loaded(target).await })
                })
                .collect();
            settle().await;
            catalog.release(1);
            for load in loads {
                assert_eq!(load.await.unwrap().unwrap().id, target);
            }
            assert_eq!(catalog.requests(), vec![target]);
        });
    }
}
