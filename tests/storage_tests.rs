//! Storage backend tests

use std::sync::Arc;

use waypoint::config::{RedisConfig, StoreConfig};
use waypoint::errors::WaypointError;
use waypoint::storage::{LinkStore, MemoryLinkStore, RedisLinkStore, StoreFactory};

// =============================================================================
// StoreFactory
// =============================================================================

#[tokio::test]
async fn test_factory_builds_memory_store() {
    let store = StoreFactory::create(&StoreConfig::default()).await.unwrap();
    assert_eq!(store.backend_name(), "memory");

    store.put("abc", "{}".to_string()).await.unwrap();
    assert_eq!(store.get("abc").await.unwrap().as_deref(), Some("{}"));
}

#[tokio::test]
async fn test_factory_rejects_unknown_backend() {
    let config = StoreConfig {
        backend: "sqlite".to_string(),
        ..Default::default()
    };
    let err = StoreFactory::create(&config).await.err().unwrap();
    assert!(matches!(err, WaypointError::Config(_)));
}

#[test]
fn test_redis_store_rejects_bad_url() {
    let config = RedisConfig {
        url: "not a url".to_string(),
        key_prefix: "t:".to_string(),
    };
    assert!(matches!(
        RedisLinkStore::new(&config).err().unwrap(),
        WaypointError::Config(_)
    ));
}

// =============================================================================
// Memory store semantics
// =============================================================================

#[tokio::test]
async fn test_memory_list_cursor_walks_in_key_order() {
    let store = MemoryLinkStore::new();
    for code in ["delta", "alpha", "charlie", "bravo"] {
        store.put(code, "{}".to_string()).await.unwrap();
    }

    let first = store.list(3, None).await.unwrap();
    assert_eq!(first.codes, vec!["alpha", "bravo", "charlie"]);
    assert!(!first.complete);
    assert_eq!(first.cursor.as_deref(), Some("charlie"));

    let second = store.list(3, first.cursor.as_deref()).await.unwrap();
    assert_eq!(second.codes, vec!["delta"]);
    assert!(second.complete);
    assert_eq!(second.cursor, None);
}

#[tokio::test]
async fn test_memory_store_shared_across_tasks() {
    let store = Arc::new(MemoryLinkStore::new());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .put(&format!("code{:02}", i), format!("{{\"n\":{}}}", i))
                    .await
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.len(), 16);
    store.delete("code00").await.unwrap();
    assert_eq!(store.get("code00").await.unwrap(), None);
    assert_eq!(store.len(), 15);
}

/// Needs a local Redis: `WP_TEST_REDIS_URL=redis://127.0.0.1/ cargo test -- --ignored`
#[tokio::test]
#[ignore]
async fn test_redis_roundtrip() {
    let url = std::env::var("WP_TEST_REDIS_URL")
        .unwrap_or_else(|_| "redis://127.0.0.1:6379/".to_string());
    let config = RedisConfig {
        url,
        key_prefix: format!("waypoint-test:{}:", uuid::Uuid::new_v4()),
    };
    let store = RedisLinkStore::new(&config).unwrap();
    store.ping().await.unwrap();

    store.put("one", "{\"url\":\"https://a\"}".to_string()).await.unwrap();
    store.put("two", "{\"url\":\"https://b\"}".to_string()).await.unwrap();
    assert!(store.get("one").await.unwrap().is_some());

    let mut codes = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = store.list(10, cursor.as_deref()).await.unwrap();
        codes.extend(page.codes);
        if page.complete {
            break;
        }
        cursor = page.cursor;
    }
    codes.sort();
    assert_eq!(codes, vec!["one", "two"]);

    store.delete("one").await.unwrap();
    store.delete("two").await.unwrap();
    assert_eq!(store.get("one").await.unwrap(), None);
}
