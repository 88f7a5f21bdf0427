//! Exercises `RedisStateStore` against a real Redis instance.
//!
//! Ignored by default: these tests need `FAILOVER_TEST_REDIS_URL` pointing at
//! a disposable Redis (`redis://127.0.0.1:6379/15` works well — pick a DB
//! index nothing else uses, since the test flushes keys it creates but not
//! the whole DB). Run with `cargo test -- --ignored` once a server is up.

use std::time::Duration;

use failover_core::store::{StateStore, Ttl};
use failover_store_redis::RedisStateStore;

async fn connect() -> RedisStateStore {
    let url = std::env::var("FAILOVER_TEST_REDIS_URL")
        .expect("set FAILOVER_TEST_REDIS_URL to run the live redis tests");
    RedisStateStore::connect(&url)
        .await
        .expect("failed to connect to test redis instance")
}

#[tokio::test]
#[ignore]
async fn set_get_roundtrip() {
    let store = connect().await;
    let key = "failover-store-redis-test:roundtrip";

    store.set(key, "PRIMARY", Ttl::None).await.unwrap();
    assert_eq!(store.get(key).await.unwrap().as_deref(), Some("PRIMARY"));

    store.delete(key).await.unwrap();
    assert_eq!(store.get(key).await.unwrap(), None);
}

#[tokio::test]
#[ignore]
async fn ttl_expires() {
    let store = connect().await;
    let key = "failover-store-redis-test:ttl";

    store.set(key, "1", Ttl::Millis(200)).await.unwrap();
    assert!(store.exists(key).await.unwrap());

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(!store.exists(key).await.unwrap());
}

#[tokio::test]
#[ignore]
async fn scan_prefix_finds_all_matches() {
    let store = connect().await;
    let prefix = "failover-store-redis-test:scan:";

    for i in 0..3 {
        store
            .set(&format!("{prefix}{i}"), "1", Ttl::Millis(30_000))
            .await
            .unwrap();
    }

    let mut found = store.scan_prefix(prefix).await.unwrap();
    found.sort();
    assert_eq!(
        found,
        vec![
            format!("{prefix}0"),
            format!("{prefix}1"),
            format!("{prefix}2"),
        ]
    );

    for key in &found {
        store.delete(key).await.unwrap();
    }
}
