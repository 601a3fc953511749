#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use mailroute_gateway::store::{ConfigStore, InMemoryConfigStore, StoreKey};

#[tokio::test]
async fn get_put_delete_list() {
    let store = InMemoryConfigStore::new();
    assert!(store.get("a@site.com").await.unwrap().is_none());

    store.put("b@site.com", "{}".into()).await.unwrap();
    store.put("a@site.com", r#"{"enabled":false}"#.into()).await.unwrap();
    assert_eq!(store.get("a@site.com").await.unwrap().as_deref(), Some(r#"{"enabled":false}"#));

    let keys = store.list().await.unwrap();
    assert_eq!(
        keys,
        vec![StoreKey { name: "a@site.com".into() }, StoreKey { name: "b@site.com".into() }]
    );

    store.delete("a@site.com").await.unwrap();
    store.delete("missing@site.com").await.unwrap();
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn seed_stores_compact_documents() {
    let store = InMemoryConfigStore::new();
    let n = store
        .seed_from_str(r#"{ "inbox@site.com": { "forward_to": [ "x@y.com" ] } }"#)
        .unwrap();
    assert_eq!(n, 1);
    assert_eq!(
        store.get("inbox@site.com").await.unwrap().as_deref(),
        Some(r#"{"forward_to":["x@y.com"]}"#)
    );
}

#[test]
fn seed_must_be_object() {
    let store = InMemoryConfigStore::new();
    assert!(store.seed_from_str("[1]").is_err());
    assert!(store.seed_from_str("{oops").is_err());
    assert!(store.is_empty());
}
