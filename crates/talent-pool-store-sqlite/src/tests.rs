//! Integration tests for `SqliteStore` against an in-memory database.

use serde_json::{Value, json};
use talent_pool_core::{
  record::{Collection, Record},
  store::RecordStore,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn record(value: Value) -> Record {
  match value {
    Value::Object(map) => map,
    other => panic!("not an object: {other}"),
  }
}

fn talent(name: &str) -> Record {
  record(json!({
    "id":     Uuid::new_v4().to_string(),
    "name":   name,
    "skills": "rust",
  }))
}

// ─── Get / put ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn put_and_get_record() {
  let s = store().await;
  let ada = talent("Ada");
  let id = ada["id"].as_str().unwrap().to_owned();

  s.put(Collection::Talents, ada.clone()).await.unwrap();

  let fetched = s.get(Collection::Talents, &id).await.unwrap();
  assert_eq!(fetched, Some(ada));
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  let result = s.get(Collection::Talents, "nope").await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn put_overwrites_existing_key() {
  let s = store().await;
  let first = record(json!({ "id": "t-1", "name": "Ada" }));
  let second = record(json!({ "id": "t-1", "name": "Grace", "skills": "cobol" }));

  s.put(Collection::Talents, first).await.unwrap();
  s.put(Collection::Talents, second.clone()).await.unwrap();

  let all = s.scan_all(Collection::Talents).await.unwrap();
  assert_eq!(all, vec![second]);
}

#[tokio::test]
async fn put_without_id_is_rejected() {
  let s = store().await;
  let err = s
    .put(Collection::Talents, record(json!({ "name": "Ada" })))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(talent_pool_core::Error::MissingId)));
}

#[tokio::test]
async fn nested_values_roundtrip() {
  let s = store().await;
  let rich = record(json!({
    "id":       "t-2",
    "skills":   ["rust", "go"],
    "years":    7,
    "remote":   true,
    "location": { "city": "Lisbon", "tz": null },
  }));

  s.put(Collection::Talents, rich.clone()).await.unwrap();
  assert_eq!(s.get(Collection::Talents, "t-2").await.unwrap(), Some(rich));
}

// ─── Collections ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn collections_are_isolated() {
  let s = store().await;
  let sub = record(json!({ "id": "shared", "skills": "go" }));
  s.put(Collection::Subscribers, sub).await.unwrap();

  assert!(s.get(Collection::Talents, "shared").await.unwrap().is_none());
  assert!(s.scan_all(Collection::Talents).await.unwrap().is_empty());
  assert_eq!(s.scan_all(Collection::Subscribers).await.unwrap().len(), 1);
}

#[tokio::test]
async fn scan_all_returns_every_record() {
  let s = store().await;
  let ada = talent("Ada");
  let grace = talent("Grace");
  s.put(Collection::Talents, ada.clone()).await.unwrap();
  s.put(Collection::Talents, grace.clone()).await.unwrap();

  let all = s.scan_all(Collection::Talents).await.unwrap();
  assert_eq!(all.len(), 2);
  assert!(all.contains(&ada));
  assert!(all.contains(&grace));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_record() {
  let s = store().await;
  let ada = talent("Ada");
  let id = ada["id"].as_str().unwrap().to_owned();
  s.put(Collection::Talents, ada).await.unwrap();

  s.delete(Collection::Talents, &id).await.unwrap();

  assert!(s.get(Collection::Talents, &id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_is_not_an_error() {
  let s = store().await;
  s.delete(Collection::Talents, "never-existed").await.unwrap();
}

#[tokio::test]
async fn delete_only_touches_its_collection() {
  let s = store().await;
  let talent = record(json!({ "id": "same", "name": "Ada" }));
  let sub = record(json!({ "id": "same", "skills": "rust" }));
  s.put(Collection::Talents, talent).await.unwrap();
  s.put(Collection::Subscribers, sub.clone()).await.unwrap();

  s.delete(Collection::Talents, "same").await.unwrap();

  assert_eq!(s.get(Collection::Subscribers, "same").await.unwrap(), Some(sub));
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_keeps_records() {
  let path = std::env::temp_dir().join(format!("talent-pool-{}.db", Uuid::new_v4()));

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.put(Collection::Talents, record(json!({ "id": "kept", "name": "Ada" })))
      .await
      .unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let fetched = s.get(Collection::Talents, "kept").await.unwrap();
  assert_eq!(fetched.unwrap()["name"], "Ada");

  drop(s);
  let _ = std::fs::remove_file(&path);
}
