//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use talent_pool_core::{
  record::{Collection, Record, record_id},
  store::RecordStore,
};

use crate::{
  Result,
  encode::{RawRecord, encode_record},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  async fn get(&self, collection: Collection, id: &str) -> Result<Option<Record>> {
    let collection_str = collection.as_str();
    let id_str = id.to_owned();

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, body FROM records WHERE collection = ?1 AND id = ?2",
            rusqlite::params![collection_str, id_str],
            |row| {
              Ok(RawRecord {
                id:   row.get(0)?,
                body: row.get(1)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(|r| r.into_record(collection)).transpose()
  }

  async fn delete(&self, collection: Collection, id: &str) -> Result<()> {
    let collection_str = collection.as_str();
    let id_str = id.to_owned();

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM records WHERE collection = ?1 AND id = ?2",
          rusqlite::params![collection_str, id_str],
        )?)
      })
      .await?;

    tracing::debug!(%collection, id, removed, "deleted record");
    Ok(())
  }

  async fn scan_all(&self, collection: Collection) -> Result<Vec<Record>> {
    let collection_str = collection.as_str();

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn
          .prepare("SELECT id, body FROM records WHERE collection = ?1 ORDER BY rowid")?;
        let rows = stmt
          .query_map(rusqlite::params![collection_str], |row| {
            Ok(RawRecord {
              id:   row.get(0)?,
              body: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(|r| r.into_record(collection)).collect()
  }

  async fn put(&self, collection: Collection, record: Record) -> Result<()> {
    let collection_str = collection.as_str();
    let id_str = record_id(&record)?.to_owned();
    let body_str = encode_record(&record)?;

    tracing::debug!(%collection, id = %id_str, "writing record");

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO records (collection, id, body) VALUES (?1, ?2, ?3)",
          rusqlite::params![collection_str, id_str, body_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
