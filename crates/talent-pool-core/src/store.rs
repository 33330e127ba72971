//! The `RecordStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `talent-pool-store-sqlite`). The router depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::record::{Collection, Record};

/// Abstraction over a key-value record store with named collections.
///
/// Every record is keyed by its `id` field. There is no update operation:
/// [`put`](RecordStore::put) inserts or overwrites wholesale.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch a record by key. Returns `None` if absent.
  fn get<'a>(
    &'a self,
    collection: Collection,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + 'a;

  /// Delete a record by key. Deleting a missing key is not an error.
  fn delete<'a>(
    &'a self,
    collection: Collection,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Return every record in `collection` in a single call.
  fn scan_all(
    &self,
    collection: Collection,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + '_;

  /// Insert or overwrite `record`, keyed by its `id` field.
  fn put(
    &self,
    collection: Collection,
    record: Record,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
