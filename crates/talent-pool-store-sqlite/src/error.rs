//! Error type for `talent-pool-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] talent_pool_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A stored body decoded to something other than a JSON object.
  #[error("corrupt record {id:?} in {collection}")]
  CorruptRecord { collection: String, id: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
