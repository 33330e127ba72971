//! Error types for `talent-pool-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("record body must be a JSON object, got {0}")]
  NotAnObject(&'static str),

  #[error("record has no string `id` field")]
  MissingId,

  #[error("{0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
