//! Encoding and decoding between [`Record`]s and the JSON text stored in the
//! `body` column.

use serde_json::Value;
use talent_pool_core::record::{Collection, Record};

use crate::{Error, Result};

pub fn encode_record(record: &Record) -> Result<String> {
  Ok(serde_json::to_string(record)?)
}

/// Raw row as read from the `records` table.
pub struct RawRecord {
  pub id:   String,
  pub body: String,
}

impl RawRecord {
  pub fn into_record(self, collection: Collection) -> Result<Record> {
    match serde_json::from_str(&self.body)? {
      Value::Object(map) => Ok(map),
      _ => Err(Error::CorruptRecord {
        collection: collection.to_string(),
        id:         self.id,
      }),
    }
  }
}
