//! Records and the collections that hold them.
//!
//! A record is an open-ended JSON object. The only field the system cares
//! about is `id`, which is always assigned by the server.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Name of the key field every stored record carries.
pub const ID_FIELD: &str = "id";

/// An open-ended JSON object as supplied by the caller.
pub type Record = serde_json::Map<String, Value>;

/// The named collections the store exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
  Talents,
  Subscribers,
}

impl Collection {
  pub fn as_str(self) -> &'static str {
    match self {
      Collection::Talents => "talents",
      Collection::Subscribers => "subscribers",
    }
  }
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Parse a raw request body into a [`Record`].
///
/// An absent body is parsed as the empty string and so fails like any other
/// malformed JSON.
pub fn parse_record(body: Option<&str>) -> Result<Record> {
  match serde_json::from_str(body.unwrap_or_default())? {
    Value::Object(map) => Ok(map),
    other => Err(Error::NotAnObject(json_kind(&other))),
  }
}

/// Overwrite the record's `id` with a freshly generated one.
pub fn assign_id(record: &mut Record, id: impl Into<String>) {
  record.insert(ID_FIELD.to_owned(), Value::String(id.into()));
}

/// Borrow the record's `id`, failing if it is absent or not a string.
pub fn record_id(record: &Record) -> Result<&str> {
  record
    .get(ID_FIELD)
    .and_then(Value::as_str)
    .ok_or(Error::MissingId)
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}
