//! Identifier generation for newly created records.

use uuid::Uuid;

/// Produces globally unique record identifiers without coordination.
pub trait IdGenerator: Send + Sync {
  fn new_id(&self) -> String;
}

/// Random (v4) UUIDs rendered in hyphenated lowercase form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
  fn new_id(&self) -> String { Uuid::new_v4().hyphenated().to_string() }
}
