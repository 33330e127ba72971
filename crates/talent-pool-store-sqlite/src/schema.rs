//! SQL schema for the talent pool SQLite store.
//!
//! Executed once at connection startup. There are no migrations; the table is
//! a plain key-value layout keyed by `(collection, id)`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per record. `body` is the whole record, `id` included, as
-- compact JSON. Writes replace the row wholesale.
CREATE TABLE IF NOT EXISTS records (
    collection  TEXT NOT NULL,   -- 'talents' | 'subscribers'
    id          TEXT NOT NULL,
    body        TEXT NOT NULL,
    PRIMARY KEY (collection, id)
);

PRAGMA user_version = 1;
";
