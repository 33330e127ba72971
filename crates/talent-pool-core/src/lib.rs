//! Core types and trait definitions for the talent pool.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! router, the storage backend and the server binary all depend on it.

pub mod error;
pub mod event;
pub mod id;
pub mod record;
pub mod store;

pub use error::{Error, Result};
