//! Request routing for the talent pool.
//!
//! [`TalentRouter`] turns a [`RouteRequest`] (route key, path parameters, raw
//! body) into a [`RouteResponse`] envelope, backed by any
//! [`talent_pool_core::store::RecordStore`] and
//! [`talent_pool_core::event::EventPublisher`]. [`gateway`] mounts the router
//! behind real HTTP. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let router = Arc::new(TalentRouter::new(store, publisher, NotifyConfig::default()));
//! axum::serve(listener, talent_pool_api::gateway(router)).await?;
//! ```

pub mod error;
pub mod gateway;
pub mod publisher;
pub mod router;

pub use error::RouteError;
pub use gateway::gateway;
pub use publisher::BroadcastPublisher;
pub use router::{NotifyConfig, Route, RouteRequest, RouteResponse, TalentRouter};
