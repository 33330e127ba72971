//! The router's flat error type.

use axum::http::StatusCode;
use thiserror::Error;

/// Every failure a route can produce.
///
/// `NotFound` is raised only by `GET /talents/{id}`; everything else collapses
/// into `Failure` with the underlying message surfaced verbatim.
#[derive(Debug, Error)]
pub enum RouteError {
  #[error("Talent not found.")]
  NotFound,

  #[error("{0}")]
  Failure(String),
}

impl RouteError {
  pub fn failure(err: impl std::fmt::Display) -> Self {
    RouteError::Failure(err.to_string())
  }

  pub fn status(&self) -> StatusCode {
    match self {
      RouteError::NotFound => StatusCode::NOT_FOUND,
      RouteError::Failure(_) => StatusCode::BAD_REQUEST,
    }
  }
}
