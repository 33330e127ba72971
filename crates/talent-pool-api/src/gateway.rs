//! HTTP gateway in front of [`TalentRouter`].
//!
//! Every request, matched or not, is turned into a [`RouteRequest`] whose
//! route key is `"<METHOD> <path template>"`. Method and path checks are left
//! entirely to the router, so an unsupported method gets the router's 400
//! envelope rather than a framework 405.

use std::{collections::HashMap, sync::Arc};

use axum::{
  Router,
  extract::{
    MatchedPath, Path, State,
    rejection::{BytesRejection, MatchedPathRejection, PathRejection},
  },
  http::{HeaderName, HeaderValue, Method, StatusCode, Uri},
  response::{IntoResponse, Response},
  routing::any,
};
use bytes::Bytes;
use talent_pool_core::{event::EventPublisher, store::RecordStore};

use crate::{
  error::RouteError,
  router::{RouteRequest, RouteResponse, TalentRouter},
};

/// Build an axum [`Router`] that forwards everything to `router`.
pub fn gateway<S, P>(router: Arc<TalentRouter<S, P>>) -> Router<()>
where
  S: RecordStore + 'static,
  P: EventPublisher + 'static,
{
  Router::new()
    .route("/talents",      any(invoke::<S, P>))
    .route("/talents/{id}", any(invoke::<S, P>))
    .route("/subscribe",    any(invoke::<S, P>))
    .fallback(invoke::<S, P>)
    .with_state(router)
}

async fn invoke<S, P>(
  State(router): State<Arc<TalentRouter<S, P>>>,
  method: Method,
  uri: Uri,
  matched: Result<MatchedPath, MatchedPathRejection>,
  params: Result<Path<HashMap<String, String>>, PathRejection>,
  body: Result<Bytes, BytesRejection>,
) -> RouteResponse
where
  S: RecordStore + 'static,
  P: EventPublisher + 'static,
{
  let template = match &matched {
    Ok(m) => m.as_str(),
    Err(_) => uri.path(),
  };
  let route_key = format!("{method} {template}");

  // Unreadable bodies fail like any other route failure.
  let body = match body.map_err(RouteError::failure).and_then(decode_body) {
    Ok(body) => body,
    Err(e) => {
      tracing::warn!(%route_key, error = %e, "rejected request body");
      return RouteResponse::from_outcome(Err(e));
    }
  };

  let mut request = RouteRequest::new(route_key);
  if let Ok(Path(params)) = params
    && !params.is_empty()
  {
    request.path_parameters = Some(params);
  }
  request.body = body;

  router.handle(request).await
}

/// An empty body counts as absent; anything else must be UTF-8.
fn decode_body(body: Bytes) -> Result<Option<String>, RouteError> {
  if body.is_empty() {
    return Ok(None);
  }
  String::from_utf8(body.to_vec())
    .map(Some)
    .map_err(|e| RouteError::Failure(format!("request body is not valid UTF-8: {e}")))
}

impl IntoResponse for RouteResponse {
  fn into_response(self) -> Response {
    let status =
      StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut res = (status, self.body).into_response();
    for (name, value) in self.headers {
      if let (Ok(name), Ok(value)) =
        (HeaderName::try_from(name), HeaderValue::try_from(value))
      {
        res.headers_mut().insert(name, value);
      }
    }
    res
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────
