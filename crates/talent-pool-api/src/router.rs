//! The request router.
//!
//! | Route key | Notes |
//! |-----------|-------|
//! | `DELETE /talents/{id}` | Deleting a missing id still succeeds |
//! | `GET /talents/{id}` | 404 if not found |
//! | `GET /talents` | Full scan, no pagination |
//! | `PUT /talents` | Assigns `id`, then publishes a `"talent"` notification |
//! | `PUT /subscribe` | Assigns `id`; no notification |
//!
//! Any other route key is a 400.

use std::{
  collections::{BTreeMap, HashMap},
  sync::Arc,
};

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use talent_pool_core::{
  event::{EventPublisher, Notification},
  id::{IdGenerator, UuidGenerator},
  record::{Collection, assign_id, parse_record},
  store::RecordStore,
};

use crate::error::RouteError;

pub const CONTENT_TYPE_JSON: &str = "application/json";

// ─── Routes ──────────────────────────────────────────────────────────────────

/// The five supported route keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
  DeleteTalent,
  GetTalent,
  ListTalents,
  CreateTalent,
  Subscribe,
}

impl Route {
  pub const ALL: [Route; 5] = [
    Route::DeleteTalent,
    Route::GetTalent,
    Route::ListTalents,
    Route::CreateTalent,
    Route::Subscribe,
  ];

  pub fn key(self) -> &'static str {
    match self {
      Route::DeleteTalent => "DELETE /talents/{id}",
      Route::GetTalent => "GET /talents/{id}",
      Route::ListTalents => "GET /talents",
      Route::CreateTalent => "PUT /talents",
      Route::Subscribe => "PUT /subscribe",
    }
  }

  /// Exact, case-sensitive lookup.
  pub fn from_key(key: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|r| r.key() == key)
  }
}

// ─── Envelopes ───────────────────────────────────────────────────────────────

/// A single invocation: route key, path parameters and the raw body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
  pub route_key:       String,
  #[serde(default)]
  pub path_parameters: Option<HashMap<String, String>>,
  #[serde(default)]
  pub body:            Option<String>,
}

impl RouteRequest {
  pub fn new(route_key: impl Into<String>) -> Self {
    Self {
      route_key: route_key.into(),
      ..Self::default()
    }
  }

  pub fn with_path_param(
    mut self,
    name: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    self
      .path_parameters
      .get_or_insert_with(HashMap::new)
      .insert(name.into(), value.into());
    self
  }

  pub fn with_body(mut self, body: impl Into<String>) -> Self {
    self.body = Some(body.into());
    self
  }

  fn path_param(&self, name: &str) -> Result<&str, RouteError> {
    self
      .path_parameters
      .as_ref()
      .and_then(|p| p.get(name))
      .map(String::as_str)
      .ok_or_else(|| RouteError::Failure(format!("missing path parameter: {name}")))
  }
}

/// The normalised response: status, JSON body text, fixed headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
  pub status_code: u16,
  pub body:        String,
  pub headers:     BTreeMap<String, String>,
}

impl RouteResponse {
  /// Serialise `body` exactly once; plain messages become JSON strings.
  pub fn json(status: StatusCode, body: &Value) -> Self {
    Self {
      status_code: status.as_u16(),
      body:        body.to_string(),
      headers:     BTreeMap::from([(
        "Content-Type".to_owned(),
        CONTENT_TYPE_JSON.to_owned(),
      )]),
    }
  }

  pub fn from_outcome(outcome: Result<Value, RouteError>) -> Self {
    match outcome {
      Ok(body) => Self::json(StatusCode::OK, &body),
      Err(e) => Self::json(e.status(), &Value::String(e.to_string())),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Where and as whom talent-registration notifications are published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
  pub event_bus: String,
  pub source:    String,
}

impl Default for NotifyConfig {
  fn default() -> Self {
    Self {
      event_bus: "talent-registered".to_owned(),
      source:    "Talent-Pool lambda function".to_owned(),
    }
  }
}

/// Dispatches route keys to store and publisher calls.
///
/// All handles are built once by the caller and shared across invocations;
/// the router itself holds no per-request state.
pub struct TalentRouter<S, P> {
  store:     Arc<S>,
  publisher: Arc<P>,
  ids:       Arc<dyn IdGenerator>,
  notify:    NotifyConfig,
}

impl<S, P> TalentRouter<S, P>
where
  S: RecordStore,
  P: EventPublisher,
{
  pub fn new(store: Arc<S>, publisher: Arc<P>, notify: NotifyConfig) -> Self {
    Self {
      store,
      publisher,
      ids: Arc::new(UuidGenerator),
      notify,
    }
  }

  /// Replace the default UUID generator.
  pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
    self.ids = Arc::new(ids);
    self
  }

  /// Handle one invocation. Never fails: every error is folded into the
  /// response envelope.
  pub async fn handle(&self, request: RouteRequest) -> RouteResponse {
    tracing::debug!(route_key = %request.route_key, "dispatching");
    let outcome = self.dispatch(&request).await;
    if let Err(e) = &outcome {
      tracing::warn!(
        route_key = %request.route_key,
        status = e.status().as_u16(),
        error = %e,
        "route failed"
      );
    }
    RouteResponse::from_outcome(outcome)
  }

  async fn dispatch(&self, request: &RouteRequest) -> Result<Value, RouteError> {
    let Some(route) = Route::from_key(&request.route_key) else {
      return Err(RouteError::Failure(format!(
        "Unsupported route: \"{}\"",
        request.route_key
      )));
    };

    match route {
      Route::DeleteTalent => self.delete_talent(request.path_param("id")?).await,
      Route::GetTalent => self.get_talent(request.path_param("id")?).await,
      Route::ListTalents => self.list_talents().await,
      Route::CreateTalent => self.create_talent(request.body.as_deref()).await,
      Route::Subscribe => self.subscribe(request.body.as_deref()).await,
    }
  }

  async fn delete_talent(&self, id: &str) -> Result<Value, RouteError> {
    self
      .store
      .delete(Collection::Talents, id)
      .await
      .map_err(RouteError::failure)?;
    Ok(Value::String(format!("Deleted talent {id}")))
  }

  async fn get_talent(&self, id: &str) -> Result<Value, RouteError> {
    let talent = self
      .store
      .get(Collection::Talents, id)
      .await
      .map_err(RouteError::failure)?
      .ok_or(RouteError::NotFound)?;
    Ok(Value::Object(talent))
  }

  async fn list_talents(&self) -> Result<Value, RouteError> {
    let talents = self
      .store
      .scan_all(Collection::Talents)
      .await
      .map_err(RouteError::failure)?;
    Ok(Value::Array(talents.into_iter().map(Value::Object).collect()))
  }

  async fn create_talent(&self, body: Option<&str>) -> Result<Value, RouteError> {
    let mut talent = parse_record(body).map_err(RouteError::failure)?;
    let id = self.ids.new_id();
    assign_id(&mut talent, id.clone());

    self
      .store
      .put(Collection::Talents, talent)
      .await
      .map_err(RouteError::failure)?;

    let message = format!("Registered talent {id}");

    // The record is already written; a publish failure still fails the call.
    let notification = Notification::talent(
      &self.notify.event_bus,
      &self.notify.source,
      message.clone(),
    );
    let receipt = self.publisher.publish(notification).await.map_err(|e| {
      tracing::warn!(talent_id = %id, error = %e, "talent stored but registration event failed");
      RouteError::failure(e)
    })?;
    tracing::info!(talent_id = %id, event_id = %receipt.event_id, "registered-talent event sent");

    Ok(Value::String(message))
  }

  async fn subscribe(&self, body: Option<&str>) -> Result<Value, RouteError> {
    let mut subscriber = parse_record(body).map_err(RouteError::failure)?;
    assign_id(&mut subscriber, self.ids.new_id());
    let skills = interpolate(subscriber.get("skills"));

    self
      .store
      .put(Collection::Subscribers, subscriber)
      .await
      .map_err(RouteError::failure)?;

    Ok(Value::String(format!(
      "Subscribed to be notified of talents with skills: {skills}"
    )))
  }
}

/// Render a dynamic JSON value the way string interpolation would: strings
/// verbatim, arrays comma-joined, a missing field as `undefined`.
fn interpolate(value: Option<&Value>) -> String {
  match value {
    None => "undefined".to_owned(),
    Some(Value::String(s)) => s.clone(),
    Some(Value::Array(items)) => items
      .iter()
      .map(|v| match v {
        Value::Null => String::new(),
        other => interpolate(Some(other)),
      })
      .collect::<Vec<_>>()
      .join(","),
    Some(Value::Object(_)) => "[object Object]".to_owned(),
    Some(Value::Number(n)) => number_text(n),
    Some(other) => other.to_string(),
  }
}

/// Whole-valued floats print without a fractional part (`1.0` as `1`).
fn number_text(n: &serde_json::Number) -> String {
  match n.as_f64() {
    Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
      if f == 0.0 { "0".to_owned() } else { format!("{f:.0}") }
    }
    _ => n.to_string(),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
