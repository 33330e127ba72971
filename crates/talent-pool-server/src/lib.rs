//! Wiring for the talent pool server binary.
//!
//! Configuration loading, the HTTP application (gateway plus request
//! tracing), and the background task that logs every published notification.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use serde::Deserialize;
use talent_pool_api::{
  NotifyConfig, TalentRouter, gateway, publisher::PublishedEvent,
};
use talent_pool_core::{event::EventPublisher, store::RecordStore};
use tokio::{sync::broadcast, task::JoinHandle};
use tower_http::trace::TraceLayer;

/// Environment variables with this prefix override the config file, e.g.
/// `TALENT_POOL_PORT=8080`.
pub const ENV_PREFIX: &str = "TALENT_POOL";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  pub store_path:   PathBuf,
  pub event_bus:    String,
  pub event_source: String,
  pub bus_capacity: usize,
}

impl ServerConfig {
  /// Layer built-in defaults, then the (optional) file at `path`, then the
  /// environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    let notify = NotifyConfig::default();
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3000_i64)?
      .set_default("store_path", "talent-pool.db")?
      .set_default("event_bus", notify.event_bus)?
      .set_default("event_source", notify.source)?
      .set_default("bus_capacity", 64_i64)?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn notify(&self) -> NotifyConfig {
    NotifyConfig {
      event_bus: self.event_bus.clone(),
      source:    self.event_source.clone(),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Application ──────────────────────────────────────────────────────────────

/// The full HTTP application: gateway plus per-request tracing.
pub fn app<S, P>(router: Arc<TalentRouter<S, P>>) -> Router
where
  S: RecordStore + 'static,
  P: EventPublisher + 'static,
{
  gateway(router).layer(TraceLayer::new_for_http())
}

/// Log every notification delivered on `events` until the bus closes.
///
/// Resolves to the number of notifications logged.
pub fn spawn_notification_log(
  mut events: broadcast::Receiver<PublishedEvent>,
) -> JoinHandle<u64> {
  tokio::spawn(async move {
    let mut logged = 0;
    loop {
      match events.recv().await {
        Ok(PublishedEvent { event_id, notification }) => {
          logged += 1;
          tracing::info!(
            %event_id,
            bus = %notification.event_bus,
            source = %notification.source,
            detail_type = %notification.detail_type,
            detail = %notification.detail,
            "notification"
          );
        }
        Err(broadcast::error::RecvError::Lagged(skipped)) => {
          tracing::warn!(skipped, "notification log lagged");
        }
        Err(broadcast::error::RecvError::Closed) => break,
      }
    }
    logged
  })
}

#[cfg(test)]
mod tests {
  use talent_pool_api::BroadcastPublisher;
  use talent_pool_core::event::Notification;
  use uuid::Uuid;

  use super::*;

  #[test]
  fn defaults_apply_without_a_file() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/talent-pool.toml")).unwrap();
    assert_eq!(cfg.address(), "127.0.0.1:3000");
    assert_eq!(cfg.store_path, PathBuf::from("talent-pool.db"));
    assert_eq!(cfg.notify(), NotifyConfig::default());
    assert_eq!(cfg.bus_capacity, 64);
  }

  #[test]
  fn file_values_override_defaults() {
    let path = std::env::temp_dir().join(format!("talent-pool-{}.toml", Uuid::new_v4()));
    std::fs::write(
      &path,
      "port = 8088\nevent_bus = \"talents-dev\"\nstore_path = \"/tmp/dev.db\"\n",
    )
    .unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(cfg.port, 8088);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.event_bus, "talents-dev");
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/dev.db"));
  }

  #[test]
  fn expand_tilde_leaves_plain_paths() {
    assert_eq!(expand_tilde(Path::new("/var/db")), PathBuf::from("/var/db"));
    assert_eq!(expand_tilde(Path::new("rel.db")), PathBuf::from("rel.db"));
  }

  #[tokio::test]
  async fn notification_log_drains_until_closed() {
    let publisher = BroadcastPublisher::new("talent-registered", 8);
    let log = spawn_notification_log(publisher.subscribe());

    for n in 0..3 {
      publisher
        .publish(Notification::talent("talent-registered", "tests", format!("Registered talent {n}")))
        .await
        .unwrap();
    }
    drop(publisher);

    assert_eq!(log.await.unwrap(), 3);
  }
}
