//! Notifications and the `EventPublisher` trait.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Detail type attached to talent-registration notifications.
pub const TALENT_DETAIL_TYPE: &str = "talent";

/// An ephemeral message routed to a named event bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
  pub event_bus:   String,
  pub source:      String,
  pub detail_type: String,
  pub detail:      String,
  pub time:        DateTime<Utc>,
}

impl Notification {
  /// Build a `"talent"` notification stamped with the current time.
  pub fn talent(
    event_bus: impl Into<String>,
    source: impl Into<String>,
    detail: impl Into<String>,
  ) -> Self {
    Self {
      event_bus:   event_bus.into(),
      source:      source.into(),
      detail_type: TALENT_DETAIL_TYPE.to_owned(),
      detail:      detail.into(),
      time:        Utc::now(),
    }
  }
}

/// Acknowledgement returned by a publisher once a notification is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
  pub event_id: Uuid,
}

/// A fire-and-forget notification sink.
///
/// Delivery and consumption are the publisher's responsibility; callers only
/// learn whether the notification was accepted.
pub trait EventPublisher: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn publish(
    &self,
    notification: Notification,
  ) -> impl Future<Output = Result<PublishReceipt, Self::Error>> + Send + '_;
}
