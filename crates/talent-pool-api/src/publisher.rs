//! In-process event bus.
//!
//! [`BroadcastPublisher`] owns one named bus backed by a
//! [`tokio::sync::broadcast`] channel. Any number of consumers may
//! [`subscribe`](BroadcastPublisher::subscribe); publishing never waits for
//! them.

use talent_pool_core::event::{EventPublisher, Notification, PublishReceipt};
use thiserror::Error;
use tokio::sync::broadcast;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown event bus: {0}")]
  UnknownBus(String),
}

/// A notification as seen by subscribers, tagged with its event id.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedEvent {
  pub event_id:     Uuid,
  pub notification: Notification,
}

pub struct BroadcastPublisher {
  bus:    String,
  sender: broadcast::Sender<PublishedEvent>,
}

impl BroadcastPublisher {
  /// Create a bus named `bus` that buffers up to `capacity` events per
  /// lagging subscriber.
  pub fn new(bus: impl Into<String>, capacity: usize) -> Self {
    let (sender, _) = broadcast::channel(capacity.max(1));
    Self {
      bus: bus.into(),
      sender,
    }
  }

  pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
    self.sender.subscribe()
  }
}

impl EventPublisher for BroadcastPublisher {
  type Error = Error;

  async fn publish(&self, notification: Notification) -> Result<PublishReceipt, Error> {
    if notification.event_bus != self.bus {
      return Err(Error::UnknownBus(notification.event_bus));
    }

    let event_id = Uuid::new_v4();
    match self.sender.send(PublishedEvent { event_id, notification }) {
      Ok(receivers) => tracing::debug!(%event_id, receivers, "event delivered"),
      // Nobody listening is not a failure for a fire-and-forget bus.
      Err(_) => tracing::debug!(%event_id, bus = %self.bus, "event dropped, no subscribers"),
    }

    Ok(PublishReceipt { event_id })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn notification(bus: &str) -> Notification {
    Notification::talent(bus, "tests", "Registered talent t-1")
  }

  #[tokio::test]
  async fn subscribers_receive_published_events() {
    let publisher = BroadcastPublisher::new("talent-registered", 8);
    let mut first = publisher.subscribe();
    let mut second = publisher.subscribe();

    let receipt = publisher.publish(notification("talent-registered")).await.unwrap();

    for rx in [&mut first, &mut second] {
      let event = rx.recv().await.unwrap();
      assert_eq!(event.event_id, receipt.event_id);
      assert_eq!(event.notification.detail, "Registered talent t-1");
    }
  }

  #[tokio::test]
  async fn publishing_without_subscribers_succeeds() {
    let publisher = BroadcastPublisher::new("talent-registered", 8);
    assert!(publisher.publish(notification("talent-registered")).await.is_ok());
  }

  #[tokio::test]
  async fn unknown_bus_is_rejected() {
    let publisher = BroadcastPublisher::new("talent-registered", 8);
    let mut rx = publisher.subscribe();

    let err = publisher.publish(notification("other")).await.unwrap_err();
    assert_eq!(err.to_string(), "unknown event bus: other");
    assert!(rx.try_recv().is_err());
  }

  #[tokio::test]
  async fn receipts_are_unique() {
    let publisher = BroadcastPublisher::new("talent-registered", 1);
    let a = publisher.publish(notification("talent-registered")).await.unwrap();
    let b = publisher.publish(notification("talent-registered")).await.unwrap();
    assert_ne!(a.event_id, b.event_id);
  }

  #[tokio::test]
  async fn zero_capacity_is_clamped() {
    let publisher = BroadcastPublisher::new("talent-registered", 0);
    let mut rx = publisher.subscribe();
    publisher.publish(notification("talent-registered")).await.unwrap();
    assert!(rx.try_recv().is_ok());
  }
}
