//! Message bus core
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     MessageBus                          │
//! │  outbound: broadcast::Sender<BusMessage>  ──► terminals │
//! │  inbound:  broadcast::Sender<OrderSignal> ◄── ordering  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Terminals subscribe to their role topic and their own user topic;
//! filtering happens subscriber-side so the publish path stays a single
//! non-blocking channel send. Delivery is best-effort: a full or empty
//! channel never blocks the write path that triggered the publish.

use std::sync::Arc;

use dashmap::DashMap;
use shared::message::{BusMessage, KitchenEvent, OrderSignal, Topic};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// Per-topic monotonic version counters.
///
/// Lock-free via DashMap; each topic's counter increments atomically per
/// publish so terminals can spot a missed event between polls.
#[derive(Debug, Default)]
pub struct TopicVersions {
    versions: DashMap<String, u64>,
}

impl TopicVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment a topic's version and return the new value
    pub fn increment(&self, topic: &Topic) -> u64 {
        let mut entry = self.versions.entry(topic.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version, 0 when the topic has never been published to
    pub fn get(&self, topic: &Topic) -> u64 {
        self.versions
            .get(&topic.to_string())
            .map(|v| *v)
            .unwrap_or(0)
    }
}

/// Publish failure; best-effort callers log and move on
#[derive(Debug, thiserror::Error)]
#[error("publish to '{topic}' failed: {reason}")]
pub struct PublishError {
    pub topic: String,
    pub reason: String,
}

/// Swappable publish side of the bus.
///
/// The broadcaster depends on this trait so the transport (in-process bus,
/// external broker) can change without touching the write paths.
pub trait Publisher: Send + Sync {
    fn publish(
        &self,
        topic: Topic,
        event: KitchenEvent,
        payload: serde_json::Value,
    ) -> Result<u64, PublishError>;
}

/// In-process message bus for kitchen terminals
#[derive(Debug, Clone)]
pub struct MessageBus {
    /// Server → terminals
    outbound_tx: broadcast::Sender<BusMessage>,
    /// Ordering collaborator → server
    inbound_tx: broadcast::Sender<OrderSignal>,
    versions: Arc<TopicVersions>,
    shutdown_token: CancellationToken,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (outbound_tx, _) = broadcast::channel(capacity);
        let (inbound_tx, _) = broadcast::channel(capacity);
        Self {
            outbound_tx,
            inbound_tx,
            versions: Arc::new(TopicVersions::new()),
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Subscribe to every outbound message (router/debug use)
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.outbound_tx.subscribe()
    }

    /// Subscribe to a single topic
    pub fn subscribe_topic(&self, topic: Topic) -> TopicSubscription {
        TopicSubscription {
            topic,
            rx: self.outbound_tx.subscribe(),
        }
    }

    /// Inject an ordering-collaborator signal
    pub fn send_signal(&self, signal: OrderSignal) -> Result<(), PublishError> {
        self.inbound_tx.send(signal).map(|_| ()).map_err(|e| PublishError {
            topic: "inbound".to_string(),
            reason: e.to_string(),
        })
    }

    /// Subscribe to ordering-collaborator signals (signal worker)
    pub fn subscribe_signals(&self) -> broadcast::Receiver<OrderSignal> {
        self.inbound_tx.subscribe()
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// Cancel all bus-driven background tasks
    pub fn shutdown(&self) {
        tracing::info!("Shutting down message bus");
        self.shutdown_token.cancel();
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Publisher for MessageBus {
    fn publish(
        &self,
        topic: Topic,
        event: KitchenEvent,
        payload: serde_json::Value,
    ) -> Result<u64, PublishError> {
        let version = self.versions.increment(&topic);
        let msg = BusMessage::new(topic.clone(), event, payload).with_version(version);
        self.outbound_tx.send(msg).map_err(|e| PublishError {
            topic: topic.to_string(),
            reason: e.to_string(),
        })?;
        Ok(version)
    }
}

/// A receiver narrowed to one topic
pub struct TopicSubscription {
    topic: Topic,
    rx: broadcast::Receiver<BusMessage>,
}

impl TopicSubscription {
    /// Next message on this topic; None once the bus is gone.
    ///
    /// A lagged receiver skips ahead rather than erroring — the 30s queue
    /// poll reconciles whatever was dropped.
    pub async fn recv(&mut self) -> Option<BusMessage> {
        loop {
            match self.rx.recv().await {
                Ok(msg) if msg.topic == self.topic => return Some(msg),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        topic = %self.topic,
                        skipped,
                        "Subscriber lagged, events dropped"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn topic_subscription_filters_other_topics() {
        let bus = MessageBus::with_capacity(16);
        let mut kitchen = bus.subscribe_topic(Topic::kitchen());

        bus.publish(
            Topic::user("staff:amara"),
            KitchenEvent::FoodTaskAssigned,
            json!({"orderId": "kitchen_order:1"}),
        )
        .unwrap();
        bus.publish(
            Topic::kitchen(),
            KitchenEvent::OrderStatusChanged,
            json!({"orderId": "kitchen_order:2"}),
        )
        .unwrap();

        let msg = kitchen.recv().await.unwrap();
        assert_eq!(msg.event, KitchenEvent::OrderStatusChanged);
        assert_eq!(msg.topic, Topic::kitchen());
    }

    #[tokio::test]
    async fn versions_increment_per_topic() {
        let bus = MessageBus::with_capacity(16);
        let _keepalive = bus.subscribe();

        let v1 = bus
            .publish(Topic::kitchen(), KitchenEvent::NewFoodTask, json!({}))
            .unwrap();
        let v2 = bus
            .publish(Topic::kitchen(), KitchenEvent::NewFoodTask, json!({}))
            .unwrap();
        let other = bus
            .publish(Topic::user("staff:x"), KitchenEvent::FoodTaskAssigned, json!({}))
            .unwrap();

        assert_eq!((v1, v2), (1, 2));
        assert_eq!(other, 1);
    }

    #[tokio::test]
    async fn publish_without_subscribers_errors_but_is_best_effort() {
        let bus = MessageBus::with_capacity(16);
        // no subscribers: the send fails, callers are expected to swallow
        assert!(
            bus.publish(Topic::kitchen(), KitchenEvent::NewFoodTask, json!({}))
                .is_err()
        );
    }

    #[tokio::test]
    async fn signals_reach_the_signal_channel() {
        let bus = MessageBus::with_capacity(16);
        let mut rx = bus.subscribe_signals();
        bus.send_signal(OrderSignal::Cancelled {
            order_id: "kitchen_order:9".into(),
        })
        .unwrap();
        let signal = rx.recv().await.unwrap();
        assert_eq!(signal.order_id(), "kitchen_order:9");
    }
}
