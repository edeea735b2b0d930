//! Real-time message envelope shared by server and kitchen terminals
//!
//! Delivery is best-effort and at-least-once: there is no acknowledgment
//! and no replay. Terminals compensate by polling the queue endpoint every
//! [`CLIENT_POLL_INTERVAL_SECS`] seconds; the `version` counter lets them
//! detect a gap within a topic without waiting for the next poll.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::util::now_millis;

/// Fixed reconciliation poll interval for all terminals (seconds)
pub const CLIENT_POLL_INTERVAL_SECS: u64 = 30;

// ============================================================================
// Topics
// ============================================================================

/// Broadcast destination: a staff role channel or a single staff member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "scope", content = "name", rename_all = "lowercase")]
pub enum Topic {
    Role(String),
    User(String),
}

impl Topic {
    pub fn role(name: impl Into<String>) -> Self {
        Self::Role(name.into())
    }

    pub fn user(id: impl Into<String>) -> Self {
        Self::User(id.into())
    }

    /// The channel every kitchen terminal joins
    pub fn kitchen() -> Self {
        Self::Role("kitchen".to_string())
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Role(name) => write!(f, "role:{name}"),
            Self::User(id) => write!(f, "user:{id}"),
        }
    }
}

// ============================================================================
// Kitchen Events
// ============================================================================

/// Lifecycle event names carried on the bus
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum KitchenEvent {
    /// A new order entered the kitchen queue
    NewFoodTask,
    /// An order was assigned to a staff member (sent to their user topic)
    FoodTaskAssigned,
    /// An accepted status transition
    OrderStatusChanged,
    /// The ordering collaborator modified an order
    OrderModified,
    /// The ordering collaborator cancelled an order
    OrderCancelled,
}

impl fmt::Display for KitchenEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewFoodTask => write!(f, "newFoodTask"),
            Self::FoodTaskAssigned => write!(f, "foodTaskAssigned"),
            Self::OrderStatusChanged => write!(f, "orderStatusChanged"),
            Self::OrderModified => write!(f, "orderModified"),
            Self::OrderCancelled => write!(f, "orderCancelled"),
        }
    }
}

// ============================================================================
// Bus Message
// ============================================================================

/// One published event, addressed to a single topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusMessage {
    pub topic: Topic,
    pub event: KitchenEvent,
    /// Serialized event payload (order snapshot or id envelope)
    pub payload: serde_json::Value,
    /// Per-topic monotonic counter, assigned by the publisher
    pub version: u64,
    pub message_id: Uuid,
    /// Server timestamp, Unix millis
    pub timestamp: i64,
}

impl BusMessage {
    pub fn new(topic: Topic, event: KitchenEvent, payload: serde_json::Value) -> Self {
        Self {
            topic,
            event,
            payload,
            version: 0,
            message_id: Uuid::new_v4(),
            timestamp: now_millis(),
        }
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }
}

// ============================================================================
// Inbound Signals
// ============================================================================

/// Signals published by the external ordering collaborator.
///
/// The kitchen server turns these into [`KitchenEvent`] broadcasts; it never
/// originates them itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum OrderSignal {
    Placed { order_id: String },
    Modified { order_id: String },
    Cancelled { order_id: String },
}

impl OrderSignal {
    pub fn order_id(&self) -> &str {
        match self {
            Self::Placed { order_id }
            | Self::Modified { order_id }
            | Self::Cancelled { order_id } => order_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_serialize_camel_case() {
        let json = serde_json::to_string(&KitchenEvent::NewFoodTask).unwrap();
        assert_eq!(json, "\"newFoodTask\"");
        let json = serde_json::to_string(&KitchenEvent::OrderStatusChanged).unwrap();
        assert_eq!(json, "\"orderStatusChanged\"");
    }

    #[test]
    fn topic_display_is_scoped() {
        assert_eq!(Topic::kitchen().to_string(), "role:kitchen");
        assert_eq!(Topic::user("staff:ab12").to_string(), "user:staff:ab12");
    }

    #[test]
    fn order_signal_round_trips() {
        let signal = OrderSignal::Placed {
            order_id: "kitchen_order:42".into(),
        };
        let json = serde_json::to_string(&signal).unwrap();
        let back: OrderSignal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, signal);
        assert_eq!(back.order_id(), "kitchen_order:42");
    }
}
