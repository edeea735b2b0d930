//! Kitchen event broadcaster
//!
//! Publishes lifecycle events to role- and user-scoped topics. Every call
//! happens strictly after the corresponding store write has succeeded, and
//! every failure is logged and swallowed: a missed broadcast is reconciled
//! by the terminals' periodic queue poll, never by failing the write.

use std::sync::Arc;

use serde_json::json;
use shared::message::{KitchenEvent, Topic};

use super::bus::Publisher;
use crate::db::models::KitchenOrder;

/// Fans kitchen lifecycle events out to the bus
#[derive(Clone)]
pub struct KitchenBroadcaster {
    publisher: Arc<dyn Publisher>,
}

impl KitchenBroadcaster {
    pub fn new(publisher: Arc<dyn Publisher>) -> Self {
        Self { publisher }
    }

    /// A new order entered the queue (kitchen channel)
    pub fn new_food_task(&self, order: &KitchenOrder) {
        self.emit(Topic::kitchen(), KitchenEvent::NewFoodTask, order);
    }

    /// An order was assigned; delivered to the assignee's user channel
    pub fn food_task_assigned(&self, order: &KitchenOrder, assignee_id: &str) {
        self.emit(Topic::user(assignee_id), KitchenEvent::FoodTaskAssigned, order);
    }

    /// An accepted status transition (kitchen channel)
    pub fn order_status_changed(&self, order: &KitchenOrder) {
        self.emit(Topic::kitchen(), KitchenEvent::OrderStatusChanged, order);
    }

    /// External modification signal (kitchen channel)
    pub fn order_modified(&self, order: &KitchenOrder) {
        self.emit(Topic::kitchen(), KitchenEvent::OrderModified, order);
    }

    /// External cancellation signal (kitchen channel)
    pub fn order_cancelled(&self, order: &KitchenOrder) {
        self.emit(Topic::kitchen(), KitchenEvent::OrderCancelled, order);
    }

    fn emit(&self, topic: Topic, event: KitchenEvent, order: &KitchenOrder) {
        let payload = match serde_json::to_value(order) {
            Ok(snapshot) => json!({ "orderId": order.id_string(), "order": snapshot }),
            Err(e) => {
                tracing::warn!(event = %event, error = %e, "Failed to serialize event payload");
                json!({ "orderId": order.id_string() })
            }
        };

        if let Err(e) = self.publisher.publish(topic, event, payload) {
            tracing::warn!(event = %event, error = %e, "Event publish failed, relying on poll");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::bus::{MessageBus, PublishError};
    use shared::order::{OrderItem, OrderStatus, OrderType};

    fn order() -> KitchenOrder {
        KitchenOrder {
            id: None,
            items: vec![OrderItem {
                item_ref: "menu:kebab".into(),
                name: "Shish kebab".into(),
                quantity: 1,
                unit_price: 16.0,
            }],
            status: OrderStatus::Pending,
            kitchen_status: None,
            order_type: OrderType::RoomService,
            is_part_of_meal_plan: false,
            scheduled_date: None,
            total_price: 16.0,
            priority: None,
            assigned_staff: None,
            assigned_at: None,
            assigned_by: None,
            status_history: vec![],
            customer: Default::default(),
            updated_by: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    struct FailingPublisher;

    impl Publisher for FailingPublisher {
        fn publish(
            &self,
            topic: Topic,
            _event: KitchenEvent,
            _payload: serde_json::Value,
        ) -> Result<u64, PublishError> {
            Err(PublishError {
                topic: topic.to_string(),
                reason: "down".into(),
            })
        }
    }

    #[tokio::test]
    async fn status_change_reaches_the_kitchen_topic() {
        let bus = MessageBus::with_capacity(8);
        let mut sub = bus.subscribe_topic(Topic::kitchen());
        let broadcaster = KitchenBroadcaster::new(Arc::new(bus));

        broadcaster.order_status_changed(&order());

        let msg = sub.recv().await.unwrap();
        assert_eq!(msg.event, KitchenEvent::OrderStatusChanged);
        assert!(msg.payload.get("order").is_some());
    }

    #[tokio::test]
    async fn assignment_targets_the_assignee_channel() {
        let bus = MessageBus::with_capacity(8);
        let mut sub = bus.subscribe_topic(Topic::user("staff:amara"));
        let broadcaster = KitchenBroadcaster::new(Arc::new(bus));

        broadcaster.food_task_assigned(&order(), "staff:amara");

        let msg = sub.recv().await.unwrap();
        assert_eq!(msg.event, KitchenEvent::FoodTaskAssigned);
    }

    #[test]
    fn publish_failure_is_swallowed() {
        let broadcaster = KitchenBroadcaster::new(Arc::new(FailingPublisher));
        // must not panic or propagate
        broadcaster.new_food_task(&order());
        broadcaster.order_cancelled(&order());
    }
}
