//! Transition application
//!
//! Validates a requested status change against the shared transition table
//! and produces the audit entry to append. The order is never touched on
//! failure; the repository applies the accepted plan in a single update.

use crate::db::models::KitchenOrder;
use shared::order::{OrderStatus, StatusEntry, TransitionError, lifecycle};

/// An accepted transition, ready to be written
#[derive(Debug, Clone)]
pub struct TransitionPlan {
    pub target: OrderStatus,
    pub entry: StatusEntry,
}

/// Validate `target` against the order's current status.
///
/// On success the plan carries the history entry for the **new** status;
/// on failure the order is left untouched and the error names both ends.
pub fn plan_transition(
    order: &KitchenOrder,
    target: OrderStatus,
    actor_id: &str,
    notes: Option<String>,
    now_millis: i64,
) -> Result<TransitionPlan, TransitionError> {
    lifecycle::check_transition(order.status, target)?;

    Ok(TransitionPlan {
        target,
        entry: StatusEntry {
            status: target,
            updated_by: actor_id.to_string(),
            updated_at: now_millis,
            notes,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{OrderItem, OrderType};

    fn order(status: OrderStatus) -> KitchenOrder {
        KitchenOrder {
            id: None,
            items: vec![OrderItem {
                item_ref: "menu:soup".into(),
                name: "Harira".into(),
                quantity: 2,
                unit_price: 8.5,
            }],
            status,
            kitchen_status: None,
            order_type: OrderType::DineIn,
            is_part_of_meal_plan: false,
            scheduled_date: None,
            total_price: 17.0,
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

    #[test]
    fn accepted_plan_records_the_new_status_and_actor() {
        let o = order(OrderStatus::Pending);
        let plan =
            plan_transition(&o, OrderStatus::Confirmed, "staff:chef", Some("table 9".into()), 123)
                .unwrap();
        assert_eq!(plan.target, OrderStatus::Confirmed);
        assert_eq!(plan.entry.status, OrderStatus::Confirmed);
        assert_eq!(plan.entry.updated_by, "staff:chef");
        assert_eq!(plan.entry.updated_at, 123);
        assert_eq!(plan.entry.notes.as_deref(), Some("table 9"));
    }

    #[test]
    fn rejected_plan_names_current_and_requested() {
        let o = order(OrderStatus::Pending);
        let err = plan_transition(&o, OrderStatus::Ready, "staff:chef", None, 0).unwrap_err();
        assert_eq!(err.from, OrderStatus::Pending);
        assert_eq!(err.to, OrderStatus::Ready);
    }

    #[test]
    fn terminal_orders_reject_everything() {
        let o = order(OrderStatus::Delivered);
        for target in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Cancelled,
        ] {
            assert!(plan_transition(&o, target, "staff:chef", None, 0).is_err());
        }
    }
}
