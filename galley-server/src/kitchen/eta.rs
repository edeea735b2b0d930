//! Priority and ETA calculation
//!
//! Pure read-time decoration: nothing here is persisted. Priority drives
//! display emphasis only; the ETA model is a base estimate per order type
//! that degrades toward a 10-minute floor while preparation is under way.

use crate::db::models::KitchenOrder;
use serde::Serialize;
use shared::order::{OrderStatus, OrderType, Priority};

/// Floor the remaining estimate never drops below while preparing (minutes)
pub const PREP_FLOOR_MINUTES: i64 = 10;

/// Base preparation estimate by order type (minutes)
pub fn base_estimate_minutes(order_type: OrderType) -> i64 {
    match order_type {
        OrderType::DineIn => 25,
        OrderType::Takeaway => 15,
        OrderType::RoomService => 20,
    }
}

/// Effective display priority and the room-service flag.
///
/// Room service always surfaces as urgent; otherwise the order's own
/// priority applies, defaulting to normal.
pub fn effective_priority(order: &KitchenOrder) -> (Priority, bool) {
    if order.order_type == OrderType::RoomService {
        (Priority::Urgent, true)
    } else {
        (order.priority.unwrap_or_default(), false)
    }
}

/// When preparation started, from the audit trail
pub fn preparing_started_at(order: &KitchenOrder) -> Option<i64> {
    order
        .status_history
        .iter()
        .rev()
        .find(|entry| entry.status == OrderStatus::Preparing)
        .map(|entry| entry.updated_at)
}

/// Remaining preparation estimate in minutes.
///
/// `ready` reports 0; `preparing` degrades from the base toward the floor;
/// every other status reports the base unmodified.
pub fn remaining_minutes(order: &KitchenOrder, now_millis: i64) -> i64 {
    let base = base_estimate_minutes(order.order_type);
    match order.status {
        OrderStatus::Ready => 0,
        OrderStatus::Preparing => {
            let started = preparing_started_at(order).unwrap_or(now_millis);
            let elapsed = (now_millis - started).max(0) / 60_000;
            (base - elapsed).max(PREP_FLOOR_MINUTES)
        }
        _ => base,
    }
}

/// Absolute ETA (Unix millis) used for the overdue check.
///
/// Anchored at preparation start while preparing, otherwise at creation.
/// The 10-minute floor applies only to the displayed estimate; this
/// deadline is un-floored. None once the order is ready or terminal.
pub fn eta_deadline_millis(order: &KitchenOrder) -> Option<i64> {
    let base = base_estimate_minutes(order.order_type) * 60_000;
    match order.status {
        OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Scheduled => {
            Some(order.created_at + base)
        }
        OrderStatus::Preparing => {
            Some(preparing_started_at(order).unwrap_or(order.created_at) + base)
        }
        OrderStatus::Ready | OrderStatus::Delivered | OrderStatus::Cancelled => None,
    }
}

/// Past the absolute ETA and still not ready
pub fn is_overdue(order: &KitchenOrder, now_millis: i64) -> bool {
    eta_deadline_millis(order).is_some_and(|deadline| now_millis > deadline)
}

/// Read-time decoration attached to every queue entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDecoration {
    pub priority: Priority,
    pub is_room_service: bool,
    pub estimated_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_ready_at: Option<i64>,
    pub is_overdue: bool,
}

/// Compute the full decoration for one order
pub fn decorate(order: &KitchenOrder, now_millis: i64) -> TaskDecoration {
    let (priority, is_room_service) = effective_priority(order);
    TaskDecoration {
        priority,
        is_room_service,
        estimated_minutes: remaining_minutes(order, now_millis),
        estimated_ready_at: eta_deadline_millis(order),
        is_overdue: is_overdue(order, now_millis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{OrderItem, StatusEntry};

    const MINUTE: i64 = 60_000;

    fn order(order_type: OrderType, status: OrderStatus, created_at: i64) -> KitchenOrder {
        KitchenOrder {
            id: None,
            items: vec![OrderItem {
                item_ref: "menu:tagine".into(),
                name: "Lamb tagine".into(),
                quantity: 1,
                unit_price: 24.0,
            }],
            status,
            kitchen_status: None,
            order_type,
            is_part_of_meal_plan: false,
            scheduled_date: None,
            total_price: 24.0,
            priority: None,
            assigned_staff: None,
            assigned_at: None,
            assigned_by: None,
            status_history: vec![],
            customer: Default::default(),
            updated_by: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn preparing_since(order_type: OrderType, started_at: i64) -> KitchenOrder {
        let mut o = order(order_type, OrderStatus::Preparing, started_at - 5 * MINUTE);
        o.status_history.push(StatusEntry {
            status: OrderStatus::Preparing,
            updated_by: "staff:cook".into(),
            updated_at: started_at,
            notes: None,
        });
        o
    }

    #[test]
    fn room_service_is_forced_urgent() {
        let mut o = order(OrderType::RoomService, OrderStatus::Pending, 0);
        o.priority = Some(Priority::Low);
        let (priority, is_room_service) = effective_priority(&o);
        assert_eq!(priority, Priority::Urgent);
        assert!(is_room_service);
    }

    #[test]
    fn own_priority_applies_otherwise_defaulting_to_normal() {
        let mut o = order(OrderType::DineIn, OrderStatus::Pending, 0);
        assert_eq!(effective_priority(&o), (Priority::Normal, false));
        o.priority = Some(Priority::High);
        assert_eq!(effective_priority(&o), (Priority::High, false));
    }

    #[test]
    fn priority_ordering_for_display() {
        assert!(Priority::Urgent > Priority::High);
        assert!(Priority::High > Priority::Normal);
        assert!(Priority::Normal > Priority::Low);
    }

    #[test]
    fn dine_in_estimate_degrades_with_elapsed_time() {
        let o = preparing_since(OrderType::DineIn, 0);
        // 10 minutes in: 25 - 10 = 15
        assert_eq!(remaining_minutes(&o, 10 * MINUTE), 15);
    }

    #[test]
    fn estimate_floors_at_ten_minutes() {
        let o = preparing_since(OrderType::DineIn, 0);
        // 20 minutes in: would be 5, floors at 10
        assert_eq!(remaining_minutes(&o, 20 * MINUTE), 10);
        // even far beyond the base
        assert_eq!(remaining_minutes(&o, 90 * MINUTE), 10);
    }

    #[test]
    fn ready_reports_zero() {
        let o = order(OrderType::DineIn, OrderStatus::Ready, 0);
        assert_eq!(remaining_minutes(&o, 40 * MINUTE), 0);
    }

    #[test]
    fn non_preparing_statuses_report_the_base() {
        assert_eq!(
            remaining_minutes(&order(OrderType::Takeaway, OrderStatus::Pending, 0), 0),
            15
        );
        assert_eq!(
            remaining_minutes(&order(OrderType::RoomService, OrderStatus::Confirmed, 0), 0),
            20
        );
    }

    #[test]
    fn overdue_uses_the_unfloored_deadline() {
        let o = preparing_since(OrderType::Takeaway, 0);
        // base 15min from preparation start
        assert!(!is_overdue(&o, 14 * MINUTE));
        assert!(is_overdue(&o, 16 * MINUTE));
        // the displayed estimate is floored, yet overdue still fires
        assert_eq!(remaining_minutes(&o, 16 * MINUTE), 10);
    }

    #[test]
    fn pending_overdue_is_anchored_at_creation() {
        let o = order(OrderType::DineIn, OrderStatus::Pending, 0);
        assert!(!is_overdue(&o, 24 * MINUTE));
        assert!(is_overdue(&o, 26 * MINUTE));
    }

    #[test]
    fn ready_and_terminal_orders_are_never_overdue() {
        for status in [OrderStatus::Ready, OrderStatus::Delivered, OrderStatus::Cancelled] {
            let o = order(OrderType::DineIn, status, 0);
            assert!(!is_overdue(&o, 1000 * MINUTE), "{status} flagged overdue");
        }
    }
}
