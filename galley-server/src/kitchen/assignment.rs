//! Staff assignment
//!
//! Binds an order to an eligible staff member. Assignment never changes the
//! order status; it appends an audit entry at the current status so the
//! trail records who was holding the order when. Reassignment simply
//! overwrites the assignment fields; the previous assignee survives only in
//! the history notes.

use crate::db::models::{KitchenOrder, Staff};
use crate::utils::AppError;
use shared::order::StatusEntry;

/// Check role eligibility for kitchen work.
///
/// Eligible roles are staff, manager and admin; the record must be active
/// in the directory at assignment time. Not re-validated retroactively.
pub fn ensure_assignable(staff: &Staff) -> Result<(), AppError> {
    if !staff.role.is_assignable() {
        return Err(AppError::invalid_staff(format!(
            "staff '{}' has role '{}', expected one of: staff, manager, admin",
            staff.name, staff.role
        )));
    }
    if !staff.is_active {
        return Err(AppError::invalid_staff(format!(
            "staff '{}' is not active",
            staff.name
        )));
    }
    Ok(())
}

/// History entry recorded for an assignment, at the order's current status
pub fn assignment_entry(
    order: &KitchenOrder,
    staff: &Staff,
    actor_id: &str,
    now_millis: i64,
) -> StatusEntry {
    StatusEntry {
        status: order.status,
        updated_by: actor_id.to_string(),
        updated_at: now_millis,
        notes: Some(format!("Assigned to {}", staff.name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::AppError;
    use shared::order::{OrderItem, OrderStatus, OrderType, StaffRole};

    fn staff(role: StaffRole, is_active: bool) -> Staff {
        Staff {
            id: None,
            name: "Amara".into(),
            role,
            department: Some("kitchen".into()),
            is_active,
        }
    }

    fn order() -> KitchenOrder {
        KitchenOrder {
            id: None,
            items: vec![OrderItem {
                item_ref: "menu:salad".into(),
                name: "Fattoush".into(),
                quantity: 1,
                unit_price: 11.0,
            }],
            status: OrderStatus::Confirmed,
            kitchen_status: None,
            order_type: OrderType::DineIn,
            is_part_of_meal_plan: false,
            scheduled_date: None,
            total_price: 11.0,
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
    fn staff_manager_admin_are_assignable() {
        for role in [StaffRole::Staff, StaffRole::Manager, StaffRole::Admin] {
            assert!(ensure_assignable(&staff(role, true)).is_ok());
        }
    }

    #[test]
    fn guest_role_is_rejected() {
        let err = ensure_assignable(&staff(StaffRole::Guest, true)).unwrap_err();
        assert!(matches!(err, AppError::InvalidStaff(_)));
    }

    #[test]
    fn inactive_staff_is_rejected() {
        let err = ensure_assignable(&staff(StaffRole::Staff, false)).unwrap_err();
        assert!(matches!(err, AppError::InvalidStaff(_)));
    }

    #[test]
    fn entry_keeps_the_current_status_and_names_the_assignee() {
        let entry = assignment_entry(&order(), &staff(StaffRole::Staff, true), "staff:boss", 77);
        assert_eq!(entry.status, OrderStatus::Confirmed);
        assert_eq!(entry.updated_by, "staff:boss");
        assert_eq!(entry.notes.as_deref(), Some("Assigned to Amara"));
    }
}
