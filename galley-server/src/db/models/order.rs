//! Kitchen Order Model
//!
//! The unit of work tracked through the kitchen lifecycle. Created by the
//! external ordering collaborator in `pending` (or `scheduled` for meal
//! plans); mutated only through the status transition and assignment paths;
//! never deleted here.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::order::{CustomerDetails, OrderItem, OrderStatus, OrderType, Priority, StatusEntry};
use surrealdb::RecordId;

/// Table name for kitchen orders
pub const ORDER_TABLE: &str = "kitchen_order";

/// Kitchen order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenOrder {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Line items; never empty
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Secondary kitchen-display status, kept in lockstep by transitions.
    /// Treated as equivalent to `status` for explicit status filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kitchen_status: Option<OrderStatus>,
    pub order_type: OrderType,
    #[serde(default)]
    pub is_part_of_meal_plan: bool,
    /// Intended service date (Unix millis); set only for meal-plan orders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<i64>,
    /// Derived by the external pricing collaborator
    #[serde(default)]
    pub total_price: f64,
    /// Own display priority; room-service overrides to urgent at read time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub assigned_staff: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_by: Option<String>,
    /// Append-only audit trail; one entry per accepted transition/assignment
    #[serde(default)]
    pub status_history: Vec<StatusEntry>,
    #[serde(default)]
    pub customer: CustomerDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    /// Unix millis, set by the store on create
    pub created_at: i64,
    pub updated_at: i64,
}

impl KitchenOrder {
    /// String form of the record id ("kitchen_order:xyz")
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }
}

/// Create payload used by the ordering collaborator and tests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub is_part_of_meal_plan: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<i64>,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub customer: CustomerDetails,
}
