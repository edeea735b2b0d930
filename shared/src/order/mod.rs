//! Kitchen order domain types
//!
//! The order model as seen by both the server and the kitchen terminals:
//! status set, lifecycle transition table, order/item shapes, staff roles.

pub mod lifecycle;
pub mod types;

pub use lifecycle::{TransitionError, allowed_targets, can_transition, is_active, is_terminal};
pub use types::{
    CustomerDetails, OrderItem, OrderStatus, OrderType, Priority, StaffRole, StatusEntry,
};
