//! Database models

pub mod order;
pub mod serde_helpers;
pub mod staff;

pub use order::{KitchenOrder, ORDER_TABLE, OrderCreate};
pub use staff::{STAFF_TABLE, Staff, StaffCreate};
