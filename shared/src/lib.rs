//! Shared types for the Galley kitchen server
//!
//! Types crossing the server/terminal boundary: the kitchen order data
//! model, the status lifecycle, staff roles, and the real-time message
//! envelope. This crate performs no I/O.

pub mod message;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Message bus re-exports (for convenient access)
pub use message::{BusMessage, KitchenEvent, Topic};
pub use order::{OrderStatus, OrderType, Priority, StaffRole};
